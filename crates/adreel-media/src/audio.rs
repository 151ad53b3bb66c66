//! In-memory PCM audio clips.
//!
//! Narration and music beds are manipulated as interleaved 16-bit PCM
//! buffers so the mixdown math (looping, truncation, ducking, overlay) is
//! sample-exact and independent of any external tool. WAV files are read
//! and written directly; other formats are decoded through FFmpeg into a
//! temporary WAV at the pipeline's working spec.

use std::path::Path;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Working sample rate for all pipeline audio.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Working channel count for all pipeline audio.
pub const DEFAULT_CHANNELS: u16 = 2;

/// PCM stream parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSpec {
    pub channels: u16,
    pub sample_rate: u32,
}

impl Default for AudioSpec {
    fn default() -> Self {
        Self {
            channels: DEFAULT_CHANNELS,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

/// An interleaved 16-bit PCM clip.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    spec: AudioSpec,
    samples: Vec<i16>,
}

impl AudioBuffer {
    /// Wrap existing interleaved samples.
    pub fn from_samples(spec: AudioSpec, samples: Vec<i16>) -> MediaResult<Self> {
        if spec.channels == 0 || spec.sample_rate == 0 {
            return Err(MediaError::invalid_audio("zero channels or sample rate"));
        }
        if samples.len() % spec.channels as usize != 0 {
            return Err(MediaError::invalid_audio(
                "sample count not divisible by channel count",
            ));
        }
        Ok(Self { spec, samples })
    }

    /// A silent clip of the given duration, rounded to whole frames.
    pub fn silence(duration_secs: f64, spec: AudioSpec) -> Self {
        let frames = (duration_secs.max(0.0) * spec.sample_rate as f64).round() as usize;
        Self {
            spec,
            samples: vec![0; frames * spec.channels as usize],
        }
    }

    /// Stream parameters.
    pub fn spec(&self) -> AudioSpec {
        self.spec
    }

    /// Interleaved samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.spec.channels as usize
    }

    /// Clip duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / self.spec.sample_rate as f64
    }

    /// Apply a gain in decibels to every sample.
    pub fn gain_db(mut self, db: f64) -> Self {
        let factor = 10f64.powf(db / 20.0);
        for sample in &mut self.samples {
            let scaled = (*sample as f64 * factor).round();
            *sample = scaled.clamp(i16::MIN as f64, i16::MAX as f64) as i16;
        }
        self
    }

    /// Loop-or-truncate this clip to exactly `target_frames` frames.
    ///
    /// Shorter clips are repeated (ceiling of target/len repetitions) and
    /// then cut; longer clips are cut directly. An empty clip yields
    /// silence of the target length.
    pub fn fit_to_frames(&self, target_frames: usize) -> Self {
        let channels = self.spec.channels as usize;
        let target_len = target_frames * channels;

        if self.samples.is_empty() {
            return Self {
                spec: self.spec,
                samples: vec![0; target_len],
            };
        }

        let mut samples = Vec::with_capacity(target_len);
        while samples.len() < target_len {
            let remaining = target_len - samples.len();
            let take = remaining.min(self.samples.len());
            samples.extend_from_slice(&self.samples[..take]);
        }

        Self {
            spec: self.spec,
            samples,
        }
    }

    /// Overlay another clip on top of this one with saturating addition.
    ///
    /// Both clips must share a spec. The result is as long as the longer
    /// clip.
    pub fn overlay(&self, other: &AudioBuffer) -> MediaResult<Self> {
        if self.spec != other.spec {
            return Err(MediaError::SampleSpecMismatch(format!(
                "{:?} vs {:?}",
                self.spec, other.spec
            )));
        }

        let (longer, shorter) = if self.samples.len() >= other.samples.len() {
            (&self.samples, &other.samples)
        } else {
            (&other.samples, &self.samples)
        };

        let mut samples = longer.clone();
        for (dst, src) in samples.iter_mut().zip(shorter.iter()) {
            *dst = dst.saturating_add(*src);
        }

        Ok(Self {
            spec: self.spec,
            samples,
        })
    }

    /// Read a WAV file into a buffer.
    pub fn from_wav(path: impl AsRef<Path>) -> MediaResult<Self> {
        let path = path.as_ref();
        let mut reader = hound::WavReader::open(path)?;
        let wav_spec = reader.spec();

        let samples: Vec<i16> = match wav_spec.sample_format {
            hound::SampleFormat::Int => {
                reader.samples::<i16>().collect::<Result<_, _>>()?
            }
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .map(|s| s.map(|v| (v.clamp(-1.0, 1.0) * i16::MAX as f32) as i16))
                .collect::<Result<_, _>>()?,
        };

        Self::from_samples(
            AudioSpec {
                channels: wav_spec.channels,
                sample_rate: wav_spec.sample_rate,
            },
            samples,
        )
    }

    /// Write the buffer to a 16-bit PCM WAV file.
    pub fn write_wav(&self, path: impl AsRef<Path>) -> MediaResult<()> {
        let spec = hound::WavSpec {
            channels: self.spec.channels,
            sample_rate: self.spec.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path.as_ref(), spec)?;
        for sample in &self.samples {
            writer.write_sample(*sample)?;
        }
        writer.finalize()?;
        Ok(())
    }
}

/// Read any audio file into a buffer at the target spec.
///
/// WAV files already at the target spec are read directly; everything else
/// goes through an FFmpeg decode into a temporary WAV with `-ar`/`-ac`
/// resampling.
pub async fn read_audio(path: impl AsRef<Path>, target: AudioSpec) -> MediaResult<AudioBuffer> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    let is_wav = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("wav"))
        .unwrap_or(false);

    if is_wav {
        let buffer = AudioBuffer::from_wav(path)?;
        if buffer.spec() == target {
            return Ok(buffer);
        }
    }

    let tmp = tempfile::tempdir()?;
    let decoded = tmp.path().join("decoded.wav");

    let cmd = FfmpegCommand::new(&decoded)
        .input(path)
        .output_args([
            "-ar".to_string(),
            target.sample_rate.to_string(),
            "-ac".to_string(),
            target.channels.to_string(),
        ])
        .audio_codec("pcm_s16le");

    FfmpegRunner::new().run(&cmd).await?;

    AudioBuffer::from_wav(&decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> AudioSpec {
        AudioSpec {
            channels: 2,
            sample_rate: 100,
        }
    }

    #[test]
    fn test_silence_duration_is_exact() {
        let clip = AudioBuffer::silence(1.5, spec());
        assert_eq!(clip.frames(), 150);
        assert!((clip.duration_secs() - 1.5).abs() < 1e-9);
        assert!(clip.samples().iter().all(|&s| s == 0));
    }

    #[test]
    fn test_fit_to_frames_loops_then_truncates() {
        // 2 frames of stereo
        let short = AudioBuffer::from_samples(spec(), vec![1, 2, 3, 4]).unwrap();
        let fitted = short.fit_to_frames(5);
        assert_eq!(fitted.frames(), 5);
        assert_eq!(fitted.samples(), &[1, 2, 3, 4, 1, 2, 3, 4, 1, 2]);
    }

    #[test]
    fn test_fit_to_frames_truncates_longer() {
        let long = AudioBuffer::from_samples(spec(), vec![9; 20]).unwrap();
        let fitted = long.fit_to_frames(3);
        assert_eq!(fitted.frames(), 3);
    }

    #[test]
    fn test_fit_empty_yields_silence() {
        let empty = AudioBuffer::from_samples(spec(), vec![]).unwrap();
        let fitted = empty.fit_to_frames(4);
        assert_eq!(fitted.frames(), 4);
        assert!(fitted.samples().iter().all(|&s| s == 0));
    }

    #[test]
    fn test_gain_db_attenuates() {
        let clip = AudioBuffer::from_samples(spec(), vec![10000, -10000]).unwrap();
        let ducked = clip.gain_db(-15.0);
        // -15 dB is a factor of ~0.1778
        assert!((ducked.samples()[0] as f64 - 1778.0).abs() < 2.0);
        assert!((ducked.samples()[1] as f64 + 1778.0).abs() < 2.0);
    }

    #[test]
    fn test_overlay_saturates() {
        let a = AudioBuffer::from_samples(spec(), vec![i16::MAX, 100]).unwrap();
        let b = AudioBuffer::from_samples(spec(), vec![1000, 100]).unwrap();
        let mixed = a.overlay(&b).unwrap();
        assert_eq!(mixed.samples(), &[i16::MAX, 200]);
    }

    #[test]
    fn test_overlay_spec_mismatch_is_error() {
        let a = AudioBuffer::silence(1.0, spec());
        let b = AudioBuffer::silence(
            1.0,
            AudioSpec {
                channels: 1,
                sample_rate: 100,
            },
        );
        assert!(matches!(
            a.overlay(&b),
            Err(MediaError::SampleSpecMismatch(_))
        ));
    }

    #[test]
    fn test_wav_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        let clip = AudioBuffer::from_samples(spec(), vec![1, -1, 300, -300]).unwrap();
        clip.write_wav(&path).unwrap();

        let read = AudioBuffer::from_wav(&path).unwrap();
        assert_eq!(read.spec(), clip.spec());
        assert_eq!(read.samples(), clip.samples());
    }
}
