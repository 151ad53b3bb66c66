//! Sequence encoding.
//!
//! Turns an ordered list of scene clips into one H.264/AAC file. Each scene
//! becomes a still-image segment of its exact reconciled duration; segments
//! share identical codec parameters and are joined with the concat demuxer
//! using stream copy, so the final pass never re-encodes.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::compose::{clamp_canvas, total_duration, SceneClip};
use crate::error::{MediaError, MediaResult};

/// Encode ordered scene clips into a single video at `out_path`.
///
/// Fails fast with [`MediaError::EmptyTimeline`] before any FFmpeg spawn
/// when the clip list is empty. Scene segments are written into `work_dir`.
/// Returns the expected timeline duration (sum of scene durations); the
/// caller may probe the output for the frame-rounded actual value.
pub async fn encode_sequence(
    clips: &[SceneClip],
    canvas_width: u32,
    canvas_height: u32,
    out_path: &Path,
    work_dir: &Path,
    runner: &FfmpegRunner,
) -> MediaResult<f64> {
    if clips.is_empty() {
        return Err(MediaError::EmptyTimeline);
    }

    let (out_w, out_h) = clamp_canvas(canvas_width, canvas_height);
    let with_audio = clips.iter().any(|c| c.audio.is_some());

    tokio::fs::create_dir_all(work_dir).await?;

    let mut segments = Vec::with_capacity(clips.len());
    for (index, clip) in clips.iter().enumerate() {
        let segment = work_dir.join(format!("seg_{:03}.mp4", index));
        encode_scene_segment(clip, out_w, out_h, with_audio, &segment, runner).await?;
        segments.push(segment);
    }

    let list_path = work_dir.join("concat.txt");
    tokio::fs::write(&list_path, concat_list(&segments)).await?;

    let concat = FfmpegCommand::new(out_path)
        .input_with_args(["-f", "concat", "-safe", "0"], &list_path)
        .output_args(["-c", "copy"]);
    runner.run(&concat).await?;

    let duration = total_duration(clips);
    info!(
        scenes = clips.len(),
        duration_secs = format!("{:.2}", duration),
        output = %out_path.display(),
        "Sequence encoded"
    );

    Ok(duration)
}

/// Encode one still-image scene segment.
///
/// When any scene in the timeline carries audio, audio-less scenes get a
/// silent AAC track so every segment has the same stream layout and the
/// concat pass can stream-copy.
async fn encode_scene_segment(
    clip: &SceneClip,
    out_w: u32,
    out_h: u32,
    with_audio: bool,
    segment: &Path,
    runner: &FfmpegRunner,
) -> MediaResult<()> {
    if !clip.image.exists() {
        return Err(MediaError::FileNotFound(clip.image.clone()));
    }

    let mut cmd = FfmpegCommand::new(segment)
        .input_with_args(["-loop", "1"], &clip.image);

    match &clip.audio {
        Some(audio) => {
            if !audio.exists() {
                return Err(MediaError::FileNotFound(audio.clone()));
            }
            cmd = cmd.input(audio);
        }
        None if with_audio => {
            cmd = cmd.lavfi_input("anullsrc=r=44100:cl=stereo");
        }
        None => {}
    }

    cmd = cmd
        .duration(clip.duration)
        .frame_rate(clip.fps)
        .video_filter(scale_pad_filter(out_w, out_h))
        .video_codec("libx264")
        .pixel_format("yuv420p")
        .preset("medium");

    if with_audio {
        cmd = cmd.audio_codec("aac").audio_bitrate("192k").shortest();
    }

    debug!(segment = %segment.display(), duration = clip.duration, "Encoding scene segment");
    runner.run(&cmd).await
}

/// Filter normalizing any source image to the output frame: scale to fit,
/// then pad to exact dimensions with centered content.
pub fn scale_pad_filter(out_w: u32, out_h: u32) -> String {
    format!(
        "scale={w}:{h}:force_original_aspect_ratio=decrease,pad={w}:{h}:(ow-iw)/2:(oh-ih)/2",
        w = out_w,
        h = out_h
    )
}

/// Build a concat demuxer list file body.
///
/// Single quotes in paths are escaped per the demuxer's quoting rules.
pub fn concat_list(segments: &[PathBuf]) -> String {
    let mut body = String::new();
    for segment in segments {
        let escaped = segment.to_string_lossy().replace('\'', "'\\''");
        body.push_str(&format!("file '{}'\n", escaped));
    }
    body
}
