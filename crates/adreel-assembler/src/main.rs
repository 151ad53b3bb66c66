//! Storyboard assembly binary.
//!
//! Usage: `adreel-assembler <storyboard.json> [request.json]`
//!
//! Reads the storyboard (and an optional assemble request) from disk, runs
//! the pipeline, and prints the render manifest as JSON on stdout. On
//! failure the structured error payload is printed instead and the process
//! exits non-zero.

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use adreel_assembler::{cancellation_pair, AssembleRequest, AssemblerConfig, VideoAssembler};
use adreel_backend::select_backend;
use adreel_media::slide::SlideFont;
use adreel_models::Storyboard;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("adreel=info".parse().expect("valid directive"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting adreel-assembler");

    let mut args = std::env::args().skip(1);
    let storyboard_path = match args.next() {
        Some(p) => p,
        None => {
            error!("Usage: adreel-assembler <storyboard.json> [request.json]");
            std::process::exit(2);
        }
    };
    let request_path = args.next();

    let storyboard: Storyboard = match read_json(&storyboard_path) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to read storyboard {}: {}", storyboard_path, e);
            std::process::exit(2);
        }
    };

    let request: AssembleRequest = match request_path {
        Some(path) => match read_json(&path) {
            Ok(r) => r,
            Err(e) => {
                error!("Failed to read request {}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => AssembleRequest::default(),
    };

    let config = AssemblerConfig::from_env();
    info!(
        export_dir = %config.export_dir.display(),
        assets_dir = %config.assets_dir.display(),
        "Assembler config loaded"
    );

    let font = SlideFont::resolve(config.font_path.as_deref(), Some(config.assets_dir.as_path()));
    let backend = match select_backend(
        config.openai_api_key.as_deref(),
        config.force_free_mode,
        font,
    ) {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to select generation backend: {}", e);
            std::process::exit(1);
        }
    };

    let assembler = VideoAssembler::new(backend, config);
    let (cancel_tx, cancel_rx) = cancellation_pair();

    // Signal an orderly stop on Ctrl-C; the pipeline checks between scenes
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        let _ = cancel_tx.send(true);
    });

    match assembler.assemble(&storyboard, &request, cancel_rx).await {
        Ok(manifest) => {
            let json = serde_json::to_string_pretty(&manifest)
                .unwrap_or_else(|_| "{}".to_string());
            println!("{}", json);
        }
        Err(e) => {
            error!("Assembly failed: {}", e);
            let payload = serde_json::to_string_pretty(&e.payload())
                .unwrap_or_else(|_| "{}".to_string());
            println!("{}", payload);
            std::process::exit(1);
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    let body = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&body)?)
}
