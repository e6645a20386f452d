//! Command-line front end: convert files and talk to the controller.

pub mod args;
pub mod config;

pub use args::Args;
pub use config::CliConfig;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, bail};
use matrix_client::DeviceClient;
use matrix_image::{FrameBuffer, RasterOptions};
use tracing::info;

/// Convert encoded image bytes into the controller byte stream.
///
/// Progress is logged once per animation frame.
pub fn convert_bytes(
    bytes: &[u8],
    options: &RasterOptions,
    still: bool,
) -> anyhow::Result<FrameBuffer> {
    let buffer = if still {
        matrix_image::convert_still(bytes, options)?
    } else {
        let mut log_progress = |fraction: f64| {
            info!(percent = (fraction * 100.0).round() as u32, "Converting frames");
        };
        matrix_image::convert_auto(bytes, options, Some(&mut log_progress))?
    };
    Ok(buffer)
}

/// Read and convert a file. Decoding and scaling run on the blocking pool.
pub async fn convert_file(
    path: &Path,
    options: RasterOptions,
    still: bool,
) -> anyhow::Result<FrameBuffer> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    let buffer = tokio::task::spawn_blocking(move || convert_bytes(&bytes, &options, still))
        .await
        .context("conversion task panicked")?
        .with_context(|| format!("failed to convert {}", path.display()))?;

    info!(
        path = %path.display(),
        frames = buffer.frame_count(),
        "Converted"
    );
    Ok(buffer)
}

/// Execute everything requested on the command line.
pub async fn run(args: Args, config: CliConfig) -> anyhow::Result<()> {
    if args.input.is_none() && !args.info && args.brightness.is_none() {
        bail!("nothing to do: pass an input file, --info or --brightness");
    }
    if args.upload && args.input.is_none() {
        bail!("--upload needs an input file");
    }
    if args.output.is_some() && args.input.is_none() {
        bail!("--output needs an input file");
    }

    let client = if args.needs_device() {
        Some(
            DeviceClient::new(&config.device_url, Duration::from_secs(config.timeout_secs))
                .with_context(|| format!("invalid device URL {}", config.device_url))?,
        )
    } else {
        None
    };

    if let (true, Some(client)) = (args.info, &client) {
        let sys = client.system_info().await.context("failed to query system info")?;
        println!("version: {}\ncores: {}", sys.version, sys.cores);
    }

    if let (Some(brightness), Some(client)) = (args.brightness, &client) {
        client
            .set_brightness(brightness)
            .await
            .context("failed to set brightness")?;
        info!(brightness, "Brightness set");
    }

    let Some(input) = &args.input else {
        return Ok(());
    };

    let options = RasterOptions::new().with_filter(config.filter);
    let stream = convert_file(input, options, args.still).await?.to_bytes();

    if let Some(output) = &args.output {
        tokio::fs::write(output, &stream)
            .await
            .with_context(|| format!("failed to write {}", output.display()))?;
        info!(path = %output.display(), bytes = stream.len(), "Byte stream written");
    }

    if let (true, Some(client)) = (args.upload, &client) {
        let reply = client
            .upload_frames(&stream)
            .await
            .context("failed to upload frames")?;
        info!(reply = reply.trim(), "Upload accepted");
    }

    Ok(())
}
