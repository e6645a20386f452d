use std::path::PathBuf;

use clap::Parser;
use matrix_image::ResampleFilter;

/// Convert images and GIFs for the 64x64 LED matrix and send them to the controller.
#[derive(Parser, Debug, Clone)]
#[command(name = "matrix-convert", version, about)]
pub struct Args {
    /// Image or animated GIF to convert
    pub input: Option<PathBuf>,

    /// Write the converted byte stream to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Upload the converted byte stream to the controller
    #[arg(short, long)]
    pub upload: bool,

    /// Treat the input as a still image even if it is animated
    #[arg(long)]
    pub still: bool,

    /// Controller base URL (overrides MATRIX_DEVICE_URL)
    #[arg(long)]
    pub device: Option<String>,

    /// Resampling filter: triangle, catmullrom, gaussian or lanczos3
    #[arg(long)]
    pub filter: Option<ResampleFilter>,

    /// Request timeout in seconds (overrides MATRIX_TIMEOUT_SECS)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Set the controller brightness (0-255)
    #[arg(long)]
    pub brightness: Option<u8>,

    /// Print controller system info
    #[arg(long)]
    pub info: bool,
}

impl Args {
    /// Whether any action needs the controller.
    pub fn needs_device(&self) -> bool {
        self.upload || self.info || self.brightness.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert_only() {
        let args = Args::parse_from(["matrix-convert", "cat.gif", "-o", "cat.bin"]);
        assert_eq!(args.input, Some(PathBuf::from("cat.gif")));
        assert_eq!(args.output, Some(PathBuf::from("cat.bin")));
        assert!(!args.needs_device());
    }

    #[test]
    fn test_parse_device_actions() {
        let args = Args::parse_from(["matrix-convert", "--info", "--brightness", "40"]);
        assert!(args.input.is_none());
        assert_eq!(args.brightness, Some(40));
        assert!(args.needs_device());
    }

    #[test]
    fn test_rejects_unknown_filter() {
        let res = Args::try_parse_from(["matrix-convert", "a.png", "--filter", "nearest"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_rejects_out_of_range_brightness() {
        let res = Args::try_parse_from(["matrix-convert", "--brightness", "300"]);
        assert!(res.is_err());
    }
}
