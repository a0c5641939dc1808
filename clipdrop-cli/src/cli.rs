// ABOUTME: CLI argument definitions for the Clipdrop command-line tool
// ABOUTME: One subcommand per API operation plus global connection flags, using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use clipdrop_sdk::CleanupMode;

#[derive(Parser, Debug)]
#[command(name = "clipdrop")]
#[command(about = "A CLI for the Clipdrop image API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// API key (defaults to the CLIPDROP_API_KEY environment variable)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override the API version path segment
    #[arg(long, global = true)]
    pub api_version: Option<String>,

    /// Enable verbose output for debugging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Generate an image from a text prompt
    TextToImage {
        /// Description of the image (at most 1000 characters)
        prompt: String,

        /// Output file (.png, defaults to output.png)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Remove the background of an image
    RemoveBackground {
        /// Input image path or URL (.png, .jpg, .webp)
        input: String,

        /// Output file (.png, .jpg or .webp, defaults to output.png)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Replace the background of an image from a prompt
    ReplaceBackground {
        /// Input image path or URL (.png, .jpg, .webp)
        input: String,

        /// Description of the new background
        #[arg(long)]
        prompt: String,

        /// Output file (same extension as the input)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Remove objects marked in a mask
    Cleanup {
        /// Input image path or URL (.png, .jpg)
        input: String,

        /// Mask image path or URL (.png)
        #[arg(long)]
        mask: String,

        /// Processing mode
        #[arg(long, value_enum, default_value_t = CleanupModeArg::Fast)]
        mode: CleanupModeArg,

        /// Output file (.png, defaults to output.png)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Extend an image beyond its borders
    Uncrop {
        /// Input image path or URL (.png, .jpg, .webp)
        input: String,

        /// Pixels to add on the left
        #[arg(long, default_value = "0", value_parser = clap::value_parser!(u32).range(0..=2048))]
        left: u32,

        /// Pixels to add on the right
        #[arg(long, default_value = "0", value_parser = clap::value_parser!(u32).range(0..=2048))]
        right: u32,

        /// Pixels to add on top
        #[arg(long, default_value = "0", value_parser = clap::value_parser!(u32).range(0..=2048))]
        up: u32,

        /// Pixels to add at the bottom
        #[arg(long, default_value = "0", value_parser = clap::value_parser!(u32).range(0..=2048))]
        down: u32,

        /// Output file (.jpg, defaults to output.jpg)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Upscale an image to a target size
    #[command(visible_alias = "upscale")]
    ImageUpscaling {
        /// Input image path or URL (.png, .jpg, .webp)
        input: String,

        /// Target width in pixels
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=4096))]
        width: u32,

        /// Target height in pixels
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=4096))]
        height: u32,

        /// Output file (extension must match the returned image type)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Generate variations of an image
    Reimagine {
        /// Input image path or URL (.png, .jpg, .webp)
        input: String,

        /// Output file (.jpg, defaults to output.jpg)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Remove text from an image
    RemoveText {
        /// Input image path or URL (.png, .jpg)
        input: String,

        /// Output file (.png, defaults to output.png)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Turn a sketch into an image
    SketchToImage {
        /// Sketch image path or URL (.png, .jpg, .webp)
        sketch: String,

        /// Description of the image
        #[arg(long)]
        prompt: String,

        /// Output file (.jpg, defaults to output.jpg)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Estimate the depth map of a portrait
    PortraitDepthEstimation {
        /// Input image path or URL (.png, .jpg, .webp)
        input: String,

        /// Output file (.jpg, defaults to output.jpg)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Estimate the surface normals of a portrait
    PortraitSurfaceNormals {
        /// Input image path or URL (.png, .jpg, .webp)
        input: String,

        /// Output file (.jpg, defaults to output.jpg)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CleanupModeArg {
    Fast,
    Quality,
}

impl From<CleanupModeArg> for CleanupMode {
    fn from(mode: CleanupModeArg) -> Self {
        match mode {
            CleanupModeArg::Fast => CleanupMode::Fast,
            CleanupModeArg::Quality => CleanupMode::Quality,
        }
    }
}
