// ABOUTME: Dispatches parsed subcommands to the matching Clipdrop SDK operation
// ABOUTME: Kept separate from main so command routing can be exercised in tests

use crate::cli::Commands;
use clipdrop_sdk::{ClipdropClient, SavedOutput, UncropExtents};

pub fn run(client: &ClipdropClient, command: Commands) -> clipdrop_sdk::Result<SavedOutput> {
    match command {
        Commands::TextToImage { prompt, output } => {
            client.text_to_image(&prompt, output.as_deref())
        }
        Commands::RemoveBackground { input, output } => {
            client.remove_background(&input, output.as_deref())
        }
        Commands::ReplaceBackground {
            input,
            prompt,
            output,
        } => client.replace_background(&input, &prompt, output.as_deref()),
        Commands::Cleanup {
            input,
            mask,
            mode,
            output,
        } => client.cleanup(&input, &mask, mode.into(), output.as_deref()),
        Commands::Uncrop {
            input,
            left,
            right,
            up,
            down,
            output,
        } => {
            let extents = UncropExtents {
                left,
                right,
                up,
                down,
            };
            client.uncrop(&input, extents, output.as_deref())
        }
        Commands::ImageUpscaling {
            input,
            width,
            height,
            output,
        } => client.image_upscaling(&input, width, height, output.as_deref()),
        Commands::Reimagine { input, output } => client.reimagine(&input, output.as_deref()),
        Commands::RemoveText { input, output } => client.remove_text(&input, output.as_deref()),
        Commands::SketchToImage {
            sketch,
            prompt,
            output,
        } => client.sketch_to_image(&sketch, &prompt, output.as_deref()),
        Commands::PortraitDepthEstimation { input, output } => {
            client.portrait_depth_estimation(&input, output.as_deref())
        }
        Commands::PortraitSurfaceNormals { input, output } => {
            client.portrait_surface_normals(&input, output.as_deref())
        }
    }
}

/// One-line summary printed after a successful call.
pub fn describe(saved: &SavedOutput) -> String {
    match (saved.credits_consumed, saved.remaining_credits) {
        (Some(used), Some(left)) => format!(
            "Saved {} ({used} credits used, {left} remaining)",
            saved.path.display()
        ),
        (None, Some(left)) => format!("Saved {} ({left} credits remaining)", saved.path.display()),
        _ => format!("Saved {}", saved.path.display()),
    }
}
