// ABOUTME: Per-endpoint Clipdrop operations built on the resolution and submission core
// ABOUTME: Each call validates inputs and output, submits one request, and saves the payload

use crate::constants::endpoints::{self, Endpoint};
use crate::constants::{extensions, fields, limits, params};
use crate::content::ImageLimits;
use crate::error::ClipdropError;
use crate::output::{self, OutputSpec};
use crate::persist;
use crate::source::InputDescriptor;
use crate::submit::{FilePart, MultipartRequest, SubmissionResult};
use crate::{ClipdropClient, Result};
use std::path::PathBuf;

/// Quality setting of the cleanup endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CleanupMode {
    #[default]
    Fast,
    Quality,
}

impl CleanupMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CleanupMode::Fast => "fast",
            CleanupMode::Quality => "quality",
        }
    }
}

/// Pixels to add on each side when uncropping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UncropExtents {
    pub left: u32,
    pub right: u32,
    pub up: u32,
    pub down: u32,
}

/// Where a result was written and what it cost, when the API reported it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedOutput {
    pub path: PathBuf,
    pub remaining_credits: Option<u64>,
    pub credits_consumed: Option<u64>,
}

impl ClipdropClient {
    /// Generates an image from a prompt. Output must be `.png`.
    pub fn text_to_image(&self, prompt: &str, output_file: Option<&str>) -> Result<SavedOutput> {
        validate_prompt(prompt)?;

        let output = OutputSpec::or_default(output_file, ".png", Some(extensions::PNG));
        output.validate()?;

        let request = MultipartRequest::new().file(fields::PROMPT, FilePart::text(prompt));
        self.run(endpoints::TEXT_TO_IMAGE, request, &output)
    }

    pub fn remove_background(
        &self,
        input_file: &str,
        output_file: Option<&str>,
    ) -> Result<SavedOutput> {
        self.single_image(
            endpoints::REMOVE_BACKGROUND,
            input_file,
            (extensions::PNG_JPG_WEBP, &limits::REMOVE_BACKGROUND),
            OutputSpec::or_default(output_file, ".png", Some(extensions::PNG_JPG_WEBP)),
        )
    }

    /// Replaces the background from a prompt. The output keeps the input's extension.
    pub fn replace_background(
        &self,
        input_file: &str,
        prompt: &str,
        output_file: Option<&str>,
    ) -> Result<SavedOutput> {
        validate_prompt(prompt)?;

        let input = self.load_input(
            input_file,
            extensions::PNG_JPG_WEBP,
            &limits::REPLACE_BACKGROUND,
        )?;

        let input_extension = [input.extension()];
        let output =
            OutputSpec::or_default(output_file, input.extension(), Some(&input_extension[..]));
        output.validate()?;

        let request = MultipartRequest::new()
            .file(fields::IMAGE_FILE, image_part(&input)?)
            .field(fields::PROMPT, prompt);
        self.run(endpoints::REPLACE_BACKGROUND, request, &output)
    }

    /// Removes the objects painted white in a `.png` mask.
    pub fn cleanup(
        &self,
        input_file: &str,
        mask_file: &str,
        mode: CleanupMode,
        output_file: Option<&str>,
    ) -> Result<SavedOutput> {
        let input = self.load_input(input_file, extensions::PNG_JPG, &limits::CLEANUP)?;
        let mask = self.load_input(mask_file, extensions::PNG, &limits::CLEANUP)?;

        let output = OutputSpec::or_default(output_file, ".png", Some(extensions::PNG));
        output.validate()?;

        let request = MultipartRequest::new()
            .file(fields::IMAGE_FILE, image_part(&input)?)
            .file(fields::MASK_FILE, image_part(&mask)?)
            .field(fields::MODE, mode.as_str());
        self.run(endpoints::CLEANUP, request, &output)
    }

    /// Extends the image canvas on each side by the given number of pixels.
    pub fn uncrop(
        &self,
        input_file: &str,
        extents: UncropExtents,
        output_file: Option<&str>,
    ) -> Result<SavedOutput> {
        let sides = [
            (fields::EXTEND_LEFT, extents.left),
            (fields::EXTEND_RIGHT, extents.right),
            (fields::EXTEND_UP, extents.up),
            (fields::EXTEND_DOWN, extents.down),
        ];
        for (name, value) in sides {
            validate_range(name, value, 0, params::MAX_UNCROP_EXTEND)?;
        }

        let input = self.load_input(input_file, extensions::PNG_JPG_WEBP, &limits::UNCROP)?;

        let output = OutputSpec::or_default(output_file, ".jpg", Some(extensions::JPG));
        output.validate()?;

        let request = sides.into_iter().fold(
            MultipartRequest::new().file(fields::IMAGE_FILE, image_part(&input)?),
            |request, (name, value)| request.field(name, value),
        );
        self.run(endpoints::UNCROP, request, &output)
    }

    /// Upscales to the target size.
    ///
    /// The API answers with WebP for images with transparency and JPEG
    /// otherwise, so the output is checked only once the response arrives.
    pub fn image_upscaling(
        &self,
        input_file: &str,
        target_width: u32,
        target_height: u32,
        output_file: Option<&str>,
    ) -> Result<SavedOutput> {
        validate_range(fields::TARGET_WIDTH, target_width, 1, params::MAX_UPSCALE_TARGET)?;
        validate_range(fields::TARGET_HEIGHT, target_height, 1, params::MAX_UPSCALE_TARGET)?;

        let input = self.load_input(
            input_file,
            extensions::PNG_JPG_WEBP,
            &limits::IMAGE_UPSCALING,
        )?;

        let request = MultipartRequest::new()
            .file(fields::IMAGE_FILE, image_part(&input)?)
            .field(fields::TARGET_WIDTH, target_width)
            .field(fields::TARGET_HEIGHT, target_height);

        let (operation, sub_path) = endpoints::IMAGE_UPSCALING;
        let response = self.submit(operation, sub_path, request)?;

        let content_type = response.content_type().unwrap_or_default();
        let output = output::resolve_from_content_type(output_file, content_type)?;
        save(&response, &output)
    }

    pub fn reimagine(&self, input_file: &str, output_file: Option<&str>) -> Result<SavedOutput> {
        self.single_image(
            endpoints::REIMAGINE,
            input_file,
            (extensions::PNG_JPG_WEBP, &limits::REIMAGINE),
            OutputSpec::or_default(output_file, ".jpg", Some(extensions::JPG)),
        )
    }

    pub fn remove_text(&self, input_file: &str, output_file: Option<&str>) -> Result<SavedOutput> {
        self.single_image(
            endpoints::REMOVE_TEXT,
            input_file,
            (extensions::PNG_JPG, &limits::REMOVE_TEXT),
            OutputSpec::or_default(output_file, ".png", Some(extensions::PNG)),
        )
    }

    /// Turns a sketch into an image guided by a prompt.
    pub fn sketch_to_image(
        &self,
        sketch_file: &str,
        prompt: &str,
        output_file: Option<&str>,
    ) -> Result<SavedOutput> {
        validate_prompt(prompt)?;

        let sketch = self.load_input(
            sketch_file,
            extensions::PNG_JPG_WEBP,
            &limits::SKETCH_TO_IMAGE,
        )?;

        let output = OutputSpec::or_default(output_file, ".jpg", Some(extensions::JPG));
        output.validate()?;

        let request = MultipartRequest::new()
            .file(fields::SKETCH_FILE, image_part(&sketch)?)
            .field(fields::PROMPT, prompt);
        self.run(endpoints::SKETCH_TO_IMAGE, request, &output)
    }

    pub fn portrait_depth_estimation(
        &self,
        input_file: &str,
        output_file: Option<&str>,
    ) -> Result<SavedOutput> {
        self.single_image(
            endpoints::PORTRAIT_DEPTH_ESTIMATION,
            input_file,
            (extensions::PNG_JPG_WEBP, &limits::PORTRAIT),
            OutputSpec::or_default(output_file, ".jpg", Some(extensions::JPG)),
        )
    }

    pub fn portrait_surface_normals(
        &self,
        input_file: &str,
        output_file: Option<&str>,
    ) -> Result<SavedOutput> {
        self.single_image(
            endpoints::PORTRAIT_SURFACE_NORMALS,
            input_file,
            (extensions::PNG_JPG_WEBP, &limits::PORTRAIT),
            OutputSpec::or_default(output_file, ".jpg", Some(extensions::JPG)),
        )
    }

    /// Shared path for endpoints taking a lone `image_file` and a known output type.
    fn single_image(
        &self,
        endpoint: Endpoint,
        input_file: &str,
        (allowed, limits): (&[&str], &ImageLimits),
        output: OutputSpec,
    ) -> Result<SavedOutput> {
        let input = self.load_input(input_file, allowed, limits)?;
        output.validate()?;

        let request = MultipartRequest::new().file(fields::IMAGE_FILE, image_part(&input)?);
        self.run(endpoint, request, &output)
    }

    fn load_input(
        &self,
        designator: &str,
        allowed: &[&str],
        limits: &ImageLimits,
    ) -> Result<InputDescriptor> {
        let input = self.resolve_input(designator)?;
        input.validate(Some(allowed), limits)?;
        Ok(input)
    }

    fn run(
        &self,
        (operation, sub_path): Endpoint,
        request: MultipartRequest,
        output: &OutputSpec,
    ) -> Result<SavedOutput> {
        let response = self.submit(operation, sub_path, request)?;
        save(&response, output)
    }
}

fn image_part(input: &InputDescriptor) -> Result<FilePart> {
    Ok(FilePart::image(
        input.file_name(),
        input.data()?.to_vec(),
        input.extension(),
    ))
}

fn save(response: &SubmissionResult, output: &OutputSpec) -> Result<SavedOutput> {
    persist::write_output(output.path(), response.body())?;

    let saved = SavedOutput {
        path: output.path().to_path_buf(),
        remaining_credits: response.remaining_credits(),
        credits_consumed: response.credits_consumed(),
    };

    match saved.remaining_credits {
        Some(credits) => log::info!(
            "Saved {} ({} credits remaining)",
            saved.path.display(),
            credits
        ),
        None => log::info!("Saved {}", saved.path.display()),
    }

    Ok(saved)
}

fn validate_prompt(prompt: &str) -> Result<()> {
    if prompt.trim().is_empty() {
        return Err(ClipdropError::InvalidParameter {
            name: fields::PROMPT,
            reason: "must not be empty".to_string(),
        });
    }

    let chars = prompt.chars().count();
    if chars > params::MAX_PROMPT_CHARS {
        return Err(ClipdropError::InvalidParameter {
            name: fields::PROMPT,
            reason: format!(
                "must be at most {} characters, got {chars}",
                params::MAX_PROMPT_CHARS
            ),
        });
    }

    Ok(())
}

fn validate_range(name: &'static str, value: u32, min: u32, max: u32) -> Result<()> {
    if value < min || value > max {
        return Err(ClipdropError::InvalidParameter {
            name,
            reason: format!("must be {min}-{max}, got {value}"),
        });
    }
    Ok(())
}
