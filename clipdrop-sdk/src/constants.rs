// ABOUTME: Centralized constants for the Clipdrop SDK
// ABOUTME: Contains API URLs, headers, endpoint paths, extension allow-lists, and input limits

/// HTTP and request timeouts
pub mod timeouts {
    use std::time::Duration;

    /// Default timeout for HTTP requests; generation endpoints can be slow
    pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
}

/// Clipdrop API URLs
pub mod urls {
    /// Base URL for the Clipdrop API
    pub const CLIPDROP_API_BASE: &str = "https://clipdrop-api.co";

    /// API version segment appended after the operation name
    pub const API_VERSION: &str = "v1";
}

/// Header and environment names
pub mod headers {
    /// Header carrying the API key on every request
    pub const API_KEY: &str = "x-api-key";

    /// Credits left on the account after the call
    pub const REMAINING_CREDITS: &str = "x-remaining-credits";

    /// Credits charged for the call
    pub const CREDITS_CONSUMED: &str = "x-credits-consumed";
}

pub mod env {
    /// Environment variable consulted when no API key is passed explicitly
    pub const API_KEY: &str = "CLIPDROP_API_KEY";
}

/// Error handling constants
pub mod errors {
    /// Substituted when a failed response carries no readable `error` field
    pub const UNDECODABLE_BODY: &str = "Response body could not be decoded";
}

/// Operation names and optional sub-paths, as `(operation, sub_path)`
pub mod endpoints {
    pub type Endpoint = (&'static str, Option<&'static str>);

    pub const TEXT_TO_IMAGE: Endpoint = ("text-to-image", None);
    pub const REMOVE_BACKGROUND: Endpoint = ("remove-background", None);
    pub const REPLACE_BACKGROUND: Endpoint = ("replace-background", None);
    pub const CLEANUP: Endpoint = ("cleanup", None);
    pub const UNCROP: Endpoint = ("uncrop", None);
    pub const IMAGE_UPSCALING: Endpoint = ("image-upscaling", Some("upscale"));
    pub const REIMAGINE: Endpoint = ("reimagine", Some("reimagine"));
    pub const REMOVE_TEXT: Endpoint = ("remove-text", None);
    pub const SKETCH_TO_IMAGE: Endpoint = ("sketch-to-image", Some("sketch-to-image"));
    pub const PORTRAIT_DEPTH_ESTIMATION: Endpoint = ("portrait-depth-estimation", None);
    pub const PORTRAIT_SURFACE_NORMALS: Endpoint = ("portrait-surface-normals", None);
}

/// Multipart field names
pub mod fields {
    pub const IMAGE_FILE: &str = "image_file";
    pub const MASK_FILE: &str = "mask_file";
    pub const SKETCH_FILE: &str = "sketch_file";
    pub const PROMPT: &str = "prompt";
    pub const MODE: &str = "mode";
    pub const EXTEND_LEFT: &str = "extend_left";
    pub const EXTEND_RIGHT: &str = "extend_right";
    pub const EXTEND_UP: &str = "extend_up";
    pub const EXTEND_DOWN: &str = "extend_down";
    pub const TARGET_WIDTH: &str = "target_width";
    pub const TARGET_HEIGHT: &str = "target_height";
}

/// Extension allow-lists; `.jpg` also admits `.jpeg`
pub mod extensions {
    pub const PNG: &[&str] = &[".png"];
    pub const JPG: &[&str] = &[".jpg"];
    pub const PNG_JPG: &[&str] = &[".png", ".jpg"];
    pub const PNG_JPG_WEBP: &[&str] = &[".png", ".jpg", ".webp"];
}

/// Per-endpoint input ceilings
pub mod limits {
    use crate::content::ImageLimits;

    pub const REMOVE_BACKGROUND: ImageLimits =
        ImageLimits::new().max_megapixels(25.0).max_megabytes(30.0);
    pub const REPLACE_BACKGROUND: ImageLimits =
        ImageLimits::new().max_megapixels(10.0).max_megabytes(20.0);
    pub const CLEANUP: ImageLimits = ImageLimits::new().max_megapixels(16.0).max_megabytes(30.0);
    pub const UNCROP: ImageLimits = ImageLimits::new().max_megapixels(10.0).max_megabytes(30.0);
    pub const IMAGE_UPSCALING: ImageLimits =
        ImageLimits::new().max_megapixels(16.0).max_megabytes(30.0);
    pub const REIMAGINE: ImageLimits = ImageLimits::new()
        .max_width(1024)
        .max_height(1024)
        .max_megabytes(30.0);
    pub const REMOVE_TEXT: ImageLimits =
        ImageLimits::new().max_megapixels(16.0).max_megabytes(30.0);
    pub const SKETCH_TO_IMAGE: ImageLimits = ImageLimits::new().max_width(1024).max_height(1024);
    pub const PORTRAIT: ImageLimits = ImageLimits::new().max_megapixels(16.0);
}

/// Numeric parameter bounds
pub mod params {
    pub const MAX_PROMPT_CHARS: usize = 1000;
    pub const MAX_UNCROP_EXTEND: u32 = 2048;
    pub const MAX_UPSCALE_TARGET: u32 = 4096;
}
