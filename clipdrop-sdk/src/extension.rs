// ABOUTME: Extension allow-list checks shared by input and output validation
// ABOUTME: Treats .jpg and .jpeg as the same format before comparing

use crate::error::{ClipdropError, FileRole};
use crate::Result;

/// Lower-cases an allow-list and makes `.jpg` and `.jpeg` admit each other.
pub fn expand_allow_list(allowed: &[&str]) -> Vec<String> {
    let mut expanded: Vec<String> = Vec::with_capacity(allowed.len() + 1);
    for ext in allowed {
        let ext = ext.to_lowercase();
        if !expanded.contains(&ext) {
            expanded.push(ext);
        }
    }

    let has_jpg = expanded.iter().any(|e| e == ".jpg");
    let has_jpeg = expanded.iter().any(|e| e == ".jpeg");
    if has_jpg && !has_jpeg {
        expanded.push(".jpeg".to_string());
    } else if has_jpeg && !has_jpg {
        expanded.push(".jpg".to_string());
    }

    expanded
}

/// Checks `extension` against `allowed`. `None` or an empty list accepts anything.
pub fn validate_extension(extension: &str, allowed: Option<&[&str]>, role: FileRole) -> Result<()> {
    let Some(allowed) = allowed.filter(|list| !list.is_empty()) else {
        return Ok(());
    };

    let expanded = expand_allow_list(allowed);
    let extension = extension.to_lowercase();

    if expanded.contains(&extension) {
        log::debug!("{role} extension '{extension}' accepted");
        Ok(())
    } else {
        Err(ClipdropError::UnsupportedExtension {
            role,
            extension,
            allowed: expanded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::extensions;
    use crate::error::ErrorKind;

    fn allow<'a>(extensions: &'a [&'a str]) -> Option<&'a [&'a str]> {
        Some(extensions)
    }

    #[test]
    fn test_supported_extensions_pass() {
        for ext in extensions::PNG_JPG_WEBP {
            assert!(validate_extension(ext, Some(extensions::PNG_JPG_WEBP), FileRole::Input).is_ok());
        }
    }

    #[test]
    fn test_unsupported_extension_fails() {
        let err = validate_extension(".gif", Some(extensions::PNG_JPG_WEBP), FileRole::Input)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedExtension);

        let message = err.to_string();
        assert!(message.starts_with("Input file"));
        assert!(message.contains(".png, .jpg, .webp, .jpeg"));
    }

    #[test]
    fn test_jpg_and_jpeg_are_interchangeable() {
        assert!(validate_extension(".jpeg", allow(&[".jpg"]), FileRole::Input).is_ok());
        assert!(validate_extension(".jpg", allow(&[".jpeg"]), FileRole::Output).is_ok());
        assert!(validate_extension(".jpeg", allow(&[".png"]), FileRole::Input).is_err());
    }

    #[test]
    fn test_no_restriction() {
        assert!(validate_extension(".anything", None, FileRole::Input).is_ok());
        assert!(validate_extension("", allow(&[]), FileRole::Output).is_ok());
    }

    #[test]
    fn test_missing_extension_is_rejected_by_a_list() {
        let err = validate_extension("", Some(extensions::PNG), FileRole::Output).unwrap_err();
        assert!(matches!(
            err,
            ClipdropError::UnsupportedExtension {
                role: FileRole::Output,
                ..
            }
        ));
    }

    #[test]
    fn test_comparison_is_case_insensitive() {
        assert!(validate_extension(".PNG", allow(&[".png"]), FileRole::Input).is_ok());
        assert!(validate_extension(".png", allow(&[".PNG"]), FileRole::Input).is_ok());
    }

    #[test]
    fn test_expand_allow_list() {
        assert_eq!(expand_allow_list(&[".png"]), vec![".png"]);
        assert_eq!(expand_allow_list(&[".jpg", ".JPG"]), vec![".jpg", ".jpeg"]);
        assert_eq!(expand_allow_list(&[".jpeg"]), vec![".jpeg", ".jpg"]);
        assert_eq!(expand_allow_list(&[".jpg", ".jpeg"]), vec![".jpg", ".jpeg"]);
    }

    #[test]
    fn test_validation_is_repeatable() {
        let first = validate_extension(".bmp", Some(extensions::PNG_JPG), FileRole::Input);
        let second = validate_extension(".bmp", Some(extensions::PNG_JPG), FileRole::Input);
        assert_eq!(first.unwrap_err().to_string(), second.unwrap_err().to_string());
    }
}
