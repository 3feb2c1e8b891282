/// MIME type sent to the model for uploads whose format is not recognised.
pub const FALLBACK_MIME: &str = "image/jpeg";

pub fn detect_image_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, 0x50, 0x4E, 0x47, ..] => "image/png",
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => "image/webp",
        _ => {
            tracing::warn!(
                "Unrecognized upload format (first 4 bytes: {:02X?}), sending as {}",
                &bytes[..bytes.len().min(4)],
                FALLBACK_MIME
            );
            FALLBACK_MIME
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_jpeg() {
        assert_eq!(detect_image_mime(&[0xFF, 0xD8, 0xFF, 0xDB]), "image/jpeg");
    }

    #[test]
    fn test_detect_png() {
        assert_eq!(
            detect_image_mime(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]),
            "image/png"
        );
    }

    #[test]
    fn test_detect_webp() {
        assert_eq!(
            detect_image_mime(&[
                0x52, 0x49, 0x46, 0x46, 0x24, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50
            ]),
            "image/webp"
        );
    }

    #[test]
    fn test_unknown_falls_back_to_jpeg() {
        assert_eq!(detect_image_mime(b"GIF89a"), "image/jpeg");
        assert_eq!(detect_image_mime(&[]), "image/jpeg");
    }
}
