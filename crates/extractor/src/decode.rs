// ABOUTME: Charset decoding for raw byte input.
// ABOUTME: Decodes via an explicit encoding label, falling back to detection.

use tracing::debug;

/// Decodes a raw byte buffer to a String.
///
/// An explicit encoding label (e.g. `"utf-8"`, `"windows-1252"`) takes
/// precedence when it names a known encoding; otherwise the encoding is
/// detected from the bytes themselves.
pub fn decode_bytes(bytes: &[u8], label: Option<&str>) -> String {
    if let Some(label) = label {
        if let Some(encoding) = encoding_rs::Encoding::for_label(label.as_bytes()) {
            let (decoded, _, _) = encoding.decode(bytes);
            return decoded.into_owned();
        }
        debug!(label, "unknown encoding label, falling back to detection");
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(bytes);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_utf8_with_label() {
        let bytes = "caf\u{e9}".as_bytes();
        assert_eq!(decode_bytes(bytes, Some("utf-8")), "caf\u{e9}");
    }

    #[test]
    fn decodes_windows_1252_with_label() {
        // 0xE9 is é in windows-1252.
        let bytes = b"caf\xe9";
        assert_eq!(decode_bytes(bytes, Some("windows-1252")), "caf\u{e9}");
    }

    #[test]
    fn detects_encoding_without_label() {
        let bytes = b"caf\xe9 au lait, tr\xe8s bon";
        let decoded = decode_bytes(bytes, None);
        assert!(decoded.contains("caf\u{e9}"), "got: {}", decoded);
    }

    #[test]
    fn unknown_label_falls_back_to_detection() {
        let decoded = decode_bytes(b"plain ascii", Some("not-a-charset"));
        assert_eq!(decoded, "plain ascii");
    }
}
