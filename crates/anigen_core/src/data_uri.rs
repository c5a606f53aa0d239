//! `data:` URI helpers for images and audio kept inline in the store.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Payload of a base64 `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedDataUri {
    /// MIME type from the URI header, `application/octet-stream` if missing
    pub mime_type: String,
    /// Decoded bytes
    pub bytes: Vec<u8>,
}

/// Encode bytes as `data:{mime};base64,{payload}`.
///
/// # Examples
///
/// ```
/// use anigen_core::encode_data_uri;
///
/// assert_eq!(encode_data_uri("audio/mp3", &[0]), "data:audio/mp3;base64,AA==");
/// ```
pub fn encode_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Decode a base64 `data:` URI, returning `None` when it is malformed.
pub fn decode_data_uri(uri: &str) -> Option<DecodedDataUri> {
    let rest = uri.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime_type = header.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload.trim()).ok()?;
    let mime_type = if mime_type.is_empty() {
        "application/octet-stream".to_string()
    } else {
        mime_type.to_string()
    };
    Some(DecodedDataUri { mime_type, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_reads_header_and_payload() {
        let decoded = decode_data_uri("data:audio/mpeg;base64,SUQz").unwrap();
        assert_eq!(decoded.mime_type, "audio/mpeg");
        assert_eq!(decoded.bytes, b"ID3");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(decode_data_uri("blob:http://localhost/123").is_none());
        assert!(decode_data_uri("data:audio/mpeg,plain").is_none());
        assert!(decode_data_uri("data:audio/mpeg;base64,@@@").is_none());
    }
}
