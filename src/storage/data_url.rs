use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataUrlError {
    #[error("payload has no ',' separating the prefix from the base64 data")]
    MissingSeparator,
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Decodes a `data:<type>;base64,<data>` style payload.
///
/// Everything up to and including the first comma is treated as an opaque
/// prefix and ignored. ASCII whitespace inside the data, such as the line
/// wraps MIME encoders insert, is skipped.
pub fn decode_data_url(payload: &str) -> Result<Vec<u8>, DataUrlError> {
    let (_, data) = payload
        .split_once(',')
        .ok_or(DataUrlError::MissingSeparator)?;
    let data: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(STANDARD.decode(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_after_first_comma() {
        let encoded = STANDARD.encode(b"%PDF-1.7 edited");
        let payload = format!("data:application/pdf;base64,{encoded}");
        assert_eq!(decode_data_url(&payload).unwrap(), b"%PDF-1.7 edited");
    }

    #[test]
    fn prefix_is_opaque() {
        assert_eq!(decode_data_url("anything at all,aGk=").unwrap(), b"hi");
        assert_eq!(decode_data_url(",aGk=").unwrap(), b"hi");
    }

    #[test]
    fn line_wrapped_data_decodes() {
        assert_eq!(
            decode_data_url("data:application/pdf;base64,aGVs\nbG8=").unwrap(),
            b"hello"
        );
        assert_eq!(
            decode_data_url("data:application/pdf;base64, aGVs\r\nbG8=\r\n").unwrap(),
            b"hello"
        );
    }

    #[test]
    fn missing_separator_is_an_error() {
        let err = decode_data_url("aGVsbG8=").unwrap_err();
        assert!(matches!(err, DataUrlError::MissingSeparator));
    }

    #[test]
    fn malformed_base64_is_an_error() {
        let err = decode_data_url("data:application/pdf;base64,@@not base64@@").unwrap_err();
        assert!(matches!(err, DataUrlError::Base64(_)));
        assert!(err.to_string().starts_with("invalid base64 payload"));
    }
}
