use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use percent_encoding::percent_decode_str;
use thiserror::Error;

// url-loader output is not always padded.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Error, Debug)]
pub enum DataUriError {
    #[error("not a data URI")]
    MissingScheme,
    #[error("data URI has no ',' separating metadata from payload")]
    MissingComma,
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// A decoded `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Media type as written in the URI, `text/plain;charset=US-ASCII` when omitted.
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Decode `data:[<mime>][;param=value]*[;base64],<payload>`.
///
/// Line breaks and surrounding whitespace are ignored. A payload without the `base64`
/// marker is percent-decoded.
pub fn decode_data_uri(uri: &str) -> Result<DataUri, DataUriError> {
    let compact: String = uri.trim().chars().filter(|c| *c != '\r' && *c != '\n').collect();
    // scheme is case-insensitive
    let rest = match compact.get(..5) {
        Some(scheme) if scheme.eq_ignore_ascii_case("data:") => &compact[5..],
        _ => return Err(DataUriError::MissingScheme),
    };
    let comma = rest.find(',').ok_or(DataUriError::MissingComma)?;
    let (meta, payload) = (&rest[..comma], &rest[comma + 1..]);

    let mut params: Vec<&str> = meta.split(';').collect();
    let is_base64 = params.len() > 1 && params.last().map_or(false, |p| p.eq_ignore_ascii_case("base64"));
    if is_base64 {
        params.pop();
    }

    let mime = if params.iter().all(|p| p.is_empty()) {
        "text/plain;charset=US-ASCII".to_string()
    } else {
        params.join(";")
    };

    let bytes = if is_base64 {
        let cleaned: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        LENIENT_BASE64.decode(cleaned.as_bytes())?
    } else {
        percent_decode_str(payload).collect()
    };

    Ok(DataUri { mime, bytes })
}
