#![allow(clippy::missing_errors_doc)]

use std::string::FromUtf8Error;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use kitchen_planner_core::{ApplianceCatalog, LayoutError};
use kitchen_planner_layout::Layout;
use thiserror::Error;

const FRAGMENT_DOMAIN: &str = "kitchen";
const FRAGMENT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded layout payload.
pub(crate) const FRAGMENT_HEADER: &str = "kitchen:v1";
/// Delimiter used to separate the prefix, version and payload.
const FIELD_DELIMITER: char = ':';
/// Marker introducing a URL fragment.
const FRAGMENT_MARKER: char = '#';

/// Encodes the layout into a URL fragment suitable for a share link.
#[must_use]
pub(crate) fn encode_fragment(layout: &Layout) -> String {
    let encoded = URL_SAFE_NO_PAD.encode(layout.encode().to_text());
    format!("{FRAGMENT_MARKER}{FRAGMENT_HEADER}{FIELD_DELIMITER}{encoded}")
}

/// Decodes a layout from a share link fragment, with or without its leading `#`.
pub(crate) fn decode_fragment(
    value: &str,
    catalog: &impl ApplianceCatalog,
) -> Result<Layout, ShareError> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_prefix(FRAGMENT_MARKER).unwrap_or(trimmed);
    if trimmed.is_empty() {
        return Err(ShareError::EmptyPayload);
    }

    let (domain, rest) = trimmed
        .split_once(FIELD_DELIMITER)
        .ok_or(ShareError::MissingVersion)?;
    let (version, payload) = rest
        .split_once(FIELD_DELIMITER)
        .ok_or(ShareError::MissingPayload)?;

    if domain != FRAGMENT_DOMAIN {
        return Err(ShareError::InvalidPrefix(domain.to_owned()));
    }
    if version != FRAGMENT_VERSION {
        return Err(ShareError::UnsupportedVersion(version.to_owned()));
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.as_bytes())
        .map_err(ShareError::InvalidEncoding)?;
    let text = String::from_utf8(bytes).map_err(ShareError::InvalidText)?;
    Ok(Layout::decode(&text, catalog)?)
}

/// Errors that can occur while decoding share link fragments.
#[derive(Debug, Error)]
pub(crate) enum ShareError {
    /// The provided fragment was empty or contained only whitespace.
    #[error("share link fragment was empty")]
    EmptyPayload,
    /// The fragment did not contain a version segment.
    #[error("share link is missing the version")]
    MissingVersion,
    /// The fragment did not include the payload segment.
    #[error("share link is missing the payload")]
    MissingPayload,
    /// The fragment used an unexpected prefix segment.
    #[error("share link prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The fragment used an unsupported version identifier.
    #[error("share link version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode share link payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The decoded payload was not UTF-8 text.
    #[error("share link payload is not text: {0}")]
    InvalidText(#[source] FromUtf8Error),
    /// The payload text did not describe a valid layout.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
