//! Normalisation of free-form input fields before they are stored.

use crate::error::CoreError;

/// Uppercase an ISO-4217 style currency code and check it is three letters.
pub fn normalize_currency(code: &str) -> Result<String, CoreError> {
    let code = code.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::Validation(format!(
            "currency must be a three-letter code, got '{code}'"
        )));
    }
    Ok(code.to_ascii_uppercase())
}

/// Trim an asset tag and reject it when nothing is left.
pub fn normalize_asset_tag(tag: &str) -> Result<String, CoreError> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(CoreError::Validation("asset_tag must not be empty".into()));
    }
    Ok(tag.to_string())
}
