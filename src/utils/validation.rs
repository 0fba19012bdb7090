use crate::utils::error::{Result, TarotError};
use std::fmt::Display;
use std::ops::RangeInclusive;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl Display, reason: impl Into<String>) -> TarotError {
    TarotError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// The model endpoint must be an absolute http(s) URL with a host.
pub fn validate_endpoint(field: &str, endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint.trim())
        .map_err(|e| invalid(field, endpoint, format!("Not a valid URL: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field,
            endpoint,
            format!("Expected an http or https URL, got '{}'", url.scheme()),
        ));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid(field, endpoint, "The URL has no host"));
    }

    Ok(url)
}

/// Deck file and image directory paths. Existence is checked when the
/// file is opened, not here.
pub fn validate_path(field: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field, path, "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field, path.escape_debug(), "Path contains a NUL byte"));
    }
    Ok(())
}

pub fn validate_non_empty_string(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "Value cannot be blank"));
    }
    Ok(())
}

pub fn validate_at_least(field: &str, value: u64, min: u64) -> Result<()> {
    if value < min {
        return Err(invalid(field, value, format!("Must be at least {}", min)));
    }
    Ok(())
}

/// Rejects values outside `range`. NaN is never contained, so it fails too.
pub fn validate_range<T>(field: &str, value: T, range: RangeInclusive<T>) -> Result<()>
where
    T: PartialOrd + Display,
{
    if !range.contains(&value) {
        return Err(invalid(
            field,
            &value,
            format!("Must be between {} and {}", range.start(), range.end()),
        ));
    }
    Ok(())
}
