//! Theme name sanitizing, validation and disambiguation.

use crate::error::ValidationError;
use crate::settings::{CUSTOM_THEME, DEFAULT_THEME, MAX_THEME_NAME_LEN};

/// Trim, then drop every character outside `[A-Za-z0-9 _-]`.
pub fn sanitize(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect()
}

/// Sanitize and check a proposed theme name.
pub fn validate(name: &str) -> Result<String, ValidationError> {
    let sanitized = sanitize(name);
    if sanitized.is_empty() {
        return Err(ValidationError::Empty);
    }

    let len = sanitized.chars().count();
    if len > MAX_THEME_NAME_LEN {
        return Err(ValidationError::TooLong { len });
    }

    if is_reserved(&sanitized) {
        return Err(ValidationError::Reserved { name: sanitized });
    }

    Ok(sanitized)
}

/// `default` and `custom`, compared case-insensitively.
pub fn is_reserved(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower == DEFAULT_THEME || lower == CUSTOM_THEME
}

/// `base` if unused, else the first free `"<base> (n)"` with n >= 2.
pub fn unique_name(base: &str, existing: &[String]) -> String {
    if !existing.iter().any(|t| t == base) {
        return base.to_string();
    }

    let mut counter = 2usize;
    loop {
        let candidate = format!("{} ({})", base, counter);
        if !existing.iter().any(|t| *t == candidate) {
            return candidate;
        }
        counter += 1;
    }
}
