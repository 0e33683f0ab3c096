//! Configuration access port trait.

use crate::domain::error::FluxbackError;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// Returns `default` when the key is absent; malformed values are errors.
    fn get_u64(&self, section: &str, key: &str, default: u64) -> Result<u64, FluxbackError>;

    /// A present, non-blank string value.
    fn require_string(&self, section: &str, key: &str) -> Result<String, FluxbackError> {
        match self.get_string(section, key) {
            Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
            _ => Err(FluxbackError::ConfigInvalid {
                section: section.into(),
                key: key.into(),
                reason: "value must not be empty".into(),
            }),
        }
    }

    /// Like [`ConfigPort::get_string`], but blank values count as absent.
    fn get_non_blank(&self, section: &str, key: &str) -> Option<String> {
        self.get_string(section, key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}
