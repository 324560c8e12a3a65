//! Local persistence of the language preference.

use crate::host::Host;

/// The single stored setting: the last language the visitor picked.
#[derive(Debug, Clone)]
pub struct LanguagePreference {
    key: String,
}

impl LanguagePreference {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Stored code, if any. Empty values and storage failures count as absent.
    pub fn restore<H: Host>(&self, host: &H) -> Option<String> {
        match host.storage_get(&self.key) {
            Ok(value) => value.filter(|code| !code.trim().is_empty()),
            Err(err) => {
                tracing::warn!("reading language preference: {err}");
                None
            }
        }
    }

    pub fn restore_or<H: Host>(&self, host: &H, default: &str) -> String {
        self.restore(host).unwrap_or_else(|| default.to_string())
    }

    pub fn save<H: Host>(&self, host: &H, code: &str) {
        if let Err(err) = host.storage_set(&self.key, code) {
            tracing::warn!("persisting language preference: {err}");
        }
    }
}
