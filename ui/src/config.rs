//! Site configuration: selectors, class names, timings and geometry constants
//! consumed by the widgets.
//!
//! Defaults ship embedded as `config/site.json`. Every section (and every
//! field inside it) falls back to its default when omitted, so the document
//! only needs to list what differs.

use serde::Deserialize;

use crate::error::ConfigError;

const EMBEDDED_CONFIG: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config/site.json"));

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub i18n: I18nConfig,
    pub carousel: CarouselConfig,
    pub inquiry: InquiryConfig,
    pub reveal: RevealConfig,
}

impl SiteConfig {
    pub fn from_json(src: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(src)?)
    }

    /// Parse the embedded document, falling back to defaults if it is malformed.
    pub fn embedded() -> Self {
        match Self::from_json(EMBEDDED_CONFIG) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("{err}; using built-in defaults");
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    pub storage_key: String,
    pub default_language: String,
    pub tagged_selector: String,
    pub key_attribute: String,
    pub control_selector: String,
    pub code_attribute: String,
    pub active_class: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            storage_key: "lang".into(),
            default_language: "en".into(),
            tagged_selector: "[data-i18n]".into(),
            key_attribute: "data-i18n".into(),
            control_selector: ".lang-btn".into(),
            code_attribute: "data-lang".into(),
            active_class: "active".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub track_selector: String,
    pub item_selector: String,
    pub prev_selector: String,
    pub next_selector: String,
    pub indicator_selector: String,
    pub active_class: String,
    /// Horizontal gap between items, in px.
    pub gap_px: f64,
    /// Duration of the slide transition. The animation guard uses the same value.
    pub transition_ms: u32,
    pub easing: String,
    /// Minimum net horizontal drag distance that counts as a swipe.
    pub swipe_threshold_px: f64,
    pub resize_debounce_ms: u32,
    pub dimmed_opacity: String,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            track_selector: ".carousel-track".into(),
            item_selector: ".product-card".into(),
            prev_selector: ".carousel-prev".into(),
            next_selector: ".carousel-next".into(),
            indicator_selector: ".carousel-dot".into(),
            active_class: "active".into(),
            gap_px: 32.0,
            transition_ms: 600,
            easing: "cubic-bezier(0.4, 0, 0.2, 1)".into(),
            swipe_threshold_px: 50.0,
            resize_debounce_ms: 100,
            dimmed_opacity: "0.3".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InquiryConfig {
    pub form_selector: String,
    pub name_selector: String,
    pub company_selector: String,
    pub submit_selector: String,
    pub input_selector: String,
    pub success_selector: String,
    pub submit_delay_ms: u32,
    pub processing_label: String,
    pub focused_class: String,
    pub success_class: String,
}

impl Default for InquiryConfig {
    fn default() -> Self {
        Self {
            form_selector: "#inquiryForm".into(),
            name_selector: "#fullName".into(),
            company_selector: "#company".into(),
            submit_selector: ".submit-btn".into(),
            input_selector: "input".into(),
            success_selector: "#formSuccess".into(),
            submit_delay_ms: 1200,
            processing_label: "<span>Processing...</span>".into(),
            focused_class: "focused".into(),
            success_class: "show".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selector: String,
    pub revealed_class: String,
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    pub root_margin: String,
    pub stagger_ms: u32,
    pub duration_ms: u32,
    pub offset_px: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".vetting-item, .product-card, .portal-form".into(),
            revealed_class: "animate-in".into(),
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".into(),
            stagger_ms: 100,
            duration_ms: 600,
            offset_px: 30.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_document_matches_defaults() {
        let parsed = SiteConfig::from_json(EMBEDDED_CONFIG).expect("embedded config parses");
        assert_eq!(parsed, SiteConfig::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let parsed =
            SiteConfig::from_json(r#"{ "carousel": { "transition_ms": 450 } }"#).unwrap();
        assert_eq!(parsed.carousel.transition_ms, 450);
        assert_eq!(parsed.carousel.gap_px, 32.0);
        assert_eq!(parsed.inquiry, InquiryConfig::default());
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(SiteConfig::from_json("{ carousel: }").is_err());
    }
}
