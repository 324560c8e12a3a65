//! Translation catalog for the site.
//!
//! This module wires together:
//! - `rust-embed` (compile-time embedding of `.ftl` files)
//! - `fluent` (parsing + message formatting, one bundle per language)
//! - `unic-langid` (language identifiers for the bundles)
//!
//! Folder layout (relative to this crate root):
//! ```text
//! i18n/
//!   en/site.ftl   (fallback/reference)
//!   sw/site.ftl   (Swahili)
//! ```
//!
//! The catalog is a read-only table: `lookup(code, key)` returns `None` when
//! either the language or the message is missing, and callers leave the
//! existing content alone in that case.
//!
//! To add a new locale:
//! 1. Copy `en/site.ftl` to `i18n/<code>/site.ftl`.
//! 2. Translate each value (keep IDs identical).
//! 3. Register it in `tests/i18n_missing_keys.rs` and run the tests.
use std::collections::BTreeMap;
use std::fmt;

use fluent::{FluentBundle, FluentResource};
use fluent_syntax::ast;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

use crate::error::CatalogError;

/// Fluent "domain": every locale folder holds `{DOMAIN}.ftl`.
const DOMAIN: &str = "site";

/// Language whose file is the reference key set.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Embed all locale folders under `i18n/`.
#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

struct Locale {
    bundle: FluentBundle<FluentResource>,
    keys: Vec<String>,
}

#[derive(Default)]
pub struct Catalog {
    locales: BTreeMap<String, Locale>,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("languages", &self.locales.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Catalog {
    /// Build the catalog from the embedded `i18n/<code>/site.ftl` files.
    pub fn embedded() -> Result<Self, CatalogError> {
        let file_name = format!("{DOMAIN}.ftl");
        let mut sources = Vec::new();
        for path in Localizations::iter() {
            let Some((lang, name)) = path.split_once('/') else {
                continue;
            };
            if name != file_name {
                continue;
            }
            let Some(file) = Localizations::get(&path) else {
                continue;
            };
            let text = std::str::from_utf8(&file.data)
                .map_err(|_| CatalogError::Encoding {
                    lang: lang.to_string(),
                })?
                .to_string();
            sources.push((lang.to_string(), text));
        }
        Self::from_sources(sources.iter().map(|(lang, src)| (lang.as_str(), src.as_str())))
    }

    /// Like [`Catalog::embedded`], but logs a broken bundle and falls back to
    /// an empty catalog (pre-rendered text then simply stays as it is).
    pub fn embedded_or_empty() -> Self {
        Self::embedded().unwrap_or_else(|err| {
            tracing::error!("loading translations: {err}");
            Self::default()
        })
    }

    /// Build a catalog from `(language code, fluent source)` pairs.
    pub fn from_sources<'a>(
        sources: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, CatalogError> {
        let mut locales = BTreeMap::new();
        for (lang, src) in sources {
            let id: LanguageIdentifier = lang
                .parse()
                .map_err(|_| CatalogError::InvalidLanguage(lang.to_string()))?;
            let resource = FluentResource::try_new(src.to_string()).map_err(|(_, errors)| {
                CatalogError::Syntax {
                    lang: lang.to_string(),
                    count: errors.len(),
                }
            })?;

            let keys = message_ids(&resource);

            let mut bundle = FluentBundle::new(vec![id]);
            bundle.set_use_isolating(false);
            bundle
                .add_resource(resource)
                .map_err(|_| CatalogError::Duplicate {
                    lang: lang.to_string(),
                })?;

            locales.insert(lang.to_string(), Locale { bundle, keys });
        }
        Ok(Self { locales })
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    pub fn has_language(&self, lang: &str) -> bool {
        self.locales.contains_key(lang)
    }

    /// Message IDs defined for `lang`, in file order.
    pub fn keys(&self, lang: &str) -> &[String] {
        self.locales
            .get(lang)
            .map(|locale| locale.keys.as_slice())
            .unwrap_or_default()
    }

    pub fn lookup(&self, lang: &str, key: &str) -> Option<String> {
        let bundle = &self.locales.get(lang)?.bundle;
        let pattern = bundle.get_message(key)?.value()?;
        let mut errors = Vec::new();
        let text = bundle.format_pattern(pattern, None, &mut errors);
        if !errors.is_empty() {
            tracing::debug!(lang, key, "formatting reported {} error(s)", errors.len());
        }
        Some(text.into_owned())
    }
}

/// Message IDs in the parsed resource, in file order. Terms and comments
/// are not messages.
fn message_ids(resource: &FluentResource) -> Vec<String> {
    resource
        .entries()
        .filter_map(|entry| match entry {
            ast::Entry::Message(message) => Some(message.id.name.to_string()),
            _ => None,
        })
        .collect()
}
