use std::collections::{BTreeSet, HashSet};

use ui::i18n::{Catalog, FALLBACK_LANGUAGE};

/// Translation completeness test.
/// Ensures every non-fallback locale provides exactly the keys present in
/// the fallback (en) `site.ftl`: a missing key leaves English text on a
/// Swahili page, an extra key is dead weight nothing renders.
///
/// This is a lightweight parser:
/// - Ignores comment lines starting with `#`
/// - Treats any line of the form `key =` or `key=` as a message definition
/// - Skips blank / attribute / continuation lines
/// - Does not attempt to parse multi-line pattern bodies (only keys)
///
/// If you add a new locale:
/// 1. Create `ui/i18n/<code>/site.ftl`
/// 2. Copy all keys from `en/site.ftl`
/// 3. Register it below and run `cargo test -p prime-origins-ui`.
const EN: &str = include_str!("../i18n/en/site.ftl");
const SW: &str = include_str!("../i18n/sw/site.ftl");

const LOCALES: &[(&str, &str)] = &[
    ("sw", SW),
    // Add new locales here.
];

#[test]
fn all_locales_match_fallback_keys() {
    let fallback_keys = extract_keys(EN);

    assert!(!fallback_keys.is_empty(), "Fallback (en) contains no keys.");
    assert_no_dup_keys(EN, "en");

    let mut failures = Vec::new();

    for (locale, src) in LOCALES {
        assert_no_dup_keys(src, locale);

        let keys = extract_keys(src);
        let missing: BTreeSet<&String> = fallback_keys.difference(&keys).collect();
        let extra: BTreeSet<&String> = keys.difference(&fallback_keys).collect();

        if !missing.is_empty() {
            failures.push(format!(
                "Locale {locale} is missing {} key(s):\n  {}",
                missing.len(),
                missing.into_iter().cloned().collect::<Vec<_>>().join("\n  ")
            ));
        }
        if !extra.is_empty() {
            failures.push(format!(
                "Locale {locale} defines {} key(s) unknown to en:\n  {}",
                extra.len(),
                extra.into_iter().cloned().collect::<Vec<_>>().join("\n  ")
            ));
        }
    }

    if !failures.is_empty() {
        panic!(
            "Translation completeness check failed:\n\n{}\n\nHint: copy the missing keys from en, then translate.",
            failures.join("\n\n")
        );
    }
}

#[test]
fn every_registered_locale_is_embedded_and_renders() {
    let catalog = Catalog::embedded().expect("embedded catalog parses");
    let fallback = catalog.keys(FALLBACK_LANGUAGE).to_vec();
    assert!(!fallback.is_empty());

    for (locale, _) in LOCALES {
        assert!(catalog.has_language(locale), "{locale} is not embedded");
        for key in &fallback {
            let text = catalog.lookup(locale, key);
            assert!(
                text.as_deref().is_some_and(|t| !t.trim().is_empty()),
                "{locale}/{key} does not render"
            );
        }
    }
}

/// Extract message keys from a Fluent file (simple heuristic).
fn extract_keys(src: &str) -> HashSet<String> {
    let mut keys = HashSet::new();

    for line in src.lines() {
        if let Some(key) = definition_key(line) {
            keys.insert(key.to_string());
        }
    }

    keys
}

fn definition_key(line: &str) -> Option<&str> {
    let line = line.trim();
    // Comments, attributes and terms are not messages.
    if line.is_empty() || line.starts_with('#') || line.starts_with('.') || line.starts_with('-')
    {
        return None;
    }
    let (left, _right) = line.split_once('=')?;
    let key = left.trim();
    let valid = !key.is_empty()
        && !key.contains(' ')
        && !key.contains('\t')
        && !key.starts_with('[')
        && !key.starts_with('@');
    valid.then_some(key)
}

/// Assert no duplicate key definitions in a single FTL file (rudimentary).
fn assert_no_dup_keys(src: &str, locale: &str) {
    let mut seen = HashSet::new();
    let mut dups = BTreeSet::new();

    for raw in src.lines() {
        if let Some(key) = definition_key(raw) {
            if !seen.insert(key) {
                dups.insert(format!("{key}  (line: \"{raw}\")"));
            }
        }
    }

    if !dups.is_empty() {
        panic!(
            "Duplicate key definitions in {locale}:\n  {}",
            dups.into_iter().collect::<Vec<_>>().join("\n  ")
        );
    }
}
