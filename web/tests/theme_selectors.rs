//! Stylesheet lint for the web build.
//!
//! The widgets only toggle class names; the visual state for each of them
//! lives in `ui/assets/styling/site.css`. A renamed or dropped selector would
//! leave a widget working but invisible, so check the ones they rely on.

const SITE_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/styling/site.css"
));

/// Structural selectors the `Home` view and the widgets query.
const REQUIRED_SELECTORS: &[&str] = &[
    ":root",
    "body {",
    ".lang-btn",
    ".vetting-item",
    ".carousel-container",
    ".carousel-track",
    ".product-card",
    ".carousel-prev",
    ".carousel-next",
    ".carousel-dot",
    ".portal-form",
    ".input-group",
    ".submit-btn",
    ".form-success",
];

/// Runtime state classes toggled by the widgets.
const STATE_SELECTORS: &[&str] = &[
    ".lang-btn.active",
    ".carousel-dot.active",
    ".input-group.focused",
    ".form-success.show",
];

#[test]
fn site_css_contains_required_selectors() {
    let missing: Vec<&str> = REQUIRED_SELECTORS
        .iter()
        .chain(STATE_SELECTORS)
        .copied()
        .filter(|sel| !SITE_CSS.contains(sel))
        .collect();

    assert!(
        missing.is_empty(),
        "Missing {} required CSS selectors in site.css:\n{}",
        missing.len(),
        missing.join("\n")
    );
}

#[test]
fn success_panel_starts_hidden() {
    let block = SITE_CSS
        .split(".form-success {")
        .nth(1)
        .and_then(|rest| rest.split('}').next())
        .expect(".form-success block present");
    assert!(
        block.contains("display: none"),
        "the success panel must be hidden until the form completes"
    );
}

#[test]
fn site_css_not_trivially_empty() {
    let non_ws_len = SITE_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 1_500,
        "site.css appears unexpectedly small ({non_ws_len} non-whitespace chars); \
         did the file get truncated or the path change?"
    );
}
