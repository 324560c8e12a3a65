use std::rc::Rc;

use dioxus::prelude::*;

use crate::components::SiteHeader;
use crate::i18n::{Catalog, FALLBACK_LANGUAGE};

const SITE_CSS: Asset = asset!("/assets/styling/site.css");

const VETTING_STEPS: [&str; 5] = [
    "vetting-source",
    "vetting-integrity",
    "vetting-quality",
    "vetting-compliance",
    "vetting-monitoring",
];

const PRODUCTS: [&str; 5] = ["coffee", "cloves", "cashews", "avocados", "honey"];

/// One element that the language switcher re-renders.
#[derive(Clone, PartialEq)]
struct Tagged {
    key: String,
    html: String,
}

impl Tagged {
    fn new(catalog: &Catalog, key: impl Into<String>) -> Self {
        let key = key.into();
        let html = catalog
            .lookup(FALLBACK_LANGUAGE, &key)
            .unwrap_or_default();
        Self { key, html }
    }
}

/// The whole single-page site: hero, vetting protocol, product directory
/// carousel, inquiry portal and footer.
///
/// Tagged elements are pre-rendered in the fallback language; the widgets
/// mounted by `ui::start` take over once the page is ready. Nothing here is
/// reactive, so Dioxus never re-renders over the widgets' DOM writes.
#[component]
pub fn Home() -> Element {
    let catalog = use_context::<Rc<Catalog>>();
    let t = |key: &str| Tagged::new(&catalog, key);

    let hero_title = t("hero-title");
    let hero_subtitle = t("hero-subtitle");
    let vetting_title = t("vetting-title");
    let directory_title = t("directory-title");
    let portal_title = t("portal-title");
    let portal_name = t("portal-name");
    let portal_company = t("portal-company");
    let portal_submit = t("portal-submit");
    let portal_success = t("portal-success");
    let copyright = t("footer-copyright");

    let steps: Vec<(String, Tagged)> = VETTING_STEPS
        .iter()
        .enumerate()
        .map(|(index, key)| (format!("{:02}", index + 1), t(*key)))
        .collect();

    let cards: Vec<(Tagged, Tagged, Tagged)> = PRODUCTS
        .iter()
        .map(|product| {
            (
                t("product-verified"),
                t(&format!("product-{product}-name")),
                t(&format!("product-{product}-region")),
            )
        })
        .collect();

    rsx! {
        document::Link { rel: "stylesheet", href: SITE_CSS }

        SiteHeader {}

        main { class: "page",
            section { class: "hero",
                h1 {
                    class: "hero__title",
                    "data-i18n": hero_title.key.clone(),
                    dangerous_inner_html: hero_title.html.clone(),
                }
                p {
                    class: "hero__subtitle",
                    "data-i18n": hero_subtitle.key.clone(),
                    dangerous_inner_html: hero_subtitle.html.clone(),
                }
            }

            section { class: "vetting",
                h2 {
                    class: "section-title",
                    "data-i18n": vetting_title.key.clone(),
                    dangerous_inner_html: vetting_title.html.clone(),
                }
                ol { class: "vetting__list",
                    { steps.iter().map(|(number, step)| rsx! {
                        li { key: "{number}", class: "vetting-item",
                            span { class: "vetting-item__number", "{number}" }
                            span {
                                class: "vetting-item__label",
                                "data-i18n": step.key.clone(),
                                dangerous_inner_html: step.html.clone(),
                            }
                        }
                    })}
                }
            }

            section { class: "directory",
                h2 {
                    class: "section-title",
                    "data-i18n": directory_title.key.clone(),
                    dangerous_inner_html: directory_title.html.clone(),
                }
                div { class: "carousel",
                    button {
                        r#type: "button",
                        class: "carousel-prev",
                        aria_label: "Previous",
                        "‹"
                    }
                    div { class: "carousel-container",
                        div { class: "carousel-track",
                            { cards.iter().enumerate().map(|(index, (badge, name, region))| rsx! {
                                article { key: "{index}", class: "product-card",
                                    span {
                                        class: "product-card__badge",
                                        "data-i18n": badge.key.clone(),
                                        dangerous_inner_html: badge.html.clone(),
                                    }
                                    h3 {
                                        class: "product-card__name",
                                        "data-i18n": name.key.clone(),
                                        dangerous_inner_html: name.html.clone(),
                                    }
                                    p {
                                        class: "product-card__region",
                                        "data-i18n": region.key.clone(),
                                        dangerous_inner_html: region.html.clone(),
                                    }
                                }
                            })}
                        }
                    }
                    button {
                        r#type: "button",
                        class: "carousel-next",
                        aria_label: "Next",
                        "›"
                    }
                }
                div { class: "carousel-dots",
                    { (0..PRODUCTS.len()).map(|index| rsx! {
                        button {
                            key: "{index}",
                            r#type: "button",
                            class: "carousel-dot",
                            aria_label: "Go to slide {index}",
                        }
                    })}
                }
            }

            section { class: "portal",
                h2 {
                    class: "section-title",
                    "data-i18n": portal_title.key.clone(),
                    dangerous_inner_html: portal_title.html.clone(),
                }
                form { id: "inquiryForm", class: "portal-form",
                    div { class: "input-group",
                        label {
                            r#for: "fullName",
                            "data-i18n": portal_name.key.clone(),
                            dangerous_inner_html: portal_name.html.clone(),
                        }
                        input { id: "fullName", name: "fullName", r#type: "text", autocomplete: "name" }
                    }
                    div { class: "input-group",
                        label {
                            r#for: "company",
                            "data-i18n": portal_company.key.clone(),
                            dangerous_inner_html: portal_company.html.clone(),
                        }
                        input { id: "company", name: "company", r#type: "text", autocomplete: "organization" }
                    }
                    button { r#type: "submit", class: "submit-btn",
                        span {
                            "data-i18n": portal_submit.key.clone(),
                            dangerous_inner_html: portal_submit.html.clone(),
                        }
                    }
                }
                div { id: "formSuccess", class: "form-success",
                    p {
                        "data-i18n": portal_success.key.clone(),
                        dangerous_inner_html: portal_success.html.clone(),
                    }
                }
            }
        }

        footer { class: "footer",
            p {
                "data-i18n": copyright.key.clone(),
                dangerous_inner_html: copyright.html.clone(),
            }
        }
    }
}
