use std::rc::Rc;

use dioxus::prelude::*;

use crate::i18n::Catalog;

/// Brand bar with one language button per catalog language.
///
/// The buttons are plain markup: each carries `data-lang` and the
/// `LanguageSwitcher` widget attaches the click handling and the `active`
/// state once the page is mounted. The switcher is hidden when only one
/// language ships.
#[component]
pub fn SiteHeader() -> Element {
    let catalog = use_context::<Rc<Catalog>>();
    let languages: Vec<String> = catalog.languages().map(str::to_string).collect();
    let show_switcher = languages.len() > 1;

    rsx! {
        header {
            id: "navbar",
            class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-spark", aria_hidden: "true" }
                    span { class: "navbar__brand-mark", "Tanzania Prime Origins" }
                }

                if show_switcher {
                    div { class: "navbar__locale", role: "group",
                        { languages.iter().map(|code| {
                            let label = code.to_uppercase();
                            rsx! {
                                button {
                                    key: "{code}",
                                    r#type: "button",
                                    class: "lang-btn",
                                    "data-lang": "{code}",
                                    "{label}"
                                }
                            }
                        })}
                    }
                }
            }
        }
    }
}
