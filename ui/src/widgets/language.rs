//! Language switcher: re-renders every tagged element from the catalog and
//! remembers the choice.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::I18nConfig;
use crate::core::storage::LanguagePreference;
use crate::host::{Event, EventKind, Host, Target};
use crate::i18n::Catalog;

pub struct LanguageSwitcher<H: Host> {
    host: Rc<H>,
    catalog: Rc<Catalog>,
    config: I18nConfig,
    preference: LanguagePreference,
    current: RefCell<String>,
}

impl<H: Host> LanguageSwitcher<H> {
    /// Wire a click handler to every language control, then apply the
    /// stored language (or the default).
    pub fn mount(host: Rc<H>, catalog: Rc<Catalog>, config: &I18nConfig) -> Rc<Self> {
        let preference = LanguagePreference::new(config.storage_key.clone());
        let initial = preference.restore_or(host.as_ref(), &config.default_language);

        let switcher = Rc::new(Self {
            host: host.clone(),
            catalog,
            config: config.clone(),
            preference,
            current: RefCell::new(initial.clone()),
        });

        for control in host.query_all(&config.control_selector) {
            let Some(code) = host.attribute(&control, &config.code_attribute) else {
                tracing::debug!("language control without `{}`", config.code_attribute);
                continue;
            };
            let this = switcher.clone();
            host.listen(
                Target::Node(control),
                EventKind::Click,
                Box::new(move |_: &Event| this.set_language(&code)),
            );
        }

        switcher.set_language(&initial);
        switcher
    }

    pub fn current_language(&self) -> String {
        self.current.borrow().clone()
    }

    pub fn set_language(&self, code: &str) {
        *self.current.borrow_mut() = code.to_string();
        self.preference.save(self.host.as_ref(), code);

        for node in self.host.query_all(&self.config.tagged_selector) {
            let Some(key) = self.host.attribute(&node, &self.config.key_attribute) else {
                continue;
            };
            // Missing language or key: keep whatever is rendered now.
            if let Some(text) = self.catalog.lookup(code, &key) {
                self.host.set_inner_html(&node, &text);
            }
        }

        for control in self.host.query_all(&self.config.control_selector) {
            let selected =
                self.host.attribute(&control, &self.config.code_attribute).as_deref() == Some(code);
            self.host
                .set_class(&control, &self.config.active_class, selected);
        }

        self.host.set_document_language(code);
        tracing::debug!(code, "language applied");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::FakeHost;

    fn catalog() -> Rc<Catalog> {
        Rc::new(
            Catalog::from_sources([
                ("en", "title = Hello<br>there\nonly-en = English only\n"),
                ("sw", "title = Habari\n"),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn missing_key_leaves_content() {
        let host = Rc::new(FakeHost::new());
        let node = host.create("p");
        host.set_attribute(node, "data-i18n", "only-en");
        host.seed_inner_html(node, "original");

        let switcher = LanguageSwitcher::mount(host.clone(), catalog(), &I18nConfig::default());
        assert_eq!(host.inner_html(node), "English only");

        switcher.set_language("sw");
        assert_eq!(host.inner_html(node), "English only");
        assert_eq!(host.document_language().as_deref(), Some("sw"));
        assert_eq!(switcher.current_language(), "sw");
    }

    #[test]
    fn unknown_language_is_still_recorded() {
        let host = Rc::new(FakeHost::new());
        let node = host.create("h1");
        host.set_attribute(node, "data-i18n", "title");

        let switcher = LanguageSwitcher::mount(host.clone(), catalog(), &I18nConfig::default());
        switcher.set_language("fr");

        assert_eq!(host.inner_html(node), "Hello<br>there");
        assert_eq!(host.stored("lang").as_deref(), Some("fr"));
        assert_eq!(host.document_language().as_deref(), Some("fr"));
    }

    #[test]
    fn controls_without_code_get_no_handler() {
        let host = Rc::new(FakeHost::new());
        let bare = host.create("button");
        host.add_class(bare, "lang-btn");
        let sw = host.create("button");
        host.add_class(sw, "lang-btn");
        host.set_attribute(sw, "data-lang", "sw");

        LanguageSwitcher::mount(host.clone(), catalog(), &I18nConfig::default());
        assert_eq!(host.listener_count(EventKind::Click), 1);
        assert!(!host.has_class(bare, "active"));
    }
}
