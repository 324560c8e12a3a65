use std::rc::Rc;

use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::config::SiteConfig;
use ui::i18n::Catalog;
use ui::views::Home;

fn main() {
    dioxus::logger::init(Level::INFO).expect("logger already initialized");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let catalog = use_hook(|| Rc::new(Catalog::embedded_or_empty()));
    let config = use_hook(|| Rc::new(SiteConfig::embedded()));
    use_context_provider(|| catalog.clone());

    // Widgets attach to the rendered markup, so mount them after the first render.
    use_effect(move || ui::start(catalog.clone(), &config));

    rsx! {
        Home {}
    }
}
