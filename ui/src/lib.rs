//! Client-side interactivity for the Tanzania Prime Origins site.
//!
//! Four independent widgets ([`widgets`]) run against a [`host::Host`]: the
//! language switcher, the product carousel, the inquiry form and the scroll
//! reveal. [`mount_page`] wires all of them once the page is ready; [`start`]
//! does that against the real browser. The Dioxus [`views`] render the markup
//! the widgets hook into.

pub mod config;
pub mod core;
pub mod error;
pub mod host;
pub mod i18n;
pub mod views;
pub mod widgets;

pub mod components {
    // Brand + language buttons (components/site_header.rs)
    pub mod site_header;
    pub use site_header::SiteHeader;
}

use std::rc::Rc;

use crate::config::SiteConfig;
use crate::host::Host;
use crate::i18n::Catalog;
use crate::widgets::{Carousel, InquiryForm, LanguageSwitcher, ScrollReveal};

/// Handles to the mounted widgets. Widgets whose required markup is missing
/// are `None`.
pub struct Page<H: Host> {
    pub language: Rc<LanguageSwitcher<H>>,
    pub carousel: Option<Rc<Carousel<H>>>,
    pub inquiry: Option<Rc<InquiryForm<H>>>,
    pub reveal: Rc<ScrollReveal<H>>,
}

/// Initialize every widget once. They share nothing but the host.
pub fn mount_page<H: Host>(host: Rc<H>, catalog: Rc<Catalog>, config: &SiteConfig) -> Page<H> {
    Page {
        language: LanguageSwitcher::mount(host.clone(), catalog, &config.i18n),
        carousel: Carousel::mount(host.clone(), &config.carousel),
        inquiry: InquiryForm::mount(host.clone(), &config.inquiry),
        reveal: ScrollReveal::mount(host, &config.reveal),
    }
}

/// Mount the widgets on the live document.
#[cfg(target_arch = "wasm32")]
pub fn start(catalog: Rc<Catalog>, config: &SiteConfig) {
    match crate::host::web::WebHost::new() {
        Ok(web) => {
            let page = mount_page(Rc::new(web), catalog, config);
            tracing::info!(
                lang = %page.language.current_language(),
                carousel = page.carousel.is_some(),
                inquiry = page.inquiry.is_some(),
                reveal_targets = page.reveal.targets().len(),
                "page widgets mounted"
            );
        }
        Err(err) => tracing::error!("cannot mount page widgets: {err}"),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn start(_catalog: Rc<Catalog>, _config: &SiteConfig) {
    let platform = crate::core::platform::Platform::current();
    if !platform.has_browser_host() {
        tracing::warn!(?platform, "no browser host; page widgets stay inert");
    }
}
