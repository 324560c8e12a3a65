//! Scroll reveal: staggered fade-in for elements the first time they scroll
//! into view. One-shot per element.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::RevealConfig;
use crate::core::format;
use crate::host::{Host, VisibilityOptions};

pub struct ScrollReveal<H: Host> {
    host: Rc<H>,
    config: RevealConfig,
    targets: Vec<H::Node>,
    revealed: RefCell<Vec<H::Node>>,
}

impl<H: Host> ScrollReveal<H> {
    pub fn mount(host: Rc<H>, config: &RevealConfig) -> Rc<Self> {
        host.inject_style(&revealed_rule(config));

        let targets = host.query_all(&config.selector);
        let reveal = Rc::new(Self {
            host: host.clone(),
            config: config.clone(),
            targets: targets.clone(),
            revealed: RefCell::new(Vec::new()),
        });
        if targets.is_empty() {
            tracing::debug!("scroll reveal: nothing matches `{}`", config.selector);
            return reveal;
        }

        for (index, node) in targets.iter().enumerate() {
            let delay = u32::try_from(index)
                .unwrap_or(u32::MAX)
                .saturating_mul(config.stagger_ms);
            host.set_style(node, "opacity", "0");
            host.set_style(node, "transform", &format::translate_y(config.offset_px));
            host.set_style(
                node,
                "transition",
                &format::reveal_transition(config.duration_ms, delay),
            );
        }

        let options = VisibilityOptions {
            threshold: config.threshold,
            root_margin: config.root_margin.clone(),
        };
        let this = reveal.clone();
        host.observe_visibility(
            &targets,
            &options,
            Box::new(move |node: &H::Node| this.reveal(node)),
        );
        reveal
    }

    /// Mark `node` revealed. Returns `true` so the observer lets go of it.
    fn reveal(&self, node: &H::Node) -> bool {
        let mut revealed = self.revealed.borrow_mut();
        if !revealed.contains(node) {
            self.host.set_class(node, &self.config.revealed_class, true);
            revealed.push(node.clone());
        }
        true
    }

    pub fn targets(&self) -> &[H::Node] {
        &self.targets
    }

    pub fn is_revealed(&self, node: &H::Node) -> bool {
        self.revealed.borrow().contains(node)
    }
}

/// Global override that pins revealed elements to their resting state.
fn revealed_rule(config: &RevealConfig) -> String {
    format!(
        ".{} {{ opacity: 1 !important; transform: {} !important; }}",
        config.revealed_class,
        format::translate_y(0.0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::FakeHost;

    #[test]
    fn stagger_follows_document_order() {
        let host = Rc::new(FakeHost::new());
        let first = host.create("div");
        host.add_class(first, "vetting-item");
        let second = host.create("article");
        host.add_class(second, "product-card");
        let third = host.create("form");
        host.add_class(third, "portal-form");

        ScrollReveal::mount(host.clone(), &RevealConfig::default());

        assert_eq!(host.style(first, "opacity").as_deref(), Some("0"));
        assert_eq!(
            host.style(first, "transform").as_deref(),
            Some("translateY(30px)")
        );
        assert_eq!(
            host.style(first, "transition").as_deref(),
            Some("opacity 600ms ease 0ms, transform 600ms ease 0ms")
        );
        assert_eq!(
            host.style(third, "transition").as_deref(),
            Some("opacity 600ms ease 200ms, transform 600ms ease 200ms")
        );
        assert_eq!(
            host.observer_options(),
            vec![VisibilityOptions {
                threshold: 0.1,
                root_margin: "0px 0px -50px 0px".into(),
            }]
        );
    }

    #[test]
    fn override_rule_is_injected_once() {
        let host = Rc::new(FakeHost::new());
        ScrollReveal::mount(host.clone(), &RevealConfig::default());
        assert_eq!(
            host.injected_styles(),
            vec![".animate-in { opacity: 1 !important; transform: translateY(0px) !important; }"]
        );
    }
}
