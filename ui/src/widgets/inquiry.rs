//! Inquiry form: validates the two required fields and simulates the
//! submission locally with a fixed delay. Nothing leaves the page.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::InquiryConfig;
use crate::host::{Event, EventKind, Host, Target};

pub struct InquiryForm<H: Host> {
    host: Rc<H>,
    config: InquiryConfig,
    form: H::Node,
    success: Option<H::Node>,
    submitted: Cell<bool>,
}

impl<H: Host> InquiryForm<H> {
    /// Returns `None` when the form itself is missing.
    pub fn mount(host: Rc<H>, config: &InquiryConfig) -> Option<Rc<Self>> {
        let Some(form) = host.query(&config.form_selector) else {
            tracing::debug!("inquiry form disabled: no `{}`", config.form_selector);
            return None;
        };

        let inquiry = Rc::new(Self {
            success: host.query(&config.success_selector),
            host: host.clone(),
            config: config.clone(),
            form: form.clone(),
            submitted: Cell::new(false),
        });

        let this = inquiry.clone();
        host.listen(
            Target::Node(form.clone()),
            EventKind::Submit,
            Box::new(move |event: &Event| {
                event.prevent_default();
                this.submit();
            }),
        );

        for input in host.query_within(&form, &config.input_selector) {
            let Some(group) = host.parent(&input) else {
                continue;
            };
            for (kind, focused) in [(EventKind::Focus, true), (EventKind::Blur, false)] {
                let this = inquiry.clone();
                let group = group.clone();
                host.listen(
                    Target::Node(input.clone()),
                    kind,
                    Box::new(move |_: &Event| {
                        this.host
                            .set_class(&group, &this.config.focused_class, focused)
                    }),
                );
            }
        }

        Some(inquiry)
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted.get()
    }

    fn field(&self, selector: &str) -> String {
        self.host
            .query_within(&self.form, selector)
            .first()
            .map(|input| self.host.value(input).trim().to_string())
            .unwrap_or_default()
    }

    /// Handle a submit. Blank required fields abort without feedback.
    pub fn submit(&self) {
        if self.submitted.get() {
            return;
        }
        let name = self.field(&self.config.name_selector);
        let company = self.field(&self.config.company_selector);
        if name.is_empty() || company.is_empty() {
            // TODO: surface a validation message once copy for it exists in the catalog.
            tracing::debug!("inquiry not sent: required field empty");
            return;
        }

        self.submitted.set(true);
        let host = self.host.as_ref();
        if let Some(button) = host
            .query_within(&self.form, &self.config.submit_selector)
            .first()
        {
            host.set_disabled(button, true);
            host.set_inner_html(button, &self.config.processing_label);
        }

        let form_host = self.host.clone();
        let form = self.form.clone();
        let success = self.success.clone();
        let success_class = self.config.success_class.clone();
        host.set_timeout(
            self.config.submit_delay_ms,
            Box::new(move || {
                form_host.set_style(&form, "display", "none");
                if let Some(success) = &success {
                    form_host.set_class(success, &success_class, true);
                }
                tracing::info!("inquiry received");
            }),
        );
    }
}
