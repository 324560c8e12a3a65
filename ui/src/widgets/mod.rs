//! The four page widgets. Each one owns its state, talks to the page only
//! through [`Host`](crate::host::Host), and never looks at another widget.

pub mod carousel;
pub mod inquiry;
pub mod language;
pub mod reveal;

pub use carousel::Carousel;
pub use inquiry::InquiryForm;
pub use language::LanguageSwitcher;
pub use reveal::ScrollReveal;
