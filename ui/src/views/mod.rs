//! Page views.

mod home;

pub use home::Home;
