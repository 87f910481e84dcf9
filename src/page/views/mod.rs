//! Page views

pub mod extract;

pub use extract::render_extract_view;
