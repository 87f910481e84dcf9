//! Single-page UI
//!
//! Page composition (header, body, footer), theme, toast notifications
//! and the eframe application driving them.

pub mod app;
pub mod components;
pub mod theme;
pub mod views;
