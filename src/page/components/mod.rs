//! Reusable page components

pub mod toasts;
