//! Utility modules for the sitemap generator.

pub mod date;
pub mod escape;
pub mod url;
