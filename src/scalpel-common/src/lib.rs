//! Common utilities shared across the Scalpel crates.

pub mod truncate;

pub use truncate::{truncate_for_display, truncate_with_ellipsis};
