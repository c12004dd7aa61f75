//! Common functionality and types.

pub mod html_rewrite;
