//! PWA config.
//!
//! The user facing model lives in [`models`], the resolved runtime model in [`rt`].

pub mod models;
pub mod rt;
pub mod types;

pub use models::*;
pub use rt::*;
pub use types::*;
