//! Types used in the PWA configuration

mod public_url;

pub use public_url::*;
