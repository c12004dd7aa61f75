//! The PWA pipelines.
//!
//! Each pipeline covers one artifact: the HTML document, the manifest, and the published files.

mod html;
mod manifest;
mod publish;

pub use html::HtmlPipeline;
pub use manifest::{Manifest, ManifestIcon, find_html_entry, snake_case};
pub use publish::publish;
