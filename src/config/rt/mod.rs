//! Runtime config
//!
//! The fully defaulted configuration the pipelines work with. It is resolved once, when the
//! plugin gets created, and is immutable afterwards.

mod icons;
mod manifest;
mod meta;

pub use icons::*;
pub use manifest::*;
pub use meta::*;

use crate::config::ConfigOptsPwa;

/// Runtime config for the PWA pipelines.
#[derive(Clone, Debug, PartialEq)]
pub struct RtcPwa {
    /// The document title, only injected when the document has none.
    pub title: Option<String>,
    pub manifest: RtcManifest,
    pub icons: RtcIcons,
    pub meta: RtcMeta,
}

impl RtcPwa {
    /// Resolve the user provided options.
    ///
    /// Precedence is: explicit value, then the shared top-level value (`title`,
    /// `themeColor`), then the hardcoded default. This never fails, gaps are defaulted. An
    /// empty title or start URL counts as unset.
    pub fn from_opts(opts: ConfigOptsPwa) -> Self {
        let ConfigOptsPwa {
            title,
            theme_color,
            manifest,
            icons,
            meta,
        } = opts;
        let title = title.filter(|title| !title.trim().is_empty());

        let manifest = RtcManifest::new(
            manifest.unwrap_or_default(),
            title.as_deref(),
            theme_color.as_deref(),
        );
        let icons = RtcIcons::new(icons.map(|icons| icons.normalize()).unwrap_or_default());
        let meta = RtcMeta::new(meta.unwrap_or_default(), theme_color.as_deref());

        Self {
            title,
            manifest,
            icons,
            meta,
        }
    }
}

impl Default for RtcPwa {
    fn default() -> Self {
        Self::from_opts(ConfigOptsPwa::default())
    }
}
