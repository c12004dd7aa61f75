use crate::config::ConfigOptsManifest;
use std::collections::BTreeMap;

pub const DEFAULT_MANIFEST_FILENAME: &str = "manifest.json";
pub const DEFAULT_ORIENTATION: &str = "portrait";
pub const DEFAULT_DISPLAY: &str = "standalone";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#fff";

/// Runtime config for the web app manifest.
#[derive(Clone, Debug, PartialEq)]
pub struct RtcManifest {
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub orientation: Option<String>,
    pub display: Option<String>,
    /// An explicit launch URL, derived from the HTML entry point when missing.
    pub start_url: Option<String>,
    pub theme_color: Option<String>,
    pub background_color: Option<String>,
    /// Additional manifest members, still in their user provided naming.
    pub extra: BTreeMap<String, serde_json::Value>,
    /// The output file name. Internal, it is not part of the manifest document.
    pub filename: String,
}

impl RtcManifest {
    pub(super) fn new(
        opts: ConfigOptsManifest,
        title: Option<&str>,
        theme_color: Option<&str>,
    ) -> Self {
        Self {
            name: opts.name.or_else(|| title.map(ToString::to_string)),
            short_name: opts.short_name,
            orientation: opts
                .orientation
                .or_else(|| Some(DEFAULT_ORIENTATION.to_string())),
            display: opts.display.or_else(|| Some(DEFAULT_DISPLAY.to_string())),
            start_url: opts.start_url.filter(|url| !url.trim().is_empty()),
            theme_color: opts
                .theme_color
                .or_else(|| theme_color.map(ToString::to_string)),
            background_color: opts
                .background_color
                .or_else(|| Some(DEFAULT_BACKGROUND_COLOR.to_string())),
            extra: opts.extra,
            filename: opts
                .filename
                .unwrap_or_else(|| DEFAULT_MANIFEST_FILENAME.to_string()),
        }
    }
}
