use serde::Deserialize;
use std::collections::BTreeMap;

/// Config options for the web app manifest.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOptsManifest {
    /// The application name [default: the title]
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, alias = "short_name")]
    pub short_name: Option<String>,

    /// The default orientation [default: portrait]
    #[serde(default)]
    pub orientation: Option<String>,

    /// The display mode [default: standalone]
    #[serde(default)]
    pub display: Option<String>,

    /// The launch URL [default: the HTML entry point of the build]
    #[serde(default, alias = "start_url")]
    pub start_url: Option<String>,

    /// [default: the shared theme color]
    #[serde(default, alias = "theme_color")]
    pub theme_color: Option<String>,

    /// [default: #fff]
    #[serde(default, alias = "background_color")]
    pub background_color: Option<String>,

    /// The output file name of the manifest [default: manifest.json]
    #[serde(default)]
    pub filename: Option<String>,

    /// Any other manifest member (e.g. `description`, `scope`), copied into the manifest.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
