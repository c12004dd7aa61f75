use crate::config::{ConfigOptsIconsDetails, IconSource};

pub const DEFAULT_ICON_OUTPUT_PATH: &str = "icons/";

/// Runtime config for icon generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RtcIcons {
    /// The master image. `None` disables icon generation.
    pub source: Option<IconSource>,
    /// Prefix of the generated icon asset names.
    pub output_path: String,
    /// Optimize the generated PNG files.
    pub optimize: bool,
}

impl RtcIcons {
    pub(super) fn new(opts: ConfigOptsIconsDetails) -> Self {
        Self {
            source: opts.source,
            output_path: opts
                .output_path
                .unwrap_or_else(|| DEFAULT_ICON_OUTPUT_PATH.to_string()),
            optimize: opts.optimize.unwrap_or_default(),
        }
    }

    /// The asset name of a generated icon file.
    pub fn asset_name(&self, filename: &str) -> String {
        format!("{}{}", self.output_path, filename)
    }
}
