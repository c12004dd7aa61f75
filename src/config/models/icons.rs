use bytes::Bytes;
use serde::{Deserialize, Deserializer};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// The master image all icons get rendered from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IconSource {
    /// An image file on disk.
    Path(PathBuf),
    /// An already loaded image.
    Bytes(Bytes),
}

impl IconSource {
    fn rebase(self, base: &Path) -> Self {
        match self {
            Self::Path(path) if path.is_relative() => Self::Path(base.join(path)),
            other => other,
        }
    }
}

impl<'de> Deserialize<'de> for IconSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        PathBuf::deserialize(deserializer).map(Self::Path)
    }
}

impl Display for IconSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Bytes(data) => write!(f, "<{} bytes>", data.len()),
        }
    }
}

impl From<&str> for IconSource {
    fn from(value: &str) -> Self {
        Self::Path(value.into())
    }
}

impl From<PathBuf> for IconSource {
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

impl From<Bytes> for IconSource {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

/// Config options for icon generation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOptsIconsDetails {
    /// The source image, icon generation is disabled without it.
    #[serde(default)]
    pub source: Option<IconSource>,

    /// The directory prefix of the generated icon files [default: icons/]
    #[serde(default, alias = "output_path")]
    pub output_path: Option<String>,

    /// Run the generated PNG files through an optimizer [default: false]
    #[serde(default)]
    pub optimize: Option<bool>,
}

/// Icon options, either as a plain source path or in full.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ConfigOptsIcons {
    Source(IconSource),
    Details(ConfigOptsIconsDetails),
}

impl ConfigOptsIcons {
    /// Expand the shorthand form into the full form.
    pub fn normalize(self) -> ConfigOptsIconsDetails {
        match self {
            Self::Source(source) => ConfigOptsIconsDetails {
                source: Some(source),
                ..Default::default()
            },
            Self::Details(details) => details,
        }
    }

    pub(super) fn rebase(self, base: &Path) -> Self {
        let mut details = self.normalize();
        details.source = details.source.map(|source| source.rebase(base));
        Self::Details(details)
    }
}

impl From<ConfigOptsIconsDetails> for ConfigOptsIcons {
    fn from(value: ConfigOptsIconsDetails) -> Self {
        Self::Details(value)
    }
}
