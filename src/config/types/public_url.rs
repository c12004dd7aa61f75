use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use url::Url;

/// The public URL under which the build output is served.
///
/// Every reference written into the manifest or the HTML document is joined onto it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PublicUrl {
    /// No public URL configured, references stay relative to the output root.
    #[default]
    Default,
    Absolute(Url),
    AbsolutePath(String),
    RelativePath(String),
}

impl PublicUrl {
    /// Join an output-relative path onto the public URL.
    ///
    /// This is a plain path join: exactly one `/` separates the base and the path, and an
    /// unset base leaves the path untouched.
    pub fn join(&self, path: &str) -> String {
        let base = match self {
            Self::Default => return path.to_string(),
            Self::Absolute(url) => url.as_str(),
            Self::AbsolutePath(base) | Self::RelativePath(base) => base.as_str(),
        };

        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl FromStr for PublicUrl {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.is_empty() {
            Self::Default
        } else if s.starts_with('/') {
            Self::AbsolutePath(s.to_string())
        } else if let Ok(url) = Url::parse(s) {
            Self::Absolute(url)
        } else {
            Self::RelativePath(s.to_string())
        })
    }
}

impl<'de> Deserialize<'de> for PublicUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PublicUrl::from_str(&s).map_err(de::Error::custom)
    }
}

impl Serialize for PublicUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_ref())
    }
}

impl AsRef<str> for PublicUrl {
    fn as_ref(&self) -> &str {
        match self {
            Self::Default => "",
            Self::Absolute(url) => url.as_str(),
            Self::AbsolutePath(url) => url,
            Self::RelativePath(url) => url,
        }
    }
}

impl Display for PublicUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}
