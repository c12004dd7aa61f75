//! Meta tag mapping.
//!
//! Maps a logical meta key and its value to the selector identifying an existing tag, and the
//! attributes of a new one. The set of keys is closed, unknown keys are an error the caller is
//! expected to recover from.

use crate::config::MetaValue;
use std::str::FromStr;
use strum::{EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

/// Reasons a meta entry can't be turned into a tag.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetaError {
    #[error("unknown meta tag key '{0}'")]
    UnknownKey(String),
    #[error("meta tag '{key}' requires a non-empty value")]
    EmptyValue { key: String },
    #[error("meta tag '{key}' does not accept a boolean value")]
    FlagNotSupported { key: String },
}

/// The known meta keys.
///
/// Parsing ignores ASCII case as well as `-` and `_`, so `themeColor`, `theme-color` and
/// `theme_color` all refer to the same tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MetaKey {
    Charset,
    Viewport,
    ThemeColor,
    Description,
    ApplicationName,
    AppleMobileWebAppCapable,
    AppleMobileWebAppTitle,
    AppleMobileWebAppStatusBarStyle,
    MobileWebAppCapable,
    MsapplicationTileColor,
    FormatDetection,
    ContentSecurityPolicy,
}

/// How a key identifies its tag in the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MetaKind {
    /// `<meta charset>`
    Charset,
    /// `<meta name=".." content="..">`
    Name(&'static str),
    /// `<meta http-equiv=".." content="..">`
    HttpEquiv(&'static str),
}

impl MetaKey {
    fn kind(self) -> MetaKind {
        match self {
            Self::Charset => MetaKind::Charset,
            Self::Viewport => MetaKind::Name("viewport"),
            Self::ThemeColor => MetaKind::Name("theme-color"),
            Self::Description => MetaKind::Name("description"),
            Self::ApplicationName => MetaKind::Name("application-name"),
            Self::AppleMobileWebAppCapable => MetaKind::Name("apple-mobile-web-app-capable"),
            Self::AppleMobileWebAppTitle => MetaKind::Name("apple-mobile-web-app-title"),
            Self::AppleMobileWebAppStatusBarStyle => {
                MetaKind::Name("apple-mobile-web-app-status-bar-style")
            }
            Self::MobileWebAppCapable => MetaKind::Name("mobile-web-app-capable"),
            Self::MsapplicationTileColor => MetaKind::Name("msapplication-TileColor"),
            Self::FormatDetection => MetaKind::Name("format-detection"),
            Self::ContentSecurityPolicy => MetaKind::HttpEquiv("Content-Security-Policy"),
        }
    }

    /// Whether `true` is a valid value, rendered as `yes`.
    fn accepts_flag(self) -> bool {
        matches!(
            self,
            Self::AppleMobileWebAppCapable | Self::MobileWebAppCapable
        )
    }
}

impl MetaKey {
    /// Look up a key, as written in the configuration.
    pub fn parse(key: &str) -> Result<Self, MetaError> {
        let normalized: String = key.chars().filter(|c| !matches!(c, '-' | '_')).collect();
        Self::from_str(&normalized).map_err(|_| MetaError::UnknownKey(key.to_string()))
    }
}

/// A meta tag to inject.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetaTag {
    /// Matches an already existing tag for the same key.
    pub selector: String,
    /// The attributes of the new tag, in order.
    pub attrs: Vec<(&'static str, String)>,
}

impl MetaTag {
    /// Compute the tag for a configured entry.
    pub fn new(key: &str, value: &MetaValue) -> Result<Self, MetaError> {
        let meta_key = MetaKey::parse(key)?;

        let content = match value {
            MetaValue::Flag(true) if meta_key.accepts_flag() => "yes".to_string(),
            MetaValue::Flag(_) => {
                return Err(MetaError::FlagNotSupported {
                    key: key.to_string(),
                });
            }
            MetaValue::Text(text) if text.trim().is_empty() => {
                return Err(MetaError::EmptyValue {
                    key: key.to_string(),
                });
            }
            MetaValue::Text(text) => text.clone(),
        };

        Ok(match meta_key.kind() {
            MetaKind::Charset => Self {
                selector: "meta[charset]".into(),
                attrs: vec![("charset", content)],
            },
            MetaKind::Name(name) => Self {
                selector: format!(r#"meta[name="{name}"]"#),
                attrs: vec![("name", name.to_string()), ("content", content)],
            },
            MetaKind::HttpEquiv(name) => Self {
                selector: format!(r#"meta[http-equiv="{name}"]"#),
                attrs: vec![("http-equiv", name.to_string()), ("content", content)],
            },
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[rstest]
    #[case("charset", MetaKey::Charset)]
    #[case("themeColor", MetaKey::ThemeColor)]
    #[case("theme-color", MetaKey::ThemeColor)]
    #[case("theme_color", MetaKey::ThemeColor)]
    #[case("appleMobileWebAppCapable", MetaKey::AppleMobileWebAppCapable)]
    #[case("apple-mobile-web-app-status-bar-style", MetaKey::AppleMobileWebAppStatusBarStyle)]
    #[case("msapplicationTileColor", MetaKey::MsapplicationTileColor)]
    fn parse_key(#[case] key: &str, #[case] expected: MetaKey) {
        assert_eq!(MetaKey::parse(key), Ok(expected));
    }

    #[test]
    fn unknown_key() {
        assert_eq!(
            MetaTag::new("fooBar", &MetaValue::from("x")),
            Err(MetaError::UnknownKey("fooBar".into()))
        );
    }

    #[test]
    fn charset() {
        let tag = MetaTag::new("charset", &MetaValue::from("utf-8")).expect("known key");
        assert_eq!(tag.selector, "meta[charset]");
        assert_eq!(tag.attrs, vec![("charset", "utf-8".to_string())]);
    }

    #[test]
    fn named() {
        let tag = MetaTag::new("themeColor", &MetaValue::from("#fff")).expect("known key");
        assert_eq!(tag.selector, r#"meta[name="theme-color"]"#);
        assert_eq!(
            tag.attrs,
            vec![
                ("name", "theme-color".to_string()),
                ("content", "#fff".to_string())
            ]
        );
    }

    #[test]
    fn http_equiv() {
        let tag = MetaTag::new("contentSecurityPolicy", &MetaValue::from("default-src 'self'"))
            .expect("known key");
        assert_eq!(tag.selector, r#"meta[http-equiv="Content-Security-Policy"]"#);
        assert_eq!(tag.attrs[0], ("http-equiv", "Content-Security-Policy".into()));
    }

    #[test]
    fn flags() {
        let tag = MetaTag::new("mobileWebAppCapable", &MetaValue::Flag(true)).expect("flag");
        assert_eq!(tag.attrs[1], ("content", "yes".into()));

        assert_eq!(
            MetaTag::new("viewport", &MetaValue::Flag(true)),
            Err(MetaError::FlagNotSupported {
                key: "viewport".into()
            })
        );
    }

    #[test]
    fn empty_value() {
        assert_eq!(
            MetaTag::new("description", &MetaValue::from(" ")),
            Err(MetaError::EmptyValue {
                key: "description".into()
            })
        );
    }

    #[test]
    fn every_key_maps() {
        for key in MetaKey::iter() {
            let name: &'static str = key.into();
            let value = if key.accepts_flag() {
                MetaValue::Flag(true)
            } else {
                MetaValue::from("value")
            };
            let tag = MetaTag::new(name, &value).expect("all keys must map");
            assert!(tag.selector.starts_with("meta["), "{name}");
        }
    }
}
