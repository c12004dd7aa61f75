use crate::config::MetaValue;
use crate::meta::MetaKey;
use std::collections::BTreeMap;

pub const DEFAULT_CHARSET: &str = "utf-8";
pub const DEFAULT_APPLE_MOBILE_WEB_APP_CAPABLE: &str = "yes";
pub const DEFAULT_VIEWPORT: &str =
    "width=device-width, initial-scale=1, maximum-scale=1, user-scalable=no";

/// Runtime config of the meta tags, in injection order.
///
/// An entry without a value is kept, so that the position of a default is stable even when
/// it resolves to nothing (e.g. `themeColor` without a theme color).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RtcMeta(pub Vec<(String, Option<MetaValue>)>);

impl RtcMeta {
    pub(super) fn new(mut opts: BTreeMap<String, MetaValue>, theme_color: Option<&str>) -> Self {
        let defaults = [
            ("charset", Some(MetaValue::from(DEFAULT_CHARSET))),
            ("themeColor", theme_color.map(MetaValue::from)),
            (
                "appleMobileWebAppCapable",
                Some(MetaValue::from(DEFAULT_APPLE_MOBILE_WEB_APP_CAPABLE)),
            ),
            ("viewport", Some(MetaValue::from(DEFAULT_VIEWPORT))),
        ];

        let mut entries: Vec<_> = defaults
            .into_iter()
            .map(|(key, default)| {
                let value = take_entry(&mut opts, key).or(default);
                (key.to_string(), value)
            })
            .collect();
        entries.extend(opts.into_iter().map(|(key, value)| (key, Some(value))));

        Self(entries)
    }

    /// Iterate over the entries which should result in a tag.
    pub fn enabled(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.0.iter().filter_map(|(key, value)| match value {
            None | Some(MetaValue::Flag(false)) => None,
            Some(value) => Some((key.as_str(), value)),
        })
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, value)| value.as_ref())
    }
}

/// Remove the user entries for the same tag as `key`, in any accepted spelling.
///
/// The exact spelling wins over the others, which are dropped.
fn take_entry(opts: &mut BTreeMap<String, MetaValue>, key: &str) -> Option<MetaValue> {
    let target = MetaKey::parse(key).ok();
    let aliases: Vec<String> = opts
        .keys()
        .filter(|k| k.as_str() != key && target.is_some() && MetaKey::parse(k).ok() == target)
        .cloned()
        .collect();
    let aliased: Vec<MetaValue> = aliases
        .iter()
        .filter_map(|alias| opts.remove(alias))
        .collect();

    match opts.remove(key) {
        Some(value) => {
            if !aliased.is_empty() {
                tracing::warn!(key, ?aliases, "ignoring duplicate meta entries");
            }
            Some(value)
        }
        None => {
            if aliased.len() > 1 {
                tracing::warn!(key, ?aliases, "meta entry given more than once, using the first");
            }
            aliased.into_iter().next()
        }
    }
}
