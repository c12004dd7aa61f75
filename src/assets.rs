//! The output assets of a build.

use bytes::Bytes;
use indexmap::IndexMap;

/// The output files of a build, keyed by their output relative name.
///
/// Files keep the order the host emitted them in. The PWA pipelines only add files, writing
/// an existing name replaces its content in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildAssets(IndexMap<String, Bytes>);

impl BuildAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, returning the content it replaced.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<Bytes>) -> Option<Bytes> {
        let name = name.into();
        let previous = self.0.insert(name.clone(), content.into());
        if previous.is_some() {
            tracing::debug!(asset = %name, "overwriting existing asset");
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&Bytes> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// The names of all files, in emission order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Bytes)> {
        self.0.iter().map(|(name, content)| (name.as_str(), content))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N, C> FromIterator<(N, C)> for BuildAssets
where
    N: Into<String>,
    C: Into<Bytes>,
{
    fn from_iter<T: IntoIterator<Item = (N, C)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, content)| (name.into(), content.into()))
                .collect(),
        )
    }
}
