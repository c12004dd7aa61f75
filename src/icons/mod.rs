//! The icon set of a build.

pub mod generator;

pub use generator::*;

use crate::config::RtcIcons;
use anyhow::Result;
use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use std::collections::HashSet;
use std::fmt::{Debug, Formatter};
use std::ops::Deref;
use std::sync::{Arc, Mutex, PoisonError};

/// A generated icon, along with the name it gets published under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconAsset {
    /// The output path prefix, followed by the file name.
    pub asset_name: String,
    pub icon: GeneratedIcon,
}

impl Deref for IconAsset {
    type Target = GeneratedIcon;

    fn deref(&self) -> &Self::Target {
        &self.icon
    }
}

/// The ordered, de-duplicated icons of a build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IconSet(Vec<IconAsset>);

impl IconSet {
    /// Decorate generated icons with their asset names.
    ///
    /// If two icons end up with the same asset name, the first one wins.
    pub fn new(cfg: &RtcIcons, icons: Vec<GeneratedIcon>) -> Self {
        let mut seen = HashSet::new();
        let icons = icons
            .into_iter()
            .filter_map(|icon| {
                let asset_name = cfg.asset_name(&icon.filename);
                if !seen.insert(asset_name.clone()) {
                    tracing::warn!(asset = %asset_name, "dropping duplicate icon");
                    return None;
                }
                Some(IconAsset { asset_name, icon })
            })
            .collect();

        Self(icons)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IconAsset> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The icons listed in the manifest.
    pub fn manifest_icons(&self) -> impl Iterator<Item = &IconAsset> {
        self.iter().filter(|icon| icon.platform == IconPlatform::Chrome)
    }

    /// The icons linked from the HTML document.
    pub fn link_icons(&self) -> impl Iterator<Item = (&IconAsset, &str)> {
        self.iter().filter_map(|icon| icon.rel.as_deref().map(|rel| (icon, rel)))
    }
}

impl<'a> IntoIterator for &'a IconSet {
    type Item = &'a IconAsset;
    type IntoIter = std::slice::Iter<'a, IconAsset>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The error of a shared generation, cloned to every waiting caller.
#[derive(Clone)]
struct SharedError(Arc<anyhow::Error>);

impl Debug for SharedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl std::fmt::Display for SharedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for SharedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

type Generation = Shared<BoxFuture<'static, Result<Arc<IconSet>, SharedError>>>;

/// Produces the icon set of a build, at most once.
///
/// Both the HTML and the emit stage ask for the icon set. The first call starts the generation,
/// calls arriving while it is running wait for the same result, and later calls get the cached
/// set. A failed generation is handed to all callers waiting for it, and then forgotten.
pub struct IconSetBuilder {
    cfg: Arc<RtcIcons>,
    generator: Arc<dyn IconGenerator>,
    slot: Mutex<Option<Generation>>,
}

impl IconSetBuilder {
    pub fn new(cfg: Arc<RtcIcons>, generator: Arc<dyn IconGenerator>) -> Self {
        Self {
            cfg,
            generator,
            slot: Mutex::new(None),
        }
    }

    /// Get the icon set, generating it if required.
    #[tracing::instrument(level = "trace", skip_all)]
    pub async fn icon_set(&self) -> Result<Arc<IconSet>> {
        let generation = {
            let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
            slot.get_or_insert_with(|| self.start()).clone()
        };

        match generation.clone().await {
            Ok(icons) => Ok(icons),
            Err(err) => {
                let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
                if slot
                    .as_ref()
                    .is_some_and(|current| Shared::ptr_eq(current, &generation))
                {
                    *slot = None;
                }
                Err(err.into())
            }
        }
    }

    fn start(&self) -> Generation {
        let cfg = self.cfg.clone();
        let generator = self.generator.clone();

        async move {
            let Some(source) = &cfg.source else {
                tracing::debug!("no icon source configured, skipping icon generation");
                return Ok(Arc::new(IconSet::default()));
            };

            tracing::info!(%source, "generating icons");
            let icons = generator
                .generate(source)
                .await
                .map_err(|err| SharedError(Arc::new(err)))?;
            let icons = IconSet::new(&cfg, icons);
            tracing::info!(count = icons.len(), "finished generating icons");

            Ok::<_, SharedError>(Arc::new(icons))
        }
        .boxed()
        .shared()
    }
}
