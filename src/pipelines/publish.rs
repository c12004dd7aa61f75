//! Publishing of the generated files.

use crate::assets::BuildAssets;
use crate::icons::IconSet;
use bytes::Bytes;

/// Write the icons and the manifest into the build output.
///
/// Existing files with the same name are replaced.
#[tracing::instrument(level = "trace", skip_all)]
pub fn publish(assets: &mut BuildAssets, icons: &IconSet, manifest: Bytes, manifest_name: &str) {
    for icon in icons {
        tracing::debug!(asset = %icon.asset_name, "publishing icon");
        assets.insert(icon.asset_name.clone(), icon.image.clone());
    }

    tracing::debug!(asset = %manifest_name, "publishing manifest");
    assets.insert(manifest_name, manifest);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::RtcPwa;
    use crate::icons::test::mock_icons;

    #[test]
    fn publishes_all_files() {
        let cfg = RtcPwa::default();
        let icons = IconSet::new(&cfg.icons, mock_icons());
        let mut assets: BuildAssets = [("index.html", "<html></html>")].into_iter().collect();

        publish(&mut assets, &icons, Bytes::from_static(b"{}"), "manifest.json");

        let names: Vec<_> = assets.names().collect();
        assert_eq!(
            names,
            [
                "index.html",
                "icons/favicon-16x16.png",
                "icons/apple-touch-icon.png",
                "icons/android-chrome-192x192.png",
                "icons/android-chrome-512x512.png",
                "manifest.json",
            ]
        );
        assert_eq!(
            assets.get("icons/apple-touch-icon.png"),
            Some(&Bytes::from("apple-touch-icon.png"))
        );
        assert_eq!(assets.get("manifest.json"), Some(&Bytes::from_static(b"{}")));
    }

    #[test]
    fn overwrites_existing_files() {
        let mut assets: BuildAssets = [("manifest.json", "old")].into_iter().collect();

        publish(
            &mut assets,
            &IconSet::default(),
            Bytes::from_static(b"new"),
            "manifest.json",
        );

        assert_eq!(assets.len(), 1);
        assert_eq!(assets.get("manifest.json"), Some(&Bytes::from_static(b"new")));
    }
}
