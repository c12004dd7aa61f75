//! HTML merge pipeline.
//!
//! Injects the PWA markup into the `<head>` of the HTML document. Author provided meta tags and
//! titles are never replaced. Links are not checked for duplicates, the merge is expected to
//! run once per build.

use crate::common::html_rewrite::{Document, HtmlTag};
use crate::config::{PublicUrl, RtcPwa};
use crate::icons::IconSet;
use crate::meta::MetaTag;
use anyhow::Result;

const REL_ICON: &str = "icon";
const REL_MANIFEST: &str = "manifest";
const MIME_PNG: &str = "image/png";

/// Merges the generated markup into an HTML document.
pub struct HtmlPipeline<'a> {
    cfg: &'a RtcPwa,
    icons: &'a IconSet,
    public_url: &'a PublicUrl,
}

impl<'a> HtmlPipeline<'a> {
    pub fn new(cfg: &'a RtcPwa, icons: &'a IconSet, public_url: &'a PublicUrl) -> Self {
        Self {
            cfg,
            icons,
            public_url,
        }
    }

    /// Merge into the provided HTML, returning the new document.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn merge(&self, html: &str) -> Result<String> {
        let mut doc = Document::new(html);

        self.append_meta(&mut doc)?;
        self.append_icon_links(&mut doc)?;
        self.append_manifest_and_title(&mut doc)?;

        Ok(doc.into_string())
    }

    fn append_meta(&self, doc: &mut Document) -> Result<()> {
        for (key, value) in self.cfg.meta.enabled() {
            let tag = match MetaTag::new(key, value) {
                Ok(tag) => tag,
                Err(err) => {
                    tracing::warn!(key, "skipping meta tag: {err}");
                    continue;
                }
            };

            if doc.exists(&tag.selector)? {
                tracing::debug!(selector = %tag.selector, "already exists in document, skipping");
                continue;
            }

            let meta = tag
                .attrs
                .into_iter()
                .fold(HtmlTag::new("meta"), |meta, (name, value)| {
                    meta.attr(name, value)
                });
            tracing::debug!(key, "adding meta tag");
            doc.append_to_head(&meta.to_string())?;
        }

        Ok(())
    }

    fn append_icon_links(&self, doc: &mut Document) -> Result<()> {
        for (icon, rel) in self.icons.link_icons() {
            let mut link = HtmlTag::new("link")
                .attr("rel", rel)
                .attr("href", self.public_url.join(&icon.asset_name));
            if rel == REL_ICON {
                link = link.attr("type", MIME_PNG);
            }
            if let Some(sizes) = &icon.sizes {
                link = link.attr("sizes", sizes);
            }

            tracing::debug!(asset = %icon.asset_name, "adding icon to HTML");
            doc.append_to_head(&link.to_string())?;
        }

        Ok(())
    }

    fn append_manifest_and_title(&self, doc: &mut Document) -> Result<()> {
        let manifest = &self.cfg.manifest.filename;
        let link = HtmlTag::new("link")
            .attr("rel", REL_MANIFEST)
            .attr("href", self.public_url.join(manifest));
        tracing::debug!(asset = %manifest, "adding manifest link");
        doc.append_to_head(&link.to_string())?;

        if let Some(title) = &self.cfg.title {
            if doc.exists("title")? {
                tracing::debug!("document already has a title, skipping");
            } else {
                tracing::debug!(title = %title, "adding title");
                doc.append_to_head(&HtmlTag::new("title").text(title).to_string())?;
            }
        }

        Ok(())
    }
}
