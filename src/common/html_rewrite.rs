use anyhow::{Context, Result};
use lol_html::html_content::{ContentType, Element};
use lol_html::{HtmlRewriter, Selector, Settings, element};
use std::fmt::{Display, Formatter};

/// A wrapper for Html modifications, and rewrites.
#[derive(Debug)]
pub struct Document(Vec<u8>);

impl Document {
    /// Create a new document
    ///
    /// Note: if this is not a valid HTML document, it will fail later on.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self(data.into())
    }

    /// Serialize the document.
    pub fn into_string(self) -> String {
        String::from_utf8(self.0)
            .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
    }

    #[inline]
    fn default_settings() -> Settings<'static, 'static> {
        Settings {
            ..Settings::default()
        }
    }

    /// `element!` panics on a malformed selector, so it is checked up front.
    fn check_selector(selector: &str) -> Result<()> {
        selector
            .parse::<Selector>()
            .with_context(|| format!("invalid selector '{selector}'"))?;
        Ok(())
    }

    /// Run a mutating selector for the provided selector.
    ///
    /// The content of the document will be replaced with the output of the operation.
    pub fn select_mut(
        &mut self,
        selector: &str,
        mut call: impl FnMut(&mut Element<'_, '_>) -> Result<()>,
    ) -> Result<()> {
        Self::check_selector(selector)?;

        let mut buf = Vec::new();
        let mut rewriter = HtmlRewriter::new(
            Settings {
                element_content_handlers: vec![element!(selector, |x| {
                    call(x)?;
                    Ok(())
                })],
                ..Self::default_settings()
            },
            |out: &[u8]| buf.extend_from_slice(out),
        );
        rewriter.write(self.0.as_slice())?;
        rewriter.end()?;

        self.0 = buf;

        Ok(())
    }

    /// Run a non-mutating handler for the provided selector
    ///
    /// To perform modifications on the `Document` use `Document::select_mut`.
    pub fn select(&self, selector: &str, mut call: impl FnMut(&Element<'_, '_>)) -> Result<()> {
        Self::check_selector(selector)?;

        let mut rewriter = HtmlRewriter::new(
            Settings {
                element_content_handlers: vec![element!(selector, |el| {
                    call(el);
                    Ok(())
                })],
                ..Self::default_settings()
            },
            |_: &[u8]| {},
        );
        rewriter.write(self.0.as_slice())?;
        rewriter.end()?;

        Ok(())
    }

    pub fn len(&self, selector: &str) -> Result<usize> {
        let mut len = 0;
        self.select(selector, |_| len += 1)?;

        Ok(len)
    }

    /// Check if at least one element matches the selector.
    pub fn exists(&self, selector: &str) -> Result<bool> {
        Ok(self.len(selector)? > 0)
    }

    /// Append HTML to the end of the first `<head>`.
    ///
    /// A document without a `<head>` gets an empty one first, as the first child of `<html>`
    /// or, lacking that too, in front of the first element.
    pub fn append_to_head(&mut self, html: &str) -> Result<()> {
        self.ensure_head()?;

        let mut first = true;
        self.select_mut("head", |el| {
            if std::mem::take(&mut first) {
                el.append(html, ContentType::Html);
            }
            Ok(())
        })
    }

    fn ensure_head(&mut self) -> Result<()> {
        if self.exists("head")? {
            return Ok(());
        }

        let (selector, inside) = if self.exists("html")? {
            ("html", true)
        } else {
            ("*", false)
        };

        let mut first = true;
        self.select_mut(selector, |el| {
            if std::mem::take(&mut first) {
                if inside {
                    el.prepend("<head></head>", ContentType::Html);
                } else {
                    el.before("<head></head>", ContentType::Html);
                }
            }
            Ok(())
        })?;

        // no element at all, e.g. just a doctype
        if first {
            self.0.extend_from_slice(b"<head></head>");
        }

        Ok(())
    }
}

/// An element to be rendered into a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlTag {
    name: &'static str,
    attrs: Vec<(String, String)>,
    text: Option<String>,
}

impl HtmlTag {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            text: None,
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Set the text content, which also makes this a non-void element.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

impl Display for HtmlTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}", self.name)?;
        for (name, value) in &self.attrs {
            write!(f, r#" {}="{}""#, name, htmlescape::encode_minimal(value))?;
        }
        f.write_str(">")?;

        if let Some(text) = &self.text {
            write!(f, "{}</{}>", htmlescape::encode_minimal(text), self.name)?;
        }

        Ok(())
    }
}
