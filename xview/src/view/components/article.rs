//! Article view.
//!
//! Renders an article with a title, an introduction, a list of paragraphs that
//! may each have an image, and an optional list of anchors linking to the paragraphs.
//!
//! The layout template is expected to declare these blocks:
//!
//! | Block                  | Variables                                         |
//! |------------------------|---------------------------------------------------|
//! | `root`                 | `Title`, `Introduction`                           |
//! | `root.paragraph`       | `ParagraphTitle`, `ParagraphText`, `ParagraphIndex` |
//! | `root.paragraph.image` | `ImageUrl`, `ImageAlt`, `ImageTitle`              |
//! | `root.anchors`         | `NumberOfAnchorColumns`, `AnchorsLabel`           |
//! | `root.anchors.anchor`  | `ParagraphTitle`, `ParagraphIndex`                |
use super::super::{Error, Template};
use crate::config::get_config;
use crate::safe_html;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

static LAYOUT: OnceCell<Arc<Template>> = OnceCell::new();

/// Layout shipped with the crate.
pub const DEFAULT_LAYOUT: &str = include_str!("article.html");

/// Resolves an asset reference to a URL the browser can load.
pub trait AssetResolver {
    fn url(&self, reference: &str) -> String;
}

/// Assets served from a fixed location, e.g. `/assets/`.
#[derive(Debug, Clone, Default)]
pub struct PrefixResolver {
    prefix: String,
}

impl PrefixResolver {
    pub fn new(prefix: impl ToString) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }
}

impl AssetResolver for PrefixResolver {
    fn url(&self, reference: &str) -> String {
        if self.prefix.is_empty() {
            reference.to_string()
        } else {
            format!(
                "{}/{}",
                self.prefix.trim_end_matches('/'),
                reference.trim_start_matches('/')
            )
        }
    }
}

/// Article content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub introduction: String,
    #[serde(default)]
    pub show_anchors: bool,
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub title: String,
    /// Rich text, already valid HTML.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub image: Option<Image>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Asset reference, resolved into a URL by an [`AssetResolver`].
    pub reference: String,
    #[serde(default)]
    pub alt: String,
    /// Shown on hover. Falls back to the alt text.
    #[serde(default)]
    pub title: Option<String>,
}

/// Renders articles with a layout template.
#[derive(Debug, Clone)]
pub struct ArticleView {
    template: Arc<Template>,
    anchor_columns_threshold: usize,
    anchors_label: String,
}

impl ArticleView {
    /// Article view using the given layout.
    pub fn new(template: Arc<Template>) -> Self {
        Self {
            template,
            anchor_columns_threshold: get_config().general.anchor_columns_threshold,
            anchors_label: "On this page".to_string(),
        }
    }

    /// Article view using the layout shipped with the crate.
    pub fn default_layout() -> Result<Self, Error> {
        let template = LAYOUT.get_or_try_init(|| Template::from_str(DEFAULT_LAYOUT).map(Arc::new))?;
        Ok(Self::new(template.clone()))
    }

    /// Articles with more paragraphs than this show anchors in two columns.
    pub fn anchor_columns_threshold(mut self, threshold: usize) -> Self {
        self.anchor_columns_threshold = threshold;
        self
    }

    /// Heading of the anchors list.
    pub fn anchors_label(mut self, label: impl ToString) -> Self {
        self.anchors_label = label.to_string();
        self
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Render the article.
    pub fn render(&self, article: &Article, assets: &impl AssetResolver) -> Result<String, Error> {
        let mut session = self.template.session();

        session
            .set("Title", safe_html(&article.title))?
            .set("Introduction", safe_html(&article.introduction))?
            .set(
                "NumberOfAnchorColumns",
                if article.paragraphs.len() > self.anchor_columns_threshold {
                    "2"
                } else {
                    "1"
                },
            )?
            .set("AnchorsLabel", safe_html(&self.anchors_label))?;

        for (index, paragraph) in article.paragraphs.iter().enumerate() {
            // Only paragraphs with an image get the image block.
            if let Some(ref image) = paragraph.image {
                session
                    .set("ImageUrl", safe_html(&assets.url(&image.reference)))?
                    .set("ImageAlt", safe_html(&image.alt))?;

                let title = match image.title {
                    Some(ref title) => safe_html(title),
                    None => session.get("ImageAlt").unwrap_or_default().to_string(),
                };

                session.set("ImageTitle", title)?;
                session.materialize("root.paragraph.image")?;
            }

            session
                .set("ParagraphTitle", safe_html(&paragraph.title))?
                .set("ParagraphText", &paragraph.text)?
                .set("ParagraphIndex", index + 1)?;

            session.materialize("root.paragraph")?;

            if article.show_anchors {
                session.materialize("root.anchors.anchor")?;
            }
        }

        if article.show_anchors {
            session.materialize("root.anchors")?;
        }

        session.materialize("root")?;

        debug!(
            "rendered article \"{}\" with {} paragraphs",
            article.title,
            article.paragraphs.len()
        );

        session.serialize()
    }
}
