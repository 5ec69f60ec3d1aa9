//! Views built on top of block templates.
pub mod article;

pub use article::{Article, ArticleView, AssetResolver, Image, Paragraph, PrefixResolver};
