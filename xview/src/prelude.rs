//! Types needed to render templates.
//!
//! ```
//! use xview::prelude::*;
//! ```
pub use crate::config::Config;
pub use crate::logging::Logger;
pub use crate::view::components::{Article, ArticleView, AssetResolver, Image, Paragraph};
pub use crate::view::{Context, Session, Template};
