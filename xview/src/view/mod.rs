//! Block templates and the views that render them.
//!
//! A template is plain HTML with named blocks and placeholders. Blocks are
//! declared with HTML comments and can be nested; placeholders are variable
//! names in curly braces. The template is compiled once, and every render goes
//! through a [`Session`] which binds variables and materializes blocks.
//!
//! # Example
//!
//! ```
//! # use xview::view::*;
//! let template = Template::from_str(
//!     "<!-- BEGIN root --><h1>{Title}</h1><!-- BEGIN note --><p>{Note}</p><!-- END note --><!-- END root -->",
//! ).unwrap();
//! let mut session = template.session();
//!
//! session.set("Title", "Hello from xview!").unwrap();
//! session.materialize("root").unwrap();
//!
//! // The note block was never materialized, so it's not in the output.
//! assert_eq!(session.serialize().unwrap(), "<h1>Hello from xview!</h1>");
//! ```
pub mod cache;
pub mod components;
pub mod template;

pub use cache::Templates;
pub use components::ArticleView;
pub use template::Context;
pub use template::Error;
pub use template::{Session, State, Template};
