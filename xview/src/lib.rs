//! Block template engine.
//!
//! Templates are HTML documents with named, nestable blocks and `{Variable}` placeholders:
//!
//! ```html
//! <!-- BEGIN root -->
//! <ul>
//!   <!-- BEGIN item --><li>{Name}</li><!-- END item -->
//! </ul>
//! <!-- END root -->
//! ```
//!
//! Rendering code binds variables and materializes blocks, one at a time, in document order.
//! Each materialization snapshots the block with the variables bound at that moment, so repeating
//! a block renders a list, and skipping it leaves it out:
//!
//! ```
//! use xview::prelude::*;
//!
//! let template = Template::from_str(
//!     "<!-- BEGIN root --><ul><!-- BEGIN item --><li>{Name}</li><!-- END item --></ul><!-- END root -->",
//! ).unwrap();
//!
//! let mut session = template.session();
//! for name in ["apples", "oranges"] {
//!     session.set("Name", name).unwrap();
//!     session.materialize("root.item").unwrap();
//! }
//! session.materialize("root").unwrap();
//!
//! assert_eq!(
//!     session.serialize().unwrap(),
//!     "<ul><li>apples</li><li>oranges</li></ul>"
//! );
//! ```
pub mod colors;
pub mod config;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod view;

pub use error::Error;

/// Remove unsafe characters from a string printed
/// inside an HTML template.
pub fn safe_html(string: &str) -> String {
    let mut result = String::with_capacity(string.len());

    for c in string.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            c => result.push(c),
        }
    }

    result
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_safe_html() {
        assert_eq!(
            safe_html("<script>alert('hi & \"bye\"')</script>"),
            "&lt;script&gt;alert(&#39;hi &amp; &quot;bye&quot;&#39;)&lt;/script&gt;"
        );
        assert_eq!(safe_html("plain"), "plain");
    }
}
