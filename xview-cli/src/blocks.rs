use std::path::Path;

use xview::colors::MaybeColorize;
use xview::view::Template;
use xview::Error;

/// Print the block tree of a template.
pub fn blocks(path: &Path) -> Result<(), Error> {
    let template = Template::new(path)?;

    for (depth, block, placeholders) in describe(&template) {
        let indent = "  ".repeat(depth);

        if placeholders.is_empty() {
            println!("{}{}", indent, block.purple());
        } else {
            println!("{}{} {}", indent, block.purple(), placeholders.join(", "));
        }
    }

    Ok(())
}

/// Each block's nesting depth, path and placeholders, in document order.
fn describe(template: &Template) -> Vec<(usize, String, Vec<String>)> {
    template
        .blocks()
        .map(|block| {
            let depth = block.path().matches('.').count();
            let placeholders = block
                .placeholders()
                .map(|name| format!("{{{}}}", name))
                .collect();

            (depth, block.path().to_string(), placeholders)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_describe() -> Result<(), Error> {
        let template = Template::from_str(
            "<!-- BEGIN root -->{Title}<!-- BEGIN item --><li>{Name} {Index}</li><!-- END item --><!-- END root -->",
        )?;

        assert_eq!(
            describe(&template),
            vec![
                (0, "root".to_string(), vec!["{Title}".to_string()]),
                (
                    1,
                    "root.item".to_string(),
                    vec!["{Name}".to_string(), "{Index}".to_string()]
                ),
            ]
        );

        Ok(())
    }
}
