use std::fs::{read_to_string, write};
use std::path::Path;

use xview::view::components::{Article, ArticleView, PrefixResolver};
use xview::view::Template;
use xview::Error;

use crate::logging::{warning, written};

/// Render an article from a JSON file.
pub fn render(
    content: &Path,
    layout: Option<&Path>,
    assets: &str,
    output: Option<&Path>,
) -> Result<(), Error> {
    let html = render_to_string(content, layout, assets)?;

    match output {
        Some(path) => {
            write(path, html)?;
            written(path.display());
        }
        None => print!("{}", html),
    }

    Ok(())
}

fn render_to_string(content: &Path, layout: Option<&Path>, assets: &str) -> Result<String, Error> {
    let article: Article = serde_json::from_str(&read_to_string(content)?)?;

    if article.paragraphs.is_empty() {
        warning(format!("\"{}\" has no paragraphs", content.display()));
    }

    let view = match layout {
        Some(layout) => ArticleView::new(Template::load(layout)?),
        None => ArticleView::default_layout()?,
    };

    log::debug!("rendering with layout \"{}\"", view.template().path().display());

    Ok(view.render(&article, &PrefixResolver::new(assets))?)
}
