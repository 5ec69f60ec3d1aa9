/// A template language token, e.g. a block directive or a placeholder.
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    // e.g. `<html><body></body></html>`
    Text(String),
    // e.g. `{Title}`
    Placeholder(String),
    // `<!-- BEGIN paragraph -->`
    BlockBegin(String),
    // `<!-- END paragraph -->`, the name is optional.
    BlockEnd(Option<String>),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Token::Text(text) => write!(f, "{}", text),
            Token::Placeholder(name) => write!(f, "{{{}}}", name),
            Token::BlockBegin(name) => write!(f, "<!-- BEGIN {} -->", name),
            Token::BlockEnd(Some(name)) => write!(f, "<!-- END {} -->", name),
            Token::BlockEnd(None) => write!(f, "<!-- END -->"),
        }
    }
}
