use super::TokenWithContext;
use thiserror::Error;

use std::path::{Path, PathBuf};

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid block name in \"{0}\"")]
    InvalidBlockName(TokenWithContext),

    #[error("\"{0}\" closes a block that was never opened")]
    UnbalancedEnd(TokenWithContext),

    #[error("expected block \"{1}\" to be closed, but \"{0}\" closes a different block")]
    MismatchedEnd(TokenWithContext, String),

    #[error("block \"{0}\" is never closed, did you forget an END tag?")]
    UnclosedBlock(String),

    #[error("block \"{1}\" is declared more than once")]
    DuplicateBlock(TokenWithContext, String),

    #[error("template can only have one root block, but found another")]
    MultipleRoots(TokenWithContext),

    #[error("\"{0}\" is outside of any block")]
    OutsideBlock(TokenWithContext),

    #[error("template does not declare any blocks")]
    NoRootBlock,

    #[error("block \"{0}\" is not defined in the template")]
    UnknownBlock(String),

    #[error("render session is closed, output was already serialized")]
    SessionClosed,

    #[error("root block \"{0}\" was never materialized, nothing to output")]
    EmptyOutput(String),

    #[error("template \"{0}\" does not exist")]
    TemplateDoesNotExist(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{message}")]
    Pretty {
        message: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Error is caused by the template markup itself and can only be fixed by
    /// changing the template.
    pub fn is_malformed(&self) -> bool {
        if let Error::Pretty { source, .. } = self {
            return source.is_malformed();
        }

        matches!(
            self,
            Error::InvalidBlockName(_)
                | Error::UnbalancedEnd(_)
                | Error::MismatchedEnd(_, _)
                | Error::UnclosedBlock(_)
                | Error::DuplicateBlock(_, _)
                | Error::MultipleRoots(_)
                | Error::OutsideBlock(_)
                | Error::NoRootBlock
        )
    }

    fn token(&self) -> Option<&TokenWithContext> {
        match self {
            Error::InvalidBlockName(token)
            | Error::UnbalancedEnd(token)
            | Error::MismatchedEnd(token, _)
            | Error::DuplicateBlock(token, _)
            | Error::MultipleRoots(token)
            | Error::OutsideBlock(token) => Some(token),
            _ => None,
        }
    }

    /// Format the error with the offending line from the source and an underline
    /// pointing at the token that caused it.
    pub fn pretty(self, source: &str, path: Option<impl AsRef<Path> + Copy>) -> Self {
        let token = match self.token() {
            Some(token) => token,
            None => {
                if let Some(path) = path {
                    let prefix = "---> ";
                    return Error::Pretty {
                        message: format!(
                            "{}{}\n\n{}{}",
                            prefix,
                            path.as_ref().display(),
                            " ".repeat(prefix.len()),
                            self
                        ),
                        source: Box::new(self),
                    };
                } else {
                    return self;
                }
            }
        };

        let error_msg = match self {
            Error::InvalidBlockName(_) => "invalid block name",
            Error::UnbalancedEnd(_) => "unbalanced END",
            Error::MismatchedEnd(_, _) => "mismatched END",
            Error::DuplicateBlock(_, _) => "duplicate block",
            Error::MultipleRoots(_) => "second root block",
            Error::OutsideBlock(_) => "outside of any block",
            _ => "error",
        };

        let context = source.lines().nth(std::cmp::max(1, token.line()) - 1); // lines start at 0
        let context = match context {
            Some(context) => context,
            None => return self,
        };

        let leading_spaces = context.len() - context.trim_start().len();
        let underline = " ".repeat(token.column().saturating_sub(1 + leading_spaces))
            + &format!("^ {}", error_msg);

        let line_number = format!("{} | ", token.line());
        let underline_offset = " ".repeat(token.line().to_string().len()) + " | ";

        let path = if let Some(path) = path {
            format!(
                "---> {}:{}:{}\n\n",
                path.as_ref().display(),
                token.line(),
                token.column()
            )
        } else {
            "".to_string()
        };

        let message = format!(
            "{}{}\n{}{}\n{}{}",
            path,
            underline_offset,
            line_number,
            context.trim(),
            underline_offset,
            underline
        );

        Error::Pretty {
            message,
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod test {
    use super::super::Token;
    use super::*;

    #[test]
    fn test_underline() {
        let token = TokenWithContext::new(Token::BlockEnd(Some("image".into())), 2, 5);
        let error = Error::UnbalancedEnd(token);
        let pretty = error.pretty(
            "<!-- BEGIN root -->
    <!-- END image -->
",
            None::<&str>,
        );

        assert_eq!(
            pretty.to_string(),
            "  | \n2 | <!-- END image -->\n  | ^ unbalanced END"
        );
    }

    #[test]
    fn test_is_malformed() {
        assert!(Error::NoRootBlock.is_malformed());
        assert!(Error::UnclosedBlock("root".into()).is_malformed());
        assert!(!Error::UnknownBlock("root.nope".into()).is_malformed());
        assert!(!Error::SessionClosed.is_malformed());

        let pretty = Error::UnclosedBlock("root".into()).pretty("", Some("page.html"));
        assert!(matches!(pretty, Error::Pretty { .. }));
        assert!(pretty.is_malformed());

        let pretty = Error::UnknownBlock("root.nope".into()).pretty("", Some("page.html"));
        assert!(!pretty.is_malformed());
    }
}
