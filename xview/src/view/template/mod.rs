//! Block templates.
//!
//! A template is compiled once into a tree of named blocks and rendered
//! any number of times through a [`Session`].
pub mod context;
pub mod error;
pub mod language;
pub mod lexer;
pub mod session;

pub use context::Context;
pub use error::Error;
pub use language::{Block, Program, Segment};
pub use lexer::{Lexer, Token, TokenWithContext, Tokenize};
pub use session::{Session, State};

use crate::view::Templates;

use std::fs::read_to_string;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    program: Program,
    path: PathBuf,
}

impl Template {
    /// Read a template from disk and compile it.
    pub fn new(path: impl AsRef<Path> + Copy) -> Result<Self, Error> {
        let text = match read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(Error::TemplateDoesNotExist(path.as_ref().to_owned()))
            }
            Err(err) => return Err(err.into()),
        };

        let program = Program::from_str(&text).map_err(|err| err.pretty(&text, Some(path)))?;

        debug!(
            "compiled \"{}\" ({} blocks)",
            path.as_ref().display(),
            program.blocks().len()
        );

        Ok(Template {
            program,
            path: path.as_ref().to_owned(),
        })
    }

    /// Compile a template from markup.
    pub fn from_str(template: &str) -> Result<Self, Error> {
        Ok(Template {
            program: Program::from_str(template)?,
            path: PathBuf::from("/dev/null"),
        })
    }

    /// Get the template from the global cache, compiling it if needed.
    pub fn load(path: impl AsRef<Path> + Copy) -> Result<Arc<Self>, Error> {
        Templates::cache().get(path)
    }

    /// Start a new render of this template.
    pub fn session(&self) -> Session<'_> {
        Session::new(&self.program)
    }

    /// Bind the variables and materialize the root block once. Useful for
    /// templates that only have the root block.
    pub fn render(&self, context: impl Into<Context>) -> Result<String, Error> {
        let mut session = self.session();
        session.set_all(context)?;
        session.materialize(self.program.root().path())?;
        session.serialize()
    }

    /// Look up a block by its dotted path.
    pub fn block(&self, path: &str) -> Option<&Block> {
        self.program.id(path).and_then(|id| self.program.get(id))
    }

    /// All blocks declared by the template, in document order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.program.blocks().iter()
    }

    pub fn root(&self) -> &Block {
        self.program.root()
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.program.has_variable(name)
    }

    /// Where the template was loaded from. Templates compiled from strings
    /// have the path `/dev/null`.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
