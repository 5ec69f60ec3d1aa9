//! Render session.
//!
//! A session is bound to one compiled template and renders it exactly once. Variables
//! are set on the session, blocks are materialized in document order, and the root block's
//! output is serialized at the end.
//!
//! Every materialization of a block appends a new instance to that block's queue.
//! Materializing a parent consumes the pending instances of its children, so children
//! materialized after the parent only show up in the parent's next instance. This is what
//! makes list rendering work:
//!
//! ```
//! # use xview::view::*;
//! let template = Template::from_str(
//!     "<!-- BEGIN root --><ul><!-- BEGIN item --><li>{Name}</li><!-- END item --></ul><!-- END root -->",
//! ).unwrap();
//! let mut session = template.session();
//!
//! for name in ["one", "two"] {
//!     session.set("Name", name).unwrap();
//!     session.materialize("root.item").unwrap();
//! }
//!
//! session.materialize("root").unwrap();
//!
//! assert_eq!(session.serialize().unwrap(), "<ul><li>one</li><li>two</li></ul>");
//! ```
use super::language::{Program, Segment};
use super::{Context, Error};

use tracing::{debug, warn};

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Accepting variables and materializations.
    Open,
    /// Output was serialized. Terminal.
    Serialized,
}

/// Mutable render state for one render of a template.
#[derive(Debug)]
pub struct Session<'a> {
    program: &'a Program,
    context: Context,
    // Materialized and not yet consumed instances, indexed by block position.
    instances: Vec<Vec<String>>,
    state: State,
}

impl<'a> Session<'a> {
    /// Create new session for the compiled program.
    pub fn new(program: &'a Program) -> Self {
        Self {
            program,
            context: Context::new(),
            instances: vec![vec![]; program.blocks().len()],
            state: State::Open,
        }
    }

    /// Bind a variable. Variables the template doesn't use are accepted and ignored.
    pub fn set(&mut self, name: &str, value: impl ToString) -> Result<&mut Self, Error> {
        self.ensure_open()?;

        if !self.program.has_variable(name) {
            debug!("variable \"{}\" is not used by the template", name);
        }

        self.context.set(name, value);
        Ok(self)
    }

    /// Bind several variables at once.
    pub fn set_all(&mut self, context: impl Into<Context>) -> Result<&mut Self, Error> {
        let context = context.into();

        for (name, value) in context.iter() {
            self.set(name, value)?;
        }

        Ok(self)
    }

    /// Current value of a variable, if it was set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.context.get(name)
    }

    /// Resolve the block at the given path with the current variables and pending
    /// child instances, and append the result to the block's instances.
    pub fn materialize(&mut self, path: &str) -> Result<&mut Self, Error> {
        self.ensure_open()?;

        let program = self.program;
        let id = self.id(path)?;
        let block = &program.blocks()[id];

        let mut output = String::new();

        for segment in block.segments() {
            match segment {
                Segment::Text(text) => output.push_str(text),
                // Unset variables are blank.
                Segment::Placeholder(name) => {
                    if let Some(value) = self.context.get(name) {
                        output.push_str(value);
                    }
                }
                Segment::Block(child) => {
                    for instance in self.instances[*child].drain(..) {
                        output.push_str(&instance);
                    }
                }
            }
        }

        debug!("materialized \"{}\" ({} bytes)", path, output.len());

        self.instances[id].push(output);

        Ok(self)
    }

    /// Same as [`Session::materialize`].
    pub fn parse(&mut self, path: &str) -> Result<&mut Self, Error> {
        self.materialize(path)
    }

    /// Number of instances of the block waiting to be consumed by its parent
    /// (or serialized, for the root block).
    pub fn pending(&self, path: &str) -> Result<usize, Error> {
        let id = self.id(path)?;
        Ok(self.instances[id].len())
    }

    /// Concatenate all instances of the root block and close the session.
    pub fn serialize(&mut self) -> Result<String, Error> {
        self.ensure_open()?;

        if self.instances[0].is_empty() {
            return Err(Error::EmptyOutput(self.program.root().path().to_string()));
        }

        for (block, instances) in self.program.blocks().iter().zip(&self.instances).skip(1) {
            if !instances.is_empty() {
                warn!(
                    "block \"{}\" has {} instance(s) that were never included in the output",
                    block.path(),
                    instances.len()
                );
            }
        }

        self.state = State::Serialized;

        Ok(std::mem::take(&mut self.instances[0]).concat())
    }

    pub fn state(&self) -> State {
        self.state
    }

    fn id(&self, path: &str) -> Result<usize, Error> {
        self.program
            .id(path)
            .ok_or_else(|| Error::UnknownBlock(path.to_string()))
    }

    fn ensure_open(&self) -> Result<(), Error> {
        match self.state {
            State::Open => Ok(()),
            State::Serialized => Err(Error::SessionClosed),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const ITEMS: &str = "<!-- BEGIN root --><ul><!-- BEGIN item --><li>{Name}<!-- BEGIN tag --><b>{Tag}</b><!-- END tag --></li><!-- END item --></ul><!-- END root -->";

    #[test]
    fn test_conditional_child_present() -> Result<(), Error> {
        let program = Program::from_str(ITEMS)?;
        let mut session = Session::new(&program);

        session.set("Tag", "X")?;
        session.materialize("root.item.tag")?;
        session.materialize("root.item")?;
        session.materialize("root")?;

        let output = session.serialize()?;
        assert_eq!(output.matches('X').count(), 1);
        assert_eq!(output, "<ul><li><b>X</b></li></ul>");

        Ok(())
    }

    #[test]
    fn test_conditional_child_absent() -> Result<(), Error> {
        let program = Program::from_str(ITEMS)?;
        let mut session = Session::new(&program);

        session.set("Tag", "X")?;
        session.materialize("root.item")?.materialize("root")?;

        let output = session.serialize()?;
        assert_eq!(output.matches("<b>").count(), 0);
        assert_eq!(output, "<ul><li></li></ul>");

        Ok(())
    }

    #[test]
    fn test_optional_child_stays_with_its_item() -> Result<(), Error> {
        let program = Program::from_str(ITEMS)?;
        let mut session = Session::new(&program);

        session.set("Name", "first")?.set("Tag", "new")?;
        session.materialize("root.item.tag")?;
        session.materialize("root.item")?;

        session.set("Name", "second")?;
        session.materialize("root.item")?;

        session.materialize("root")?;

        assert_eq!(
            session.serialize()?,
            "<ul><li>first<b>new</b></li><li>second</li></ul>"
        );

        Ok(())
    }

    #[test]
    fn test_ordering_law() -> Result<(), Error> {
        let program = Program::from_str(ITEMS)?;
        let mut session = Session::new(&program);

        for tag in ["a", "b", "c"] {
            session.set("Tag", tag)?.materialize("root.item.tag")?;
        }
        assert_eq!(session.pending("root.item.tag")?, 3);

        session.materialize("root.item")?;
        assert_eq!(session.pending("root.item.tag")?, 0);

        // Produced after the first item, so it belongs to the second one only.
        session.set("Tag", "d")?.materialize("root.item.tag")?;
        session.materialize("root.item")?;
        session.materialize("root")?;

        assert_eq!(
            session.serialize()?,
            "<ul><li><b>a</b><b>b</b><b>c</b></li><li><b>d</b></li></ul>"
        );

        Ok(())
    }

    #[test]
    fn test_parse_is_materialize() -> Result<(), Error> {
        let program = Program::from_str(ITEMS)?;
        let mut session = Session::new(&program);

        for tag in ["a", "b"] {
            session.set("Tag", tag)?.parse("root.item.tag")?;
        }
        session.parse("root.item")?;
        assert_eq!(session.pending("root.item.tag")?, 0);

        session.set("Tag", "c")?.parse("root.item.tag")?;
        session.parse("root.item")?.parse("root")?;

        assert_eq!(
            session.serialize()?,
            "<ul><li><b>a</b><b>b</b></li><li><b>c</b></li></ul>"
        );
        assert!(matches!(session.parse("root"), Err(Error::SessionClosed)));

        Ok(())
    }

    #[test]
    fn test_snapshot_of_variables() -> Result<(), Error> {
        let program = Program::from_str(ITEMS)?;
        let mut session = Session::new(&program);

        session.set("Name", "before")?.materialize("root.item")?;
        session.set("Name", "after")?;
        session.materialize("root")?;

        assert_eq!(session.serialize()?, "<ul><li>before</li></ul>");

        Ok(())
    }

    #[test]
    fn test_binding_is_idempotent() -> Result<(), Error> {
        let program = Program::from_str(ITEMS)?;

        let mut once = Session::new(&program);
        once.set("Name", "n")?;
        once.materialize("root.item")?.materialize("root")?;

        let mut twice = Session::new(&program);
        twice.set("Name", "n")?.set("Name", "n")?;
        twice.materialize("root.item")?.materialize("root")?;

        assert_eq!(once.serialize()?, twice.serialize()?);

        Ok(())
    }

    #[test]
    fn test_unknown_block() -> Result<(), Error> {
        let program = Program::from_str(ITEMS)?;
        let mut session = Session::new(&program);

        for path in ["item", "root.tag", "root.item.", ""] {
            assert!(matches!(
                session.materialize(path),
                Err(Error::UnknownBlock(p)) if p == path
            ));
        }

        session.materialize("root.item")?;
        assert!(matches!(
            session.materialize("root.nope"),
            Err(Error::UnknownBlock(_))
        ));
        assert!(matches!(
            session.pending("root.nope"),
            Err(Error::UnknownBlock(_))
        ));

        Ok(())
    }

    #[test]
    fn test_unset_and_unknown_variables() -> Result<(), Error> {
        let program = Program::from_str(ITEMS)?;
        let mut session = Session::new(&program);

        session.set("NotInTemplate", "ignored")?;
        assert_eq!(session.get("NotInTemplate"), Some("ignored"));

        session.materialize("root.item.tag")?;
        session.materialize("root.item")?.materialize("root")?;

        assert_eq!(session.serialize()?, "<ul><li><b></b></li></ul>");

        Ok(())
    }

    #[test]
    fn test_session_closed() -> Result<(), Error> {
        let program = Program::from_str(ITEMS)?;
        let mut session = Session::new(&program);

        session.materialize("root")?;
        assert_eq!(session.state(), State::Open);
        session.serialize()?;
        assert_eq!(session.state(), State::Serialized);

        assert!(matches!(session.set("Name", "x"), Err(Error::SessionClosed)));
        assert!(matches!(
            session.materialize("root"),
            Err(Error::SessionClosed)
        ));
        assert!(matches!(session.serialize(), Err(Error::SessionClosed)));

        Ok(())
    }

    #[test]
    fn test_empty_output() -> Result<(), Error> {
        let program = Program::from_str(ITEMS)?;
        let mut session = Session::new(&program);

        session.materialize("root.item")?;
        assert!(matches!(
            session.serialize(),
            Err(Error::EmptyOutput(root)) if root == "root"
        ));

        // The session is still usable.
        assert_eq!(session.state(), State::Open);
        session.materialize("root")?;
        assert_eq!(session.serialize()?, "<ul><li></li></ul>");

        Ok(())
    }

    #[test]
    fn test_root_materialized_twice() -> Result<(), Error> {
        let program = Program::from_str("<!-- BEGIN root -->[{N}]<!-- END root -->")?;
        let mut session = Session::new(&program);

        session.set("N", 1)?.materialize("root")?;
        session.set("N", 2)?.materialize("root")?;

        assert_eq!(session.serialize()?, "[1][2]");

        Ok(())
    }

    #[test]
    fn test_set_all() -> Result<(), Error> {
        let program = Program::from_str("<!-- BEGIN root -->{A}-{B}<!-- END root -->")?;
        let mut session = Session::new(&program);

        session.set_all([("A", "1"), ("B", "2")])?;
        session.materialize("root")?;

        assert_eq!(session.serialize()?, "1-2");

        Ok(())
    }
}
