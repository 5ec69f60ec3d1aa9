//! Template block, a named region that can be materialized independently.

/// Part of a block's content.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    // Printed as-is.
    Text(String),
    // Replaced with the value of the variable, e.g. `{Title}`.
    Placeholder(String),
    // Replaced with the pending instances of the child block. Refers
    // to the child's position in the program.
    Block(usize),
}

/// A named node in the template tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    name: String,
    path: String,
    segments: Vec<Segment>,
}

impl Block {
    /// Create an empty block. The path is the dotted path from the root, e.g. `root.paragraph.image`.
    pub fn new(name: impl ToString, path: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            segments: vec![],
        }
    }

    /// Block name, as written in the template.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dotted path, unique within the template.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the placeholders used directly by this block, in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Positions of the child blocks in the program.
    pub fn children(&self) -> impl Iterator<Item = usize> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Block(id) => Some(*id),
            _ => None,
        })
    }

    pub(crate) fn push(&mut self, segment: Segment) {
        // Merge adjacent text so materialization has less to do.
        if let Segment::Text(ref text) = segment {
            if let Some(Segment::Text(last)) = self.segments.last_mut() {
                last.push_str(text);
                return;
            }
        }

        self.segments.push(segment);
    }
}
