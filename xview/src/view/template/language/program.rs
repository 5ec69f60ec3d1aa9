//! Compiled template.
//!
//! A program is the tree of blocks declared by the template, stored in document order
//! with the root block first.
use super::super::{Error, Token, TokenWithContext, Tokenize};
use super::{Block, Segment};

use std::collections::{HashMap, HashSet};

/// Compiled block tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    blocks: Vec<Block>,
    paths: HashMap<String, usize>,
    variables: HashSet<String>,
}

impl Program {
    /// Parse the program from a list of tokens.
    pub fn parse(tokens: Vec<TokenWithContext>) -> Result<Self, Error> {
        let mut blocks: Vec<Block> = vec![];
        let mut paths = HashMap::new();
        let mut variables = HashSet::new();
        // Blocks that are currently open, innermost last.
        let mut stack: Vec<usize> = vec![];

        for token in tokens {
            match token.token() {
                Token::BlockBegin(name) => {
                    let path = match stack.last() {
                        Some(&parent) => format!("{}.{}", blocks[parent].path(), name),
                        None if !blocks.is_empty() => return Err(Error::MultipleRoots(token)),
                        None => name.clone(),
                    };

                    if paths.contains_key(&path) {
                        return Err(Error::DuplicateBlock(token, path));
                    }

                    let id = blocks.len();

                    if let Some(&parent) = stack.last() {
                        blocks[parent].push(Segment::Block(id));
                    }

                    blocks.push(Block::new(name, &path));
                    paths.insert(path, id);
                    stack.push(id);
                }

                Token::BlockEnd(name) => {
                    let open = match stack.pop() {
                        Some(open) => open,
                        None => return Err(Error::UnbalancedEnd(token)),
                    };

                    if let Some(name) = name {
                        if name != blocks[open].name() {
                            let expected = blocks[open].path().to_string();
                            return Err(Error::MismatchedEnd(token, expected));
                        }
                    }
                }

                Token::Placeholder(name) => match stack.last() {
                    Some(&open) => {
                        variables.insert(name.clone());
                        blocks[open].push(Segment::Placeholder(name));
                    }
                    None => return Err(Error::OutsideBlock(token)),
                },

                Token::Text(text) => match stack.last() {
                    Some(&open) => blocks[open].push(Segment::Text(text)),
                    // Whitespace around the root block doesn't go anywhere.
                    None if text.trim().is_empty() => (),
                    None => return Err(Error::OutsideBlock(token)),
                },
            }
        }

        if let Some(&open) = stack.last() {
            return Err(Error::UnclosedBlock(blocks[open].path().to_string()));
        }

        if blocks.is_empty() {
            return Err(Error::NoRootBlock);
        }

        Ok(Program {
            blocks,
            paths,
            variables,
        })
    }

    /// Compile the program from source.
    pub fn from_str(source: &str) -> Result<Self, Error> {
        let tokens = source.tokenize()?;
        Program::parse(tokens)
    }

    /// The top-level block.
    pub fn root(&self) -> &Block {
        // Parsing guarantees at least one block.
        &self.blocks[0]
    }

    /// Find the position of a block by its dotted path.
    pub fn id(&self, path: &str) -> Option<usize> {
        self.paths.get(path).copied()
    }

    /// Get a block by position.
    pub fn get(&self, id: usize) -> Option<&Block> {
        self.blocks.get(id)
    }

    /// All blocks, in document order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Check that a placeholder with this name exists anywhere in the template.
    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains(name)
    }
}
