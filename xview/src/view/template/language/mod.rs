//! Implementation of the template language.
//!
//! Includes the parser and the compiled block tree.
pub mod block;
pub mod program;

pub use block::{Block, Segment};
pub use program::Program;
