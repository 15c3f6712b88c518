//! The byte-level tokenizer: validates UTF-8 and numeric syntax and decodes
//! string escapes without ever copying or buffering a raw string's bytes.
//!
//! The tokenizing loop itself lives in [`crate::parser::core`], since each
//! token it recognizes must be handed straight to the grammar machine
//! before the next byte can be read (a string value, for instance, can only
//! be accepted once the grammar machine has confirmed a string is expected
//! in the current position), this module supplies the pure, allocation-free
//! building blocks that loop calls into.

pub mod number;
pub mod state;
pub mod string;

pub use state::{LexState, LexerState};
