//! A streaming, push-driven JSON lexer and parser for embedded and
//! memory-constrained environments.
//!
//! Feed input in whatever chunks are convenient with repeated
//! [`Parser::push`] calls, receive events through a [`Sink`]
//! implementation, and finish with [`Parser::finalize`]. There is no DOM:
//! nothing beyond the current nesting path and the current token's partial
//! state is ever held in memory, and every string or number value is
//! delivered as a borrow into the caller's own buffer rather than an
//! allocation owned by this crate.
//!
//! ```
//! use jsonpush::{NullSink, Parser, ParserConfig, StaticStack};
//!
//! let mut parser = Parser::new(StaticStack::<16>::new(), NullSink, ParserConfig::new());
//! parser.push(br#"{"a": [1, 2.5, "#.as_ref()).unwrap();
//! parser.push(br#"null]}"#).unwrap();
//! parser.finalize().unwrap();
//! ```
//!
//! # Errors
//!
//! A malformed document surfaces a [`ParseError`] (wrapped in [`Stop`])
//! carrying both an [`ErrorCode`] and the exact byte position it was
//! detected at. Parser state is left unchanged by any failed `push` or
//! `finalize` call, so a caller can, for instance, log the error and keep
//! the parser around for inspection without it having partially mutated.
//!
//! # Configuration
//!
//! [`ParserConfig`] covers the runtime toggles (UTF-8 validation, bignum
//! mode); nesting-depth capacity is chosen via the container stack type:
//! [`StaticStack<N>`] for a fixed, allocation-free limit, or
//! [`DynamicStack`] to grow on demand through a caller-supplied callback.

pub mod error;
pub mod event;
pub mod lexer;
pub mod parser;
pub mod stack;
pub mod tables;

pub use error::{ErrorCode, ParseError, Stop};
pub use event::{NullSink, Sink};
pub use parser::{GrammarState, Parser, ParserConfig, Token};
pub use stack::{Container, ContainerStack, DynamicStack, StaticStack};
