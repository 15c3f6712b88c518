//! The grammar machine: a 10-state machine that turns a stream of lexer
//! tokens into well-formedness checks and [`Sink`] calls, backed by the
//! bit-packed container stack.

use crate::error::{ErrorCode, ParseError, Stop};
use crate::event::Sink;
use crate::stack::{Container, ContainerStack};

/// The ten grammar states. `Done` is terminal: once reached, anything but
/// end-of-input is `ExcessiveInput`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarState {
    ExpectValue,
    MaybeObjectKey,
    ExpectObjectKey,
    ExpectColon,
    MaybeObjectComma,
    ExpectObjectValue,
    MaybeArrayValue,
    ExpectArrayValue,
    MaybeArrayComma,
    Done,
}

/// A lexer token carrying no value of its own (as opposed to a string,
/// number, or keyword literal, which are reported through their own
/// `on_*` functions below).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    OpenCurly,
    CloseCurly,
    OpenBracket,
    CloseBracket,
    Comma,
    Colon,
    True,
    False,
    Null,
}

fn err<E>(code: ErrorCode, position: Option<usize>) -> Stop<E> {
    Stop::Malformed(ParseError::new(code, position))
}

/// Where the stack points after popping one level: `Done` if now empty,
/// otherwise whichever "maybe comma" state matches the new top.
fn after_close(stack: &impl ContainerStack) -> GrammarState {
    if stack.is_empty() {
        GrammarState::Done
    } else if stack.top() == Container::Object {
        GrammarState::MaybeObjectComma
    } else {
        GrammarState::MaybeArrayComma
    }
}

/// Handles every token that carries no value: brackets, comma, colon, and
/// the three bare keyword literals.
pub fn on_token<S: ContainerStack, K: Sink>(
    state: &mut GrammarState,
    stack: &mut S,
    sink: &mut K,
    token: Token,
    position: Option<usize>,
) -> Result<(), Stop<K::Error>> {
    match *state {
        GrammarState::ExpectValue => match token {
            Token::OpenCurly => {
                stack.push(Container::Object).map_err(|e| err(e, position))?;
                sink.object_begin().map_err(Stop::Aborted)?;
                *state = GrammarState::MaybeObjectKey;
            }
            Token::CloseCurly => return Err(err(ErrorCode::UnexpectedCloseCurly, position)),
            Token::OpenBracket => {
                stack.push(Container::Array).map_err(|e| err(e, position))?;
                sink.array_begin().map_err(Stop::Aborted)?;
                *state = GrammarState::MaybeArrayValue;
            }
            Token::CloseBracket => return Err(err(ErrorCode::UnexpectedCloseBracket, position)),
            Token::Comma => return Err(err(ErrorCode::UnexpectedComma, position)),
            Token::Colon => return Err(err(ErrorCode::UnexpectedColon, position)),
            Token::True => {
                sink.bool(true).map_err(Stop::Aborted)?;
                *state = GrammarState::Done;
            }
            Token::False => {
                sink.bool(false).map_err(Stop::Aborted)?;
                *state = GrammarState::Done;
            }
            Token::Null => {
                sink.null().map_err(Stop::Aborted)?;
                *state = GrammarState::Done;
            }
        },
        GrammarState::MaybeObjectKey => {
            if token == Token::CloseCurly {
                sink.object_end().map_err(Stop::Aborted)?;
                stack.pop();
                *state = after_close(stack);
            } else {
                return Err(err(ErrorCode::ExpectObjectKey, position));
            }
        }
        GrammarState::ExpectObjectKey => return Err(err(ErrorCode::ExpectObjectKey, position)),
        GrammarState::ExpectColon => {
            if token != Token::Colon {
                return Err(err(ErrorCode::ExpectColon, position));
            }
            *state = GrammarState::ExpectObjectValue;
        }
        GrammarState::MaybeObjectComma => {
            if token == Token::Comma {
                *state = GrammarState::ExpectObjectKey;
            } else if token == Token::CloseCurly {
                sink.object_end().map_err(Stop::Aborted)?;
                stack.pop();
                *state = after_close(stack);
            } else {
                return Err(err(ErrorCode::ExpectCommaOrCloseCurly, position));
            }
        }
        GrammarState::ExpectObjectValue => match token {
            Token::OpenCurly => {
                stack.push(Container::Object).map_err(|e| err(e, position))?;
                sink.object_begin().map_err(Stop::Aborted)?;
                *state = GrammarState::MaybeObjectKey;
            }
            Token::CloseCurly => return Err(err(ErrorCode::UnexpectedCloseCurly, position)),
            Token::OpenBracket => {
                stack.push(Container::Array).map_err(|e| err(e, position))?;
                sink.array_begin().map_err(Stop::Aborted)?;
                *state = GrammarState::ExpectArrayValue;
            }
            Token::CloseBracket => return Err(err(ErrorCode::UnexpectedCloseBracket, position)),
            Token::Comma => return Err(err(ErrorCode::UnexpectedComma, position)),
            Token::Colon => return Err(err(ErrorCode::UnexpectedColon, position)),
            Token::True => {
                sink.bool(true).map_err(Stop::Aborted)?;
                *state = GrammarState::MaybeObjectComma;
            }
            Token::False => {
                sink.bool(false).map_err(Stop::Aborted)?;
                *state = GrammarState::MaybeObjectComma;
            }
            Token::Null => {
                sink.null().map_err(Stop::Aborted)?;
                *state = GrammarState::MaybeObjectComma;
            }
        },
        GrammarState::MaybeArrayValue => match token {
            Token::OpenCurly => {
                stack.push(Container::Object).map_err(|e| err(e, position))?;
                sink.object_begin().map_err(Stop::Aborted)?;
                *state = GrammarState::MaybeObjectKey;
            }
            Token::CloseCurly => return Err(err(ErrorCode::UnexpectedCloseCurly, position)),
            Token::OpenBracket => {
                stack.push(Container::Array).map_err(|e| err(e, position))?;
                sink.array_begin().map_err(Stop::Aborted)?;
                // state deliberately unchanged: still MaybeArrayValue for the
                // freshly opened, still-empty array
            }
            Token::CloseBracket => {
                sink.array_end().map_err(Stop::Aborted)?;
                stack.pop();
                *state = if stack.is_empty() {
                    GrammarState::Done
                } else if stack.top() == Container::Object {
                    GrammarState::MaybeObjectKey
                } else {
                    GrammarState::MaybeArrayComma
                };
            }
            Token::Comma => return Err(err(ErrorCode::UnexpectedComma, position)),
            Token::Colon => return Err(err(ErrorCode::UnexpectedColon, position)),
            Token::True => {
                sink.bool(true).map_err(Stop::Aborted)?;
                *state = GrammarState::MaybeArrayComma;
            }
            Token::False => {
                sink.bool(false).map_err(Stop::Aborted)?;
                *state = GrammarState::MaybeArrayComma;
            }
            Token::Null => {
                sink.null().map_err(Stop::Aborted)?;
                *state = GrammarState::MaybeArrayComma;
            }
        },
        GrammarState::ExpectArrayValue => match token {
            Token::OpenCurly => {
                stack.push(Container::Object).map_err(|e| err(e, position))?;
                sink.object_begin().map_err(Stop::Aborted)?;
                *state = GrammarState::MaybeObjectKey;
            }
            Token::CloseCurly => return Err(err(ErrorCode::UnexpectedCloseCurly, position)),
            Token::OpenBracket => {
                stack.push(Container::Array).map_err(|e| err(e, position))?;
                sink.array_begin().map_err(Stop::Aborted)?;
                *state = GrammarState::MaybeArrayValue;
            }
            Token::CloseBracket => return Err(err(ErrorCode::UnexpectedCloseBracket, position)),
            Token::Comma => return Err(err(ErrorCode::UnexpectedComma, position)),
            Token::Colon => return Err(err(ErrorCode::UnexpectedColon, position)),
            Token::True => {
                sink.bool(true).map_err(Stop::Aborted)?;
                *state = GrammarState::MaybeArrayComma;
            }
            Token::False => {
                sink.bool(false).map_err(Stop::Aborted)?;
                *state = GrammarState::MaybeArrayComma;
            }
            Token::Null => {
                sink.null().map_err(Stop::Aborted)?;
                *state = GrammarState::MaybeArrayComma;
            }
        },
        GrammarState::MaybeArrayComma => {
            if token == Token::Comma {
                *state = GrammarState::ExpectArrayValue;
            } else if token == Token::CloseBracket {
                sink.array_end().map_err(Stop::Aborted)?;
                stack.pop();
                *state = after_close(stack);
            } else {
                return Err(err(ErrorCode::ExpectCommaOrCloseBracket, position));
            }
        }
        GrammarState::Done => return Err(err(ErrorCode::ExcessiveInput, position)),
    }
    Ok(())
}

/// Shared by `on_int`/`on_double`/`on_big_int_end`: every value-shaped token
/// (not a string, which has its own begin/end dance) follows this same
/// transition regardless of its type.
fn value_transition(state: GrammarState, position: Option<usize>) -> Result<GrammarState, ParseError> {
    match state {
        GrammarState::ExpectValue => Ok(GrammarState::Done),
        GrammarState::MaybeObjectKey => {
            Err(ParseError::new(ErrorCode::ExpectObjectKeyOrCloseCurly, position))
        }
        GrammarState::ExpectObjectKey => Err(ParseError::new(ErrorCode::ExpectObjectKey, position)),
        GrammarState::ExpectColon => Err(ParseError::new(ErrorCode::ExpectColon, position)),
        GrammarState::MaybeObjectComma => {
            Err(ParseError::new(ErrorCode::ExpectCommaOrCloseBracket, position))
        }
        GrammarState::ExpectObjectValue => Ok(GrammarState::MaybeObjectComma),
        GrammarState::MaybeArrayValue | GrammarState::ExpectArrayValue => Ok(GrammarState::MaybeArrayComma),
        GrammarState::MaybeArrayComma => {
            Err(ParseError::new(ErrorCode::ExpectCommaOrCloseCurly, position))
        }
        GrammarState::Done => Err(ParseError::new(ErrorCode::ExcessiveInput, position)),
    }
}

pub fn on_int<K: Sink>(
    state: &mut GrammarState,
    sink: &mut K,
    value: i64,
    position: Option<usize>,
) -> Result<(), Stop<K::Error>> {
    let next = value_transition(*state, position)?;
    sink.int(value).map_err(Stop::Aborted)?;
    *state = next;
    Ok(())
}

pub fn on_double<K: Sink>(
    state: &mut GrammarState,
    sink: &mut K,
    value: f64,
    position: Option<usize>,
) -> Result<(), Stop<K::Error>> {
    let next = value_transition(*state, position)?;
    sink.double(value).map_err(Stop::Aborted)?;
    *state = next;
    Ok(())
}

/// Validates that a value is expected here without committing a transition
/// yet; the transition commits in [`on_big_int_end`] once all digit chunks
/// have been delivered.
pub fn on_big_int_begin<K: Sink>(
    state: &GrammarState,
    sink: &mut K,
    initial_magnitude: i64,
    negative: bool,
    position: Option<usize>,
) -> Result<(), Stop<K::Error>> {
    value_transition(*state, position)?;
    sink.big_int_begin(initial_magnitude, negative).map_err(Stop::Aborted)
}

pub fn on_big_int_chunk<K: Sink>(sink: &mut K, digits: &[u8]) -> Result<(), Stop<K::Error>> {
    sink.big_int_chunk(digits).map_err(Stop::Aborted)
}

pub fn on_big_int_end<K: Sink>(
    state: &mut GrammarState,
    sink: &mut K,
    position: Option<usize>,
) -> Result<(), Stop<K::Error>> {
    let next = value_transition(*state, position)?;
    sink.big_int_end().map_err(Stop::Aborted)?;
    *state = next;
    Ok(())
}

/// Validates a string value/key is expected here; like `tokenc_begin`, does
/// not itself transition; [`on_string_end`] does, since only then is it
/// known whether the string was a key or a value.
pub fn on_string_begin<K: Sink>(
    state: &GrammarState,
    sink: &mut K,
    position: Option<usize>,
) -> Result<(), Stop<K::Error>> {
    match *state {
        GrammarState::ExpectValue
        | GrammarState::MaybeObjectKey
        | GrammarState::ExpectObjectKey
        | GrammarState::ExpectObjectValue
        | GrammarState::MaybeArrayValue
        | GrammarState::ExpectArrayValue => sink.string_begin().map_err(Stop::Aborted),
        GrammarState::ExpectColon => Err(err(ErrorCode::ExpectColon, position)),
        GrammarState::MaybeObjectComma => Err(err(ErrorCode::ExpectCommaOrCloseCurly, position)),
        GrammarState::MaybeArrayComma => Err(err(ErrorCode::ExpectCommaOrCloseBracket, position)),
        GrammarState::Done => Err(err(ErrorCode::ExcessiveInput, position)),
    }
}

pub fn on_string_chunk<K: Sink>(sink: &mut K, data: &[u8]) -> Result<(), Stop<K::Error>> {
    sink.string_chunk(data).map_err(Stop::Aborted)
}

/// Table-driven, exactly mirroring the reference parser's `next_state[]`
/// array: a string's effect on grammar state depends only on which state it
/// was opened in, so closing it is a pure lookup rather than a branch tree.
pub fn on_string_end<K: Sink>(
    state: &mut GrammarState,
    sink: &mut K,
    position: Option<usize>,
) -> Result<(), Stop<K::Error>> {
    let next = match *state {
        GrammarState::ExpectValue => GrammarState::Done,
        GrammarState::MaybeObjectKey => GrammarState::ExpectColon,
        GrammarState::ExpectObjectKey => GrammarState::ExpectColon,
        GrammarState::ExpectObjectValue => GrammarState::MaybeObjectComma,
        GrammarState::MaybeArrayValue => GrammarState::MaybeArrayComma,
        GrammarState::ExpectArrayValue => GrammarState::MaybeArrayComma,
        GrammarState::ExpectColon
        | GrammarState::MaybeObjectComma
        | GrammarState::MaybeArrayComma
        | GrammarState::Done => return Err(err(ErrorCode::InternalError, position)),
    };
    sink.string_end().map_err(Stop::Aborted)?;
    *state = next;
    Ok(())
}
