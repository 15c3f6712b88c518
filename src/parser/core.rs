//! The top-level [`Parser`]: owns the lexer state, the grammar state and
//! the container stack, and drives the byte-at-a-time scan loop that ties
//! all three together.

use crate::error::{ErrorCode, ParseError, Stop};
use crate::event::Sink;
use crate::lexer::number;
use crate::lexer::state::{LexState, LexerState};
use crate::lexer::string;
use crate::parser::config::ParserConfig;
use crate::parser::grammar::{self, GrammarState, Token};
use crate::stack::ContainerStack;

fn malformed<E>(code: ErrorCode, position: Option<usize>) -> Stop<E> {
    Stop::Malformed(ParseError::new(code, position))
}

/// A cheap, `Copy`-only snapshot of everything [`Parser::push`] needs to
/// restore on error, never the container stack's own backing storage,
/// just its length, since a push call only ever grows or shrinks it by
/// whole levels.
struct Checkpoint {
    lexer: LexerState,
    grammar: GrammarState,
    stack_len: usize,
}

/// A streaming, push-driven JSON parser.
///
/// `S` selects the container stack ([`crate::stack::StaticStack`] or
/// [`crate::stack::DynamicStack`]); `K` is the [`Sink`] receiving parse
/// events. Construct with [`Parser::new`], feed input with repeated
/// [`Parser::push`] calls in any chunking the caller finds convenient, and
/// call [`Parser::finalize`] once after the last chunk.
///
/// Every method either commits a well-defined amount of progress or leaves
/// the parser exactly as it was before the call; a rejected `push` never
/// needs its caller to reconstruct or discard a partial parser.
///
/// `U` is an opaque slot for whatever state an embedder wants to carry
/// alongside the parser; it defaults to `()` and is never read or written
/// by the parser itself, only stored and handed back through
/// [`Parser::user_data`]/[`Parser::user_data_mut`].
pub struct Parser<S, K, U = ()> {
    lexer: LexerState,
    grammar: GrammarState,
    stack: S,
    sink: K,
    config: ParserConfig,
    /// Total bytes accepted by prior successful `push` calls; added to a
    /// byte's in-buffer index to get the position reported in errors.
    consumed: usize,
    user_data: U,
}

impl<S: ContainerStack, K: Sink, U: Default> Parser<S, K, U> {
    pub fn new(stack: S, sink: K, config: ParserConfig) -> Self {
        Parser {
            lexer: LexerState::new(),
            grammar: GrammarState::ExpectValue,
            stack,
            sink,
            config,
            consumed: 0,
            user_data: U::default(),
        }
    }
}

impl<S: ContainerStack, K: Sink, U> Parser<S, K, U> {
    /// Byte position the *next* call to `push` will start reporting
    /// positions from; useful for embedders that want to know how much
    /// input has been durably consumed so far.
    pub fn position(&self) -> usize {
        self.consumed
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Replaces the opaque user-data slot, builder-style.
    pub fn with_user_data(mut self, user_data: U) -> Self {
        self.user_data = user_data;
        self
    }

    pub fn user_data(&self) -> &U {
        &self.user_data
    }

    pub fn user_data_mut(&mut self) -> &mut U {
        &mut self.user_data
    }

    pub fn into_user_data(self) -> U {
        self.user_data
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            lexer: self.lexer,
            grammar: self.grammar,
            stack_len: self.stack.len(),
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.lexer = checkpoint.lexer;
        self.grammar = checkpoint.grammar;
        self.stack.truncate(checkpoint.stack_len);
    }

    /// Feeds the next chunk of input.
    ///
    /// `data` may be split at any byte boundary relative to the logical
    /// document, including mid-number, mid-string, mid-escape, or
    /// mid-UTF-8-sequence, and parsing resumes exactly where the previous
    /// call left off. On error, no byte of `data` is considered consumed:
    /// the parser's externally observable state (and anything already
    /// recorded via `position()`) is identical to before this call.
    pub fn push(&mut self, data: &[u8]) -> Result<(), Stop<K::Error>> {
        log::trace!("push: {} bytes at offset {}", data.len(), self.consumed);
        let checkpoint = self.checkpoint();
        match self.push_inner(data) {
            Ok(()) => {
                self.consumed += data.len();
                Ok(())
            }
            Err(e) => {
                if let Stop::Malformed(ref parse_error) = e {
                    log::debug!("push rejected at {:?}: {}", parse_error.position, parse_error.code);
                }
                self.restore(checkpoint);
                Err(e)
            }
        }
    }

    /// Signals end of input. Fails with [`ErrorCode::InsufficientInput`] if
    /// the document is incomplete (an open string, an unclosed container, a
    /// bare `push(b"")` with nothing parsed at all, and so on), in which
    /// case the parser is left untouched and able to accept more `push`
    /// calls, exactly as a failed `push` would.
    pub fn finalize(&mut self) -> Result<(), Stop<K::Error>> {
        log::trace!("finalize at offset {} in grammar state {:?}", self.consumed, self.grammar);
        match self.finalize_inner() {
            Ok(()) => Ok(()),
            Err(e) => {
                if let Stop::Malformed(ref parse_error) = e {
                    log::debug!("finalize rejected: {}", parse_error.code);
                }
                Err(e)
            }
        }
    }

    fn finalize_inner(&mut self) -> Result<(), Stop<K::Error>> {
        match self.lexer.state {
            LexState::LookupToken => {}
            LexState::InString | LexState::InStringEscape | LexState::InStringUnicodeEscape => {
                return Err(malformed(ErrorCode::EofInString, None));
            }
            LexState::InNumber => {
                if self.lexer.in_bignum {
                    grammar::on_big_int_end(&mut self.grammar, &mut self.sink, None)?;
                } else {
                    let value = number::finish_int(&self.lexer);
                    grammar::on_int(&mut self.grammar, &mut self.sink, value, None)?;
                }
            }
            LexState::InNumberFrac => {
                if !self.lexer.frac_not_empty {
                    return Err(malformed(ErrorCode::EmptyFrac, None));
                }
                let value = number::finish_double(&self.lexer);
                grammar::on_double(&mut self.grammar, &mut self.sink, value, None)?;
            }
            LexState::InNumberExpSign => return Err(malformed(ErrorCode::EofInExponent, None)),
            LexState::InNumberExp => {
                if !self.lexer.exp_not_empty {
                    return Err(malformed(ErrorCode::EmptyExp, None));
                }
                let value = number::finish_double(&self.lexer);
                grammar::on_double(&mut self.grammar, &mut self.sink, value, None)?;
            }
            LexState::InTrue => return Err(malformed(ErrorCode::EofInTrue, None)),
            LexState::InFalse => return Err(malformed(ErrorCode::EofInFalse, None)),
            LexState::InNull => return Err(malformed(ErrorCode::EofInNull, None)),
        }
        if self.grammar != GrammarState::Done {
            return Err(malformed(ErrorCode::InsufficientInput, None));
        }
        Ok(())
    }

    fn emit_token(&mut self, token: Token, position: Option<usize>) -> Result<(), Stop<K::Error>> {
        grammar::on_token(&mut self.grammar, &mut self.stack, &mut self.sink, token, position)
    }

    fn push_inner(&mut self, data: &[u8]) -> Result<(), Stop<K::Error>> {
        let mut idx = 0usize;
        let mut string_chunk_begin = match self.lexer.state {
            LexState::InString => Some(0usize),
            _ => None,
        };
        let mut bignum_chunk_begin = match (self.lexer.state, self.lexer.in_bignum) {
            (LexState::InNumber, true) => Some(0usize),
            _ => None,
        };

        while idx < data.len() {
            let byte = data[idx];
            let pos = Some(self.consumed + idx);
            match self.lexer.state {
                LexState::LookupToken => {
                    idx = self.step_lookup_token(data, idx, byte, pos, &mut string_chunk_begin)?;
                }
                LexState::InString => {
                    idx = self.step_in_string(data, idx, byte, pos, &mut string_chunk_begin)?;
                }
                LexState::InStringEscape => {
                    idx = self.step_in_string_escape(idx, byte, pos, &mut string_chunk_begin)?;
                }
                LexState::InStringUnicodeEscape => {
                    idx = self.step_in_unicode_escape(idx, byte, pos, &mut string_chunk_begin)?;
                }
                LexState::InNumber => {
                    idx = self.step_in_number(data, idx, byte, pos, &mut bignum_chunk_begin)?;
                }
                LexState::InNumberFrac => {
                    idx = self.step_in_number_frac(idx, byte, pos)?;
                }
                LexState::InNumberExpSign => {
                    idx = self.step_in_number_exp_sign(idx, byte, pos)?;
                }
                LexState::InNumberExp => {
                    idx = self.step_in_number_exp(idx, byte, pos)?;
                }
                LexState::InTrue => idx = self.step_in_keyword(idx, byte, pos, b"true", ErrorCode::BadTrue, Token::True)?,
                LexState::InFalse => idx = self.step_in_keyword(idx, byte, pos, b"false", ErrorCode::BadFalse, Token::False)?,
                LexState::InNull => idx = self.step_in_keyword(idx, byte, pos, b"null", ErrorCode::BadNull, Token::Null)?,
            }
        }

        if self.lexer.state == LexState::InString {
            let begin = string_chunk_begin.expect("string state implies a chunk start");
            if begin < data.len() {
                grammar::on_string_chunk(&mut self.sink, &data[begin..])?;
            }
        }
        if self.lexer.state == LexState::InNumber && self.lexer.in_bignum {
            let begin = bignum_chunk_begin.expect("bignum state implies a chunk start");
            if begin < data.len() {
                grammar::on_big_int_chunk(&mut self.sink, &data[begin..])?;
            }
        }
        Ok(())
    }

    fn step_lookup_token(
        &mut self,
        _data: &[u8],
        idx: usize,
        byte: u8,
        pos: Option<usize>,
        string_chunk_begin: &mut Option<usize>,
    ) -> Result<usize, Stop<K::Error>> {
        if self.grammar == GrammarState::Done
            && !matches!(byte, b' ' | b'\n' | b'\r' | b'\t')
        {
            return Err(malformed(ErrorCode::ExcessiveInput, pos));
        }
        match byte {
            b' ' | b'\n' | b'\r' | b'\t' => {}
            b':' => self.emit_token(Token::Colon, pos)?,
            b',' => self.emit_token(Token::Comma, pos)?,
            b'{' => self.emit_token(Token::OpenCurly, pos)?,
            b'}' => self.emit_token(Token::CloseCurly, pos)?,
            b'[' => self.emit_token(Token::OpenBracket, pos)?,
            b']' => self.emit_token(Token::CloseBracket, pos)?,
            b'"' => {
                grammar::on_string_begin(&self.grammar, &mut self.sink, pos)?;
                *string_chunk_begin = Some(idx + 1);
                self.lexer.state = LexState::InString;
            }
            b't' => {
                self.lexer.offset = 1;
                self.lexer.state = LexState::InTrue;
            }
            b'f' => {
                self.lexer.offset = 1;
                self.lexer.state = LexState::InFalse;
            }
            b'n' => {
                self.lexer.offset = 1;
                self.lexer.state = LexState::InNull;
            }
            b'+' => return Err(malformed(ErrorCode::LeadingPlus, pos)),
            b'-' => {
                self.lexer.minus = true;
                self.lexer.state = LexState::InNumber;
            }
            b'0'..=b'9' => {
                self.lexer.int_value = (byte - b'0') as u64;
                self.lexer.leading_zero = byte == b'0';
                self.lexer.int_digit_seen = true;
                self.lexer.state = LexState::InNumber;
            }
            _ => return Err(malformed(ErrorCode::UnexpectedSymbol, pos)),
        }
        Ok(idx + 1)
    }

    fn step_in_string(
        &mut self,
        data: &[u8],
        idx: usize,
        byte: u8,
        pos: Option<usize>,
        string_chunk_begin: &mut Option<usize>,
    ) -> Result<usize, Stop<K::Error>> {
        let mut consumed_as_multibyte = false;
        if self.config.validate_utf8 {
            let nb_before = self.lexer.nb;
            string::validate_utf8_byte(&mut self.lexer, byte).map_err(|e| malformed(e, pos))?;
            consumed_as_multibyte = nb_before != 0 || byte >= 0x80;
        }
        if consumed_as_multibyte {
            return Ok(idx + 1);
        }
        match byte {
            b'\\' => {
                let begin = string_chunk_begin.expect("in-string implies a chunk start");
                if idx > begin {
                    grammar::on_string_chunk(&mut self.sink, &data[begin..idx])?;
                }
                self.lexer.state = LexState::InStringEscape;
            }
            b'"' => {
                let begin = string_chunk_begin.expect("in-string implies a chunk start");
                if idx > begin {
                    grammar::on_string_chunk(&mut self.sink, &data[begin..idx])?;
                }
                grammar::on_string_end(&mut self.grammar, &mut self.sink, pos)?;
                self.lexer.state = LexState::LookupToken;
            }
            0x00..=0x1f => return Err(malformed(ErrorCode::UnescapedControlChar, pos)),
            _ => {}
        }
        Ok(idx + 1)
    }

    fn step_in_string_escape(
        &mut self,
        idx: usize,
        byte: u8,
        pos: Option<usize>,
        string_chunk_begin: &mut Option<usize>,
    ) -> Result<usize, Stop<K::Error>> {
        if byte == b'u' {
            self.lexer.state = LexState::InStringUnicodeEscape;
            self.lexer.offset = 0;
            return Ok(idx + 1);
        }
        let decoded = string::simple_escape(byte).ok_or_else(|| malformed(ErrorCode::BadEscape, pos))?;
        grammar::on_string_chunk(&mut self.sink, &[decoded])?;
        *string_chunk_begin = Some(idx + 1);
        self.lexer.state = LexState::InString;
        Ok(idx + 1)
    }

    fn step_in_unicode_escape(
        &mut self,
        idx: usize,
        byte: u8,
        pos: Option<usize>,
        string_chunk_begin: &mut Option<usize>,
    ) -> Result<usize, Stop<K::Error>> {
        let value = crate::tables::hex_value(byte).ok_or_else(|| malformed(ErrorCode::BadUnicodeEscape, pos))?;
        match self.lexer.offset {
            0 => self.lexer.unicode_cp[0] = value << 4,
            1 => self.lexer.unicode_cp[0] |= value,
            2 => self.lexer.unicode_cp[1] = value << 4,
            3 => {
                self.lexer.unicode_cp[1] |= value;
                let cp = self.lexer.unicode_cp;
                grammar::on_string_chunk(&mut self.sink, &cp)?;
                *string_chunk_begin = Some(idx + 1);
                self.lexer.state = LexState::InString;
            }
            _ => unreachable!("offset is reset to 0 every 4 hex digits"),
        }
        if self.lexer.offset < 3 {
            self.lexer.offset += 1;
        }
        Ok(idx + 1)
    }

    fn step_in_number(
        &mut self,
        data: &[u8],
        idx: usize,
        byte: u8,
        pos: Option<usize>,
        bignum_chunk_begin: &mut Option<usize>,
    ) -> Result<usize, Stop<K::Error>> {
        if byte.is_ascii_digit() {
            if self.lexer.in_bignum {
                return Ok(idx + 1);
            }
            if !self.lexer.int_digit_seen {
                // First digit of a number that started with a bare `-`;
                // the non-negative case already set this in LookupToken.
                self.lexer.leading_zero = byte == b'0';
                self.lexer.int_digit_seen = true;
            } else if self.lexer.leading_zero {
                return Err(malformed(ErrorCode::LeadingZero, pos));
            }
            if number::accumulate_int_digit(&mut self.lexer, byte - b'0') {
                return Ok(idx + 1);
            }
            if !self.config.bignum {
                return Err(malformed(ErrorCode::IntOverflow, pos));
            }
            let initial_magnitude = number::finish_int(&self.lexer);
            let negative = self.lexer.minus;
            self.lexer.in_bignum = true;
            grammar::on_big_int_begin(&self.grammar, &mut self.sink, initial_magnitude, negative, pos)?;
            *bignum_chunk_begin = Some(idx);
            return Ok(idx + 1);
        }
        if self.lexer.in_bignum {
            let begin = bignum_chunk_begin.expect("bignum mode implies a chunk start");
            if idx > begin {
                grammar::on_big_int_chunk(&mut self.sink, &data[begin..idx])?;
            }
            if byte == b'.' || byte == b'e' || byte == b'E' {
                return Err(malformed(ErrorCode::IntOverflow, pos));
            }
            grammar::on_big_int_end(&mut self.grammar, &mut self.sink, pos)?;
            self.lexer.reset_number();
            self.lexer.state = LexState::LookupToken;
            return Ok(idx);
        }
        if byte == b'.' {
            self.lexer.state = LexState::InNumberFrac;
            return Ok(idx + 1);
        }
        if byte == b'e' || byte == b'E' {
            self.lexer.state = LexState::InNumberExpSign;
            return Ok(idx + 1);
        }
        let value = number::finish_int(&self.lexer);
        grammar::on_int(&mut self.grammar, &mut self.sink, value, pos)?;
        self.lexer.reset_number();
        self.lexer.state = LexState::LookupToken;
        Ok(idx)
    }

    fn step_in_number_frac(&mut self, idx: usize, byte: u8, pos: Option<usize>) -> Result<usize, Stop<K::Error>> {
        if byte.is_ascii_digit() {
            let d = (byte - b'0') as u64;
            self.lexer.frac_value = self.lexer.frac_value.wrapping_mul(10).wrapping_add(d);
            self.lexer.frac_power += 1;
            self.lexer.frac_not_empty = true;
            return Ok(idx + 1);
        }
        if !self.lexer.frac_not_empty {
            return Err(malformed(ErrorCode::EmptyFrac, pos));
        }
        if byte == b'e' || byte == b'E' {
            self.lexer.state = LexState::InNumberExpSign;
            return Ok(idx + 1);
        }
        let value = number::finish_double(&self.lexer);
        grammar::on_double(&mut self.grammar, &mut self.sink, value, pos)?;
        self.lexer.reset_number();
        self.lexer.state = LexState::LookupToken;
        Ok(idx)
    }

    fn step_in_number_exp_sign(&mut self, idx: usize, byte: u8, pos: Option<usize>) -> Result<usize, Stop<K::Error>> {
        match byte {
            b'-' => {
                self.lexer.exp_minus = true;
                self.lexer.state = LexState::InNumberExp;
            }
            b'+' => {
                self.lexer.state = LexState::InNumberExp;
            }
            b'0'..=b'9' => {
                self.lexer.exp_value = (byte - b'0') as u32;
                self.lexer.exp_not_empty = true;
                self.lexer.state = LexState::InNumberExp;
            }
            _ => return Err(malformed(ErrorCode::BadExponent, pos)),
        }
        Ok(idx + 1)
    }

    fn step_in_number_exp(&mut self, idx: usize, byte: u8, pos: Option<usize>) -> Result<usize, Stop<K::Error>> {
        if byte.is_ascii_digit() {
            let d = byte - b'0';
            if number::exponent_would_overflow(self.lexer.exp_value, d) {
                return Err(malformed(ErrorCode::ExponentOverflow, pos));
            }
            self.lexer.exp_value = self.lexer.exp_value * 10 + d as u32;
            self.lexer.exp_not_empty = true;
            return Ok(idx + 1);
        }
        if !self.lexer.exp_not_empty {
            return Err(malformed(ErrorCode::EmptyExp, pos));
        }
        let value = number::finish_double(&self.lexer);
        grammar::on_double(&mut self.grammar, &mut self.sink, value, pos)?;
        self.lexer.reset_number();
        self.lexer.state = LexState::LookupToken;
        Ok(idx)
    }

    fn step_in_keyword(
        &mut self,
        idx: usize,
        byte: u8,
        pos: Option<usize>,
        keyword: &'static [u8],
        mismatch: ErrorCode,
        token: Token,
    ) -> Result<usize, Stop<K::Error>> {
        if byte != keyword[self.lexer.offset as usize] {
            return Err(malformed(mismatch, pos));
        }
        self.lexer.offset += 1;
        if self.lexer.offset as usize == keyword.len() {
            self.emit_token(token, pos)?;
            self.lexer.offset = 0;
            self.lexer.state = LexState::LookupToken;
        }
        Ok(idx + 1)
    }
}
