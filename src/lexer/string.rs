//! String-literal byte handling: UTF-8 shortest-form validation and escape
//! decoding.
//!
//! The validation follows the corner cases documented by the Unicode
//! Consortium's [corrigendum #1](https://www.unicode.org/versions/corrigendum1.html):
//! a three- or four-byte sequence's *second* byte has a narrower legal range
//! than a plain continuation byte whenever the first byte is `0xE0`, `0xF0`
//! or `0xF4`, because a wider range would admit a code point encodable in
//! fewer bytes.

use crate::error::ErrorCode;
use crate::lexer::state::LexerState;

/// Feeds one more raw string byte through UTF-8 validation, updating
/// `nb` (continuation bytes still owed) and `cc` (which corner case, if
/// any, applies to the *next* byte).
///
/// Returns `Ok(())` for a structurally valid byte (whether or not it is
/// itself the last byte of its sequence); the caller still needs to check
/// for `"`/`\`/control bytes separately, since those only apply to
/// single-byte ASCII positions and fall out of the `nb == 0` case.
pub fn validate_utf8_byte(lex: &mut LexerState, byte: u8) -> Result<(), ErrorCode> {
    if lex.nb != 0 {
        if lex.nb == 2 && lex.cc == 1 {
            if byte & 0xe0 != 0xa0 {
                return Err(ErrorCode::BadUtf8);
            }
            lex.cc = 0;
        } else if lex.nb == 3 && lex.cc == 2 {
            // [0x90, 0xBF] isn't power-of-two aligned like the E0 and F4
            // corner cases below, so it needs an explicit bound instead of
            // a single AND-mask comparison.
            if !(0x90..=0xbf).contains(&byte) {
                return Err(ErrorCode::BadUtf8);
            }
            lex.cc = 0;
        } else if lex.nb == 3 && lex.cc == 3 {
            if byte & 0xf0 != 0x80 {
                return Err(ErrorCode::BadUtf8);
            }
            lex.cc = 0;
        } else if byte & 0xc0 != 0x80 {
            return Err(ErrorCode::BadUtf8);
        }
        lex.nb -= 1;
        return Ok(());
    }
    if byte & 0xe0 == 0xc0 {
        lex.nb = 1;
    } else if byte & 0xf0 == 0xe0 {
        lex.cc = if byte == 0xe0 { 1 } else { 0 };
        lex.nb = 2;
    } else if byte & 0xf8 == 0xf0 {
        lex.cc = if byte == 0xf0 {
            2
        } else if byte == 0xf4 {
            3
        } else {
            0
        };
        lex.nb = 3;
    } else if byte & 0xf8 == 0xf8 {
        return Err(ErrorCode::LongUtf8);
    }
    Ok(())
}

/// Whether `byte` is a continuation byte or leading byte of a multi-byte
/// UTF-8 sequence currently in progress (i.e. not a plain ASCII position a
/// `"`/`\`/control-char check should apply to).
pub fn in_multibyte_sequence(lex: &LexerState, byte: u8) -> bool {
    lex.nb != 0 || byte & 0x80 != 0
}

/// Maps a one-byte escape character (the byte right after `\`) to its
/// decoded single byte, or `None` if it instead starts a `\uXXXX` escape or
/// is not a legal escape character at all.
pub fn simple_escape(byte: u8) -> Option<u8> {
    match byte {
        b'"' => Some(b'"'),
        b'\\' => Some(b'\\'),
        b'/' => Some(b'/'),
        b'b' => Some(0x08),
        b'f' => Some(0x0c),
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        _ => None,
    }
}
