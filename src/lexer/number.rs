//! Number accumulation: turning the digit-by-digit state in [`LexerState`]
//! into an `i64` or `f64` at the point a number's terminating byte appears.

use crate::lexer::state::LexerState;
use crate::tables::{powm10, POWM10_MAX};

/// One past `i64::MAX`; the largest magnitude representable by `i64`,
/// inclusive, allowing for `i64::MIN`'s one extra unit of negative range.
pub const MAX_MAGNITUDE: u64 = i64::MAX as u64 + 1;

/// Folds one more integer-part digit into `int_value`.
///
/// Returns `false` if doing so would overflow [`MAX_MAGNITUDE`], in which
/// case the caller is responsible for either raising `IntOverflow` or
/// switching to bignum mode; `int_value` is left unchanged on overflow.
pub fn accumulate_int_digit(lex: &mut LexerState, digit: u8) -> bool {
    match lex
        .int_value
        .checked_mul(10)
        .and_then(|v| v.checked_add(digit as u64))
    {
        Some(v) if v <= MAX_MAGNITUDE => {
            lex.int_value = v;
            true
        }
        _ => false,
    }
}

/// Signed integer value of the completed integer-part accumulation.
///
/// Panics if the magnitude does not fit `i64`; callers must have already
/// rejected that case via [`accumulate_int_digit`]'s return value.
pub fn finish_int(lex: &LexerState) -> i64 {
    if lex.minus {
        if lex.int_value == MAX_MAGNITUDE {
            i64::MIN
        } else {
            -(lex.int_value as i64)
        }
    } else {
        lex.int_value as i64
    }
}

/// Composes the integer, fractional and exponent parts into a signed
/// `f64`, the same three-term formula the reference lexer uses:
/// `(int + frac * 10^-frac_power) * 10^exponent`, sign applied last.
pub fn finish_double(lex: &LexerState) -> f64 {
    let mut value = lex.int_value as f64 + lex.frac_value as f64 * powm10(-(lex.frac_power as i32));
    if lex.exp_not_empty || lex.exp_value != 0 {
        let exponent = if lex.exp_minus {
            -(lex.exp_value as i32)
        } else {
            lex.exp_value as i32
        };
        value *= powm10(exponent);
    }
    if lex.minus {
        -value
    } else {
        value
    }
}

/// Whether accumulating one more exponent digit would push the exponent
/// magnitude past what `powm10` supports.
pub fn exponent_would_overflow(current: u32, digit: u8) -> bool {
    let next = current as i64 * 10 + digit as i64;
    next > POWM10_MAX as i64
}
