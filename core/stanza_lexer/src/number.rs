//! Overflow-safe numeric literal scanning.
//!
//! A literal is an optional sign, an optional radix prefix (`0x`/`0c`/`0b`,
//! only when the default radix is C-style), a digit run with `'` and `_`
//! separators, an optional fraction, and an optional `e`/`E`/`p`/`P`
//! exponent. Any fraction or exponent makes the result a structured float
//! whose exponent applies base-10 scaling regardless of the mantissa radix.
//!
//! The accumulator saturates instead of wrapping: the first multiply-add
//! that would overflow is suppressed, the value keeps its pre-overflow
//! state, the `OVERFLOWED` flag is set, and scanning continues so the
//! literal is still consumed as one token.

use stanza_lexer_core::Cursor;
use stanza_model::{FloatValue, TokenFlags, TokenValue};

/// Default radix mode for numeric literals.
///
/// `CStyle` is decimal with `0x`/`0X` (hex), `0c`/`0C` (octal), and
/// `0b`/`0B` (binary) prefixes enabled. The fixed modes disable prefix
/// detection and validate digits against one radix only.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Radix {
    #[default]
    CStyle,
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

impl Radix {
    fn base(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::CStyle | Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }
}

/// Decoded numeric literal: payload plus the numeric flags to attach.
pub(crate) struct ScannedNumber {
    pub value: TokenValue,
    pub flags: TokenFlags,
}

fn digit_value(byte: u8, base: u32) -> Option<u32> {
    char::from(byte).to_digit(base)
}

fn is_separator(byte: u8) -> bool {
    byte == b'\'' || byte == b'_'
}

/// Saturating multiply-add: on overflow the accumulator keeps its
/// pre-overflow value and the flag trips.
fn accumulate(acc: &mut u64, base: u32, digit: u32, overflowed: &mut bool) {
    if *overflowed {
        return;
    }
    match acc
        .checked_mul(u64::from(base))
        .and_then(|v| v.checked_add(u64::from(digit)))
    {
        Some(v) => *acc = v,
        None => *overflowed = true,
    }
}

/// Scan a numeric literal at the cursor.
///
/// The caller has verified the cursor sits on a digit, or on a sign whose
/// next byte is a digit.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "casts are range-checked against the target type before use"
)]
pub(crate) fn scan_number(cursor: &mut Cursor<'_>, default_radix: Radix) -> ScannedNumber {
    let mut overflowed = false;
    let mut negative = false;

    match cursor.current() {
        b'-' => {
            negative = true;
            cursor.advance();
        }
        b'+' => cursor.advance(),
        _ => {}
    }

    let mut base = default_radix.base();
    if default_radix == Radix::CStyle && cursor.current() == b'0' {
        let prefix_base = match cursor.peek() {
            b'x' | b'X' => 16,
            b'c' | b'C' => 8,
            b'b' | b'B' => 2,
            _ => 0,
        };
        if prefix_base != 0 && digit_value(cursor.peek2(), prefix_base).is_some() {
            cursor.advance_n(2);
            base = prefix_base;
        }
    }

    let mut whole: u64 = 0;
    eat_digits(cursor, base, |digit| {
        accumulate(&mut whole, base, digit, &mut overflowed);
    });

    // Fraction: a dot counts only when a digit of the radix follows, so
    // member-access-like text after an integer is left alone.
    let mut fract: u64 = 0;
    let mut fract_digits: u8 = 0;
    let mut is_float = false;
    if cursor.current() == b'.' && digit_value(cursor.peek(), base).is_some() {
        is_float = true;
        cursor.advance();
        let mut fract_overflow = false;
        eat_digits(cursor, base, |digit| {
            if fract_overflow {
                return;
            }
            let next = fract
                .checked_mul(u64::from(base))
                .and_then(|v| v.checked_add(u64::from(digit)));
            match next {
                Some(v) if v <= u64::from(u32::MAX) => {
                    fract = v;
                    fract_digits += 1;
                }
                // Excess precision is truncated, not an error.
                _ => fract_overflow = true,
            }
        });
    }

    // Exponent: e/E/p/P with decimal digits. In hex literals `e` is a
    // digit, so only p/P can reach this point for base 16.
    let mut exp: i32 = 0;
    if matches!(cursor.current(), b'e' | b'E' | b'p' | b'P') {
        let mut look = *cursor;
        look.advance();
        let mut exp_negative = false;
        match look.current() {
            b'-' => {
                exp_negative = true;
                look.advance();
            }
            b'+' => look.advance(),
            _ => {}
        }
        if look.current().is_ascii_digit() {
            is_float = true;
            let mut magnitude: u64 = 0;
            let mut exp_overflow = false;
            eat_digits(&mut look, 10, |digit| {
                accumulate(&mut magnitude, 10, digit, &mut exp_overflow);
            });
            let magnitude = i32::try_from(magnitude).unwrap_or(i32::MAX);
            exp = if exp_negative { -magnitude } else { magnitude };
            if exp_overflow {
                overflowed = true;
            }
            *cursor = look;
        }
    }

    let mut flags = TokenFlags::empty();
    if overflowed {
        flags |= TokenFlags::OVERFLOWED;
    }

    let value = if is_float {
        flags |= TokenFlags::FLOAT;
        let whole = match i64::try_from(whole) {
            Ok(v) => v,
            Err(_) => {
                flags |= TokenFlags::OVERFLOWED;
                i64::MAX
            }
        };
        TokenValue::Float(FloatValue {
            negative,
            whole,
            fract: fract as u32,
            fract_digits,
            radix: base as u8,
            exp,
        })
    } else if negative {
        flags |= TokenFlags::SIGNED;
        const MIN_MAGNITUDE: u64 = i64::MAX as u64 + 1;
        let signed = if whole < MIN_MAGNITUDE {
            -(whole as i64)
        } else {
            if whole > MIN_MAGNITUDE {
                flags |= TokenFlags::OVERFLOWED;
            }
            i64::MIN
        };
        TokenValue::Signed(signed)
    } else {
        TokenValue::Unsigned(whole)
    };

    ScannedNumber { value, flags }
}

/// Consume digits of `base` (with separators elided), feeding each digit to
/// `visit`. Stops at the first byte that is neither a digit nor a separator.
fn eat_digits(cursor: &mut Cursor<'_>, base: u32, mut visit: impl FnMut(u32)) {
    loop {
        let b = cursor.current();
        if is_separator(b) {
            cursor.advance();
            continue;
        }
        match digit_value(b, base) {
            Some(digit) => {
                visit(digit);
                cursor.advance();
            }
            None => break,
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
