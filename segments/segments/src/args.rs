//! Command-line parsing.
//!
//! The count is converted like C's `atol`: best effort, never an error.

use std::ffi::OsStr;

/// Parse `arg` as a base-10 integer the way `strtol(arg, NULL, 10)` does.
///
/// Leading whitespace and a single sign are accepted, parsing stops at the
/// first non-digit, input without digits yields 0, and values outside the
/// `i64` range saturate.
pub fn parse_count(arg: &OsStr) -> i64 {
    let mut rest = arg.as_encoded_bytes();
    while let [b, tail @ ..] = rest {
        if !is_space(*b) {
            break;
        }
        rest = tail;
    }

    let negative = match rest {
        [b'-', tail @ ..] => {
            rest = tail;
            true
        }
        [b'+', tail @ ..] => {
            rest = tail;
            false
        }
        _ => false,
    };

    // Accumulate towards the sign so `i64::MIN` doesn't overflow on the way.
    let mut value: i64 = 0;
    for b in rest.iter().take_while(|b| b.is_ascii_digit()) {
        let digit = i64::from(b - b'0');
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };
    }

    value
}

/// C `isspace` in the "C" locale.
fn is_space(b: u8) -> bool {
    b == b' ' || (b'\t'..=b'\r').contains(&b)
}
