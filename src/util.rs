//! Internal text parsing helpers.

use crate::{EcError, Result};

/// C `isspace` for ASCII input.
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Cut user input at the first NUL, as a C string would end there.
pub(crate) fn until_nul(input: &[u8]) -> &[u8] {
    input
        .iter()
        .position(|&b| b == 0)
        .map_or(input, |end| &input[..end])
}

/// Parse an unsigned 16-bit integer with automatic base detection.
///
/// `0x` selects hex, a leading `0` octal, anything else decimal. A leading `+`
/// and a single trailing newline are accepted.
pub(crate) fn parse_u16(input: &[u8]) -> Result<u16> {
    let s = input.strip_suffix(b"\n").unwrap_or(input);
    let s = s.strip_prefix(b"+").unwrap_or(s);
    let (radix, digits) = match s {
        [b'0', x, h, ..] if x.eq_ignore_ascii_case(&b'x') && h.is_ascii_hexdigit() => (16, &s[2..]),
        [b'0', ..] => (8, s),
        _ => (10, s),
    };
    if digits.is_empty() {
        return Err(EcError::InvalidArgument);
    }
    let mut value: u64 = 0;
    for &b in digits {
        let digit = char::from(b)
            .to_digit(radix)
            .ok_or(EcError::InvalidArgument)?;
        value = value
            .checked_mul(u64::from(radix))
            .and_then(|v| v.checked_add(u64::from(digit)))
            .ok_or(EcError::OutOfRange)?;
    }
    u16::try_from(value).map_err(|_| EcError::OutOfRange)
}
