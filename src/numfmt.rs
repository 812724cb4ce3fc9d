//! Allocation-free decimal formatting for the text engine.
//!
//! Output goes into a caller-supplied byte buffer. Capacity is the caller's
//! contract: [`INT_BUF_LEN`] bytes always suffice for [`format_int`], and
//! [`FLOAT_BUF_LEN`] bytes suffice for [`format_float`] with up to 20
//! decimals. An undersized buffer panics on the out-of-range index.

/// Minimum buffer length for [`format_int`].
pub const INT_BUF_LEN: usize = 16;

/// Minimum buffer length for [`format_float`] (sign, 10 integer digits,
/// point and up to 20 decimals).
pub const FLOAT_BUF_LEN: usize = 32;

/// Capacity of the reversed-digit scratch used for the integer part.
const SCRATCH_DIGITS: usize = 16;

/// Format `value` with exactly `decimals` fractional digits, rounding half
/// away from zero.
///
/// `0.5 / 10^decimals` is added to the magnitude before truncation, so
/// `-0.999` with one decimal gives `"-1.0"`. With `decimals == 0` no decimal
/// point is emitted. Integer parts beyond `u32::MAX` saturate.
///
/// # Panics
///
/// If `buf` is too short for the output.
pub fn format_float(buf: &mut [u8], value: f32, decimals: u8) -> &str {
    let mut len = 0;
    let mut num = value;

    if num < 0.0 {
        buf[len] = b'-';
        len += 1;
        num = -num;
    }

    let mut rounding = 0.5f32;
    for _ in 0..decimals {
        rounding /= 10.0;
    }
    num += rounding;

    // `as` saturates, NaN becomes 0.
    let int_part = num as u32;
    let mut frac = num - int_part as f32;

    len += write_digits(&mut buf[len..], int_part);

    if decimals == 0 {
        return as_str(buf, len);
    }

    buf[len] = b'.';
    len += 1;

    for _ in 0..decimals {
        frac *= 10.0;
        let digit = (frac as u8).min(9);
        buf[len] = b'0' + digit;
        len += 1;
        frac -= digit as f32;
    }

    as_str(buf, len)
}

/// Format an `i32` exactly, with a leading `-` for negative values.
///
/// # Panics
///
/// If `buf` is too short for the output ([`INT_BUF_LEN`] always suffices).
pub fn format_int(buf: &mut [u8], value: i32) -> &str {
    let mut len = 0;
    if value < 0 {
        buf[len] = b'-';
        len += 1;
    }
    len += write_digits(&mut buf[len..], value.unsigned_abs());
    as_str(buf, len)
}

/// Write the decimal digits of `n` to the front of `out`, returning the
/// digit count. Digits are extracted least significant first into a
/// scratch array, then copied out in reverse.
fn write_digits(out: &mut [u8], mut n: u32) -> usize {
    let mut scratch = [0u8; SCRATCH_DIGITS];
    let mut count = 0;

    if n == 0 {
        scratch[0] = b'0';
        count = 1;
    }
    while n > 0 {
        scratch[count] = b'0' + (n % 10) as u8;
        n /= 10;
        count += 1;
    }

    for (i, &digit) in scratch[..count].iter().rev().enumerate() {
        out[i] = digit;
    }
    count
}

fn as_str(buf: &[u8], len: usize) -> &str {
    // Only ASCII digits, '-' and '.' are ever written.
    core::str::from_utf8(&buf[..len]).unwrap_or("")
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn float(value: f32, decimals: u8) -> std::string::String {
        let mut buf = [0u8; FLOAT_BUF_LEN];
        format_float(&mut buf, value, decimals).into()
    }

    fn int(value: i32) -> std::string::String {
        let mut buf = [0u8; INT_BUF_LEN];
        format_int(&mut buf, value).into()
    }

    #[test]
    fn rounds_to_requested_decimals() {
        assert_eq!(float(3.14159, 2), "3.14");
        assert_eq!(float(123.456, 3), "123.456");
        assert_eq!(float(2.5, 0), "3");
    }

    #[test]
    fn rounding_carries_into_integer_part() {
        assert_eq!(float(-0.999, 1), "-1.0");
        assert_eq!(float(9.96, 1), "10.0");
    }

    #[test]
    fn zero_decimals_omits_point() {
        assert_eq!(float(5.0, 0), "5");
        assert_eq!(float(0.0, 0), "0");
    }

    #[test]
    fn zero_value_pads_fraction() {
        assert_eq!(float(0.0, 3), "0.000");
        assert_eq!(float(-0.25, 1), "-0.3");
    }

    #[test]
    fn huge_values_saturate() {
        assert_eq!(float(1.0e12, 0), "4294967295");
    }

    #[test]
    fn integers_are_exact() {
        assert_eq!(int(0), "0");
        assert_eq!(int(7), "7");
        assert_eq!(int(-42), "-42");
        assert_eq!(int(16_777_217), "16777217");
        assert_eq!(int(i32::MAX), "2147483647");
        assert_eq!(int(i32::MIN), "-2147483648");
    }

    #[test]
    #[should_panic]
    fn undersized_buffer_panics() {
        let mut buf = [0u8; 3];
        format_int(&mut buf, 12345);
    }
}
