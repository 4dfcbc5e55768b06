//! Half-up decimal rounding for published numbers.
//!
//! Binary floating point cannot represent most decimal fractions, so rounding
//! `2.675` with `f64::round` after scaling yields `2.67` on every platform.
//! Reports compare published numbers against golden files, so rounding here
//! operates on the shortest decimal representation of the value (the same
//! digits `Display` prints) and rounds ties away from zero.
//!
//! Callers round exactly once, as the last step before a number leaves the
//! crate; intermediate computation stays in full precision.

/// Number of decimals used for every published score.
pub const SCORE_DECIMALS: usize = 3;

/// Rounds `value` to `decimals` places, ties away from zero.
///
/// Non-finite values are returned unchanged and negative zero becomes zero.
///
/// # Examples
///
/// ```
/// use kifu_stats::rounding::round_half_up;
///
/// assert_eq!(round_half_up(1.0005, 3), 1.001);
/// assert_eq!(round_half_up(-0.125, 2), -0.13);
/// assert_eq!(round_half_up(9.9996, 3), 10.0);
/// assert_eq!(round_half_up(3.0, 3), 3.0);
/// ```
#[must_use]
pub fn round_half_up(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if value == 0.0 {
        return 0.0;
    }

    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    if frac_part.len() <= decimals {
        return value;
    }

    let round_up = frac_part.as_bytes()[decimals] >= b'5';
    let mut digits = int_part
        .bytes()
        .chain(frac_part.bytes().take(decimals))
        .map(|b| b - b'0')
        .collect::<Vec<_>>();

    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let split = digits.len() - decimals;
    let mut text = String::with_capacity(digits.len() + 1);
    text.extend(digits[..split].iter().map(|d| char::from(b'0' + d)));
    if decimals > 0 {
        text.push('.');
        text.extend(digits[split..].iter().map(|d| char::from(b'0' + d)));
    }

    let magnitude = text.parse::<f64>().unwrap_or(value.abs());
    if magnitude == 0.0 {
        0.0
    } else if value.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    }
}

/// Rounds an optional value with [`round_half_up`].
#[must_use]
pub fn round_option(value: Option<f64>, decimals: usize) -> Option<f64> {
    value.map(|v| round_half_up(v, decimals))
}
