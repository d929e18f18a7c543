/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INT: f64 = 9_007_199_254_740_991.0;

/// Converts a script number to an array position.
///
/// The fractional part is discarded. Negative, non-finite and unsafe
/// magnitudes have no position.
///
/// ## Parameters
/// - `value`: The number used as an index.
///
/// ## Returns
/// - `Some(usize)`: The truncated position.
/// - `None`: If the value cannot address an element.
///
/// ## Example
/// ```
/// use dlite::util::num::f64_to_index;
///
/// assert_eq!(f64_to_index(2.9), Some(2));
/// assert_eq!(f64_to_index(-1.0), None);
/// assert_eq!(f64_to_index(f64::NAN), None);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn f64_to_index(value: f64) -> Option<usize> {
    if !value.is_finite() || value < 0.0 || value > MAX_SAFE_INT {
        return None;
    }
    Some(value.trunc() as usize)
}

/// Converts a script number to a signed offset, truncating and saturating.
///
/// Used where negative positions count from the end of a sequence.
///
/// ## Example
/// ```
/// use dlite::util::num::f64_to_offset;
///
/// assert_eq!(f64_to_offset(-2.5), -2);
/// assert_eq!(f64_to_offset(1e300), i64::MAX);
/// assert_eq!(f64_to_offset(f64::NAN), 0);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn f64_to_offset(value: f64) -> i64 {
    value as i64
}

/// Converts a length or position to a script number.
///
/// ## Example
/// ```
/// use dlite::util::num::usize_to_f64;
///
/// assert_eq!(usize_to_f64(12), 12.0);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Resolves a possibly negative offset against a length, clamping the result
/// into `0..=len`.
///
/// ## Example
/// ```
/// use dlite::util::num::clamp_offset;
///
/// assert_eq!(clamp_offset(-1, 5), 4);
/// assert_eq!(clamp_offset(-10, 5), 0);
/// assert_eq!(clamp_offset(9, 5), 5);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
pub const fn clamp_offset(offset: i64, len: usize) -> usize {
    let len_i = len as i64;
    let resolved = if offset < 0 { offset + len_i } else { offset };

    if resolved < 0 {
        0
    } else if resolved > len_i {
        len
    } else {
        resolved as usize
    }
}

/// Converts a script number to a process exit status.
///
/// The value is truncated and wrapped into a byte, so `256` becomes `0` and
/// `-1` becomes `255`.
///
/// ## Example
/// ```
/// use dlite::util::num::exit_status;
///
/// assert_eq!(exit_status(3.0), 3);
/// assert_eq!(exit_status(256.0), 0);
/// assert_eq!(exit_status(-1.0), 255);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn exit_status(value: f64) -> u8 {
    (f64_to_offset(value).rem_euclid(256)) as u8
}
