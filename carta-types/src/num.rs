//! Numeric helpers shared by the value types.

/// Default number of decimal digits kept by [`format_num`].
pub const DEFAULT_DIGITS: u32 = 5;

/// Wraps `num` into the `[min, max)` range given by `range`.
///
/// If `include_max` is set, a value equal to `max` is returned unchanged, so the range becomes
/// `[min, max]`.
///
/// ```
/// use carta_types::num::wrap_num;
///
/// assert_eq!(wrap_num(190.0, [-180.0, 180.0], true), -170.0);
/// assert_eq!(wrap_num(180.0, [-180.0, 180.0], true), 180.0);
/// assert_eq!(wrap_num(180.0, [-180.0, 180.0], false), -180.0);
/// ```
pub fn wrap_num(num: f64, range: [f64; 2], include_max: bool) -> f64 {
    let [min, max] = range;
    if num == max && include_max {
        return num;
    }

    let d = max - min;
    ((num - min) % d + d) % d + min
}

/// Rounds `num` to the given number of decimal digits ([`DEFAULT_DIGITS`] if `None`).
///
/// Halves are rounded towards positive infinity.
pub fn format_num(num: f64, digits: Option<u32>) -> f64 {
    let pow = 10f64.powi(digits.unwrap_or(DEFAULT_DIGITS) as i32);
    round_half_up(num * pow) / pow
}

pub(crate) fn round_half_up(num: f64) -> f64 {
    (num + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_num_keeps_values_inside_range() {
        assert_eq!(wrap_num(5.0, [0.0, 10.0], false), 5.0);
        assert_eq!(wrap_num(-1.0, [0.0, 10.0], false), 9.0);
        assert_eq!(wrap_num(25.0, [0.0, 10.0], false), 5.0);
        assert_eq!(wrap_num(-540.0, [-180.0, 180.0], true), -180.0);
    }

    #[test]
    fn format_num_rounds() {
        assert_eq!(format_num(1.123456789, None), 1.12346);
        assert_eq!(format_num(1.123456789, Some(2)), 1.12);
        assert_eq!(format_num(-2.5, Some(0)), -2.0);
        assert_eq!(format_num(2.5, Some(0)), 3.0);
    }
}
