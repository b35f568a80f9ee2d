use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Count, Percent};

/// Safe ratio: returns Decimal::ZERO when the denominator is zero.
///
/// Every percentage in the engine goes through this one guard so that an
/// empty period renders as 0 % rather than NaN.
pub fn safe_ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator == dec!(0) {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

/// `part * 100 / whole` for counts, 0 when `whole` is 0.
pub fn percent_of(part: Count, whole: Count) -> Percent {
    safe_ratio(Decimal::from(part) * dec!(100), Decimal::from(whole))
}

/// Relative change of `current` against `previous`, in percent.
///
/// Zero when `previous` is zero: the dashboard shows a flat trend rather
/// than an infinite one.
pub fn trend(current: Percent, previous: Percent) -> Percent {
    safe_ratio(current - previous, previous) * dec!(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of_basic() {
        assert_eq!(percent_of(20, 50), dec!(40));
        assert_eq!(percent_of(50, 50), dec!(100));
    }

    #[test]
    fn test_percent_of_zero_denominator() {
        assert_eq!(percent_of(0, 0), Decimal::ZERO);
        assert_eq!(percent_of(12, 0), Decimal::ZERO);
    }

    #[test]
    fn test_percent_of_repeating_fraction() {
        let p = percent_of(1, 3);
        assert!((p - dec!(33.3333)).abs() < dec!(0.001), "got {}", p);
    }

    #[test]
    fn test_trend() {
        assert_eq!(trend(dec!(60), dec!(50)), dec!(20));
        assert_eq!(trend(dec!(40), dec!(50)), dec!(-20));
        assert_eq!(trend(dec!(75), Decimal::ZERO), Decimal::ZERO);
    }
}
