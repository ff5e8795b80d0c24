/// Share of a marketplace line's subtotal retained by the gallery.
pub const COMMISSION_PERCENT: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayoutSplit {
    pub commission: i64,
    pub designer_amount: i64,
}

/// Splits a line subtotal into gallery commission and designer payout.
pub fn split_subtotal(subtotal: i64) -> PayoutSplit {
    let commission = percent_of(subtotal, COMMISSION_PERCENT);
    PayoutSplit {
        commission,
        designer_amount: subtotal - commission,
    }
}

/// `amount * percent / 100`, rounded half away from zero.
pub fn percent_of(amount: i64, percent: i64) -> i64 {
    let scaled = amount * percent;
    if scaled >= 0 {
        (scaled + 50) / 100
    } else {
        (scaled - 50) / 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_percent_goes_to_the_gallery() {
        let split = split_subtotal(12_500);
        assert_eq!(split.commission, 2_500);
        assert_eq!(split.designer_amount, 10_000);
    }

    #[test]
    fn odd_amounts_round_and_still_add_up() {
        let split = split_subtotal(1_003);
        assert_eq!(split.commission, 201);
        assert_eq!(split.commission + split.designer_amount, 1_003);
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent_of(30_000, 12), 3_600);
        assert_eq!(percent_of(25, 10), 3);
        assert_eq!(percent_of(24, 10), 2);
    }
}
