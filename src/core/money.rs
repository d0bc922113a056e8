use rust_decimal::{Decimal, RoundingStrategy};

/// Round to the cent, halves away from zero.
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn format_eur(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-€{:.2}", amount.abs())
    } else {
        format!("€{:.2}", amount)
    }
}

pub fn format_pct(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn round2_halves_away_from_zero() {
        assert_eq!(round2(dec!(1.005)), dec!(1.01));
        assert_eq!(round2(dec!(1.004)), dec!(1.00));
        assert_eq!(round2(dec!(-1.005)), dec!(-1.01));
        assert_eq!(round2(dec!(777.3000)), dec!(777.30));
    }

    #[test]
    fn format_eur_signs() {
        assert_eq!(format_eur(dec!(12.5)), "€12.50");
        assert_eq!(format_eur(dec!(-3)), "-€3.00");
    }

    #[test]
    fn format_pct_trims_zeroes() {
        assert_eq!(format_pct(dec!(0.125)), "12.5%");
        assert_eq!(format_pct(dec!(0.20)), "20%");
    }
}
