use cosmwasm_std::{Decimal, Uint128};

/// Proportions are whole-number percentages, 100 is the most any share can take
pub fn max_proportion() -> Decimal {
    Decimal::from_ratio(100u128, 1u128)
}

/// Returns floor(amount * proportion / 100).
/// Works on the decimal's 18 digit atomics through a 256 bit intermediate, so no precision is lost
/// before the final floor. None if the proportion is above 100.
pub fn apply_proportion(amount: Uint128, proportion: Decimal) -> Option<Uint128> {
    let ceiling = max_proportion();
    if proportion > ceiling {
        return None;
    }

    Some(amount.multiply_ratio(proportion.atomics(), ceiling.atomics()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn floors_fractional_results() {
        //28% of 50 is 14
        assert_eq!(apply_proportion(Uint128::new(50), Decimal::from_str("28.0").unwrap()), Some(Uint128::new(14)));
        //7.5% of 14 is 1.05
        assert_eq!(apply_proportion(Uint128::new(14), Decimal::from_str("7.5").unwrap()), Some(Uint128::new(1)));
        //92.5% of 14 is 12.95
        assert_eq!(apply_proportion(Uint128::new(14), Decimal::from_str("92.5").unwrap()), Some(Uint128::new(12)));
        //Smallest representable proportion of a small amount
        assert_eq!(apply_proportion(Uint128::new(99), Decimal::from_str("0.000000000000000001").unwrap()), Some(Uint128::zero()));
    }

    #[test]
    fn bounds() {
        assert_eq!(apply_proportion(Uint128::new(77), Decimal::zero()), Some(Uint128::zero()));
        assert_eq!(apply_proportion(Uint128::new(77), max_proportion()), Some(Uint128::new(77)));
        assert_eq!(apply_proportion(Uint128::MAX, max_proportion()), Some(Uint128::MAX));
        assert_eq!(apply_proportion(Uint128::new(77), Decimal::from_str("100.000000000000000001").unwrap()), None);
    }
}
