//! Sale proceeds split between author and fee recipient.

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, BasisPoints, Rounding};
use crate::error::{EngineError, Result};

/// How one sale's price is divided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    /// Paid to the course author.
    pub author: Amount,
    /// Paid to the fee recipient.
    pub fee: Amount,
}

/// Splits `price` so the fee recipient gets `floor(price * fee_bps / 10000)`
/// and the author the remainder. The two shares always sum to `price`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidFee`] if `fee_bps` exceeds 100%.
pub fn split(price: Amount, fee_bps: BasisPoints) -> Result<Split> {
    if !fee_bps.is_valid_percent() {
        return Err(EngineError::InvalidFee("marketplace fee above 100%"));
    }
    let fee = fee_bps.apply(price, Rounding::Down)?;
    let author = price
        .checked_sub(&fee)
        .ok_or(EngineError::Underflow("fee exceeds price"))?;
    Ok(Split { author, fee })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use primitive_types::U256;
    use proptest::prelude::*;

    #[test]
    fn five_percent_of_one_hundred() {
        assert_eq!(
            split(Amount::new(100), BasisPoints::new(500)),
            Ok(Split {
                author: Amount::new(95),
                fee: Amount::new(5),
            })
        );
    }

    #[test]
    fn any_price_can_be_split() {
        let price = Amount::new(u128::MAX / 10_000 + 1);
        let Ok(s) = split(price, BasisPoints::new(500)) else {
            panic!("split");
        };
        assert_eq!(s.author.checked_add(&s.fee), Some(price));
        let Ok(s) = split(Amount::MAX, BasisPoints::MAX_PERCENT) else {
            panic!("split at 100%");
        };
        assert_eq!(s.fee, Amount::MAX);
        assert_eq!(s.author, Amount::ZERO);
    }

    #[test]
    fn fee_rounds_toward_author() {
        let Ok(s) = split(Amount::new(19), BasisPoints::new(500)) else {
            panic!("split");
        };
        assert_eq!(s.fee, Amount::ZERO);
        assert_eq!(s.author, Amount::new(19));
    }

    #[test]
    fn bounds() {
        let price = Amount::new(1_000);
        assert_eq!(
            split(price, BasisPoints::ZERO).map(|s| s.author),
            Ok(price)
        );
        assert_eq!(
            split(price, BasisPoints::MAX_PERCENT).map(|s| s.fee),
            Ok(price)
        );
        assert!(matches!(
            split(price, BasisPoints::new(10_001)),
            Err(EngineError::InvalidFee(_))
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn shares_sum_to_price(price in any::<u128>(), bps in 0u32..=10_000) {
            let Ok(s) = split(Amount::new(price), BasisPoints::new(bps)) else {
                panic!("split failed for {price} at {bps}bp");
            };
            prop_assert_eq!(s.author.checked_add(&s.fee), Some(Amount::new(price)));
            prop_assert!(
                U256::from(s.fee.get()) * U256::from(10_000u32)
                    <= U256::from(price) * U256::from(bps)
            );
        }
    }
}
