//! Aggregator quote as returned by the off-chain quote service.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, Amount};
use crate::error::{EngineError, Result};

/// The transaction an aggregator proposes for a swap: the contract to call,
/// the hex-encoded payload, and informational pricing fields.
///
/// Only [`to`](Self::to) and [`call_data`](Self::call_data) influence
/// execution. [`quoted_amount`](Self::quoted_amount) is the aggregator's
/// own estimate and is never trusted for settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatorQuote {
    /// External router to invoke.
    pub to: Address,
    /// `0x`-prefixed hex payload.
    pub data: String,
    /// Native value to attach, as a decimal string.
    #[serde(default)]
    pub value: String,
    /// Gas estimate.
    #[serde(default)]
    pub gas: u64,
    /// Gas price, as a decimal string.
    #[serde(default)]
    pub gas_price: String,
    /// Output the aggregator expects, as a decimal string.
    pub to_amount: String,
}

impl AggregatorQuote {
    /// Builds a quote for `call_data` sent to `to`.
    #[must_use]
    pub fn new(to: Address, call_data: &[u8], to_amount: Amount) -> Self {
        Self {
            to,
            data: format!("0x{}", hex::encode(call_data)),
            value: "0".to_owned(),
            gas: 0,
            gas_price: "0".to_owned(),
            to_amount: to_amount.to_string(),
        }
    }

    /// Decodes the hex payload.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if `data` is not hex.
    pub fn call_data(&self) -> Result<Vec<u8>> {
        let digits = self.data.strip_prefix("0x").unwrap_or(&self.data);
        hex::decode(digits)
            .map_err(|_| EngineError::InvalidConfiguration("quote data is not valid hex"))
    }

    /// The aggregator's self-reported output.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if `toAmount` is not a
    /// decimal integer.
    pub fn quoted_amount(&self) -> Result<Amount> {
        self.to_amount
            .parse::<u128>()
            .map(Amount::new)
            .map_err(|_| EngineError::InvalidConfiguration("quote toAmount is not an integer"))
    }
}
