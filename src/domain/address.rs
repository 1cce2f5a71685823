//! Identity of an account or contract.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, Result};

/// A 32-byte identity shared by user accounts, token contracts, pools and
/// collaborators.
///
/// Shorter hex strings (such as 20-byte EVM addresses) are left-padded with
/// zeros on parsing. The all-zero value is reserved as [`Address::NATIVE`],
/// the key under which the chain's native currency is tracked, and is never
/// a valid account.
///
/// Serialized as a `0x`-prefixed lowercase hex string.
///
/// # Examples
///
/// ```
/// use lens_engine::domain::Address;
///
/// let a: Address = "0x01".parse().expect("valid hex");
/// assert_eq!(a, Address::from_low_u64(1));
/// assert!(!a.is_native());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 32]);

impl Address {
    /// Reserved key of the native currency ledger.
    pub const NATIVE: Self = Self([0u8; 32]);

    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates an address whose low eight bytes hold `n` big-endian.
    #[must_use]
    pub const fn from_low_u64(n: u64) -> Self {
        let mut bytes = [0u8; 32];
        let be = n.to_be_bytes();
        let mut i = 0;
        while i < 8 {
            bytes[24 + i] = be[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` for the reserved native-currency key.
    #[must_use]
    pub const fn is_native(&self) -> bool {
        let mut i = 0;
        while i < 32 {
            if self.0[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Parses a hex string, with or without `0x`, of at most 32 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if the string is not
    /// valid hex or encodes more than 32 bytes.
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let padded;
        let digits = if digits.len() % 2 == 1 {
            padded = format!("0{digits}");
            padded.as_str()
        } else {
            digits
        };
        let raw = hex::decode(digits)
            .map_err(|_| EngineError::InvalidConfiguration("address is not valid hex"))?;
        if raw.len() > 32 {
            return Err(EngineError::InvalidConfiguration(
                "address longer than 32 bytes",
            ));
        }
        let mut bytes = [0u8; 32];
        bytes[32 - raw.len()..].copy_from_slice(&raw);
        Ok(Self(bytes))
    }

    /// Lowercase hex with a `0x` prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
