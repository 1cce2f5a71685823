//! Course records sold on the marketplace.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Address, Amount};

/// Sequential course identifier. The first course created is `1`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CourseId(u64);

impl CourseId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// The identifier following this one, `None` on overflow.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of an existing course. `Inactive` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    /// Listed and purchasable.
    Active,
    /// Delisted by its author; past purchasers keep access.
    Inactive,
}

/// A course listing.
///
/// A `Course` value only exists for identifiers that were created, so the
/// record's existence is the presence of the value itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    id: CourseId,
    author: Address,
    price: Amount,
    metadata_uri: String,
    status: CourseStatus,
}

impl Course {
    pub(crate) fn new(id: CourseId, author: Address, price: Amount, metadata_uri: String) -> Self {
        Self {
            id,
            author,
            price,
            metadata_uri,
            status: CourseStatus::Active,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> CourseId {
        self.id
    }

    /// Returns the author, who receives sale proceeds.
    #[must_use]
    pub const fn author(&self) -> Address {
        self.author
    }

    /// Returns the price in platform-token units.
    #[must_use]
    pub const fn price(&self) -> Amount {
        self.price
    }

    /// Returns the opaque metadata URI.
    #[must_use]
    pub fn metadata_uri(&self) -> &str {
        &self.metadata_uri
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> CourseStatus {
        self.status
    }

    /// Returns `true` while the course can be bought or edited.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, CourseStatus::Active)
    }

    pub(crate) fn reprice(&mut self, price: Amount, metadata_uri: String) {
        self.price = price;
        self.metadata_uri = metadata_uri;
    }

    pub(crate) fn deactivate(&mut self) {
        self.status = CourseStatus::Inactive;
    }
}
