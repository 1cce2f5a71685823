//! Off-chain marketplace index rebuilt from events.
//!
//! [`MarketIndex`] consumes the engine's event stream, either live from an
//! [`EventLog`](crate::events::EventLog) or as exported JSON, and answers
//! the same marketplace queries as the engine's point reads without access
//! to engine state.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Address, Amount, CourseId};
use crate::error::{EngineError, Result};
use crate::events::Event;

/// A course as seen through its events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedCourse {
    /// Author.
    pub author: Address,
    /// Latest price.
    pub price: Amount,
    /// Latest metadata URI.
    pub metadata_uri: String,
    /// `false` once a deactivation was seen.
    pub active: bool,
}

/// Marketplace state derived from events alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketIndex {
    courses: BTreeMap<CourseId, IndexedCourse>,
    purchases: BTreeSet<(CourseId, Address)>,
    sold: BTreeMap<CourseId, u64>,
    revenue: BTreeMap<Address, Amount>,
    fees: Amount,
    indexed: usize,
}

impl MarketIndex {
    /// An empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index by replaying `events` in order.
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a Event>) -> Self {
        let mut index = Self::new();
        for event in events {
            index.apply(event);
        }
        index
    }

    /// Builds an index from a JSON array of events.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if the JSON is not an
    /// event array.
    pub fn from_json(json: &str) -> Result<Self> {
        let events: Vec<Event> = serde_json::from_str(json).map_err(|e| {
            warn!(error = %e, "event export rejected");
            EngineError::InvalidConfiguration("malformed event JSON")
        })?;
        Ok(Self::from_events(&events))
    }

    /// Folds one event into the index. Events unrelated to the
    /// marketplace are counted and otherwise ignored.
    pub fn apply(&mut self, event: &Event) {
        self.indexed += 1;
        match event {
            Event::CourseCreated {
                id,
                author,
                price,
                metadata_uri,
            } => {
                self.courses.insert(
                    *id,
                    IndexedCourse {
                        author: *author,
                        price: *price,
                        metadata_uri: metadata_uri.clone(),
                        active: true,
                    },
                );
            }
            Event::CourseUpdated {
                id,
                price,
                metadata_uri,
            } => {
                if let Some(course) = self.courses.get_mut(id) {
                    course.price = *price;
                    course.metadata_uri.clone_from(metadata_uri);
                }
            }
            Event::CourseDeactivated { id } => {
                if let Some(course) = self.courses.get_mut(id) {
                    course.active = false;
                }
            }
            Event::Purchased {
                id,
                buyer,
                author,
                price,
                fee,
            } => {
                self.purchases.insert((*id, *buyer));
                let sold = self.sold.entry(*id).or_insert(0);
                *sold = sold.saturating_add(1);
                let proceeds = price.checked_sub(fee).unwrap_or(Amount::ZERO);
                let earned = self.revenue.entry(*author).or_default();
                *earned = earned.checked_add(&proceeds).unwrap_or(Amount::MAX);
                self.fees = self.fees.checked_add(fee).unwrap_or(Amount::MAX);
            }
            _ => {}
        }
    }

    /// Number of events applied.
    #[must_use]
    pub const fn event_count(&self) -> usize {
        self.indexed
    }

    /// The indexed course, if its creation was seen.
    #[must_use]
    pub fn course(&self, id: CourseId) -> Option<&IndexedCourse> {
        self.courses.get(&id)
    }

    /// Whether a purchase of `id` by `account` was seen.
    #[must_use]
    pub fn has_access(&self, id: CourseId, account: Address) -> bool {
        self.purchases.contains(&(id, account))
    }

    /// Purchases of `id` seen.
    #[must_use]
    pub fn sold_count(&self, id: CourseId) -> u64 {
        self.sold.get(&id).copied().unwrap_or(0)
    }

    /// Total author share paid to `author`.
    #[must_use]
    pub fn author_revenue(&self, author: Address) -> Amount {
        self.revenue.get(&author).copied().unwrap_or(Amount::ZERO)
    }

    /// Total fee share collected.
    #[must_use]
    pub const fn fees_collected(&self) -> Amount {
        self.fees
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const AUTHOR: Address = Address::from_low_u64(4);
    const BUYER: Address = Address::from_low_u64(5);
    const OTHER: Address = Address::from_low_u64(6);

    fn history() -> Vec<Event> {
        let id = CourseId::new(1);
        vec![
            Event::CourseCreated {
                id,
                author: AUTHOR,
                price: Amount::new(100),
                metadata_uri: "ipfs://a".to_owned(),
            },
            Event::Purchased {
                id,
                buyer: BUYER,
                author: AUTHOR,
                price: Amount::new(100),
                fee: Amount::new(5),
            },
            Event::CourseUpdated {
                id,
                price: Amount::new(200),
                metadata_uri: "ipfs://b".to_owned(),
            },
            Event::Purchased {
                id,
                buyer: OTHER,
                author: AUTHOR,
                price: Amount::new(200),
                fee: Amount::new(10),
            },
            Event::CourseDeactivated { id },
            Event::Wrapped {
                account: BUYER,
                amount: Amount::new(1),
            },
        ]
    }

    #[test]
    fn replay_tracks_sales_and_lifecycle() {
        let index = MarketIndex::from_events(&history());
        let id = CourseId::new(1);
        assert_eq!(index.event_count(), 6);
        assert_eq!(index.sold_count(id), 2);
        assert!(index.has_access(id, BUYER));
        assert!(index.has_access(id, OTHER));
        assert!(!index.has_access(id, AUTHOR));
        assert_eq!(index.author_revenue(AUTHOR), Amount::new(285));
        assert_eq!(index.fees_collected(), Amount::new(15));
        let Some(course) = index.course(id) else {
            panic!("course indexed");
        };
        assert!(!course.active);
        assert_eq!(course.price, Amount::new(200));
        assert_eq!(course.metadata_uri, "ipfs://b");
    }

    #[test]
    fn json_export_replays_identically() {
        let events = history();
        let Ok(json) = serde_json::to_string(&events) else {
            panic!("serialize");
        };
        let Ok(index) = MarketIndex::from_json(&json) else {
            panic!("parse");
        };
        assert_eq!(index, MarketIndex::from_events(&events));
    }

    #[test]
    fn malformed_export_rejected() {
        assert!(matches!(
            MarketIndex::from_json("{\"not\": \"events\"}"),
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn unknown_course_updates_ignored() {
        let index = MarketIndex::from_events(&[Event::CourseDeactivated {
            id: CourseId::new(3),
        }]);
        assert!(index.course(CourseId::new(3)).is_none());
    }
}
