//! Course marketplace.
//!
//! Authors list courses priced in the platform token; buyers pay through
//! an allowance granted to the marketplace. Each sale is split with
//! [`settlement::split`] and both legs are pulled from the buyer inside the
//! same transaction, so either both parties are paid and access is granted,
//! or nothing happens.
//!
//! ```text
//! (none) --create--> Active --deactivate--> Inactive
//!                     |  ^
//!                     +--+ update
//! ```

pub mod settlement;

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::config::MarketConfig;
use crate::domain::{Address, Amount, BasisPoints, Course, CourseId};
use crate::error::{EngineError, Result};
use crate::events::{Event, EventLog};
use crate::ledger::Ledgers;
use crate::traits::FromConfig;

pub use settlement::{split, Split};

/// The course marketplace contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseMarket {
    address: Address,
    owner: Address,
    payment_token: Address,
    fee_recipient: Address,
    fee_bps: BasisPoints,
    last_id: CourseId,
    courses: BTreeMap<CourseId, Course>,
    purchases: BTreeSet<(CourseId, Address)>,
    sold: BTreeMap<CourseId, u64>,
}

impl FromConfig<MarketConfig> for CourseMarket {
    fn from_config(config: &MarketConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            address: config.address(),
            owner: config.owner(),
            payment_token: config.payment_token(),
            fee_recipient: config.fee_recipient(),
            fee_bps: config.fee_bps(),
            last_id: CourseId::default(),
            courses: BTreeMap::new(),
            purchases: BTreeSet::new(),
            sold: BTreeMap::new(),
        })
    }
}

impl CourseMarket {
    /// Marketplace account, the spender buyers approve.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Account allowed to change fee parameters.
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Token prices are paid in.
    #[must_use]
    pub const fn payment_token(&self) -> Address {
        self.payment_token
    }

    /// Account receiving the fee share.
    #[must_use]
    pub const fn fee_recipient(&self) -> Address {
        self.fee_recipient
    }

    /// Fee share of every sale.
    #[must_use]
    pub const fn fee_bps(&self) -> BasisPoints {
        self.fee_bps
    }

    /// Most recently assigned identifier; `CourseId(0)` before the first
    /// listing.
    #[must_use]
    pub const fn last_course_id(&self) -> CourseId {
        self.last_id
    }

    /// Lists a course authored by `caller` and returns its identifier.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ZeroAmount`] if `price` is zero.
    /// - [`EngineError::Overflow`] if identifiers are exhausted.
    pub fn create_course(
        &mut self,
        events: &mut EventLog,
        caller: Address,
        price: Amount,
        metadata_uri: impl Into<String>,
    ) -> Result<CourseId> {
        if price.is_zero() {
            return Err(EngineError::ZeroAmount);
        }
        let id = self
            .last_id
            .next()
            .ok_or(EngineError::Overflow("course id space exhausted"))?;
        let metadata_uri = metadata_uri.into();
        self.courses
            .insert(id, Course::new(id, caller, price, metadata_uri.clone()));
        self.last_id = id;

        info!(%id, author = %caller, %price, "course created");
        events.push(Event::CourseCreated {
            id,
            author: caller,
            price,
            metadata_uri,
        });
        Ok(id)
    }

    /// Changes price and metadata of an active course. Past purchases are
    /// unaffected.
    ///
    /// # Errors
    ///
    /// - [`EngineError::CourseNotFound`], [`EngineError::Unauthorized`],
    ///   [`EngineError::CourseNotActive`] as for
    ///   [`deactivate_course`](Self::deactivate_course).
    /// - [`EngineError::ZeroAmount`] if `price` is zero.
    pub fn update_course(
        &mut self,
        events: &mut EventLog,
        caller: Address,
        id: CourseId,
        price: Amount,
        metadata_uri: impl Into<String>,
    ) -> Result<()> {
        let course = self.authored_active_mut(caller, id)?;
        if price.is_zero() {
            return Err(EngineError::ZeroAmount);
        }
        let metadata_uri = metadata_uri.into();
        course.reprice(price, metadata_uri.clone());

        debug!(%id, %price, "course updated");
        events.push(Event::CourseUpdated {
            id,
            price,
            metadata_uri,
        });
        Ok(())
    }

    /// Delists a course permanently. Purchasers keep access.
    ///
    /// # Errors
    ///
    /// In order:
    /// - [`EngineError::CourseNotFound`] if `id` was never created.
    /// - [`EngineError::Unauthorized`] unless `caller` is the author.
    /// - [`EngineError::CourseNotActive`] if already delisted.
    pub fn deactivate_course(
        &mut self,
        events: &mut EventLog,
        caller: Address,
        id: CourseId,
    ) -> Result<()> {
        self.authored_active_mut(caller, id)?.deactivate();
        debug!(%id, "course deactivated");
        events.push(Event::CourseDeactivated { id });
        Ok(())
    }

    /// Sells course `id` to `buyer`, pulling the fee share to the fee
    /// recipient and the rest to the author from the buyer's allowance.
    ///
    /// # Errors
    ///
    /// In order:
    /// - [`EngineError::CourseNotActive`] if the course is missing or
    ///   delisted.
    /// - [`EngineError::AlreadyPurchased`] if `buyer` owns it.
    /// - [`EngineError::InsufficientAllowance`] or
    ///   [`EngineError::InsufficientBalance`] from either payment leg.
    pub fn buy(
        &mut self,
        ledgers: &mut Ledgers,
        events: &mut EventLog,
        buyer: Address,
        id: CourseId,
    ) -> Result<()> {
        let course = self
            .courses
            .get(&id)
            .filter(|c| c.is_active())
            .ok_or(EngineError::CourseNotActive)?;
        if self.purchases.contains(&(id, buyer)) {
            return Err(EngineError::AlreadyPurchased);
        }
        let author = course.author();
        let price = course.price();
        let Split {
            author: author_share,
            fee,
        } = split(price, self.fee_bps)?;

        for (to, amount) in [(self.fee_recipient, fee), (author, author_share)] {
            if !amount.is_zero() {
                ledgers.transfer_from(
                    events,
                    self.payment_token,
                    self.address,
                    buyer,
                    to,
                    amount,
                )?;
            }
        }

        self.purchases.insert((id, buyer));
        let sold = self.sold.entry(id).or_insert(0);
        *sold = sold.saturating_add(1);

        debug!(%id, %buyer, %author, %price, %fee, "course purchased");
        events.push(Event::Purchased {
            id,
            buyer,
            author,
            price,
            fee,
        });
        Ok(())
    }

    /// Whether `account` has bought course `id`.
    #[must_use]
    pub fn has_access(&self, id: CourseId, account: Address) -> bool {
        self.purchases.contains(&(id, account))
    }

    /// The course record, if created.
    #[must_use]
    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.get(&id)
    }

    /// Number of sales of course `id`.
    #[must_use]
    pub fn sold_count(&self, id: CourseId) -> u64 {
        self.sold.get(&id).copied().unwrap_or(0)
    }

    /// Courses listed by `author`, in identifier order.
    pub fn courses_by(&self, author: Address) -> impl Iterator<Item = &Course> {
        self.courses.values().filter(move |c| c.author() == author)
    }

    /// Changes the fee share of future sales.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Unauthorized`] unless `caller` is the owner.
    /// - [`EngineError::InvalidFee`] above 100%.
    pub fn set_fee_bps(
        &mut self,
        events: &mut EventLog,
        caller: Address,
        fee_bps: BasisPoints,
    ) -> Result<()> {
        if caller != self.owner {
            return Err(EngineError::Unauthorized);
        }
        self.fee_bps = BasisPoints::validated(fee_bps.get())?;
        self.push_fee_config(events);
        Ok(())
    }

    /// Redirects the fee share of future sales.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Unauthorized`] unless `caller` is the owner.
    /// - [`EngineError::InvalidConfiguration`] for the native key.
    pub fn set_fee_recipient(
        &mut self,
        events: &mut EventLog,
        caller: Address,
        recipient: Address,
    ) -> Result<()> {
        if caller != self.owner {
            return Err(EngineError::Unauthorized);
        }
        if recipient.is_native() {
            return Err(EngineError::InvalidConfiguration(
                "fee recipient must not be the native key",
            ));
        }
        self.fee_recipient = recipient;
        self.push_fee_config(events);
        Ok(())
    }

    fn push_fee_config(&self, events: &mut EventLog) {
        info!(fee_bps = %self.fee_bps, fee_recipient = %self.fee_recipient, "fee config updated");
        events.push(Event::FeeConfigUpdated {
            fee_bps: self.fee_bps,
            fee_recipient: self.fee_recipient,
        });
    }

    fn authored_active_mut(&mut self, caller: Address, id: CourseId) -> Result<&mut Course> {
        let course = self.courses.get_mut(&id).ok_or(EngineError::CourseNotFound)?;
        if course.author() != caller {
            return Err(EngineError::Unauthorized);
        }
        if !course.is_active() {
            return Err(EngineError::CourseNotActive);
        }
        Ok(course)
    }
}
