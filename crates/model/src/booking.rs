use std::str::FromStr;

use bson::oid::ObjectId;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{decimal::Decimal, errors::LedgerError, rooms::Space};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
    Display,
)]
pub enum Service {
    Strength,
    Pilates,
    Yoga,
    Physiotherapy,
    Hyrox,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
    Display,
)]
pub enum BookingStatus {
    #[default]
    Upcoming,
    Active,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, BookingStatus::Cancelled)
    }

    pub fn can_be_cancelled(&self) -> bool {
        matches!(self, BookingStatus::Upcoming | BookingStatus::Active)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
    Display,
)]
pub enum PaymentMethod {
    #[serde(rename = "Credit Card")]
    #[strum(serialize = "Credit Card")]
    CreditCard,
    Package,
}

/// A reserved session in one of the spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRecord {
    pub id: ObjectId,
    pub customer_name: String,
    pub customer_phone: String,
    pub service: Service,
    pub space: Space,
    pub booking_date: NaiveDate,
    pub time_from: NaiveTime,
    pub time_to: NaiveTime,
    pub duration_minutes: u32,
    pub status: BookingStatus,
    pub payment_method: PaymentMethod,
    pub revenue: Decimal,
    pub created_at: DateTime<Utc>,
}

impl BookingRecord {
    pub fn is_cancelled(&self) -> bool {
        self.status.is_cancelled()
    }

    pub fn cancel(&mut self) {
        self.status = BookingStatus::Cancelled;
        self.revenue = Decimal::zero();
    }
}

/// Parses a closed-set label, reporting unknown values as integrity errors.
pub fn parse_label<T: FromStr>(field: &'static str, value: &str) -> Result<T, LedgerError> {
    T::from_str(value).map_err(|_| LedgerError::UnknownValue {
        field,
        value: value.to_owned(),
    })
}
