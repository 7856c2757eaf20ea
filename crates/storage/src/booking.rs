use std::sync::Arc;

use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::Error;
use futures_util::TryStreamExt as _;
use log::debug;
use model::{
    booking::{parse_label, BookingRecord},
    decimal::Decimal,
    errors::LedgerError,
    statistics::range::DATE_FORMAT,
};
use mongodb::{Collection, IndexModel};
use serde::{Deserialize, Serialize};

use crate::{db::Db, RecordStore};

const TIME_FORMAT: &str = "%H:%M:%S";

/// Stored shape of a booking. Closed-set fields stay as labels so that an
/// unexpected value is reported on read instead of failing the whole query.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BookingDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub customer_name: String,
    pub customer_phone: String,
    pub service: String,
    pub space: String,
    pub booking_date: String,
    pub time_from: String,
    pub time_to: String,
    pub duration_minutes: u32,
    pub status: String,
    pub payment_method: String,
    pub revenue: Decimal,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl From<&BookingRecord> for BookingDoc {
    fn from(record: &BookingRecord) -> Self {
        BookingDoc {
            id: record.id,
            customer_name: record.customer_name.clone(),
            customer_phone: record.customer_phone.clone(),
            service: record.service.to_string(),
            space: record.space.to_string(),
            booking_date: record.booking_date.format(DATE_FORMAT).to_string(),
            time_from: record.time_from.format(TIME_FORMAT).to_string(),
            time_to: record.time_to.format(TIME_FORMAT).to_string(),
            duration_minutes: record.duration_minutes,
            status: record.status.to_string(),
            payment_method: record.payment_method.to_string(),
            revenue: record.revenue,
            created_at: record.created_at,
        }
    }
}

impl TryFrom<BookingDoc> for BookingRecord {
    type Error = LedgerError;

    fn try_from(doc: BookingDoc) -> Result<Self, Self::Error> {
        Ok(BookingRecord {
            id: doc.id,
            service: parse_label("service", &doc.service)?,
            space: parse_label("space", &doc.space)?,
            booking_date: parse_date(&doc.booking_date)?,
            time_from: parse_time("time_from", &doc.time_from)?,
            time_to: parse_time("time_to", &doc.time_to)?,
            duration_minutes: doc.duration_minutes,
            status: parse_label("status", &doc.status)?,
            payment_method: parse_label("payment_method", &doc.payment_method)?,
            revenue: doc.revenue,
            created_at: doc.created_at,
            customer_name: doc.customer_name,
            customer_phone: doc.customer_phone,
        })
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| LedgerError::UnknownValue {
        field: "booking_date",
        value: value.to_owned(),
    })
}

fn parse_time(field: &'static str, value: &str) -> Result<NaiveTime, LedgerError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| LedgerError::UnknownValue {
        field,
        value: value.to_owned(),
    })
}

pub(crate) fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[derive(Clone)]
pub struct BookingStore {
    store: Arc<Collection<BookingDoc>>,
}

impl BookingStore {
    pub async fn new(db: &Db) -> Result<Self, Error> {
        let store = db.bookings();
        let index = IndexModel::builder()
            .keys(doc! { "booking_date": 1 })
            .build();
        store.create_index(index).await?;
        Ok(BookingStore {
            store: Arc::new(store),
        })
    }
}

#[async_trait]
impl RecordStore for BookingStore {
    async fn insert(&self, record: &BookingRecord) -> Result<(), Error> {
        self.store.insert_one(BookingDoc::from(record)).await?;
        Ok(())
    }

    async fn get(&self, id: ObjectId) -> Result<Option<BookingRecord>, Error> {
        let doc = self.store.find_one(doc! { "_id": id }).await?;
        Ok(doc.map(BookingRecord::try_from).transpose()?)
    }

    async fn update(&self, record: &BookingRecord) -> Result<bool, Error> {
        let result = self
            .store
            .replace_one(doc! { "_id": record.id }, BookingDoc::from(record))
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn remove(&self, id: ObjectId) -> Result<bool, Error> {
        let result = self.store.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<BookingRecord>, Error> {
        let mut cursor = self
            .store
            .find(doc! {
                "booking_date": {
                    "$gte": date_key(from),
                    "$lte": date_key(to),
                }
            })
            .sort(doc! { "booking_date": 1 })
            .await?;
        let mut bookings = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            bookings.push(BookingRecord::try_from(doc)?);
        }
        debug!("Loaded {} bookings for {}..={}", bookings.len(), from, to);
        Ok(bookings)
    }
}
