use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::NaiveDate;
use eyre::Error;
use model::booking::BookingRecord;
use parking_lot::RwLock;

use crate::{
    booking::{date_key, BookingDoc},
    RecordStore,
};

/// In-process store keeping the same document shape as the database.
#[derive(Clone, Default)]
pub struct MemoryStore {
    docs: Arc<RwLock<Vec<BookingDoc>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a BookingRecord>,
    {
        let docs = records.into_iter().map(BookingDoc::from).collect();
        MemoryStore {
            docs: Arc::new(RwLock::new(docs)),
        }
    }

    /// Stores a raw document as is, without checking its labels.
    pub fn insert_doc(&self, doc: BookingDoc) {
        self.docs.write().push(doc);
    }

    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&self, record: &BookingRecord) -> Result<(), Error> {
        let mut docs = self.docs.write();
        if docs.iter().any(|doc| doc.id == record.id) {
            eyre::bail!("Duplicate booking id: {}", record.id);
        }
        docs.push(BookingDoc::from(record));
        Ok(())
    }

    async fn get(&self, id: ObjectId) -> Result<Option<BookingRecord>, Error> {
        let doc = self.docs.read().iter().find(|doc| doc.id == id).cloned();
        Ok(doc.map(BookingRecord::try_from).transpose()?)
    }

    async fn update(&self, record: &BookingRecord) -> Result<bool, Error> {
        let mut docs = self.docs.write();
        match docs.iter_mut().find(|doc| doc.id == record.id) {
            Some(doc) => {
                *doc = BookingDoc::from(record);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: ObjectId) -> Result<bool, Error> {
        let mut docs = self.docs.write();
        let len = docs.len();
        docs.retain(|doc| doc.id != id);
        Ok(docs.len() != len)
    }

    async fn range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<BookingRecord>, Error> {
        let (from, to) = (date_key(from), date_key(to));
        let mut docs = self
            .docs
            .read()
            .iter()
            .filter(|doc| doc.booking_date >= from && doc.booking_date <= to)
            .cloned()
            .collect::<Vec<_>>();
        docs.sort_by(|a, b| a.booking_date.cmp(&b.booking_date));
        docs.into_iter()
            .map(|doc| BookingRecord::try_from(doc).map_err(Error::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveTime, TimeZone as _, Utc};
    use model::{
        booking::{BookingStatus, PaymentMethod, Service},
        decimal::Decimal,
        errors::LedgerError,
        rooms::Space,
    };

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking(booking_date: NaiveDate) -> BookingRecord {
        BookingRecord {
            id: ObjectId::new(),
            customer_name: "Kevin Ng".to_owned(),
            customer_phone: "+852 9678 9012".to_owned(),
            service: Service::Hyrox,
            space: Space::Palace2,
            booking_date,
            time_from: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            time_to: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            duration_minutes: 90,
            status: BookingStatus::Upcoming,
            payment_method: PaymentMethod::CreditCard,
            revenue: Decimal::int(900),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_range_is_inclusive() {
        let records = vec![
            booking(date(2024, 1, 1)),
            booking(date(2024, 1, 5)),
            booking(date(2024, 1, 10)),
            booking(date(2024, 1, 11)),
        ];
        let store = MemoryStore::with_records(&records);

        let found = store.range(date(2024, 1, 5), date(2024, 1, 10)).await.unwrap();
        assert_eq!(found, records[1..3].to_vec());
    }

    #[tokio::test]
    async fn test_document_round_trip() {
        let store = MemoryStore::new();
        let record = booking(date(2024, 2, 29));
        store.insert(&record).await.unwrap();
        assert!(store.insert(&record).await.is_err());

        let loaded = store.get(record.id).await.unwrap().unwrap();
        assert_eq!(loaded, record);
        assert!(store.get(ObjectId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let store = MemoryStore::new();
        let mut record = booking(date(2024, 1, 1));
        store.insert(&record).await.unwrap();

        record.cancel();
        assert!(store.update(&record).await.unwrap());
        let loaded = store.get(record.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, BookingStatus::Cancelled);
        assert!(loaded.revenue.is_zero());

        assert!(store.remove(record.id).await.unwrap());
        assert!(!store.remove(record.id).await.unwrap());
        assert!(!store.update(&record).await.unwrap());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_label_is_reported() {
        let store = MemoryStore::new();
        let mut doc = BookingDoc::from(&booking(date(2024, 1, 1)));
        doc.space = "Palace 3".to_owned();
        store.insert_doc(doc);

        let err = store
            .range(date(2024, 1, 1), date(2024, 1, 1))
            .await
            .unwrap_err();
        match err.downcast_ref::<LedgerError>() {
            Some(LedgerError::UnknownValue { field, value }) => {
                assert_eq!(*field, "space");
                assert_eq!(value, "Palace 3");
            }
            _ => panic!("unexpected error: {err}"),
        }
    }
}
