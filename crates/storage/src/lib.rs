pub mod booking;
pub mod db;
pub mod memory;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::NaiveDate;
use eyre::Result;
use model::booking::BookingRecord;

use booking::BookingStore;
use db::Db;

const DB_NAME: &str = "palace_db";

/// Source of booking records for the dashboard and the booking service.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert(&self, record: &BookingRecord) -> Result<()>;

    async fn get(&self, id: ObjectId) -> Result<Option<BookingRecord>>;

    /// Replaces the stored booking with the same id. Returns `false` if absent.
    async fn update(&self, record: &BookingRecord) -> Result<bool>;

    async fn remove(&self, id: ObjectId) -> Result<bool>;

    /// All bookings dated within `from..=to`, cancelled ones included.
    async fn range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<BookingRecord>>;
}

#[derive(Clone)]
pub struct Storage {
    pub bookings: BookingStore,
}

impl Storage {
    pub async fn new(uri: &str) -> Result<Self> {
        let db = Db::connect(uri, DB_NAME).await?;
        let bookings = BookingStore::new(&db).await?;
        Ok(Storage { bookings })
    }
}
