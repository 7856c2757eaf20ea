use std::sync::Arc;

use bson::oid::ObjectId;
use log::info;
use model::booking::{BookingRecord, BookingStatus};
use storage::RecordStore;
use thiserror::Error;

#[derive(Clone)]
pub struct Bookings {
    store: Arc<dyn RecordStore>,
}

impl Bookings {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Bookings { store }
    }

    pub async fn get(&self, id: ObjectId) -> Result<BookingRecord, BookingError> {
        self.store
            .get(id)
            .await?
            .ok_or(BookingError::NotFound(id))
    }

    pub async fn create(&self, record: BookingRecord) -> Result<BookingRecord, BookingError> {
        if record.duration_minutes == 0 {
            return Err(BookingError::EmptyDuration);
        }
        if record.revenue.is_negative() {
            return Err(BookingError::NegativeRevenue);
        }
        self.store.insert(&record).await?;
        info!(
            "Booking {} created: {} in {} on {}",
            record.id, record.service, record.space, record.booking_date
        );
        Ok(record)
    }

    /// Marks the booking cancelled and drops its revenue.
    pub async fn cancel(&self, id: ObjectId) -> Result<BookingRecord, BookingError> {
        let mut record = self.get(id).await?;
        if !record.status.can_be_cancelled() {
            return Err(BookingError::NotCancellable(record.status));
        }
        record.cancel();
        if !self.store.update(&record).await? {
            return Err(BookingError::NotFound(id));
        }
        info!("Booking {} cancelled", id);
        Ok(record)
    }
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Common error: {0}")]
    Eyre(#[from] eyre::Error),
    #[error("Booking not found: {0}")]
    NotFound(ObjectId),
    #[error("Booking can't be cancelled in status {0}")]
    NotCancellable(BookingStatus),
    #[error("Booking duration must be positive")]
    EmptyDuration,
    #[error("Booking revenue must not be negative")]
    NegativeRevenue,
}
