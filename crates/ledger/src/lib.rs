use std::sync::Arc;

use service::{bookings::Bookings, dashboard::Dashboard};
use storage::{RecordStore, Storage};

pub mod service;

#[derive(Clone)]
pub struct Ledger {
    pub bookings: Bookings,
    pub dashboard: Dashboard,
}

impl Ledger {
    pub fn new(storage: Storage, operating_minutes: u32) -> Self {
        Ledger::with_store(Arc::new(storage.bookings), operating_minutes)
    }

    pub fn with_store(store: Arc<dyn RecordStore>, operating_minutes: u32) -> Self {
        Ledger {
            bookings: Bookings::new(store.clone()),
            dashboard: Dashboard::new(store, operating_minutes),
        }
    }
}
