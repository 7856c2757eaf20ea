use bson::doc;
use eyre::{Context as _, Error};
use log::info;
use mongodb::{Client, Collection, Database};

use crate::booking::BookingDoc;

const BOOKINGS_COLLECTION: &str = "bookings";

#[derive(Clone)]
pub struct Db {
    _client: Client,
    db: Database,
}

impl Db {
    pub(crate) async fn connect(uri: &str, db_name: &str) -> Result<Self, Error> {
        let client = Client::with_uri_str(uri)
            .await
            .with_context(|| format!("Failed to connect to {}", db_name))?;
        let db = client.database(db_name);
        db.run_command(doc! { "ping": 1 })
            .await
            .context("Database did not answer ping")?;
        info!("Connected to {}", db_name);
        Ok(Db {
            _client: client,
            db,
        })
    }

    pub(crate) fn bookings(&self) -> Collection<BookingDoc> {
        self.db.collection(BOOKINGS_COLLECTION)
    }
}
