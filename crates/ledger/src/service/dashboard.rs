use std::sync::Arc;

use chrono::NaiveDate;
use eyre::{Context as _, Error};
use log::{debug, info};
use model::statistics::{compute, DateRange, MetricsReport};
use storage::RecordStore;

/// Computes dashboard metrics from the bookings of a record store.
#[derive(Clone)]
pub struct Dashboard {
    store: Arc<dyn RecordStore>,
    operating_minutes: u32,
}

impl Dashboard {
    pub fn new(store: Arc<dyn RecordStore>, operating_minutes: u32) -> Self {
        Dashboard {
            store,
            operating_minutes,
        }
    }

    pub async fn report(&self, range: DateRange) -> Result<MetricsReport, Error> {
        let records = self
            .store
            .range(range.start(), range.end())
            .await
            .with_context(|| {
                format!(
                    "Failed to load bookings for {}..={}",
                    range.start(),
                    range.end()
                )
            })?;
        debug!(
            "Aggregating {} bookings for {}..={}",
            records.len(),
            range.start(),
            range.end()
        );

        let report = compute(&records, range, self.operating_minutes);
        info!(
            "Dashboard {}..={}: {} bookings, revenue {:.2}, {:.1}h",
            report.date_range.start,
            report.date_range.end,
            report.summary.total_bookings,
            report.summary.total_revenue,
            report.summary.total_hours
        );
        Ok(report)
    }

    pub async fn report_for(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<MetricsReport, Error> {
        let range = DateRange::new(start, end)?;
        self.report(range).await
    }

    /// Resolves optional `YYYY-MM-DD` bounds against `today` and reports on them.
    pub async fn report_for_request(
        &self,
        today: NaiveDate,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<MetricsReport, Error> {
        let range = DateRange::resolve(today, start, end)?;
        self.report(range).await
    }
}

#[cfg(test)]
mod tests {
    use bson::oid::ObjectId;
    use chrono::{NaiveTime, TimeZone as _, Utc};
    use model::{
        booking::{BookingRecord, BookingStatus, PaymentMethod, Service},
        decimal::Decimal,
        errors::LedgerError,
        rooms::Space,
        statistics::DAILY_OPERATING_MINUTES,
    };
    use storage::{booking::BookingDoc, memory::MemoryStore};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking(
        service: Service,
        space: Space,
        booking_date: NaiveDate,
        status: BookingStatus,
        revenue: i64,
    ) -> BookingRecord {
        BookingRecord {
            id: ObjectId::new(),
            customer_name: "Sarah Lam".to_owned(),
            customer_phone: "+852 9345 6789".to_owned(),
            service,
            space,
            booking_date,
            time_from: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            time_to: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            duration_minutes: 60,
            status,
            payment_method: PaymentMethod::CreditCard,
            revenue: Decimal::int(revenue),
            created_at: Utc.with_ymd_and_hms(2023, 12, 28, 12, 0, 0).unwrap(),
        }
    }

    fn dashboard(records: &[BookingRecord]) -> (Dashboard, MemoryStore) {
        let store = MemoryStore::with_records(records);
        let dashboard = Dashboard::new(Arc::new(store.clone()), DAILY_OPERATING_MINUTES);
        (dashboard, store)
    }

    #[tokio::test]
    async fn test_report_over_store() {
        let (dashboard, _) = dashboard(&[
            booking(
                Service::Yoga,
                Space::Palace1,
                date(2024, 1, 1),
                BookingStatus::Completed,
                400,
            ),
            booking(
                Service::Strength,
                Space::Palace2,
                date(2024, 1, 2),
                BookingStatus::Cancelled,
                450,
            ),
            booking(
                Service::Hyrox,
                Space::Palace2,
                date(2024, 1, 9),
                BookingStatus::Upcoming,
                600,
            ),
        ]);

        let report = dashboard
            .report_for(date(2024, 1, 1), date(2024, 1, 3))
            .await
            .unwrap();
        assert_eq!(report.summary.total_bookings, 1);
        assert_eq!(report.summary.total_revenue, 400.0);
        assert_eq!(report.daily_revenue.len(), 3);
        assert_eq!(report.date_range.days, 3);
        assert_eq!(report.space_utilization[&Space::Palace1].utilization, 2.4);
    }

    #[tokio::test]
    async fn test_inverted_range_is_rejected() {
        let (dashboard, _) = dashboard(&[]);
        let err = dashboard
            .report_for(date(2024, 1, 3), date(2024, 1, 1))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LedgerError>(),
            Some(LedgerError::InvalidRange { .. })
        ));
    }

    #[tokio::test]
    async fn test_integrity_error_is_surfaced() {
        let (dashboard, store) = dashboard(&[]);
        let mut doc = BookingDoc::from(&booking(
            Service::Pilates,
            Space::Palace1,
            date(2024, 1, 1),
            BookingStatus::Completed,
            550,
        ));
        doc.service = "Zumba".to_owned();
        store.insert_doc(doc);

        let err = dashboard
            .report_for(date(2024, 1, 1), date(2024, 1, 1))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LedgerError>(),
            Some(LedgerError::UnknownValue { field: "service", .. })
        ));
    }

    #[tokio::test]
    async fn test_request_defaults_to_last_week() {
        let today = date(2024, 1, 10);
        let (dashboard, _) = dashboard(&[booking(
            Service::Physiotherapy,
            Space::Palace1,
            date(2024, 1, 4),
            BookingStatus::Completed,
            800,
        )]);

        let report = dashboard
            .report_for_request(today, None, Some("not-a-date"))
            .await
            .unwrap();
        assert_eq!(report.date_range.start, "2024-01-04");
        assert_eq!(report.date_range.end, "2024-01-10");
        assert_eq!(report.date_range.days, 7);
        assert_eq!(report.summary.total_revenue, 800.0);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["daily_revenue"][0]["revenue"], 800.0);
    }
}
