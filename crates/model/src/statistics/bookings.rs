use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use strum::IntoEnumIterator as _;

use crate::{
    booking::{BookingRecord, Service},
    decimal::Decimal,
    rooms::Space,
};

use super::{
    range::{DateRange, DATE_FORMAT},
    report::{DailyRevenue, MetricsReport, ModalityPerformance, RangeInfo, SpaceUtilization, Summary},
};

/// Operating window of 07:00 - 21:00.
pub const DAILY_OPERATING_MINUTES: u32 = 840;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Totals {
    pub bookings: u32,
    pub minutes: u64,
    pub revenue: Decimal,
}

impl Totals {
    pub fn add(&mut self, record: &BookingRecord) {
        self.bookings += 1;
        self.minutes += u64::from(record.duration_minutes);
        self.revenue += record.revenue;
    }

    pub fn hours(&self) -> f64 {
        round1(self.minutes as f64 / 60.0)
    }
}

/// Single pass accumulator over the bookings of one range.
#[derive(Debug)]
pub struct BookingStatistics {
    range: DateRange,
    by_space: HashMap<Space, Totals>,
    by_service: HashMap<Service, Totals>,
    by_date: HashMap<NaiveDate, Totals>,
    total: Totals,
}

impl BookingStatistics {
    pub fn new(range: DateRange) -> Self {
        BookingStatistics {
            range,
            by_space: HashMap::new(),
            by_service: HashMap::new(),
            by_date: HashMap::new(),
            total: Totals::default(),
        }
    }

    /// Cancelled and out of range bookings are skipped.
    pub fn extend(&mut self, record: &BookingRecord) {
        if record.is_cancelled() || !self.range.contains(record.booking_date) {
            return;
        }
        self.by_space.entry(record.space).or_default().add(record);
        self.by_service.entry(record.service).or_default().add(record);
        self.by_date
            .entry(record.booking_date)
            .or_default()
            .add(record);
        self.total.add(record);
    }

    pub fn report(&self, operating_minutes: u32) -> MetricsReport {
        let days = self.range.days();

        MetricsReport {
            summary: self.summary(days),
            space_utilization: self.space_utilization(days, operating_minutes),
            daily_revenue: self.daily_revenue(),
            modality_performance: self.modality_performance(),
            date_range: RangeInfo {
                start: self.range.start().format(DATE_FORMAT).to_string(),
                end: self.range.end().format(DATE_FORMAT).to_string(),
                days,
            },
        }
    }

    fn summary(&self, days: i64) -> Summary {
        let (avg_daily_revenue, avg_daily_bookings) = if days > 0 {
            (
                round2(self.total.revenue.to_f64() / days as f64),
                round1(f64::from(self.total.bookings) / days as f64),
            )
        } else {
            (0.0, 0.0)
        };

        Summary {
            total_bookings: self.total.bookings,
            total_revenue: self.total.revenue.to_f64(),
            total_hours: self.total.hours(),
            avg_daily_revenue,
            avg_daily_bookings,
        }
    }

    fn space_utilization(
        &self,
        days: i64,
        operating_minutes: u32,
    ) -> BTreeMap<Space, SpaceUtilization> {
        let capacity_minutes = u64::from(operating_minutes) * days.max(0) as u64;
        Space::iter()
            .map(|space| {
                let totals = self.by_space.get(&space).copied().unwrap_or_default();
                let utilization = SpaceUtilization {
                    utilization: round1(percent(totals.minutes as f64, capacity_minutes as f64)),
                    booked_hours: totals.hours(),
                    total_bookings: totals.bookings,
                    revenue: totals.revenue.to_f64(),
                };
                (space, utilization)
            })
            .collect()
    }

    fn daily_revenue(&self) -> Vec<DailyRevenue> {
        self.range
            .dates()
            .map(|date| {
                let totals = self.by_date.get(&date).copied().unwrap_or_default();
                DailyRevenue {
                    date: date.format(DATE_FORMAT).to_string(),
                    day: date.format("%a").to_string(),
                    revenue: totals.revenue.to_f64(),
                    bookings: totals.bookings,
                }
            })
            .collect()
    }

    fn modality_performance(&self) -> BTreeMap<Service, ModalityPerformance> {
        let total_minutes = self.total.minutes as f64;
        let total_revenue = self.total.revenue.inner() as f64;
        Service::iter()
            .map(|service| {
                let totals = self.by_service.get(&service).copied().unwrap_or_default();
                let performance = ModalityPerformance {
                    bookings: totals.bookings,
                    hours: totals.hours(),
                    revenue: totals.revenue.to_f64(),
                    utilization: round1(percent(totals.minutes as f64, total_minutes)),
                    revenue_share: round1(percent(
                        totals.revenue.inner() as f64,
                        total_revenue,
                    )),
                };
                (service, performance)
            })
            .collect()
    }
}

/// Aggregates `records` over `range`.
///
/// `operating_minutes` is the bookable time of one space per day.
pub fn compute<'a, I>(records: I, range: DateRange, operating_minutes: u32) -> MetricsReport
where
    I: IntoIterator<Item = &'a BookingRecord>,
{
    let mut stat = BookingStatistics::new(range);
    for record in records {
        stat.extend(record);
    }
    stat.report(operating_minutes)
}

fn percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

// Half away from zero.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
