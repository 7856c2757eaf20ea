pub mod bookings;
pub mod range;
pub mod report;

pub use bookings::{compute, BookingStatistics, Totals, DAILY_OPERATING_MINUTES};
pub use range::DateRange;
pub use report::MetricsReport;
