use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{booking::Service, rooms::Space};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MetricsReport {
    pub summary: Summary,
    pub space_utilization: BTreeMap<Space, SpaceUtilization>,
    pub daily_revenue: Vec<DailyRevenue>,
    pub modality_performance: BTreeMap<Service, ModalityPerformance>,
    pub date_range: RangeInfo,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Summary {
    pub total_bookings: u32,
    pub total_revenue: f64,
    pub total_hours: f64,
    pub avg_daily_revenue: f64,
    pub avg_daily_bookings: f64,
}

/// Booked time against theoretical capacity of one space.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SpaceUtilization {
    pub utilization: f64,
    pub booked_hours: f64,
    pub total_bookings: u32,
    pub revenue: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyRevenue {
    pub date: String,
    pub day: String,
    pub revenue: f64,
    pub bookings: u32,
}

/// `utilization` is the share of all booked time, not a capacity ratio.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ModalityPerformance {
    pub bookings: u32,
    pub hours: f64,
    pub revenue: f64,
    pub utilization: f64,
    pub revenue_share: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RangeInfo {
    pub start: String,
    pub end: String,
    pub days: i64,
}
