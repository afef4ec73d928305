use std::sync::Arc;

use super::catalog::Catalog;

const HOURS_PER_DAY: u32 = 24;
const HOURS_PER_WEEK: u32 = 168;

/// Turns the catalog's service-level hours into a readable window.
pub struct ResolutionEstimator {
    catalog: Arc<Catalog>,
}

impl ResolutionEstimator {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn estimate(&self, department_id: &str, priority: &str) -> String {
        format_window(self.catalog.resolution_hours(department_id, priority))
    }
}

pub fn format_window(hours: u32) -> String {
    if hours < HOURS_PER_DAY {
        plural(hours, "hour")
    } else if hours < HOURS_PER_WEEK {
        plural(rounded_ratio(hours, HOURS_PER_DAY), "day")
    } else {
        plural(rounded_ratio(hours, HOURS_PER_WEEK), "week")
    }
}

fn rounded_ratio(hours: u32, unit: u32) -> u32 {
    (f64::from(hours) / f64::from(unit)).round() as u32
}

fn plural(count: u32, unit: &str) -> String {
    if count == 1 {
        format!("Within 1 {unit}")
    } else {
        format!("Within {count} {unit}s")
    }
}
