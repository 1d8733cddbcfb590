use super::feed::ReleaseCycle;
use crate::error::Result;
use chrono::{NaiveDate, Utc};

/// Current UTC calendar date
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Keep the cycles whose end-of-life date is strictly after `today`
///
/// Feed order is preserved. A single unparseable date aborts the whole
/// computation.
pub fn filter_supported(cycles: &[ReleaseCycle], today: NaiveDate) -> Result<Vec<ReleaseCycle>> {
    let mut supported = Vec::new();
    for cycle in cycles {
        if cycle.eol_date()? > today {
            supported.push(cycle.clone());
        } else {
            log::debug!("skipping cycle {}: end of life on {}", cycle.cycle, cycle.eol);
        }
    }
    Ok(supported)
}
