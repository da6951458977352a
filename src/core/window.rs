use crate::domain::model::WeekRange;
use chrono::{Datelike, Duration, NaiveDate};

/// Reporting week for `reference`.
///
/// On a Sunday this is the week that just ended (the previous Sunday through
/// yesterday). On any other day it is the week in progress, Sunday through the
/// coming Saturday.
pub fn compute(reference: NaiveDate) -> WeekRange {
    let offset = reference.weekday().num_days_from_sunday() as i64;
    let start = if offset == 0 {
        reference - Duration::days(7)
    } else {
        reference - Duration::days(offset)
    };
    WeekRange::starting(start)
}
