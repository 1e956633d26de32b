//! Daily status reset
//!
//! There is no timer. A new day is inferred on read: when even the earliest
//! scheduled time of the day still lies ahead, every remaining completion mark
//! must be left over from a previous day.

use chrono::Utc;
use tracing::info;

use crate::clock::{to_time_today, Clock};
use crate::error::Result;
use crate::model::Schedule;
use crate::status::set_status;
use crate::store::JsonFileStore;

/// True iff the earliest of today's scheduled times is strictly after now.
///
/// A schedule without any item never needs a reset.
pub fn should_reset(schedule: &Schedule, clock: &dyn Clock) -> Result<bool> {
    let now = clock.now();
    let mut earliest = None;

    for (_, drug) in schedule.drugs() {
        let t = to_time_today(&drug.scheduled_time, now)?;
        earliest = match earliest {
            Some(e) if e <= t => Some(e),
            _ => Some(t),
        };
    }

    Ok(earliest.is_some_and(|e| e.with_timezone(&Utc) > now))
}

/// Clear the completion flag of every item of every person
pub fn reset_statuses(schedule: &Schedule) -> Schedule {
    schedule
        .drugs()
        .fold(schedule.clone(), |acc, (person, drug)| {
            set_status(&acc, &person.name, &drug.name, false)
        })
}

/// Reset and persist the stored schedule if a new day has started.
///
/// Returns whether a reset was written.
pub async fn check_and_reset(store: &JsonFileStore, clock: &dyn Clock) -> Result<bool> {
    let written = store
        .update(|schedule| {
            if should_reset(&schedule, clock)? {
                Ok(Some(reset_statuses(&schedule)))
            } else {
                Ok(None)
            }
        })
        .await?;

    let reset = written.is_some();
    if reset {
        info!("New day detected, cleared all completion flags");
    }
    Ok(reset)
}
