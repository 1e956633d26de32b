//! Due-item filtering

use crate::clock::{is_past, Clock};
use crate::error::Result;
use crate::model::{Person, Schedule};

/// Items whose time has passed today and that are not completed yet.
///
/// People with nothing due are dropped. The relative order of people and of
/// items within a person is kept. A malformed time anywhere fails the call.
pub fn due_items(schedule: &Schedule, clock: &dyn Clock) -> Result<Schedule> {
    let mut due = Vec::new();

    for person in &schedule.people {
        let mut drugs = Vec::new();
        for drug in &person.drugs {
            if is_past(&drug.scheduled_time, clock)? && !drug.completed {
                drugs.push(drug.clone());
            }
        }
        if !drugs.is_empty() {
            due.push(Person::new(person.name.clone(), drugs));
        }
    }

    Ok(Schedule::new(due))
}
