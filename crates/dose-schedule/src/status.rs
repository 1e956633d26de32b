//! Completion status mutation

use crate::model::{Person, Schedule};

/// Set `completed` on every item named `drug_name` of person `person_name`.
///
/// Returns a new schedule and leaves everything else untouched. Person order
/// is preserved. If the name appears more than once, the last entry wins and
/// takes the position of the first occurrence. A person that is not present is
/// appended with an empty item list.
pub fn set_status(
    schedule: &Schedule,
    person_name: &str,
    drug_name: &str,
    completed: bool,
) -> Schedule {
    let mut people = fold_duplicates(&schedule.people);

    let index = match people.iter().position(|p| p.name == person_name) {
        Some(index) => index,
        None => {
            people.push(Person::new(person_name, Vec::new()));
            people.len() - 1
        }
    };

    for drug in people[index]
        .drugs
        .iter_mut()
        .filter(|d| d.name == drug_name)
    {
        drug.completed = completed;
    }

    Schedule::new(people)
}

/// Keep one entry per person name: first position, last value
fn fold_duplicates(people: &[Person]) -> Vec<Person> {
    let mut folded: Vec<Person> = Vec::with_capacity(people.len());
    for person in people {
        match folded.iter_mut().find(|p| p.name == person.name) {
            Some(existing) => existing.drugs = person.drugs.clone(),
            None => folded.push(person.clone()),
        }
    }
    folded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Drug;
    use pretty_assertions::assert_eq;

    fn sample() -> Schedule {
        Schedule::new(vec![
            Person::new(
                "Alice",
                vec![Drug::new("Vitamin", "08:00"), Drug::new("Iron", "12:00")],
            ),
            Person::new("Bob", vec![Drug::new("Vitamin", "09:00")]),
        ])
    }

    #[test]
    fn test_marks_only_matching_item_of_person() {
        let updated = set_status(&sample(), "Alice", "Vitamin", true);

        assert_eq!(
            updated,
            Schedule::new(vec![
                Person::new(
                    "Alice",
                    vec![
                        Drug::new("Vitamin", "08:00").completed(true),
                        Drug::new("Iron", "12:00"),
                    ],
                ),
                Person::new("Bob", vec![Drug::new("Vitamin", "09:00")]),
            ])
        );
    }

    #[test]
    fn test_marks_every_item_with_same_name() {
        let schedule = Schedule::new(vec![Person::new(
            "Alice",
            vec![
                Drug::new("Vitamin", "08:00"),
                Drug::new("Vitamin", "20:00"),
                Drug::new("Iron", "12:00"),
            ],
        )]);

        let updated = set_status(&schedule, "Alice", "Vitamin", true);
        let flags: Vec<bool> = updated.people[0].drugs.iter().map(|d| d.completed).collect();
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn test_unknown_item_changes_nothing() {
        let schedule = sample();
        assert_eq!(set_status(&schedule, "Alice", "Aspirin", true), schedule);
    }

    #[test]
    fn test_absent_person_is_appended() {
        let updated = set_status(&sample(), "Carol", "Vitamin", true);

        assert_eq!(updated.people.len(), 3);
        assert_eq!(updated.people[..2], sample().people[..]);
        assert_eq!(updated.people[2], Person::new("Carol", vec![]));
    }

    #[test]
    fn test_input_is_not_modified() {
        let schedule = sample();
        let _ = set_status(&schedule, "Bob", "Vitamin", true);
        assert!(schedule.drugs().all(|(_, d)| !d.completed));
    }

    #[test]
    fn test_preserves_person_order() {
        let schedule = Schedule::new(
            ["Zed", "Amy", "Moe", "Bea"]
                .iter()
                .map(|n| Person::new(*n, vec![Drug::new("x", "10:00")]))
                .collect(),
        );

        let updated = set_status(&schedule, "Moe", "x", true);
        let names: Vec<_> = updated.people.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Amy", "Moe", "Bea"]);
    }

    #[test]
    fn test_duplicate_person_last_wins_at_first_position() {
        let schedule = Schedule::new(vec![
            Person::new("Alice", vec![Drug::new("Old", "07:00")]),
            Person::new("Bob", vec![]),
            Person::new("Alice", vec![Drug::new("New", "08:00")]),
        ]);

        let updated = set_status(&schedule, "Bob", "x", true);
        assert_eq!(
            updated,
            Schedule::new(vec![
                Person::new("Alice", vec![Drug::new("New", "08:00")]),
                Person::new("Bob", vec![]),
            ])
        );
    }
}
