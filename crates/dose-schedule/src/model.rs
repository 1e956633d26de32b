//! Schedule data model
//!
//! The wire format is the JSON array stored in the settings file:
//! `[{"personName": "...", "drugs": [{"name", "time", "comment", "status"}]}]`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::clock::parse_time_of_day;
use crate::error::{Result, ScheduleError};

/// A scheduled item belonging to one person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drug {
    pub name: String,
    /// Time of day as "HH:MM" in the schedule time zone
    #[serde(rename = "time")]
    pub scheduled_time: String,
    #[serde(default)]
    pub comment: String,
    /// Completion flag, cleared by the daily reset
    #[serde(rename = "status", default)]
    pub completed: bool,
}

impl Drug {
    pub fn new(name: impl Into<String>, scheduled_time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scheduled_time: scheduled_time.into(),
            comment: String::new(),
            completed: false,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// A person and their ordered list of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "personName")]
    pub name: String,
    pub drugs: Vec<Drug>,
}

impl Person {
    pub fn new(name: impl Into<String>, drugs: Vec<Drug>) -> Self {
        Self {
            name: name.into(),
            drugs,
        }
    }
}

/// The whole persisted document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    pub people: Vec<Person>,
}

impl Schedule {
    pub fn new(people: Vec<Person>) -> Self {
        Self { people }
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn person(&self, name: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.name == name)
    }

    /// Iterate over every item of every person, in document order
    pub fn drugs(&self) -> impl Iterator<Item = (&Person, &Drug)> {
        self.people
            .iter()
            .flat_map(|p| p.drugs.iter().map(move |d| (p, d)))
    }

    /// Check a document before it replaces the stored one.
    ///
    /// Rejects duplicate person names and any time that is not a valid "HH:MM".
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for person in &self.people {
            if !seen.insert(person.name.as_str()) {
                return Err(ScheduleError::DuplicatePerson(person.name.clone()));
            }
            for drug in &person.drugs {
                parse_time_of_day(&drug.scheduled_time)?;
            }
        }
        Ok(())
    }
}
