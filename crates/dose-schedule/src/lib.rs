//! Daily dose schedule core
//!
//! People, their scheduled items, and the logic around them:
//! - `clock`: "HH:MM" times interpreted in a fixed time zone
//! - `due`: items whose time has passed and that are not completed
//! - `reset`: the inferred once-a-day clearing of completion flags
//! - `status`: order-preserving completion updates
//! - `store`: the single JSON file holding the whole schedule

pub mod clock;
pub mod due;
pub mod error;
pub mod model;
pub mod reset;
pub mod status;
pub mod store;

pub use clock::{
    is_past, parse_time_of_day, to_time_today, Clock, FixedClock, SystemClock, SCHEDULE_TZ,
};
pub use due::due_items;
pub use error::{Result, ScheduleError};
pub use model::{Drug, Person, Schedule};
pub use reset::{check_and_reset, reset_statuses, should_reset};
pub use status::set_status;
pub use store::JsonFileStore;
