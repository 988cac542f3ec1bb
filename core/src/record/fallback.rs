//! Values substituted when a record lacks a field.
//!
//! | field     | fallback                                   |
//! |-----------|--------------------------------------------|
//! | title     | [`UNTITLED`]                               |
//! | due       | the run's reference date, at format time   |
//! | status    | [`NO_STATUS`] at format time; never "done" |
//! | tags      | empty, segment omitted                     |
//! | assignees | empty, segment omitted                     |
//! | url       | empty string                               |

pub const UNTITLED: &str = "(untitled)";
pub const NO_STATUS: &str = "-";
pub const NO_URL: &str = "";
