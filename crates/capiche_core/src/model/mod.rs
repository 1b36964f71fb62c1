//! Domain model for projects and their tasks.
//!
//! # Responsibility
//! - Define the `Task` and `Project` entities and their plain records.
//! - Own field-level invariants (priority domain, identity, timestamps).
//!
//! # Invariants
//! - Every entity is identified by a generated id that is never reassigned.
//! - `last_updated` never moves backwards across mutations.
//! - Reads hand out owned records, never handles into internal state.

use chrono::{DateTime, Utc};

pub mod project;
pub mod task;

/// Returns the timestamp to store after a mutation.
///
/// Clamped to `previous` so a wall clock stepping backwards cannot make
/// `last_updated` decrease.
pub(crate) fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(previous)
}

/// Generates a fresh entity identifier.
pub(crate) fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::{generate_id, next_timestamp};
    use chrono::{Duration, Utc};

    #[test]
    fn next_timestamp_never_goes_backwards() {
        let future = Utc::now() + Duration::hours(1);
        assert_eq!(next_timestamp(future), future);
    }

    #[test]
    fn next_timestamp_advances_from_past_value() {
        let past = Utc::now() - Duration::hours(1);
        assert!(next_timestamp(past) > past);
    }

    #[test]
    fn generated_ids_are_uuid_strings() {
        let id = generate_id();
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }
}
