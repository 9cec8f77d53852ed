//! ID generation utilities.

use uuid::Uuid;

/// Generates a new random UUID v4 as a string.
///
/// Used for identifiers the remote service has never issued.
#[must_use]
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
