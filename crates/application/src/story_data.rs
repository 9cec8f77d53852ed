//! Generated request bodies for the story cases.

use chrono::{DateTime, Utc};
use rand::Rng;
use spoiler_domain::StoryPayload;

/// Length of the random suffix that keeps created titles unique per run.
pub const TITLE_SUFFIX_LEN: usize = 6;

/// Payload for the create case: `"New Story <suffix>"`.
#[must_use]
pub fn new_story() -> StoryPayload {
    StoryPayload::new(
        format!("New Story {}", random_suffix(TITLE_SUFFIX_LEN)),
        "Test story description",
    )
}

/// Payload for the edit case, titled with the current UTC time in milliseconds.
#[must_use]
pub fn edited_story(now: DateTime<Utc>) -> StoryPayload {
    StoryPayload::new(
        format!("Edited Title {}", now.timestamp_millis()),
        "Edited description",
    )
}

/// Payload for editing a story that does not exist.
#[must_use]
pub fn placeholder_story() -> StoryPayload {
    StoryPayload::new("X", "Y")
}

/// Random lowercase alphanumeric string of `len` characters.
fn random_suffix(len: usize) -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
