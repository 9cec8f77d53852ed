//! The ordered story cases.
//!
//! Each case knows how to build its request from the fixture state, which
//! assertions its response must satisfy, and what it records for later cases.

use std::fmt;

use spoiler_domain::request::{RequestBody, RequestSpec};
use spoiler_domain::response::ResponseSpec;
use spoiler_domain::{ApiResponse, Assertion, TestResults, TestSuite, generate_id};

use crate::error::ApplicationResult;
use crate::ports::Clock;
use crate::session::FixtureState;
use crate::story_data;

/// Create endpoint.
pub const CREATE_PATH: &str = "/api/Story/Create";
/// List endpoint.
pub const LIST_PATH: &str = "/api/Story/All";

/// Edit endpoint for `id`.
#[must_use]
pub fn edit_path(id: &str) -> String {
    format!("/api/Story/Edit/{id}")
}

/// Delete endpoint for `id`.
#[must_use]
pub fn delete_path(id: &str) -> String {
    format!("/api/Story/Delete/{id}")
}

/// Message returned after a successful create.
pub const CREATED_MESSAGE: &str = "Successfully created!";
/// Message returned after a successful edit.
pub const EDITED_MESSAGE: &str = "Successfully edited";
/// Message returned after a successful delete.
pub const DELETED_MESSAGE: &str = "Deleted successfully!";
/// Message returned when deleting an unknown story.
pub const DELETE_FAILED_MESSAGE: &str = "Unable to delete this story spoiler!";
/// Accepted wording for an edit of an unknown story.
pub const NOT_FOUND_PATTERN: &str = "(?i)no spoilers|not found";

/// One step of the suite. Cases run in [`StoryCase::ORDERED`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoryCase {
    /// Create a story and record its id.
    Create,
    /// Edit the recorded story.
    Edit,
    /// List all stories.
    List,
    /// Delete the recorded story.
    Delete,
    /// Create with an empty body.
    CreateInvalid,
    /// Edit a random, never-issued id.
    EditNonexistent,
    /// Delete a random, never-issued id.
    DeleteNonexistent,
}

impl StoryCase {
    /// Execution order. Edit and Delete depend on Create.
    pub const ORDERED: [Self; 7] = [
        Self::Create,
        Self::Edit,
        Self::List,
        Self::Delete,
        Self::CreateInvalid,
        Self::EditNonexistent,
        Self::DeleteNonexistent,
    ];

    /// Short name used in logs and reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Create => "create_story",
            Self::Edit => "edit_story",
            Self::List => "list_stories",
            Self::Delete => "delete_story",
            Self::CreateInvalid => "create_story_without_fields",
            Self::EditNonexistent => "edit_nonexistent_story",
            Self::DeleteNonexistent => "delete_nonexistent_story",
        }
    }

    /// Builds this case's request.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::MissingFixture` for Edit and Delete when no
    /// story was recorded, or a domain error if a body fails to serialize.
    pub fn request(self, fixture: &FixtureState, clock: &dyn Clock) -> ApplicationResult<RequestSpec> {
        let request = match self {
            Self::Create => RequestSpec::post(self.name(), CREATE_PATH)
                .with_body(RequestBody::json_value(&story_data::new_story())?),
            Self::Edit => {
                let id = fixture.story_id()?;
                RequestSpec::put(self.name(), edit_path(id.as_str()))
                    .with_body(RequestBody::json_value(&story_data::edited_story(clock.now()))?)
            }
            Self::List => RequestSpec::get(self.name(), LIST_PATH),
            Self::Delete => {
                let id = fixture.story_id()?;
                RequestSpec::delete(self.name(), delete_path(id.as_str()))
            }
            Self::CreateInvalid => {
                RequestSpec::post(self.name(), CREATE_PATH).with_body(RequestBody::json("{}"))
            }
            Self::EditNonexistent => RequestSpec::put(self.name(), edit_path(&generate_id()))
                .with_body(RequestBody::json_value(&story_data::placeholder_story())?),
            Self::DeleteNonexistent => {
                RequestSpec::delete(self.name(), delete_path(&generate_id()))
            }
        };
        Ok(request)
    }

    /// Assertions the response must satisfy. Some depend on the response
    /// itself, e.g. a 204 from Delete carries no message to check.
    #[must_use]
    pub fn expectations(self, response: &ResponseSpec) -> TestSuite {
        let suite = TestSuite::new(self.name());
        match self {
            Self::Create => suite
                .with_assertion(Assertion::status(201))
                .with_assertion(Assertion::json_path("$.storyId"))
                .with_assertion(Assertion::message_contains(CREATED_MESSAGE)),
            Self::Edit => suite
                .with_assertion(Assertion::status(200))
                .with_assertion(Assertion::message_contains(EDITED_MESSAGE)),
            Self::List => suite
                .with_assertion(Assertion::status(200))
                .with_assertion(Assertion::JsonArrayNotEmpty),
            Self::Delete => {
                let suite = suite.with_assertion(Assertion::status_one_of(&[200, 204]));
                if response.status == 200 && !response.has_blank_body() {
                    suite.with_assertion(Assertion::message_contains(DELETED_MESSAGE))
                } else {
                    suite
                }
            }
            Self::CreateInvalid => suite.with_assertion(Assertion::status(400)),
            Self::EditNonexistent => {
                let suite = suite.with_assertion(Assertion::status_one_of(&[404, 400]));
                if response.has_blank_body() {
                    suite
                } else if ApiResponse::declares_message(&response.body) {
                    suite.with_assertion(Assertion::MessageMatches {
                        pattern: NOT_FOUND_PATTERN.to_string(),
                    })
                } else {
                    suite.with_assertion(Assertion::BodyNotEmpty)
                }
            }
            Self::DeleteNonexistent => suite
                .with_assertion(Assertion::status(400))
                .with_assertion(Assertion::message_contains(DELETE_FAILED_MESSAGE)),
        }
    }

    /// Records side effects for later cases. Only Create records anything,
    /// and only when its status assertion passed.
    ///
    /// # Errors
    ///
    /// Returns a domain error if a 201 response carries no usable `storyId`.
    pub fn capture(
        self,
        response: &ResponseSpec,
        results: &TestResults,
        fixture: &mut FixtureState,
    ) -> ApplicationResult<()> {
        if self == Self::Create && results.status_passed() {
            let id = ApiResponse::from_body(&response.body)?.story_id()?;
            tracing::info!(story_id = %id, "recorded created story");
            fixture.record_story(id);
        }
        Ok(())
    }
}

impl fmt::Display for StoryCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
