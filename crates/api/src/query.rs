//! Shared query parameter types for API handlers.

use serde::Deserialize;
use storydesk_core::types::DbId;

/// `?storyId=` filter accepted by the list endpoints of story children.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryFilter {
    pub story_id: Option<DbId>,
}
