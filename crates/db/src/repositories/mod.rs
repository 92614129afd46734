//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every method touching
//! user data takes the caller's `user_id` and filters on it (directly, or
//! by joining back to `stories.user_id` for story children), so a row owned
//! by someone else behaves exactly like a missing row.

pub mod article_repo;
pub mod bookmark_repo;
pub mod contact_repo;
pub mod meeting_repo;
pub mod research_repo;
pub mod settings_repo;
pub mod story_contact_repo;
pub mod story_repo;
pub mod transcript_repo;
pub mod user_repo;

pub use article_repo::ArticleRepo;
pub use bookmark_repo::BookmarkRepo;
pub use contact_repo::ContactRepo;
pub use meeting_repo::MeetingRepo;
pub use research_repo::ResearchRepo;
pub use settings_repo::SettingsRepo;
pub use story_contact_repo::StoryContactRepo;
pub use story_repo::StoryRepo;
pub use transcript_repo::TranscriptRepo;
pub use user_repo::UserRepo;
