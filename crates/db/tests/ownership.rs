//! Integration tests for the repository layer.
//!
//! Exercises ownership scoping, cascade behaviour, and partial updates
//! against a real database.

use assert_matches::assert_matches;
use sqlx::PgPool;
use storydesk_db::models::article::{CreateArticle, UpdateArticle};
use storydesk_db::models::bookmark::{CreateBookmark, UpdateBookmark};
use storydesk_db::models::contact::{CreateContact, UpdateStoryContact};
use storydesk_db::models::meeting::CreateMeeting;
use storydesk_db::models::research::CreateResearch;
use storydesk_db::models::settings::UpdateSettings;
use storydesk_db::models::story::{CreateStory, UpdateStory};
use storydesk_db::models::transcript::CreateTranscript;
use storydesk_db::models::user::{CreateUser, User};
use storydesk_db::repositories::{
    ArticleRepo, BookmarkRepo, ContactRepo, MeetingRepo, ResearchRepo, SettingsRepo,
    StoryContactRepo, StoryRepo, TranscriptRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, email: &str) -> User {
    UserRepo::create_with_settings(
        pool,
        &CreateUser {
            email: email.to_string(),
            name: "Reporter".to_string(),
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .unwrap()
}

fn new_story(title: &str) -> CreateStory {
    CreateStory {
        title: title.to_string(),
        ..Default::default()
    }
}

fn new_contact(name: &str) -> CreateContact {
    CreateContact {
        name: name.to_string(),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Users and settings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_creation_provisions_default_settings(pool: PgPool) {
    let user = new_user(&pool, "a@example.com").await;

    let settings = SettingsRepo::get_or_create(&pool, user.id).await.unwrap();
    assert_eq!(settings.theme, "system");
    assert_eq!(settings.timezone, "UTC");

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM settings WHERE user_id = $1")
        .bind(user.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_settings_partial_update(pool: PgPool) {
    let user = new_user(&pool, "a@example.com").await;

    let updated = SettingsRepo::update(
        &pool,
        user.id,
        &UpdateSettings {
            theme: Some("dark".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.theme, "dark");
    assert_eq!(updated.timezone, "UTC");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_violates_unique_constraint(pool: PgPool) {
    new_user(&pool, "dup@example.com").await;

    let err = UserRepo::create_with_settings(
        &pool,
        &CreateUser {
            email: "dup@example.com".to_string(),
            name: "Other".to_string(),
            password_hash: "x".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert_matches!(err, sqlx::Error::Database(ref db) if db.constraint() == Some("uq_users_email"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_email_ignores_case(pool: PgPool) {
    let user = new_user(&pool, "mixed@example.com").await;

    let found = UserRepo::find_by_email_case_insensitive(&pool, "MIXED@Example.com")
        .await
        .unwrap()
        .expect("user should be found");
    assert_eq!(found.id, user.id);
}

// ---------------------------------------------------------------------------
// Ownership
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_story_invisible_to_other_user(pool: PgPool) {
    let alice = new_user(&pool, "alice@example.com").await;
    let bob = new_user(&pool, "bob@example.com").await;

    let story = StoryRepo::create(&pool, alice.id, &new_story("Water"))
        .await
        .unwrap();

    assert!(StoryRepo::find_for_user(&pool, story.id, bob.id)
        .await
        .unwrap()
        .is_none());
    assert!(StoryRepo::list_with_counts(&pool, bob.id)
        .await
        .unwrap()
        .is_empty());
    assert!(!StoryRepo::delete(&pool, story.id, bob.id).await.unwrap());

    let renamed = StoryRepo::update(
        &pool,
        story.id,
        bob.id,
        &UpdateStory {
            title: Some("Hijacked".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(renamed.is_none());

    let still_there = StoryRepo::find_for_user(&pool, story.id, alice.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(still_there.title, "Water");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_child_create_rejected_on_foreign_story(pool: PgPool) {
    let alice = new_user(&pool, "alice@example.com").await;
    let bob = new_user(&pool, "bob@example.com").await;
    let story = StoryRepo::create(&pool, alice.id, &new_story("Water"))
        .await
        .unwrap();

    let article = ArticleRepo::create(
        &pool,
        story.id,
        bob.id,
        &CreateArticle {
            title: "Draft".to_string(),
            ..Default::default()
        },
        0,
    )
    .await
    .unwrap();
    assert!(article.is_none());

    let meeting = MeetingRepo::create(
        &pool,
        story.id,
        bob.id,
        &CreateMeeting {
            title: "Call".to_string(),
            scheduled_at: Some(chrono::Utc::now()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(meeting.is_none());

    let contact = ContactRepo::create(&pool, bob.id, &new_contact("Source"))
        .await
        .unwrap();
    let link = StoryContactRepo::link(&pool, story.id, contact.id, bob.id, None, None)
        .await
        .unwrap();
    assert!(link.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_storyless_research_visible_only_to_owner(pool: PgPool) {
    let alice = new_user(&pool, "alice@example.com").await;
    let bob = new_user(&pool, "bob@example.com").await;

    ResearchRepo::create(
        &pool,
        alice.id,
        &CreateResearch {
            query: "river pollution".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(ResearchRepo::list(&pool, alice.id, None).await.unwrap().len(), 1);
    assert!(ResearchRepo::list(&pool, bob.id, None).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Story children and cascade
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_story_detail_and_counts(pool: PgPool) {
    let user = new_user(&pool, "a@example.com").await;
    let story = StoryRepo::create(&pool, user.id, &new_story("Water"))
        .await
        .unwrap();
    let contact = ContactRepo::create(&pool, user.id, &new_contact("Dr. Reed"))
        .await
        .unwrap();

    StoryContactRepo::link(&pool, story.id, contact.id, user.id, None, Some("hydrologist"))
        .await
        .unwrap()
        .expect("link should be created");
    ArticleRepo::create(
        &pool,
        story.id,
        user.id,
        &CreateArticle {
            title: "Draft".to_string(),
            content: "one two three".to_string(),
            ..Default::default()
        },
        3,
    )
    .await
    .unwrap()
    .unwrap();
    TranscriptRepo::create(
        &pool,
        story.id,
        user.id,
        &CreateTranscript {
            title: "Interview".to_string(),
            content: "Q: ... A: ...".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    let summaries = StoryRepo::list_with_counts(&pool, user.id).await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].contact_count, 1);
    assert_eq!(summaries[0].article_count, 1);
    assert_eq!(summaries[0].transcript_count, 1);
    assert_eq!(summaries[0].meeting_count, 0);

    let detail = StoryRepo::find_detail(&pool, story.id, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.contacts.len(), 1);
    assert_eq!(detail.contacts[0].link_status, "identified");
    assert_eq!(detail.contacts[0].link_notes.as_deref(), Some("hydrologist"));
    assert_eq!(detail.articles[0].word_count, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_link_violates_unique_constraint(pool: PgPool) {
    let user = new_user(&pool, "a@example.com").await;
    let story = StoryRepo::create(&pool, user.id, &new_story("Water"))
        .await
        .unwrap();
    let contact = ContactRepo::create(&pool, user.id, &new_contact("Dr. Reed"))
        .await
        .unwrap();

    StoryContactRepo::link(&pool, story.id, contact.id, user.id, None, None)
        .await
        .unwrap();
    let err = StoryContactRepo::link(&pool, story.id, contact.id, user.id, None, None)
        .await
        .unwrap_err();

    assert_matches!(err, sqlx::Error::Database(ref db) if db.constraint() == Some("uq_story_contacts"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_link_status_update_and_unlink(pool: PgPool) {
    let user = new_user(&pool, "a@example.com").await;
    let story = StoryRepo::create(&pool, user.id, &new_story("Water"))
        .await
        .unwrap();
    let contact = ContactRepo::create(&pool, user.id, &new_contact("Dr. Reed"))
        .await
        .unwrap();
    StoryContactRepo::link(&pool, story.id, contact.id, user.id, Some("contacted"), None)
        .await
        .unwrap();

    let updated = StoryContactRepo::update(
        &pool,
        story.id,
        contact.id,
        user.id,
        &UpdateStoryContact {
            status: Some("interviewed".to_string()),
            notes: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.status, "interviewed");

    assert!(StoryContactRepo::unlink(&pool, story.id, contact.id, user.id)
        .await
        .unwrap());
    assert!(!StoryContactRepo::unlink(&pool, story.id, contact.id, user.id)
        .await
        .unwrap());

    // The contact itself survives unlinking.
    assert!(ContactRepo::find_for_user(&pool, contact.id, user.id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_story_delete_cascades_children(pool: PgPool) {
    let user = new_user(&pool, "a@example.com").await;
    let story = StoryRepo::create(&pool, user.id, &new_story("Water"))
        .await
        .unwrap();
    let article = ArticleRepo::create(
        &pool,
        story.id,
        user.id,
        &CreateArticle {
            title: "Draft".to_string(),
            ..Default::default()
        },
        0,
    )
    .await
    .unwrap()
    .unwrap();
    let bookmark = BookmarkRepo::create(
        &pool,
        user.id,
        &CreateBookmark {
            story_id: Some(story.id),
            url: Some("https://example.com".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(StoryRepo::delete(&pool, story.id, user.id).await.unwrap());

    assert!(ArticleRepo::find_for_user(&pool, article.id, user.id)
        .await
        .unwrap()
        .is_none());

    // Bookmarks outlive their story and are detached.
    let kept = BookmarkRepo::find_for_user(&pool, bookmark.id, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.story_id, None);
}

// ---------------------------------------------------------------------------
// Partial updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_story_partial_update_keeps_absent_and_clears_null(pool: PgPool) {
    let user = new_user(&pool, "a@example.com").await;
    let story = StoryRepo::create(
        &pool,
        user.id,
        &CreateStory {
            title: "Water".to_string(),
            description: Some("City supply".to_string()),
            progress: Some(10),
            tags: Some(vec!["env".to_string()]),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let updated = StoryRepo::update(
        &pool,
        story.id,
        user.id,
        &UpdateStory {
            progress: Some(40),
            description: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.title, "Water");
    assert_eq!(updated.progress, 40);
    assert_eq!(updated.description, None);
    assert_eq!(updated.tags, vec!["env".to_string()]);
    assert_eq!(updated.status, "planning");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_article_update_recomputes_word_count_only_with_content(pool: PgPool) {
    let user = new_user(&pool, "a@example.com").await;
    let story = StoryRepo::create(&pool, user.id, &new_story("Water"))
        .await
        .unwrap();
    let article = ArticleRepo::create(
        &pool,
        story.id,
        user.id,
        &CreateArticle {
            title: "Draft".to_string(),
            content: "a b".to_string(),
            ..Default::default()
        },
        2,
    )
    .await
    .unwrap()
    .unwrap();

    let retitled = ArticleRepo::update(
        &pool,
        article.id,
        user.id,
        &UpdateArticle {
            title: Some("Final".to_string()),
            ..Default::default()
        },
        None,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(retitled.word_count, 2);
    assert_eq!(retitled.content, "a b");

    let rewritten = ArticleRepo::update(
        &pool,
        article.id,
        user.id,
        &UpdateArticle {
            content: Some("a b c d".to_string()),
            ..Default::default()
        },
        Some(4),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(rewritten.word_count, 4);
    assert_eq!(rewritten.title, "Final");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bookmark_content_check_rejects_empty_update(pool: PgPool) {
    let user = new_user(&pool, "a@example.com").await;
    let bookmark = BookmarkRepo::create(
        &pool,
        user.id,
        &CreateBookmark {
            url: Some("https://example.com".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let err = BookmarkRepo::update(
        &pool,
        bookmark.id,
        user.id,
        &UpdateBookmark {
            url: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();

    assert_matches!(err, sqlx::Error::Database(ref db) if db.constraint() == Some("ck_bookmarks_content"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upcoming_meetings_sorted_soonest_first(pool: PgPool) {
    let user = new_user(&pool, "a@example.com").await;
    let story = StoryRepo::create(&pool, user.id, &new_story("Water"))
        .await
        .unwrap();
    let now = chrono::Utc::now();

    for (title, offset_hours) in [("later", 48), ("past", -24), ("soon", 2)] {
        MeetingRepo::create(
            &pool,
            story.id,
            user.id,
            &CreateMeeting {
                title: title.to_string(),
                scheduled_at: Some(now + chrono::Duration::hours(offset_hours)),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    }

    let upcoming = MeetingRepo::list(&pool, user.id, None, true).await.unwrap();
    let titles: Vec<&str> = upcoming.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["soon", "later"]);
    assert!(upcoming.iter().all(|m| m.duration_minutes == 30 && m.platform == "other"));

    let all = MeetingRepo::list(&pool, user.id, Some(story.id), false)
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
}
