//! Repository for the `articles` table.
//!
//! Articles have no owner column; every query joins `stories` and filters on
//! `stories.user_id`.

use sqlx::PgPool;
use storydesk_core::types::DbId;

use crate::models::article::{Article, CreateArticle, UpdateArticle};

const COLUMNS: &str = "a.id, a.story_id, a.title, a.content, a.status, a.word_count, \
                       a.last_review, a.created_at, a.updated_at";

/// Provides ownership-scoped CRUD operations for articles.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert an article under `story_id`.
    ///
    /// Returns `None` (and inserts nothing) when the story does not belong to
    /// `user_id`.
    pub async fn create(
        pool: &PgPool,
        story_id: DbId,
        user_id: DbId,
        input: &CreateArticle,
        word_count: i32,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles AS a (story_id, title, content, status, word_count)
             SELECT s.id, $3, $4, COALESCE($5, 'draft'), $6
             FROM stories s
             WHERE s.id = $1 AND s.user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(story_id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.status)
            .bind(word_count)
            .fetch_optional(pool)
            .await
    }

    /// List articles across the user's stories, most recently updated first.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        story_id: Option<DbId>,
    ) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM articles a
             JOIN stories s ON s.id = a.story_id
             WHERE s.user_id = $1 AND ($2::BIGINT IS NULL OR a.story_id = $2)
             ORDER BY a.updated_at DESC, a.id DESC"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(user_id)
            .bind(story_id)
            .fetch_all(pool)
            .await
    }

    /// Find an article by ID if its story belongs to `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM articles a
             JOIN stories s ON s.id = a.story_id
             WHERE a.id = $1 AND s.user_id = $2"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update an article. `word_count` must be supplied whenever `content` is.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateArticle,
        word_count: Option<i32>,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "UPDATE articles a SET
                title = COALESCE($3, a.title),
                content = COALESCE($4, a.content),
                status = COALESCE($5, a.status),
                word_count = COALESCE($6, a.word_count)
             FROM stories s
             WHERE a.id = $1 AND s.id = a.story_id AND s.user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.status)
            .bind(word_count)
            .fetch_optional(pool)
            .await
    }

    /// Store the latest editorial review on the article.
    pub async fn set_review(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        review: &serde_json::Value,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE articles a SET last_review = $3
             FROM stories s
             WHERE a.id = $1 AND s.id = a.story_id AND s.user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .bind(review)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an article whose story belongs to `user_id`.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM articles a
             USING stories s
             WHERE a.id = $1 AND s.id = a.story_id AND s.user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
