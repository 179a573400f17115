use async_trait::async_trait;
use sqlx::FromRow;
use thiserror::Error;
use time::OffsetDateTime;

mod pg;

pub use pg::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// One question row as returned by the store.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionRow {
    pub question_id: i32,
    pub title: String,
    pub content: String,
    pub user_id: String,
    pub user_name: String,
    pub created: OffsetDateTime,
}

/// One answer row as returned by the store.
#[derive(Debug, Clone, FromRow)]
pub struct AnswerRow {
    pub answer_id: i32,
    pub question_id: i32,
    pub content: String,
    pub user_id: String,
    pub user_name: String,
    pub created: OffsetDateTime,
}

/// One row of the questions-left-join-answers query.
///
/// The question fields are always present; the answer fields are all
/// set together, or all `None` when the question has no answers.
#[derive(Debug, Clone, FromRow)]
pub struct JoinedRow {
    pub question_id: i32,
    pub title: String,
    pub content: String,
    pub user_id: String,
    pub user_name: String,
    pub created: OffsetDateTime,
    pub answer_id: Option<i32>,
    pub answer_content: Option<String>,
    pub answer_user_id: Option<String>,
    pub answer_user_name: Option<String>,
    pub answer_created: Option<OffsetDateTime>,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub title: String,
    pub content: String,
    pub user_id: String,
    pub user_name: String,
    pub created: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub question_id: i32,
    pub content: String,
    pub user_id: String,
    pub user_name: String,
    pub created: OffsetDateTime,
}

/// Parameterized read/write operations against the relational store.
///
/// Implementations return rows in a fixed order and hold no cache and
/// no business logic.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn fetch_questions(&self) -> Result<Vec<QuestionRow>, StoreError>;

    async fn fetch_questions_by_search(
        &self,
        search: &str,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<QuestionRow>, StoreError>;

    async fn fetch_questions_with_answers(&self) -> Result<Vec<JoinedRow>, StoreError>;

    async fn fetch_unanswered_questions(&self) -> Result<Vec<QuestionRow>, StoreError>;

    async fn fetch_question_header(&self, id: i32) -> Result<Option<QuestionRow>, StoreError>;

    async fn fetch_answers_for_question(&self, id: i32) -> Result<Vec<AnswerRow>, StoreError>;

    async fn question_exists(&self, id: i32) -> Result<bool, StoreError>;

    /// Returns the store-assigned id of the new question.
    async fn insert_question(&self, question: NewQuestion) -> Result<i32, StoreError>;

    /// Returns false when no row matched the id.
    async fn update_question(
        &self,
        id: i32,
        title: &str,
        content: &str,
    ) -> Result<bool, StoreError>;

    /// Returns false when no row matched the id.
    async fn delete_question(&self, id: i32) -> Result<bool, StoreError>;

    /// Returns the inserted row.
    async fn insert_answer(&self, answer: NewAnswer) -> Result<AnswerRow, StoreError>;
}
