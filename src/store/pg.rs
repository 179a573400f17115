use async_trait::async_trait;
use sqlx::PgPool;

use crate::store::{
    AnswerRow, JoinedRow, NewAnswer, NewQuestion, QuestionRow, QuestionStore, StoreError,
};

const QUESTION_COLUMNS: &str = "question_id, title, content, user_id, user_name, created";
const ANSWER_COLUMNS: &str = "answer_id, question_id, content, user_id, user_name, created";

/// Store adapter backed by Postgres.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionStore for PgStore {
    #[tracing::instrument(name = "store::fetch_questions", skip(self))]
    async fn fetch_questions(&self) -> Result<Vec<QuestionRow>, StoreError> {
        let rows = sqlx::query_as::<_, QuestionRow>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions ORDER BY question_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(name = "store::fetch_questions_by_search", skip(self))]
    async fn fetch_questions_by_search(
        &self,
        search: &str,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<QuestionRow>, StoreError> {
        let pattern = format!("%{search}%");
        let offset = (page.max(1) - 1) * page_size;

        let rows = sqlx::query_as::<_, QuestionRow>(&format!(
            r#"
            SELECT {QUESTION_COLUMNS}
            FROM questions
            WHERE title ILIKE $1 OR content ILIKE $1
            ORDER BY question_id
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(&pattern)
        .bind(page_size)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(name = "store::fetch_questions_with_answers", skip(self))]
    async fn fetch_questions_with_answers(&self) -> Result<Vec<JoinedRow>, StoreError> {
        // Answer columns are aliased so the sentinel region of the left
        // join decodes into the Option fields of JoinedRow.
        let rows = sqlx::query_as::<_, JoinedRow>(
            r#"
            SELECT
                q.question_id, q.title, q.content, q.user_id, q.user_name, q.created,
                a.answer_id,
                a.content AS answer_content,
                a.user_id AS answer_user_id,
                a.user_name AS answer_user_name,
                a.created AS answer_created
            FROM questions q
            LEFT JOIN answers a ON a.question_id = q.question_id
            ORDER BY q.question_id, a.answer_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(name = "store::fetch_unanswered_questions", skip(self))]
    async fn fetch_unanswered_questions(&self) -> Result<Vec<QuestionRow>, StoreError> {
        let rows = sqlx::query_as::<_, QuestionRow>(&format!(
            r#"
            SELECT {QUESTION_COLUMNS}
            FROM questions q
            WHERE NOT EXISTS (
                SELECT 1 FROM answers a WHERE a.question_id = q.question_id
            )
            ORDER BY question_id
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(name = "store::fetch_question_header", skip(self))]
    async fn fetch_question_header(&self, id: i32) -> Result<Option<QuestionRow>, StoreError> {
        let row = sqlx::query_as::<_, QuestionRow>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE question_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(name = "store::fetch_answers_for_question", skip(self))]
    async fn fetch_answers_for_question(&self, id: i32) -> Result<Vec<AnswerRow>, StoreError> {
        let rows = sqlx::query_as::<_, AnswerRow>(&format!(
            r#"
            SELECT {ANSWER_COLUMNS}
            FROM answers
            WHERE question_id = $1
            ORDER BY answer_id
            "#
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(name = "store::question_exists", skip(self))]
    async fn question_exists(&self, id: i32) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM questions WHERE question_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    #[tracing::instrument(name = "store::insert_question", skip(self, question))]
    async fn insert_question(&self, question: NewQuestion) -> Result<i32, StoreError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO questions (title, content, user_id, user_name, created)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING question_id
            "#,
        )
        .bind(&question.title)
        .bind(&question.content)
        .bind(&question.user_id)
        .bind(&question.user_name)
        .bind(question.created)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    #[tracing::instrument(name = "store::update_question", skip(self, title, content))]
    async fn update_question(
        &self,
        id: i32,
        title: &str,
        content: &str,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE questions
            SET title = $2, content = $3
            WHERE question_id = $1
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(content)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(name = "store::delete_question", skip(self))]
    async fn delete_question(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM questions WHERE question_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(name = "store::insert_answer", skip(self, answer))]
    async fn insert_answer(&self, answer: NewAnswer) -> Result<AnswerRow, StoreError> {
        let row = sqlx::query_as::<_, AnswerRow>(&format!(
            r#"
            INSERT INTO answers (question_id, content, user_id, user_name, created)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ANSWER_COLUMNS}
            "#
        ))
        .bind(answer.question_id)
        .bind(&answer.content)
        .bind(&answer.user_id)
        .bind(&answer.user_name)
        .bind(answer.created)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
