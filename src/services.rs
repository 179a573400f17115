use std::sync::Arc;

use thiserror::Error;
use time::OffsetDateTime;

use crate::{
    cache::QuestionCache,
    domain::{Answer, Question, QuestionSummary, Title},
    flatten::{self, FlattenError},
    store::{NewAnswer, NewQuestion, QuestionRow, QuestionStore, StoreError},
};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Flatten(#[from] FlattenError),
}

/// Sequences store calls, flattening and cache population/invalidation
/// around each read and write.
///
/// Single-question reads go through the cache; list reads never do.
/// Writes hit the store first and invalidate by removal only after the
/// store confirms success, so a failed mutation leaves the cache
/// untouched. Entries are never patched in place.
pub struct QnaService {
    store: Arc<dyn QuestionStore>,
    cache: QuestionCache,
}

impl QnaService {
    pub fn new(store: Arc<dyn QuestionStore>, cache: QuestionCache) -> Self {
        Self { store, cache }
    }

    /// Read-through fetch of one question with its answers.
    ///
    /// Two concurrent misses for the same id may both hit the store;
    /// both observe a consistent store state and the later set wins.
    #[tracing::instrument(name = "services::get_question", skip(self))]
    pub async fn get_question(&self, id: i32) -> Result<Arc<Question>, ServiceError> {
        if let Some(question) = self.cache.get(id).await {
            return Ok(question);
        }

        let question = self.fetch_assembled(id).await?;
        self.cache.set(question.clone()).await;

        Ok(Arc::new(question))
    }

    #[tracing::instrument(name = "services::list_questions", skip(self))]
    pub async fn list_questions(&self) -> Result<Vec<QuestionSummary>, ServiceError> {
        let rows = self.store.fetch_questions().await?;

        Ok(rows.into_iter().map(QuestionSummary::from).collect())
    }

    #[tracing::instrument(name = "services::search_questions", skip(self))]
    pub async fn search_questions(
        &self,
        search: &str,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<QuestionSummary>, ServiceError> {
        let rows = self
            .store
            .fetch_questions_by_search(search, page, page_size)
            .await?;

        Ok(rows.into_iter().map(QuestionSummary::from).collect())
    }

    /// List every question with its answers, rebuilt from the join
    /// recordset. Never cached: the result set is large and not keyed
    /// by a single id suitable for point invalidation.
    #[tracing::instrument(name = "services::list_questions_with_answers", skip(self))]
    pub async fn list_questions_with_answers(&self) -> Result<Vec<Question>, ServiceError> {
        let rows = self.store.fetch_questions_with_answers().await?;

        Ok(flatten::flatten_joined(rows)?)
    }

    #[tracing::instrument(name = "services::list_unanswered_questions", skip(self))]
    pub async fn list_unanswered_questions(&self) -> Result<Vec<QuestionSummary>, ServiceError> {
        let rows = self.store.fetch_unanswered_questions().await?;

        Ok(rows.into_iter().map(QuestionSummary::from).collect())
    }

    /// Insert a question and return it as stored. Nothing is cached
    /// for a new id, so the cache is left alone.
    #[tracing::instrument(name = "services::create_question", skip(self, content))]
    pub async fn create_question(
        &self,
        title: Title,
        content: String,
        user_id: String,
        user_name: String,
    ) -> Result<Question, ServiceError> {
        let id = self
            .store
            .insert_question(NewQuestion {
                title: title.as_str().to_string(),
                content,
                user_id,
                user_name,
                created: OffsetDateTime::now_utc(),
            })
            .await?;

        self.fetch_assembled(id).await
    }

    /// Update a question's title and/or content, keeping the current
    /// value for whichever field is absent.
    #[tracing::instrument(name = "services::update_question", skip(self, content))]
    pub async fn update_question(
        &self,
        id: i32,
        title: Option<Title>,
        content: Option<String>,
    ) -> Result<Question, ServiceError> {
        let current = self
            .store
            .fetch_question_header(id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        let title = title
            .map(|t| t.as_str().to_string())
            .unwrap_or(current.title);
        let content = content.unwrap_or(current.content);

        let updated = self.store.update_question(id, &title, &content).await?;
        if !updated {
            // The question vanished between the header fetch and the
            // update; nothing was written, so the cache stays as is.
            return Err(ServiceError::NotFound);
        }

        // The store commit and this removal are not atomic: a reader
        // racing in between can still observe the pre-write entry.
        // See DESIGN.md for why that window is accepted.
        self.cache.remove(id).await;

        self.fetch_assembled(id).await
    }

    #[tracing::instrument(name = "services::delete_question", skip(self))]
    pub async fn delete_question(&self, id: i32) -> Result<(), ServiceError> {
        let deleted = self.store.delete_question(id).await?;
        if !deleted {
            return Err(ServiceError::NotFound);
        }

        self.cache.remove(id).await;

        Ok(())
    }

    /// Add an answer to an existing question, invalidating the cached
    /// copy of that question.
    #[tracing::instrument(name = "services::create_answer", skip(self, content))]
    pub async fn create_answer(
        &self,
        question_id: i32,
        content: String,
        user_id: String,
        user_name: String,
    ) -> Result<Answer, ServiceError> {
        if !self.store.question_exists(question_id).await? {
            return Err(ServiceError::NotFound);
        }

        let row = self
            .store
            .insert_answer(NewAnswer {
                question_id,
                content,
                user_id,
                user_name,
                created: OffsetDateTime::now_utc(),
            })
            .await?;

        self.cache.remove(question_id).await;

        Ok(Answer::from(row))
    }

    /// Fetch the header/answers recordset pair and assemble it,
    /// without touching the cache.
    async fn fetch_assembled(&self, id: i32) -> Result<Question, ServiceError> {
        let header = self.store.fetch_question_header(id).await?;
        let answers = self.store.fetch_answers_for_question(id).await?;

        flatten::assemble_one(header, answers).ok_or(ServiceError::NotFound)
    }
}

impl From<QuestionRow> for QuestionSummary {
    fn from(row: QuestionRow) -> Self {
        QuestionSummary {
            question_id: row.question_id,
            title: row.title,
            content: row.content,
            user_id: row.user_id,
            user_name: row.user_name,
            created: row.created,
        }
    }
}
