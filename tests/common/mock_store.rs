use std::sync::Mutex;

use async_trait::async_trait;
use qna_service::store::{
    AnswerRow, JoinedRow, NewAnswer, NewQuestion, QuestionRow, QuestionStore, StoreError,
};
use time::OffsetDateTime;

#[derive(Default)]
struct Inner {
    questions: Vec<QuestionRow>,
    answers: Vec<AnswerRow>,
    next_question_id: i32,
    next_answer_id: i32,
    header_fetches: u32,
    question_list_fetches: u32,
    should_fail: bool,
}

/// In-memory stand-in for the Postgres store, with a failure switch
/// and fetch counters so tests can tell cache hits from store hits.
pub struct MockStore {
    inner: Mutex<Inner>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_question_id: 1,
                next_answer_id: 1,
                ..Inner::default()
            }),
        }
    }

    /// Insert a question directly, bypassing the service layer.
    pub fn seed_question(&self, title: &str, content: &str) -> i32 {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_question_id;
        inner.next_question_id += 1;
        inner.questions.push(QuestionRow {
            question_id: id,
            title: title.to_string(),
            content: content.to_string(),
            user_id: "seed-user".to_string(),
            user_name: "Seed User".to_string(),
            created: OffsetDateTime::now_utc(),
        });
        id
    }

    /// Insert an answer directly, bypassing the service layer.
    pub fn seed_answer(&self, question_id: i32, content: &str) -> i32 {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_answer_id;
        inner.next_answer_id += 1;
        inner.answers.push(AnswerRow {
            answer_id: id,
            question_id,
            content: content.to_string(),
            user_id: "seed-user".to_string(),
            user_name: "Seed User".to_string(),
            created: OffsetDateTime::now_utc(),
        });
        id
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.inner.lock().unwrap().should_fail = should_fail;
    }

    /// How many times a single question header has been fetched.
    pub fn header_fetches(&self) -> u32 {
        self.inner.lock().unwrap().header_fetches
    }

    /// How many times the question list has been fetched.
    pub fn question_list_fetches(&self) -> u32 {
        self.inner.lock().unwrap().question_list_fetches
    }

    fn check_failure(inner: &Inner) -> Result<(), StoreError> {
        if inner.should_fail {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl QuestionStore for MockStore {
    async fn fetch_questions(&self) -> Result<Vec<QuestionRow>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_failure(&inner)?;
        inner.question_list_fetches += 1;
        Ok(inner.questions.clone())
    }

    async fn fetch_questions_by_search(
        &self,
        search: &str,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<QuestionRow>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Self::check_failure(&inner)?;
        let needle = search.to_lowercase();
        let offset = ((page.max(1) - 1) * page_size) as usize;
        Ok(inner
            .questions
            .iter()
            .filter(|q| {
                q.title.to_lowercase().contains(&needle)
                    || q.content.to_lowercase().contains(&needle)
            })
            .skip(offset)
            .take(page_size as usize)
            .cloned()
            .collect())
    }

    async fn fetch_questions_with_answers(&self) -> Result<Vec<JoinedRow>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Self::check_failure(&inner)?;

        let mut rows = Vec::new();
        for question in &inner.questions {
            let answers: Vec<&AnswerRow> = inner
                .answers
                .iter()
                .filter(|a| a.question_id == question.question_id)
                .collect();

            if answers.is_empty() {
                // Left-join sentinel row.
                rows.push(JoinedRow {
                    question_id: question.question_id,
                    title: question.title.clone(),
                    content: question.content.clone(),
                    user_id: question.user_id.clone(),
                    user_name: question.user_name.clone(),
                    created: question.created,
                    answer_id: None,
                    answer_content: None,
                    answer_user_id: None,
                    answer_user_name: None,
                    answer_created: None,
                });
                continue;
            }

            for answer in answers {
                rows.push(JoinedRow {
                    question_id: question.question_id,
                    title: question.title.clone(),
                    content: question.content.clone(),
                    user_id: question.user_id.clone(),
                    user_name: question.user_name.clone(),
                    created: question.created,
                    answer_id: Some(answer.answer_id),
                    answer_content: Some(answer.content.clone()),
                    answer_user_id: Some(answer.user_id.clone()),
                    answer_user_name: Some(answer.user_name.clone()),
                    answer_created: Some(answer.created),
                });
            }
        }

        Ok(rows)
    }

    async fn fetch_unanswered_questions(&self) -> Result<Vec<QuestionRow>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Self::check_failure(&inner)?;
        Ok(inner
            .questions
            .iter()
            .filter(|q| {
                !inner
                    .answers
                    .iter()
                    .any(|a| a.question_id == q.question_id)
            })
            .cloned()
            .collect())
    }

    async fn fetch_question_header(&self, id: i32) -> Result<Option<QuestionRow>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_failure(&inner)?;
        inner.header_fetches += 1;
        Ok(inner
            .questions
            .iter()
            .find(|q| q.question_id == id)
            .cloned())
    }

    async fn fetch_answers_for_question(&self, id: i32) -> Result<Vec<AnswerRow>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Self::check_failure(&inner)?;
        Ok(inner
            .answers
            .iter()
            .filter(|a| a.question_id == id)
            .cloned()
            .collect())
    }

    async fn question_exists(&self, id: i32) -> Result<bool, StoreError> {
        let inner = self.inner.lock().unwrap();
        Self::check_failure(&inner)?;
        Ok(inner.questions.iter().any(|q| q.question_id == id))
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<i32, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_failure(&inner)?;
        let id = inner.next_question_id;
        inner.next_question_id += 1;
        inner.questions.push(QuestionRow {
            question_id: id,
            title: question.title,
            content: question.content,
            user_id: question.user_id,
            user_name: question.user_name,
            created: question.created,
        });
        Ok(id)
    }

    async fn update_question(
        &self,
        id: i32,
        title: &str,
        content: &str,
    ) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_failure(&inner)?;
        match inner.questions.iter_mut().find(|q| q.question_id == id) {
            Some(question) => {
                question.title = title.to_string();
                question.content = content.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_question(&self, id: i32) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_failure(&inner)?;
        let before = inner.questions.len();
        inner.questions.retain(|q| q.question_id != id);
        inner.answers.retain(|a| a.question_id != id);
        Ok(inner.questions.len() < before)
    }

    async fn insert_answer(&self, answer: NewAnswer) -> Result<AnswerRow, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_failure(&inner)?;
        let id = inner.next_answer_id;
        inner.next_answer_id += 1;
        let row = AnswerRow {
            answer_id: id,
            question_id: answer.question_id,
            content: answer.content,
            user_id: answer.user_id,
            user_name: answer.user_name,
            created: answer.created,
        };
        inner.answers.push(row.clone());
        Ok(row)
    }
}
