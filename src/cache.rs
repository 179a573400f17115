use std::{sync::Arc, time::Duration};

use moka::future::Cache;

use crate::domain::Question;

/// Process-wide cache of fully assembled questions.
///
/// Entries expire a fixed window after the last `set`; `get` never
/// extends the window and never returns an expired entry. The store
/// stays the source of truth, so losing an entry at any point only
/// costs a re-fetch.
#[derive(Clone)]
pub struct QuestionCache {
    inner: Cache<i32, Arc<Question>>,
}

impl QuestionCache {
    pub fn new(ttl: Duration, capacity: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();

        Self { inner }
    }

    pub async fn get(&self, id: i32) -> Option<Arc<Question>> {
        self.inner.get(&id).await
    }

    /// Inserts or replaces the entry for the question's id, resetting
    /// its expiration window.
    pub async fn set(&self, question: Question) {
        self.inner
            .insert(question.question_id, Arc::new(question))
            .await;
    }

    /// Unconditionally drops the entry; a no-op when absent.
    pub async fn remove(&self, id: i32) {
        self.inner.invalidate(&id).await;
    }
}
