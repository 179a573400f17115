use serde::Serialize;
use time::OffsetDateTime;

/// An answer belonging to one question.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub answer_id: i32,
    pub question_id: i32,
    pub content: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
}
