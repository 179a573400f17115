use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::Answer;

/// A fully assembled question with its answers attached.
///
/// Answers keep the row order the store returned them in; a question
/// without answers carries an empty vec, never a sentinel entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question_id: i32,
    pub title: String,
    pub content: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    pub answers: Vec<Answer>,
}

/// List-shaped projection of a question, without answers.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummary {
    pub question_id: i32,
    pub title: String,
    pub content: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
}
