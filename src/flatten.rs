//! Reconstructs nested question/answer graphs from flat store recordsets.
//!
//! Two input shapes are handled: the left-join shape where every row
//! carries the full question fields plus a nullable answer region, and
//! the recordset-pair shape where one header row and its answer rows
//! arrive from separate queries.

use std::collections::HashMap;

use thiserror::Error;

use crate::{
    domain::{Answer, Question},
    store::{AnswerRow, JoinedRow, QuestionRow},
};

#[derive(Debug, Error)]
pub enum FlattenError {
    /// A joined row had some but not all answer fields set. Only the
    /// store adapter can produce such a row, so this is fatal.
    #[error("row {row} has a partially populated answer region")]
    PartialAnswerRow { row: usize },
}

/// Flatten left-join rows into unique questions with answers attached.
///
/// Output order equals the first-occurrence order of each question id,
/// and each question's answers keep row arrival order, even when rows
/// for the same question are not contiguous. Runs in O(rows).
pub fn flatten_joined(rows: Vec<JoinedRow>) -> Result<Vec<Question>, FlattenError> {
    // id -> position in the output vec, so a question seen twice is
    // never constructed twice.
    let mut positions: HashMap<i32, usize> = HashMap::new();
    let mut questions: Vec<Question> = Vec::new();

    for (idx, row) in rows.into_iter().enumerate() {
        let position = match positions.get(&row.question_id) {
            Some(&position) => position,
            None => {
                positions.insert(row.question_id, questions.len());
                questions.push(Question {
                    question_id: row.question_id,
                    title: row.title.clone(),
                    content: row.content.clone(),
                    user_id: row.user_id.clone(),
                    user_name: row.user_name.clone(),
                    created: row.created,
                    answers: Vec::new(),
                });
                questions.len() - 1
            }
        };

        if let Some(answer) = take_answer(row, idx)? {
            questions[position].answers.push(answer);
        }
    }

    Ok(questions)
}

/// Attach separately fetched answer rows to a single question header.
///
/// Returns `None` when the header recordset was empty; the answer
/// sequence is attached verbatim, in its given order.
pub fn assemble_one(header: Option<QuestionRow>, answers: Vec<AnswerRow>) -> Option<Question> {
    let header = header?;

    Some(Question {
        question_id: header.question_id,
        title: header.title,
        content: header.content,
        user_id: header.user_id,
        user_name: header.user_name,
        created: header.created,
        answers: answers.into_iter().map(Answer::from).collect(),
    })
}

impl From<AnswerRow> for Answer {
    fn from(row: AnswerRow) -> Self {
        Answer {
            answer_id: row.answer_id,
            question_id: row.question_id,
            content: row.content,
            user_id: row.user_id,
            user_name: row.user_name,
            created: row.created,
        }
    }
}

/// Extract the answer region of a joined row.
///
/// All answer fields present yields an answer, all absent yields
/// `None` (the left-join sentinel for a question without answers),
/// anything in between is a contract violation.
fn take_answer(row: JoinedRow, idx: usize) -> Result<Option<Answer>, FlattenError> {
    match (
        row.answer_id,
        row.answer_content,
        row.answer_user_id,
        row.answer_user_name,
        row.answer_created,
    ) {
        (Some(answer_id), Some(content), Some(user_id), Some(user_name), Some(created)) => {
            Ok(Some(Answer {
                answer_id,
                question_id: row.question_id,
                content,
                user_id,
                user_name,
                created,
            }))
        }
        (None, None, None, None, None) => Ok(None),
        _ => Err(FlattenError::PartialAnswerRow { row: idx }),
    }
}
