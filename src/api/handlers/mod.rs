mod answers;
mod questions;

pub(crate) use answers::create_answer;
pub(crate) use questions::{
    create_question, delete_question, get_question, list_questions, list_unanswered_questions,
    update_question,
};

pub use answers::CreateAnswerRequest;
pub use questions::{CreateQuestionRequest, ListParams, UpdateQuestionRequest};
