mod answer;
mod question;
mod title;

pub use answer::Answer;
pub use question::{Question, QuestionSummary};
pub use title::{MAX_TITLE_LENGTH, Title, TitleParseError};
