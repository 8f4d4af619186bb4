//! `crudkit-trivia` — trivia questions, their categories and quiz play.

pub mod category;
pub mod question;
pub mod quiz;

pub use category::{Category, CategoryId, category_map};
pub use question::{Difficulty, NewQuestion, Question, QuestionId, current_categories};
pub use quiz::{QuizOutcome, QuizScope, next_question};
