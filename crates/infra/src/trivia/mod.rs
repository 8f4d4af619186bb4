//! Question and category persistence for the trivia app.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryTriviaStore;
pub use postgres::PostgresTriviaStore;

use async_trait::async_trait;

use crudkit_trivia::{Category, CategoryId, NewQuestion, Question, QuestionId};

use crate::StoreError;

/// Categories every trivia database starts with, in id order.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

/// Trivia tables boundary. Categories are read-only.
#[async_trait]
pub trait TriviaStore: Send + Sync {
    /// Every category, ordered by id.
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;
    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StoreError>;

    /// Every question, ordered by id.
    async fn list_questions(&self) -> Result<Vec<Question>, StoreError>;

    /// An unknown category is a `MissingReference`.
    async fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError>;

    /// `false` if the question did not exist.
    async fn delete_question(&self, id: QuestionId) -> Result<bool, StoreError>;
}

pub(crate) fn unknown_category(id: CategoryId) -> StoreError {
    StoreError::MissingReference(format!("category {id} does not exist"))
}
