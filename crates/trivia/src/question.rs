use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crudkit_core::error::require_text;
use crudkit_core::{DomainError, DomainResult, Entity};

use crate::CategoryId;

crudkit_core::int_id!(
    /// Question identifier (database-assigned).
    QuestionId,
    "QuestionId"
);

/// Difficulty rating, 1 (easy) to 5 (hard).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Difficulty {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(DomainError::validation(format!(
                "difficulty must be between {} and {}",
                Self::MIN,
                Self::MAX
            )))
        }
    }
}

impl From<Difficulty> for i64 {
    fn from(value: Difficulty) -> Self {
        i64::from(value.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: Difficulty,
}

impl Entity for Question {
    type Id = QuestionId;

    fn id(&self) -> QuestionId {
        self.id
    }
}

/// A validated question that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: Difficulty,
}

impl NewQuestion {
    pub fn new(question: &str, answer: &str, category: CategoryId, difficulty: i64) -> DomainResult<Self> {
        Ok(Self {
            question: require_text("question", question)?,
            answer: require_text("answer", answer)?,
            category,
            difficulty: Difficulty::try_from(difficulty)?,
        })
    }

    pub fn into_question(self, id: QuestionId) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

/// Distinct categories present in `questions`, ascending.
pub fn current_categories(questions: &[Question]) -> Vec<CategoryId> {
    questions
        .iter()
        .map(|q| q.category)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
