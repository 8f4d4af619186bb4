//! Quiz play: hand out one question the player has not seen yet.

use std::collections::HashSet;

use rand::Rng;

use crudkit_core::query::{Pick, pick_unseen};

use crate::{CategoryId, Question, QuestionId};

/// Which questions a quiz draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Category(CategoryId),
}

impl QuizScope {
    /// Category id `0` means "all categories".
    pub fn from_category_id(id: CategoryId) -> Self {
        if id.get() == 0 {
            Self::All
        } else {
            Self::Category(id)
        }
    }

    pub fn includes(&self, question: &Question) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => question.category == *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizOutcome {
    Next(Question),
    /// The player has seen every question in scope.
    Finished,
    /// Nothing in scope to play (e.g. an unknown or empty category).
    NoQuestions,
}

/// Pick the next question within `scope` that is not in `previous`.
pub fn next_question<R>(
    questions: &[Question],
    scope: QuizScope,
    previous: &[QuestionId],
    rng: &mut R,
) -> QuizOutcome
where
    R: Rng + ?Sized,
{
    let pool: Vec<Question> = questions.iter().filter(|q| scope.includes(q)).cloned().collect();
    let seen: HashSet<QuestionId> = previous.iter().copied().collect();

    match pick_unseen(&pool, &seen, rng) {
        Pick::Selected(q) => QuizOutcome::Next(q.clone()),
        Pick::Exhausted => QuizOutcome::Finished,
        Pick::EmptyPool => QuizOutcome::NoQuestions,
    }
}
