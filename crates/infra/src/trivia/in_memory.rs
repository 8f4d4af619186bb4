use std::sync::RwLock;

use async_trait::async_trait;

use crudkit_trivia::{Category, CategoryId, NewQuestion, Question, QuestionId};

use super::{DEFAULT_CATEGORIES, TriviaStore, unknown_category};
use crate::StoreError;
use crate::memory::{Table, poisoned};

#[derive(Debug, Default)]
struct Tables {
    categories: Table<Category>,
    questions: Table<Question>,
}

/// In-memory trivia store.
#[derive(Debug, Default)]
pub struct InMemoryTriviaStore {
    tables: RwLock<Tables>,
}

impl InMemoryTriviaStore {
    /// An empty store with no categories.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding [`DEFAULT_CATEGORIES`] and no questions.
    pub fn seeded() -> Self {
        Self::with_categories(DEFAULT_CATEGORIES)
    }

    pub fn with_categories<I, S>(kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut categories = Table::default();
        for kind in kinds {
            let id = categories.next_id();
            categories.insert(
                id,
                Category {
                    id: CategoryId::new(id),
                    kind: kind.into(),
                },
            );
        }
        Self {
            tables: RwLock::new(Tables {
                categories,
                questions: Table::default(),
            }),
        }
    }
}

#[async_trait]
impl TriviaStore for InMemoryTriviaStore {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.tables.read().map_err(poisoned)?.categories.snapshot())
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        Ok(self.tables.read().map_err(poisoned)?.categories.get(id.get()).cloned())
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        Ok(self.tables.read().map_err(poisoned)?.questions.snapshot())
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        if !tables.categories.contains(question.category.get()) {
            return Err(unknown_category(question.category));
        }
        let id = tables.questions.next_id();
        let question = question.into_question(QuestionId::new(id));
        tables.questions.insert(id, question.clone());
        Ok(question)
    }

    async fn delete_question(&self, id: QuestionId) -> Result<bool, StoreError> {
        Ok(self
            .tables
            .write()
            .map_err(poisoned)?
            .questions
            .remove(id.get())
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_store_has_the_default_categories() {
        let store = InMemoryTriviaStore::seeded();
        let cats = store.list_categories().await.unwrap();
        assert_eq!(cats.len(), DEFAULT_CATEGORIES.len());
        assert_eq!(cats[0].id, CategoryId::new(1));
        assert_eq!(cats[0].kind, "Science");
        assert_eq!(
            store.get_category(CategoryId::new(6)).await.unwrap().unwrap().kind,
            "Sports"
        );
    }

    #[tokio::test]
    async fn question_in_unknown_category_is_rejected() {
        let store = InMemoryTriviaStore::seeded();
        let q = NewQuestion::new("What is 2 + 2?", "4", CategoryId::new(42), 1).unwrap();
        assert!(matches!(
            store.insert_question(q).await,
            Err(StoreError::MissingReference(_))
        ));
    }

    #[tokio::test]
    async fn insert_then_delete() {
        let store = InMemoryTriviaStore::seeded();
        let q = NewQuestion::new("What is 2 + 2?", "4", CategoryId::new(1), 1).unwrap();
        let stored = store.insert_question(q).await.unwrap();
        assert_eq!(store.list_questions().await.unwrap(), vec![stored.clone()]);
        assert!(store.delete_question(stored.id).await.unwrap());
        assert!(!store.delete_question(stored.id).await.unwrap());
        assert!(store.list_questions().await.unwrap().is_empty());
    }
}
