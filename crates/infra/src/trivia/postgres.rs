//! Postgres-backed trivia store.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::instrument;

use crudkit_trivia::{Category, CategoryId, Difficulty, NewQuestion, Question, QuestionId};

use super::{TriviaStore, unknown_category};
use crate::StoreError;

#[derive(Debug, Clone)]
pub struct PostgresTriviaStore {
    pool: PgPool,
}

impl PostgresTriviaStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

struct CategoryRow(Category);

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for CategoryRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(CategoryRow(Category {
            id: CategoryId::new(row.try_get("id")?),
            kind: row.try_get("type")?,
        }))
    }
}

struct QuestionRow(Question);

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for QuestionRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        let difficulty: i32 = row.try_get("difficulty")?;
        let difficulty = Difficulty::try_from(i64::from(difficulty)).map_err(|e| sqlx::Error::ColumnDecode {
            index: "difficulty".to_string(),
            source: Box::new(e),
        })?;
        Ok(QuestionRow(Question {
            id: QuestionId::new(row.try_get("id")?),
            question: row.try_get("question")?,
            answer: row.try_get("answer")?,
            category: CategoryId::new(row.try_get("category")?),
            difficulty,
        }))
    }
}

#[async_trait]
impl TriviaStore for PostgresTriviaStore {
    #[instrument(skip(self), err)]
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let rows: Vec<CategoryRow> = sqlx::query_as("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx("list_categories", e))?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    #[instrument(skip(self), fields(category_id = %id), err)]
    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        let row: Option<CategoryRow> = sqlx::query_as("SELECT id, type FROM categories WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx("get_category", e))?;
        Ok(row.map(|r| r.0))
    }

    #[instrument(skip(self), err)]
    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        let rows: Vec<QuestionRow> = sqlx::query_as(
            "SELECT id, question, answer, category, difficulty FROM questions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx("list_questions", e))?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    #[instrument(skip(self, question), fields(category_id = %question.category), err)]
    async fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::from_sqlx("begin_transaction", e))?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.category.get())
        .bind(i32::from(question.difficulty.get()))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match StoreError::from_sqlx("insert_question", e) {
            StoreError::MissingReference(_) => unknown_category(question.category),
            other => other,
        })?;

        tx.commit()
            .await
            .map_err(|e| StoreError::from_sqlx("commit_transaction", e))?;
        Ok(question.into_question(QuestionId::new(id)))
    }

    #[instrument(skip(self), fields(question_id = %id), err)]
    async fn delete_question(&self, id: QuestionId) -> Result<bool, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::from_sqlx("begin_transaction", e))?;
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id.get())
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::from_sqlx("delete_question", e))?;
        tx.commit()
            .await
            .map_err(|e| StoreError::from_sqlx("commit_transaction", e))?;
        Ok(result.rows_affected() > 0)
    }
}
