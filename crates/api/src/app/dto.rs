//! Request DTOs and the checks that turn them into domain inputs.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crudkit_coffee::{DrinkPatch, NewDrink, RecipeInput};
use crudkit_core::PageNumber;
use crudkit_trivia::{CategoryId, NewQuestion, QuestionId};
use crudkit_venues::{ArtistId, NewShow, VenueId};

use crate::app::errors::ApiError;

fn required<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::BadRequest(format!("{field} is required")))
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: PageNumber,
}

/// Body for `POST /drinks` and `PATCH /drinks/:id`.
#[derive(Debug, Default, Deserialize)]
pub struct DrinkRequest {
    pub title: Option<String>,
    pub recipe: Option<RecipeInput>,
}

impl DrinkRequest {
    pub fn into_new_drink(self) -> Result<NewDrink, ApiError> {
        let title = required(self.title, "title")?;
        let recipe = required(self.recipe, "recipe")?;
        Ok(NewDrink::new(&title, recipe.into_vec())?)
    }

    pub fn into_patch(self) -> Result<DrinkPatch, ApiError> {
        Ok(DrinkPatch::new(
            self.title.as_deref(),
            self.recipe.map(RecipeInput::into_vec),
        )?)
    }
}

/// Free-text search body. Accepts both `search_term` and `searchTerm`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(alias = "searchTerm")]
    pub search_term: Option<String>,
}

impl SearchRequest {
    pub fn term(self) -> Result<String, ApiError> {
        required(self.search_term, "search_term")
    }
}

#[derive(Debug, Deserialize)]
pub struct ShowRequest {
    pub artist_id: Option<ArtistId>,
    pub venue_id: Option<VenueId>,
    /// RFC 3339; defaults to now.
    pub start_time: Option<DateTime<Utc>>,
}

impl ShowRequest {
    pub fn into_new_show(self, now: DateTime<Utc>) -> Result<NewShow, ApiError> {
        Ok(NewShow {
            artist_id: required(self.artist_id, "artist_id")?,
            venue_id: required(self.venue_id, "venue_id")?,
            start_time: self.start_time.unwrap_or(now),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<CategoryId>,
    pub difficulty: Option<i64>,
}

impl QuestionRequest {
    pub fn into_new_question(self) -> Result<NewQuestion, ApiError> {
        let question = required(self.question, "question")?;
        let answer = required(self.answer, "answer")?;
        let category = required(self.category, "category")?;
        let difficulty = required(self.difficulty, "difficulty")?;
        Ok(NewQuestion::new(&question, &answer, category, difficulty)?)
    }
}

#[derive(Debug, Deserialize)]
pub struct QuizCategory {
    pub id: CategoryId,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub quiz_category: Option<QuizCategory>,
    pub previous_questions: Option<Vec<QuestionId>>,
}

impl QuizRequest {
    pub fn into_parts(self) -> Result<(QuizCategory, Vec<QuestionId>), ApiError> {
        Ok((
            required(self.quiz_category, "quiz_category")?,
            required(self.previous_questions, "previous_questions")?,
        ))
    }
}
