use axum::{
    Json, Router,
    extract::{Extension, Path, State},
    routing::{delete, get, post},
};
use serde_json::{Value, json};

use crudkit_auth::Principal;
use crudkit_core::query::{filter_eq, paginate, search};
use crudkit_trivia::{
    CategoryId, QuestionId, QuizOutcome, QuizScope, category_map, current_categories, next_question,
};

use crate::app::dto::{QuestionRequest, QuizRequest, SearchRequest};
use crate::app::errors::ApiError;
use crate::app::extract::{JsonBody, Paging};
use crate::authz::guarded;
use crate::context::TriviaContext;

pub fn router(ctx: TriviaContext) -> Router {
    let jwt = ctx.jwt.clone();
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/:id/questions", get(questions_by_category))
        .route(
            "/questions",
            get(list_questions).merge(guarded(post(create_question), &jwt, "post:questions")),
        )
        .route("/questions/search", post(search_questions))
        .route(
            "/questions/:id",
            guarded(delete(delete_question), &jwt, "delete:questions"),
        )
        .route("/quizzes", post(play_quiz))
        .with_state(ctx)
}

pub async fn list_categories(State(ctx): State<TriviaContext>) -> Result<Json<Value>, ApiError> {
    let categories = ctx.store.list_categories().await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound("no categories".into()));
    }
    Ok(Json(json!({
        "success": true,
        "categories": category_map(&categories),
        "total_categories": categories.len(),
    })))
}

/// Paged question bank, easiest first.
pub async fn list_questions(
    State(ctx): State<TriviaContext>,
    Paging(page): Paging,
) -> Result<Json<Value>, ApiError> {
    let mut questions = ctx.store.list_questions().await?;
    questions.sort_by_key(|q| (q.difficulty, q.id));

    let page = paginate(questions, page);
    if page.is_empty() {
        return Err(ApiError::NotFound(format!("no questions on page {}", page.number)));
    }
    let categories = ctx.store.list_categories().await?;
    Ok(Json(json!({
        "success": true,
        "questions": page.items,
        "total_questions": page.total,
        "categories": category_map(&categories),
        "current_category": current_categories(&page.items),
    })))
}

pub async fn create_question(
    State(ctx): State<TriviaContext>,
    Extension(principal): Extension<Principal>,
    JsonBody(body): JsonBody<QuestionRequest>,
) -> Result<Json<Value>, ApiError> {
    let question = ctx.store.insert_question(body.into_new_question()?).await?;
    let total = ctx.store.list_questions().await?.len();
    tracing::info!(
        by = %principal.subject,
        question_id = %question.id,
        category = %question.category,
        "question created"
    );
    Ok(Json(json!({
        "success": true,
        "created": question.id,
        "questions": [question],
        "total_questions": total,
    })))
}

/// Case-insensitive match on the question text. No match is still a 200.
pub async fn search_questions(
    State(ctx): State<TriviaContext>,
    Paging(page): Paging,
    JsonBody(body): JsonBody<SearchRequest>,
) -> Result<Json<Value>, ApiError> {
    let term = body.term()?;
    let matches = search(ctx.store.list_questions().await?, &term, |q| q.question.as_str());
    let page = paginate(matches, page);
    Ok(Json(json!({
        "success": true,
        "questions": page.items,
        "total_questions": page.total,
        "current_category": current_categories(&page.items),
    })))
}

pub async fn questions_by_category(
    State(ctx): State<TriviaContext>,
    Path(id): Path<CategoryId>,
    Paging(page): Paging,
) -> Result<Json<Value>, ApiError> {
    if ctx.store.get_category(id).await?.is_none() {
        return Err(ApiError::NotFound(format!("category {id} not found")));
    }
    let questions = filter_eq(ctx.store.list_questions().await?, |q| q.category, &id);
    let page = paginate(questions, page);
    if page.is_empty() {
        return Err(ApiError::NotFound(format!("no questions in category {id}")));
    }
    Ok(Json(json!({
        "success": true,
        "questions": page.items,
        "total_questions": page.total,
        "current_category": current_categories(&page.items),
    })))
}

/// Deleting an absent question is unprocessable rather than not found.
pub async fn delete_question(
    State(ctx): State<TriviaContext>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<QuestionId>,
    Paging(page): Paging,
) -> Result<Json<Value>, ApiError> {
    if !ctx.store.delete_question(id).await? {
        return Err(ApiError::Unprocessable(format!("question {id} does not exist")));
    }
    tracing::info!(by = %principal.subject, question_id = %id, "question deleted");

    let page = paginate(ctx.store.list_questions().await?, page);
    Ok(Json(json!({
        "success": true,
        "deleted": id,
        "questions": page.items,
        "total_questions": page.total,
    })))
}

pub async fn play_quiz(
    State(ctx): State<TriviaContext>,
    JsonBody(body): JsonBody<QuizRequest>,
) -> Result<Json<Value>, ApiError> {
    let (category, previous) = body.into_parts()?;
    let scope = QuizScope::from_category_id(category.id);
    tracing::debug!(
        category_id = %category.id,
        category = category.kind.as_deref().unwrap_or("all"),
        seen = previous.len(),
        "quiz round"
    );

    let questions = ctx.store.list_questions().await?;
    let outcome = {
        let mut rng = rand::thread_rng();
        next_question(&questions, scope, &previous, &mut rng)
    };

    match outcome {
        QuizOutcome::Next(question) => Ok(Json(json!({ "success": true, "question": question }))),
        QuizOutcome::Finished => Ok(Json(json!({ "success": true, "question": null }))),
        QuizOutcome::NoQuestions => Err(ApiError::Unprocessable(
            "no questions available for this category".into(),
        )),
    }
}
