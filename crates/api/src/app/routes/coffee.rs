use axum::{
    Json, Router,
    extract::{Extension, Path, State},
    routing::{delete, get, patch, post},
};
use serde_json::{Value, json};

use crudkit_auth::Principal;
use crudkit_coffee::{Drink, DrinkId};

use crate::app::dto::DrinkRequest;
use crate::app::errors::ApiError;
use crate::app::extract::JsonBody;
use crate::authz::guarded;
use crate::context::CoffeeContext;

pub fn router(ctx: CoffeeContext) -> Router {
    let jwt = ctx.jwt.clone();
    Router::new()
        .route(
            "/drinks",
            get(list_drinks).merge(guarded(post(create_drink), &jwt, "post:drinks")),
        )
        .route(
            "/drinks-detail",
            guarded(get(list_drinks_detail), &jwt, "get:drinks-detail"),
        )
        .route(
            "/drinks/:id",
            guarded(patch(update_drink), &jwt, "patch:drinks")
                .merge(guarded(delete(delete_drink), &jwt, "delete:drinks")),
        )
        .with_state(ctx)
}

fn drink_not_found(id: DrinkId) -> ApiError {
    ApiError::NotFound(format!("drink {id} not found"))
}

/// Public menu: short form (colors and parts only).
pub async fn list_drinks(State(ctx): State<CoffeeContext>) -> Result<Json<Value>, ApiError> {
    let drinks = ctx.drinks.list().await?;
    let drinks: Vec<_> = drinks.iter().map(Drink::short).collect();
    Ok(Json(json!({ "success": true, "drinks": drinks })))
}

pub async fn list_drinks_detail(State(ctx): State<CoffeeContext>) -> Result<Json<Value>, ApiError> {
    let drinks = ctx.drinks.list().await?;
    Ok(Json(json!({ "success": true, "drinks": drinks })))
}

pub async fn create_drink(
    State(ctx): State<CoffeeContext>,
    Extension(principal): Extension<Principal>,
    JsonBody(body): JsonBody<DrinkRequest>,
) -> Result<Json<Value>, ApiError> {
    let drink = ctx.drinks.insert(body.into_new_drink()?).await?;
    tracing::info!(
        by = %principal.subject,
        drink_id = %drink.id,
        title = %drink.title,
        "drink created"
    );
    Ok(Json(json!({ "success": true, "drinks": [drink] })))
}

pub async fn update_drink(
    State(ctx): State<CoffeeContext>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<DrinkId>,
    JsonBody(body): JsonBody<DrinkRequest>,
) -> Result<Json<Value>, ApiError> {
    let patch = body.into_patch()?;
    let drink = ctx
        .drinks
        .update(id, patch)
        .await?
        .ok_or_else(|| drink_not_found(id))?;
    tracing::info!(by = %principal.subject, drink_id = %id, "drink updated");
    Ok(Json(json!({ "success": true, "drinks": [drink] })))
}

pub async fn delete_drink(
    State(ctx): State<CoffeeContext>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<DrinkId>,
) -> Result<Json<Value>, ApiError> {
    if !ctx.drinks.delete(id).await? {
        return Err(drink_not_found(id));
    }
    tracing::info!(by = %principal.subject, drink_id = %id, "drink deleted");
    Ok(Json(json!({ "success": true, "deleted": id })))
}
