use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Extension, Path, State},
    routing::{delete, get, patch, post},
};
use chrono::Utc;
use serde_json::{Value, json};

use crudkit_auth::Principal;
use crudkit_core::query::{paginate, search};
use crudkit_venues::views::upcoming_counts;
use crudkit_venues::{SearchHit, VenueDetail, VenueFields, VenueId, VenuePatch, group_into_areas};

use crate::app::dto::SearchRequest;
use crate::app::errors::ApiError;
use crate::app::extract::{JsonBody, Paging};
use crate::authz::guarded;
use crate::context::BookingContext;

pub fn router(ctx: BookingContext) -> Router {
    let jwt = ctx.jwt.clone();
    Router::new()
        .route(
            "/venues",
            get(list_venues).merge(guarded(post(create_venue), &jwt, "post:venues")),
        )
        .route("/venues/search", post(search_venues))
        .route(
            "/venues/:id",
            get(get_venue)
                .merge(guarded(patch(update_venue), &jwt, "patch:venues"))
                .merge(guarded(delete(delete_venue), &jwt, "delete:venues")),
        )
        .with_state(ctx)
}

fn venue_not_found(id: VenueId) -> ApiError {
    ApiError::NotFound(format!("venue {id} not found"))
}

/// Venues grouped by (city, state), each with its upcoming show count.
pub async fn list_venues(State(ctx): State<BookingContext>) -> Result<Json<Value>, ApiError> {
    let venues = ctx.store.list_venues().await?;
    if venues.is_empty() {
        return Err(ApiError::NotFound("no venues listed yet".into()));
    }
    let total = venues.len();
    let shows = ctx.store.list_shows().await?;
    let areas = group_into_areas(venues, &shows, Utc::now());
    Ok(Json(json!({ "success": true, "areas": areas, "total_venues": total })))
}

pub async fn search_venues(
    State(ctx): State<BookingContext>,
    Paging(page): Paging,
    JsonBody(body): JsonBody<SearchRequest>,
) -> Result<Json<Value>, ApiError> {
    let term = body.term()?;
    let venues = ctx.store.list_venues().await?;
    let shows = ctx.store.list_shows().await?;
    let counts = upcoming_counts(&shows, Utc::now(), |s| s.venue_id);

    let matches = search(venues, &term, |v| v.fields.name.as_str());
    let page = paginate(matches, page);
    let data: Vec<_> = page.items.iter().map(|v| SearchHit::venue(v, &counts)).collect();
    Ok(Json(json!({ "success": true, "count": page.total, "data": data })))
}

pub async fn get_venue(
    State(ctx): State<BookingContext>,
    Path(id): Path<VenueId>,
) -> Result<Json<Value>, ApiError> {
    let venue = ctx.store.get_venue(id).await?.ok_or_else(|| venue_not_found(id))?;
    let shows = ctx.store.list_shows().await?;
    let artists: HashMap<_, _> = ctx
        .store
        .list_artists()
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();
    let detail = VenueDetail::build(venue, &shows, &artists, Utc::now());
    Ok(Json(json!({ "success": true, "venue": detail })))
}

pub async fn create_venue(
    State(ctx): State<BookingContext>,
    Extension(principal): Extension<Principal>,
    JsonBody(fields): JsonBody<VenueFields>,
) -> Result<Json<Value>, ApiError> {
    let venue = ctx.store.insert_venue(fields.validated()?).await?;
    tracing::info!(
        by = %principal.subject,
        venue_id = %venue.id,
        name = %venue.fields.name,
        "venue listed"
    );
    Ok(Json(json!({ "success": true, "venues": [venue] })))
}

pub async fn update_venue(
    State(ctx): State<BookingContext>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<VenueId>,
    JsonBody(patch): JsonBody<VenuePatch>,
) -> Result<Json<Value>, ApiError> {
    let venue = ctx
        .store
        .update_venue(id, patch)
        .await?
        .ok_or_else(|| venue_not_found(id))?;
    tracing::info!(by = %principal.subject, venue_id = %id, "venue updated");
    Ok(Json(json!({ "success": true, "venues": [venue] })))
}

pub async fn delete_venue(
    State(ctx): State<BookingContext>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<VenueId>,
) -> Result<Json<Value>, ApiError> {
    if !ctx.store.delete_venue(id).await? {
        return Err(venue_not_found(id));
    }
    tracing::info!(by = %principal.subject, venue_id = %id, "venue deleted");
    Ok(Json(json!({ "success": true, "deleted": id })))
}
