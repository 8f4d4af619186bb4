use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Extension, State},
    routing::{get, post},
};
use chrono::Utc;
use serde_json::{Value, json};

use crudkit_auth::Principal;
use crudkit_core::query::paginate;
use crudkit_venues::ShowListing;

use crate::app::dto::ShowRequest;
use crate::app::errors::ApiError;
use crate::app::extract::{JsonBody, Paging};
use crate::authz::guarded;
use crate::context::BookingContext;

pub fn router(ctx: BookingContext) -> Router {
    let jwt = ctx.jwt.clone();
    Router::new()
        .route(
            "/shows",
            get(list_shows).merge(guarded(post(create_show), &jwt, "post:shows")),
        )
        .with_state(ctx)
}

/// Shows with their venue and artist names, latest first.
pub async fn list_shows(
    State(ctx): State<BookingContext>,
    Paging(page): Paging,
) -> Result<Json<Value>, ApiError> {
    let page = paginate(ctx.store.list_shows().await?, page);
    if page.is_empty() {
        return Err(ApiError::NotFound(format!("no shows on page {}", page.number)));
    }

    let venues: HashMap<_, _> = ctx
        .store
        .list_venues()
        .await?
        .into_iter()
        .map(|v| (v.id, v))
        .collect();
    let artists: HashMap<_, _> = ctx
        .store
        .list_artists()
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    let shows: Vec<_> = page
        .items
        .iter()
        .filter_map(|s| {
            let venue = venues.get(&s.venue_id)?;
            let artist = artists.get(&s.artist_id)?;
            Some(ShowListing::new(s, venue, artist))
        })
        .collect();
    Ok(Json(json!({ "success": true, "shows": shows, "total_shows": page.total })))
}

pub async fn create_show(
    State(ctx): State<BookingContext>,
    Extension(principal): Extension<Principal>,
    JsonBody(body): JsonBody<ShowRequest>,
) -> Result<Json<Value>, ApiError> {
    let show = ctx.store.insert_show(body.into_new_show(Utc::now())?).await?;
    tracing::info!(
        by = %principal.subject,
        show_id = %show.id,
        artist_id = %show.artist_id,
        venue_id = %show.venue_id,
        "show listed"
    );
    Ok(Json(json!({ "success": true, "shows": [show] })))
}
