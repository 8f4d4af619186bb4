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
use crudkit_venues::{ArtistDetail, ArtistFields, ArtistId, ArtistPatch, SearchHit};

use crate::app::dto::SearchRequest;
use crate::app::errors::ApiError;
use crate::app::extract::{JsonBody, Paging};
use crate::authz::guarded;
use crate::context::BookingContext;

pub fn router(ctx: BookingContext) -> Router {
    let jwt = ctx.jwt.clone();
    Router::new()
        .route(
            "/artists",
            get(list_artists).merge(guarded(post(create_artist), &jwt, "post:artists")),
        )
        .route("/artists/search", post(search_artists))
        .route(
            "/artists/:id",
            get(get_artist)
                .merge(guarded(patch(update_artist), &jwt, "patch:artists"))
                .merge(guarded(delete(delete_artist), &jwt, "delete:artists")),
        )
        .with_state(ctx)
}

fn artist_not_found(id: ArtistId) -> ApiError {
    ApiError::NotFound(format!("artist {id} not found"))
}

pub async fn list_artists(
    State(ctx): State<BookingContext>,
    Paging(page): Paging,
) -> Result<Json<Value>, ApiError> {
    let page = paginate(ctx.store.list_artists().await?, page);
    if page.is_empty() {
        return Err(ApiError::NotFound(format!("no artists on page {}", page.number)));
    }
    let artists: Vec<_> = page
        .items
        .iter()
        .map(|a| json!({ "id": a.id, "name": a.fields.name }))
        .collect();
    Ok(Json(json!({ "success": true, "artists": artists, "total_artists": page.total })))
}

pub async fn search_artists(
    State(ctx): State<BookingContext>,
    Paging(page): Paging,
    JsonBody(body): JsonBody<SearchRequest>,
) -> Result<Json<Value>, ApiError> {
    let term = body.term()?;
    let artists = ctx.store.list_artists().await?;
    let shows = ctx.store.list_shows().await?;
    let counts = upcoming_counts(&shows, Utc::now(), |s| s.artist_id);

    let page = paginate(search(artists, &term, |a| a.fields.name.as_str()), page);
    let data: Vec<_> = page.items.iter().map(|a| SearchHit::artist(a, &counts)).collect();
    Ok(Json(json!({ "success": true, "count": page.total, "data": data })))
}

pub async fn get_artist(
    State(ctx): State<BookingContext>,
    Path(id): Path<ArtistId>,
) -> Result<Json<Value>, ApiError> {
    let artist = ctx.store.get_artist(id).await?.ok_or_else(|| artist_not_found(id))?;
    let shows = ctx.store.list_shows().await?;
    let venues: HashMap<_, _> = ctx
        .store
        .list_venues()
        .await?
        .into_iter()
        .map(|v| (v.id, v))
        .collect();
    let detail = ArtistDetail::build(artist, &shows, &venues, Utc::now());
    Ok(Json(json!({ "success": true, "artist": detail })))
}

pub async fn create_artist(
    State(ctx): State<BookingContext>,
    Extension(principal): Extension<Principal>,
    JsonBody(fields): JsonBody<ArtistFields>,
) -> Result<Json<Value>, ApiError> {
    let artist = ctx.store.insert_artist(fields.validated()?).await?;
    tracing::info!(
        by = %principal.subject,
        artist_id = %artist.id,
        name = %artist.fields.name,
        "artist listed"
    );
    Ok(Json(json!({ "success": true, "artists": [artist] })))
}

pub async fn update_artist(
    State(ctx): State<BookingContext>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<ArtistId>,
    JsonBody(patch): JsonBody<ArtistPatch>,
) -> Result<Json<Value>, ApiError> {
    let artist = ctx
        .store
        .update_artist(id, patch)
        .await?
        .ok_or_else(|| artist_not_found(id))?;
    tracing::info!(by = %principal.subject, artist_id = %id, "artist updated");
    Ok(Json(json!({ "success": true, "artists": [artist] })))
}

pub async fn delete_artist(
    State(ctx): State<BookingContext>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<ArtistId>,
) -> Result<Json<Value>, ApiError> {
    if !ctx.store.delete_artist(id).await? {
        return Err(artist_not_found(id));
    }
    tracing::info!(by = %principal.subject, artist_id = %id, "artist deleted");
    Ok(Json(json!({ "success": true, "deleted": id })))
}
