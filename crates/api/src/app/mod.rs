//! HTTP application wiring: one router per app.
//!
//! - `routes/`: handlers, one file per resource
//! - `dto.rs`: request bodies and their checks
//! - `extract.rs`: extractors that fail with the JSON envelope
//! - `errors.rs`: the envelope and error mapping

use axum::{Router, routing::get};
use tower::ServiceBuilder;

use crate::context::{BookingContext, CoffeeContext, TriviaContext};
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod extract;
pub mod routes;

/// Coffee-shop router: `/drinks`, `/drinks-detail`, `/drinks/:id`.
pub fn coffee_app(ctx: CoffeeContext) -> Router {
    finish(routes::coffee::router(ctx))
}

/// Fyyur router: venues, artists and shows.
pub fn fyyur_app(ctx: BookingContext) -> Router {
    let router = routes::venues::router(ctx.clone())
        .merge(routes::artists::router(ctx.clone()))
        .merge(routes::shows::router(ctx));
    finish(router)
}

/// Trivia router: categories, questions and quizzes.
pub fn trivia_app(ctx: TriviaContext) -> Router {
    finish(routes::trivia::router(ctx))
}

fn finish(router: Router) -> Router {
    router
        .route("/health", get(routes::system::health))
        .fallback(routes::system::not_found)
        .layer(ServiceBuilder::new().layer(axum::middleware::map_response(middleware::json_envelope)))
}
