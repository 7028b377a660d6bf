pub mod bookings;
pub mod crud;
pub mod filters;

use axum::{middleware, routing::get, routing::post, Json, Router};
use common::types::Health;
use models::{Booking, Guest, Hotel, Room};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::auth;
use crate::state::AppState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public health check plus the four
/// API-key protected entity collections.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new().route("/health", get(health));

    let api = Router::new()
        .route("/hotels", get(filters::list_hotels).post(crud::create::<Hotel>))
        .route(
            "/hotels/:id",
            get(crud::get_one::<Hotel>).put(crud::update::<Hotel>).delete(crud::delete::<Hotel>),
        )
        .route("/rooms", get(filters::list_rooms).post(crud::create::<Room>))
        .route(
            "/rooms/:id",
            get(crud::get_one::<Room>).put(crud::update::<Room>).delete(crud::delete::<Room>),
        )
        .route("/guests", get(filters::list_guests).post(crud::create::<Guest>))
        .route(
            "/guests/:id",
            get(crud::get_one::<Guest>).put(crud::update::<Guest>).delete(crud::delete::<Guest>),
        )
        .route("/bookings", get(filters::list_bookings).post(crud::create::<Booking>))
        .route("/bookings/compose", post(bookings::compose))
        .route(
            "/bookings/:id",
            get(crud::get_one::<Booking>).put(crud::update::<Booking>).delete(crud::delete::<Booking>),
        )
        .route("/bookings/:id/staleness", get(bookings::staleness))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_api_key));

    public
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
