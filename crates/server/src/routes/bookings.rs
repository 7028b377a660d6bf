use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use models::{Booking, Record};
use service::booking::{check_staleness, compose_booking, BookingDraft, Staleness};
use tracing::info;

use crate::errors::JsonApiError;
use crate::state::AppState;

/// Create a booking from ids, embedding copies of the current guest, hotel
/// and rooms.
pub async fn compose(
    State(state): State<AppState>,
    body: Result<Json<BookingDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>), JsonApiError> {
    let Json(draft) = body?;
    let booking = compose_booking(&draft, &*state.guests, &*state.hotels, &*state.rooms).await?;
    let created = state.bookings.create(booking).await?;
    info!(booking_id = %created.id, guest_id = %draft.guest_id, hotel_id = %draft.hotel_id, "booking composed");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Report which embedded copies of a booking no longer match their originals.
pub async fn staleness(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Staleness>, JsonApiError> {
    let booking = state
        .bookings
        .get_by_id(&id)
        .await
        .ok_or_else(|| JsonApiError::not_found(Booking::ENTITY))?;
    Ok(Json(check_staleness(&booking, &*state.guests, &*state.hotels, &*state.rooms).await))
}
