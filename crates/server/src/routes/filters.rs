//! `GET` list handlers and their query-string filters.
//!
//! Filters run over the full list after it is read; every filter is optional
//! and relative order is preserved.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use models::{Booking, Guest, Hotel, Room};
use serde::Deserialize;

use crate::errors::JsonApiError;
use crate::state::AppState;

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

#[derive(Debug, Default, Deserialize)]
pub struct HotelFilter {
    pub name: Option<String>,
    pub room_type: Option<String>,
}

impl HotelFilter {
    pub fn apply(&self, hotels: Vec<Hotel>) -> Vec<Hotel> {
        hotels
            .into_iter()
            .filter(|h| non_empty(&self.name).map_or(true, |n| contains_ci(&h.name, n)))
            .filter(|h| non_empty(&self.room_type).map_or(true, |t| h.has_room_type(t)))
            .collect()
    }
}

/// Price bounds arrive as strings so a bad number can be reported as 400
/// naming the parameter.
#[derive(Debug, Default, Deserialize)]
pub struct RoomFilter {
    pub room_type: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

fn parse_price(name: &str, raw: &Option<String>) -> Result<Option<f64>, JsonApiError> {
    match non_empty(raw) {
        None => Ok(None),
        Some(v) => v
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| JsonApiError::bad_request(format!("invalid {name} format"))),
    }
}

impl RoomFilter {
    pub fn apply(&self, rooms: Vec<Room>) -> Result<Vec<Room>, JsonApiError> {
        let min = parse_price("min_price", &self.min_price)?;
        let max = parse_price("max_price", &self.max_price)?;
        Ok(rooms
            .into_iter()
            .filter(|r| non_empty(&self.room_type).map_or(true, |t| r.is_type(t)))
            .filter(|r| min.map_or(true, |m| r.price >= m))
            .filter(|r| max.map_or(true, |m| r.price <= m))
            .collect())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GuestFilter {
    pub name: Option<String>,
    pub mobile_number: Option<String>,
}

impl GuestFilter {
    pub fn apply(&self, guests: Vec<Guest>) -> Vec<Guest> {
        guests
            .into_iter()
            .filter(|g| non_empty(&self.name).map_or(true, |n| contains_ci(&g.name, n)))
            .filter(|g| non_empty(&self.mobile_number).map_or(true, |m| g.mobile_number == m))
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BookingFilter {
    pub guest_id: Option<String>,
    pub room_type: Option<String>,
}

impl BookingFilter {
    pub fn apply(&self, bookings: Vec<Booking>) -> Vec<Booking> {
        bookings
            .into_iter()
            .filter(|b| non_empty(&self.guest_id).map_or(true, |id| b.guest.id == id))
            .filter(|b| non_empty(&self.room_type).map_or(true, |t| b.has_room_type(t)))
            .collect()
    }
}

pub async fn list_hotels(
    State(state): State<AppState>,
    q: Result<Query<HotelFilter>, QueryRejection>,
) -> Result<Json<Vec<Hotel>>, JsonApiError> {
    let Query(filter) = q?;
    Ok(Json(filter.apply(state.hotels.list().await)))
}

pub async fn list_rooms(
    State(state): State<AppState>,
    q: Result<Query<RoomFilter>, QueryRejection>,
) -> Result<Json<Vec<Room>>, JsonApiError> {
    let Query(filter) = q?;
    Ok(Json(filter.apply(state.rooms.list().await)?))
}

pub async fn list_guests(
    State(state): State<AppState>,
    q: Result<Query<GuestFilter>, QueryRejection>,
) -> Result<Json<Vec<Guest>>, JsonApiError> {
    let Query(filter) = q?;
    Ok(Json(filter.apply(state.guests.list().await)))
}

pub async fn list_bookings(
    State(state): State<AppState>,
    q: Result<Query<BookingFilter>, QueryRejection>,
) -> Result<Json<Vec<Booking>>, JsonApiError> {
    let Query(filter) = q?;
    Ok(Json(filter.apply(state.bookings.list().await)))
}
