use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use configs::AppConfig;
use models::{Booking, Guest, Hotel, Room};
use serde_json::{json, Value};
use server::routes;
use server::state::AppState;
use service::security::{provision, ProvisionedSecret};
use tokio::sync::OnceCell;
use tower::ServiceExt;
use uuid::Uuid;

const API_KEY: &str = "integration-test-key";

// Argon2 is expensive; derive the stored hash once per test binary.
static CREDENTIAL: OnceCell<ProvisionedSecret> = OnceCell::const_new();

async fn credential() -> &'static ProvisionedSecret {
    CREDENTIAL
        .get_or_init(|| async { provision(API_KEY).expect("provision test credential") })
        .await
}

async fn config_for(dir: &PathBuf) -> AppConfig {
    let cred = credential().await;
    let mut cfg = AppConfig::default();
    cfg.storage.data_dir = dir.clone();
    cfg.security.api_secret_hash = cred.hash_hex.clone();
    cfg.security.api_secret_salt = cred.salt_hex.clone();
    cfg
}

async fn build_app(dir: &PathBuf) -> anyhow::Result<Router> {
    let cfg = config_for(dir).await;
    let state = AppState::open(&cfg).await?;
    Ok(routes::build_router(state, tower_http::cors::CorsLayer::very_permissive()))
}

fn temp_data_dir() -> PathBuf {
    std::env::temp_dir().join(format!("server_api_{}", Uuid::new_v4()))
}

fn request(method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<Request<Body>> {
    let builder = Request::builder().method(method).uri(uri).header("X-API-Key", API_KEY);
    let req = match body {
        Some(v) => builder.header("content-type", "application/json").body(Body::from(serde_json::to_vec(&v)?))?,
        None => builder.body(Body::empty())?,
    };
    Ok(req)
}

async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, body))
}

#[tokio::test]
async fn health_is_public_and_entities_require_key() -> anyhow::Result<()> {
    let dir = temp_data_dir();
    let app = build_app(&dir).await?;

    let health = Request::builder().uri("/health").body(Body::empty())?;
    let (status, body) = send(&app, health).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let no_key = Request::builder().uri("/hotels").body(Body::empty())?;
    assert_eq!(send(&app, no_key).await?.0, StatusCode::FORBIDDEN);

    let wrong_key = Request::builder().uri("/hotels").header("X-API-Key", "not-the-key").body(Body::empty())?;
    let (status, body) = send(&app, wrong_key).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Forbidden");

    let (status, body) = send(&app, request("GET", "/hotels", None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let _ = tokio::fs::remove_dir_all(&dir).await;
    Ok(())
}

#[tokio::test]
async fn guest_create_get_delete_scenario() -> anyhow::Result<()> {
    let dir = temp_data_dir();
    let app = build_app(&dir).await?;

    let (status, created) = send(
        &app,
        request("POST", "/guests", Some(json!({"id": "mine", "name": "A. Lovelace", "mobile_number": "+441234"})))?,
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert_ne!(id, "mine");
    assert_eq!(created["name"], "A. Lovelace");
    assert_eq!(created["preferences"], json!([]));

    let (status, fetched) = send(&app, request("GET", &format!("/guests/{id}"), None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, _) = send(&app, request("DELETE", &format!("/guests/{id}"), None)?).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, request("GET", &format!("/guests/{id}"), None)?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "guest not found");

    let on_disk: Vec<Guest> = serde_json::from_slice(&tokio::fs::read(dir.join("guests.json")).await?)?;
    assert!(on_disk.is_empty());

    let _ = tokio::fs::remove_dir_all(&dir).await;
    Ok(())
}

#[tokio::test]
async fn update_and_delete_report_missing_records() -> anyhow::Result<()> {
    let dir = temp_data_dir();
    let app = build_app(&dir).await?;

    let room = json!({"room_type": "Single", "price": 40.0, "facilities": ["wifi"]});
    let (status, _) = send(&app, request("PUT", "/rooms/nope", Some(room.clone()))?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, request("DELETE", "/rooms/nope", None)?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, created) = send(&app, request("POST", "/rooms", Some(room))?).await?;
    let id = created["id"].as_str().unwrap();
    let (status, updated) = send(
        &app,
        request("PUT", &format!("/rooms/{id}"), Some(json!({"room_type": "Double", "price": 80.0})))?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["room_type"], "Double");
    assert_eq!(updated["facilities"], json!([]));

    let malformed = Request::builder()
        .method("POST")
        .uri("/rooms")
        .header("X-API-Key", API_KEY)
        .header("content-type", "application/json")
        .body(Body::from("{\"room_type\": "))?;
    let (status, body) = send(&app, malformed).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");

    let _ = tokio::fs::remove_dir_all(&dir).await;
    Ok(())
}

#[tokio::test]
async fn partial_bodies_are_created_with_zero_values() -> anyhow::Result<()> {
    let dir = temp_data_dir();
    let app = build_app(&dir).await?;

    let (status, room) = send(&app, request("POST", "/rooms", Some(json!({"room_type": "Single"})))?).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(room["price"], 0.0);
    assert_eq!(room["facilities"], json!([]));

    let (status, guest) = send(&app, request("POST", "/guests", Some(json!({})))?).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(guest["name"], "");
    assert_eq!(guest["mobile_number"], "");

    let (status, booking) = send(&app, request("POST", "/bookings", Some(json!({"booked_rooms": [room]})))?).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(booking["guest"]["name"], "");
    assert_eq!(booking["hotel"]["rooms"], json!([]));

    let _ = tokio::fs::remove_dir_all(&dir).await;
    Ok(())
}

#[tokio::test]
async fn list_filters_apply_to_rooms_and_hotels() -> anyhow::Result<()> {
    let dir = temp_data_dir();
    let app = build_app(&dir).await?;

    for (t, p) in [("Single", 40.0), ("Double", 90.0), ("double", 120.0)] {
        send(&app, request("POST", "/rooms", Some(json!({"room_type": t, "price": p})))?).await?;
    }
    let (status, rooms) = send(&app, request("GET", "/rooms?room_type=DOUBLE&max_price=100", None)?).await?;
    assert_eq!(status, StatusCode::OK);
    let rooms: Vec<Room> = serde_json::from_value(rooms)?;
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].price, 90.0);

    let (status, body) = send(&app, request("GET", "/rooms?min_price=abc", None)?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "invalid min_price format");

    send(
        &app,
        request("POST", "/hotels", Some(json!({"name": "Seaside Inn", "rooms": [{"room_type": "Suite", "price": 300.0}]})))?,
    )
    .await?;
    send(&app, request("POST", "/hotels", Some(json!({"name": "City Lodge"})))?).await?;
    let (_, hotels) = send(&app, request("GET", "/hotels?name=seaside&room_type=suite", None)?).await?;
    let hotels: Vec<Hotel> = serde_json::from_value(hotels)?;
    assert_eq!(hotels.len(), 1);
    assert_eq!(hotels[0].name, "Seaside Inn");

    let _ = tokio::fs::remove_dir_all(&dir).await;
    Ok(())
}

#[tokio::test]
async fn composed_booking_keeps_copies_after_guest_edit() -> anyhow::Result<()> {
    let dir = temp_data_dir();
    let app = build_app(&dir).await?;

    let (_, guest) = send(&app, request("POST", "/guests", Some(json!({"name": "Ada", "mobile_number": "+44"})))?).await?;
    let (_, room) = send(&app, request("POST", "/rooms", Some(json!({"room_type": "Suite", "price": 250.0})))?).await?;
    let (_, hotel) = send(&app, request("POST", "/hotels", Some(json!({"name": "Grand", "rooms": [room.clone()]})))?).await?;

    let draft = json!({"guest_id": guest["id"], "hotel_id": hotel["id"], "room_ids": [room["id"]]});
    let (status, booking) = send(&app, request("POST", "/bookings/compose", Some(draft))?).await?;
    assert_eq!(status, StatusCode::CREATED);
    let booking: Booking = serde_json::from_value(booking)?;
    assert_eq!(booking.guest.name, "Ada");
    assert_eq!(booking.booked_rooms.len(), 1);

    let guest_id = guest["id"].as_str().unwrap();
    send(
        &app,
        request("PUT", &format!("/guests/{guest_id}"), Some(json!({"name": "Ada King", "mobile_number": "+44"})))?,
    )
    .await?;

    let (_, stored) = send(&app, request("GET", &format!("/bookings/{}", booking.id), None)?).await?;
    assert_eq!(stored["guest"]["name"], "Ada");

    let (status, report) = send(&app, request("GET", &format!("/bookings/{}/staleness", booking.id), None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["guest"], "diverged");
    assert_eq!(report["hotel"], "current");
    assert_eq!(report["rooms"][0]["state"], "current");

    let (_, by_guest) = send(&app, request("GET", &format!("/bookings?guest_id={guest_id}"), None)?).await?;
    assert_eq!(by_guest.as_array().map(Vec::len), Some(1));

    let missing = json!({"guest_id": "ghost", "hotel_id": hotel["id"]});
    let (status, _) = send(&app, request("POST", "/bookings/compose", Some(missing))?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let _ = tokio::fs::remove_dir_all(&dir).await;
    Ok(())
}

#[tokio::test]
async fn records_survive_restart_and_corrupt_snapshot_blocks_startup() -> anyhow::Result<()> {
    let dir = temp_data_dir();
    let app = build_app(&dir).await?;
    let (_, hotel) = send(&app, request("POST", "/hotels", Some(json!({"name": "Durable"})))?).await?;
    drop(app);

    let restarted = build_app(&dir).await?;
    let (status, fetched) = send(&restarted, request("GET", &format!("/hotels/{}", hotel["id"].as_str().unwrap()), None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, hotel);

    tokio::fs::write(dir.join("bookings.json"), b"[{\"broken\"").await?;
    let cfg = config_for(&dir).await;
    assert!(AppState::open(&cfg).await.is_err());

    let _ = tokio::fs::remove_dir_all(&dir).await;
    Ok(())
}
