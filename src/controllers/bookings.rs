use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::BookingError;
use crate::middleware::{ActorUser, ApiJson, ApiPath};
use crate::models::{BookingDetails, BookingHistory, BookingId, BookingRequest, HoldId, Money, MovieId, SeatHold, SeatId, ShowtimeId};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/holds", post(hold_seats))
        .route("/holds/{id}", delete(release_hold))
        .route("/bookings", get(get_user_bookings).post(create_booking))
        .route("/bookings/{id}", get(get_booking))
}

/* ---------- HOLDS ---------- */

#[derive(Debug, Deserialize)]
struct HoldRequest {
    showtime_id: ShowtimeId,
    seat_ids: Vec<SeatId>,
}

// POST /api/holds
async fn hold_seats(
    State(state): State<Arc<AppState>>,
    user: ActorUser,
    ApiJson(req): ApiJson<HoldRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let hold = state
        .reservations
        .hold_seats(req.showtime_id, &user.user_id, &req.seat_ids)
        .await?;
    Ok((StatusCode::CREATED, Json(hold)))
}

// DELETE /api/holds/{id}
async fn release_hold(
    State(state): State<Arc<AppState>>,
    user: ActorUser,
    ApiPath(id): ApiPath<HoldId>,
) -> Result<Json<SeatHold>, BookingError> {
    let hold = state.reservations.release_hold(id, &user.user_id).await?;
    Ok(Json(hold))
}

/* ---------- BOOKINGS ---------- */

#[derive(Debug, Deserialize, Validate)]
struct CreateBookingRequest {
    movie_id: MovieId,
    showtime_id: ShowtimeId,
    seat_ids: Vec<SeatId>,
    total_amount: Option<Money>,
    #[validate(length(min = 1, max = 32))]
    payment_method: String,
    hold_id: Option<HoldId>,
}

// POST /api/bookings
async fn create_booking(
    State(state): State<Arc<AppState>>,
    user: ActorUser,
    ApiJson(req): ApiJson<CreateBookingRequest>,
) -> Result<impl IntoResponse, BookingError> {
    req.validate()?;

    let booking = state
        .reservations
        .create_booking(BookingRequest {
            movie_id: req.movie_id,
            showtime_id: req.showtime_id,
            user_id: user.user_id,
            seat_ids: req.seat_ids,
            total_amount: req.total_amount,
            payment_method: req.payment_method,
            booking_date: state.clock.now(),
            hold_id: req.hold_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

// GET /api/bookings
async fn get_user_bookings(
    State(state): State<Arc<AppState>>,
    user: ActorUser,
) -> Result<Json<BookingHistory>, BookingError> {
    let history = state
        .bookings
        .get_user_booking_history(&user.user_id, state.clock.now())
        .await?;
    Ok(Json(history))
}

// GET /api/bookings/{id}
async fn get_booking(
    State(state): State<Arc<AppState>>,
    user: ActorUser,
    ApiPath(id): ApiPath<BookingId>,
) -> Result<Json<BookingDetails>, BookingError> {
    let details = state.bookings.get_booking_details(id).await?;

    // Other users' bookings are reported as absent.
    if details.booking.user_id != user.user_id {
        return Err(BookingError::BookingNotFound(id));
    }
    Ok(Json(details))
}
