use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::BookingError;
use crate::middleware::{ApiJson, ApiPath};
use crate::models::{SeatId, Showtime, ShowtimeId};
use crate::services::PriceQuote;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/showtimes/{id}", get(get_showtime))
        .route("/showtimes/{id}/quote", post(quote))
}

// GET /api/showtimes/{id} (with seat map)
async fn get_showtime(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<ShowtimeId>,
) -> Result<Json<Showtime>, BookingError> {
    let showtime = state.catalog.get_showtime_by_id(id).await?;
    Ok(Json(showtime))
}

#[derive(Debug, Deserialize)]
struct QuoteRequest {
    seat_ids: Vec<SeatId>,
}

// POST /api/showtimes/{id}/quote
async fn quote(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<ShowtimeId>,
    ApiJson(req): ApiJson<QuoteRequest>,
) -> Result<Json<PriceQuote>, BookingError> {
    let quote = state.reservations.quote(id, &req.seat_ids).await?;
    Ok(Json(quote))
}
