use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::{BookingId, HoldId, Money, MovieId, SeatId, ShowtimeId};
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("movie {0} not found")]
    MovieNotFound(MovieId),

    #[error("showtime {0} not found")]
    ShowtimeNotFound(ShowtimeId),

    #[error("showtime {showtime_id} is not a screening of movie {movie_id}")]
    ShowtimeMovieMismatch {
        showtime_id: ShowtimeId,
        movie_id: MovieId,
    },

    #[error("booking {0} not found")]
    BookingNotFound(BookingId),

    #[error("seat hold {0} not found")]
    HoldNotFound(HoldId),

    #[error("no seats selected")]
    EmptySelection,

    #[error("seat {seat_id} does not belong to showtime {showtime_id}")]
    SeatNotFound {
        showtime_id: ShowtimeId,
        seat_id: SeatId,
    },

    /// Carries every seat of the request that could not be taken.
    #[error("seats no longer available: {}", join_ids(.0))]
    SeatUnavailable(Vec<SeatId>),

    #[error("quoted total {quoted} does not match computed total {computed}")]
    TotalMismatch { quoted: Money, computed: Money },

    #[error("price of {0} seats is out of range")]
    PriceOverflow(usize),

    #[error("could not issue a unique booking reference after {0} attempts")]
    ReferenceExhausted(u32),

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("missing X-User-Id header")]
    Unauthorized,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type BookingResult<T> = Result<T, BookingError>;

fn join_ids(ids: &[SeatId]) -> String {
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

impl BookingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MovieNotFound(_)
            | Self::ShowtimeNotFound(_)
            | Self::BookingNotFound(_)
            | Self::HoldNotFound(_) => StatusCode::NOT_FOUND,
            Self::EmptySelection
            | Self::SeatNotFound { .. }
            | Self::ShowtimeMovieMismatch { .. }
            | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::SeatUnavailable(_) => StatusCode::CONFLICT,
            Self::TotalMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::PriceOverflow(_) | Self::ReferenceExhausted(_) | Self::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::MovieNotFound(_) => "movie_not_found",
            Self::ShowtimeNotFound(_) => "showtime_not_found",
            Self::ShowtimeMovieMismatch { .. } => "showtime_movie_mismatch",
            Self::BookingNotFound(_) => "booking_not_found",
            Self::HoldNotFound(_) => "hold_not_found",
            Self::EmptySelection => "empty_selection",
            Self::SeatNotFound { .. } => "seat_not_found",
            Self::SeatUnavailable(_) => "seat_unavailable",
            Self::TotalMismatch { .. } => "total_mismatch",
            Self::PriceOverflow(_) => "price_overflow",
            Self::ReferenceExhausted(_) => "reference_exhausted",
            Self::Validation(_) => "validation_failed",
            Self::Unauthorized => "unauthorized",
            Self::Store(_) => "store_error",
        }
    }
}

impl From<validator::ValidationErrors> for BookingError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl From<JsonRejection> for BookingError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for BookingError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for BookingError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }

        let mut body = json!({
            "error": self.code(),
            "message": self.to_string(),
        });
        if let Self::SeatUnavailable(seat_ids) = &self {
            body["seat_ids"] = json!(seat_ids);
        }

        (status, Json(body)).into_response()
    }
}
