use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::BookingError;
use crate::middleware::{ApiPath, ApiQuery};
use crate::models::{Movie, MovieId, ShowtimeSummary};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(list_movies))
        .route("/movies/{id}", get(get_movie))
        .route("/movies/{id}/showtimes", get(list_showtimes))
}

// GET /api/movies
async fn list_movies(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Movie>>, BookingError> {
    let movies = state.catalog.get_movies().await?;
    Ok(Json(movies))
}

// GET /api/movies/{id}
async fn get_movie(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<MovieId>,
) -> Result<Json<Movie>, BookingError> {
    let movie = state.catalog.get_movie_by_id(&id).await?;
    Ok(Json(movie))
}

#[derive(Debug, Deserialize)]
struct ShowtimesQuery {
    date: Option<NaiveDate>,
}

// GET /api/movies/{id}/showtimes?date=YYYY-MM-DD
async fn list_showtimes(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<MovieId>,
    ApiQuery(params): ApiQuery<ShowtimesQuery>,
) -> Result<Json<Vec<ShowtimeSummary>>, BookingError> {
    let showtimes = state.catalog.get_showtimes_by_movie_id(&id).await?;

    let mut summaries: Vec<ShowtimeSummary> = showtimes
        .iter()
        .filter(|s| params.date.map_or(true, |d| s.date == d))
        .map(|s| s.summary())
        .collect();
    summaries.sort_by_key(|s| s.start_time);

    Ok(Json(summaries))
}
