use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::MovieId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub description: String,
    pub director: String,
    pub writer: String,
    pub cast: Vec<String>,
    /// Running time in minutes.
    pub duration: u32,
    pub rating: f32,
    pub release_date: NaiveDate,
    pub genres: Vec<String>,
    pub poster_url: String,
    pub backdrop_url: Option<String>,
    pub trailer_url: String,
    pub language: String,
}
