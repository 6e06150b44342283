//! Movie and showtime catalog.
//!
//! Movies are seeded at startup. Showtimes are scheduled lazily the first
//! time a movie's listing is requested and then live in the showtime store,
//! so seat state carries over between requests.

use chrono::{Duration, NaiveDate, NaiveTime};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::CatalogConfig;
use crate::error::{BookingError, BookingResult};
use crate::models::{Movie, MovieId, Showtime, ShowtimeId, Theater};
use crate::services::clock::Clock;
use crate::services::inventory::SeatMapGenerator;
use crate::services::random::RandomSource;
use crate::store::{Repository, Stores};

const FIRST_SCREENING_HOUR: i64 = 10;
const SCREENING_SPACING_HOURS: i64 = 3;
const SCREENING_LENGTH_HOURS: i64 = 2;

pub fn theaters() -> Vec<Theater> {
    [
        ("t1", "Century 16", "125 Main Street, Downtown"),
        ("t2", "AMC Theaters", "789 Plaza Ave, Westside Mall"),
        ("t3", "Regal Cinemas", "456 Oak Drive, Eastside"),
    ]
    .into_iter()
    .map(|(id, name, location)| Theater {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
    })
    .collect()
}

pub struct Catalog {
    movies: Arc<dyn Repository<Movie>>,
    showtimes: Arc<dyn Repository<Showtime>>,
    seat_maps: SeatMapGenerator,
    random: Arc<dyn RandomSource>,
    clock: Arc<dyn Clock>,
    days_ahead: u32,
    featured_languages: Vec<String>,
    schedule_lock: Mutex<()>,
}

impl Catalog {
    pub fn new(
        stores: &Stores,
        seat_maps: SeatMapGenerator,
        random: Arc<dyn RandomSource>,
        clock: Arc<dyn Clock>,
        config: &CatalogConfig,
    ) -> Self {
        Self {
            movies: stores.movies.clone(),
            showtimes: stores.showtimes.clone(),
            seat_maps,
            random,
            clock,
            days_ahead: config.days_ahead,
            featured_languages: config.featured_languages(),
            schedule_lock: Mutex::new(()),
        }
    }

    pub async fn seed(&self, movies: Vec<Movie>) -> BookingResult<()> {
        let count = movies.len();
        for movie in movies {
            self.movies.put(movie).await?;
        }
        info!("Catalog seeded with {} movies", count);
        Ok(())
    }

    /// Full listing, featured-language titles first, catalog order otherwise.
    pub async fn get_movies(&self) -> BookingResult<Vec<Movie>> {
        let all = self.movies.query(&|_: &Movie| true).await?;
        let (mut featured, rest): (Vec<Movie>, Vec<Movie>) = all
            .into_iter()
            .partition(|m| self.featured_languages.iter().any(|l| l.eq_ignore_ascii_case(&m.language)));
        featured.extend(rest);
        Ok(featured)
    }

    pub async fn get_movie_by_id(&self, id: &MovieId) -> BookingResult<Movie> {
        self.movies
            .get(id)
            .await?
            .ok_or_else(|| BookingError::MovieNotFound(id.clone()))
    }

    pub async fn get_showtimes_by_movie_id(&self, movie_id: &MovieId) -> BookingResult<Vec<Showtime>> {
        self.get_movie_by_id(movie_id).await?;

        let existing = self.scheduled(movie_id).await?;
        if !existing.is_empty() {
            debug!("Returning {} cached showtimes for movie {}", existing.len(), movie_id);
            return Ok(existing);
        }

        // Only first requests contend here; re-check so just one of them generates.
        let _guard = self.schedule_lock.lock().await;
        let existing = self.scheduled(movie_id).await?;
        if !existing.is_empty() {
            return Ok(existing);
        }

        let generated = self.generate_schedule(movie_id);
        for showtime in &generated {
            self.showtimes.put(showtime.clone()).await?;
        }
        info!("Scheduled {} showtimes for movie {}", generated.len(), movie_id);
        Ok(generated)
    }

    async fn scheduled(&self, movie_id: &MovieId) -> BookingResult<Vec<Showtime>> {
        let wanted = movie_id.clone();
        Ok(self
            .showtimes
            .query(&move |s: &Showtime| s.movie_id == wanted)
            .await?)
    }

    pub async fn get_showtime_by_id(&self, id: ShowtimeId) -> BookingResult<Showtime> {
        self.showtimes
            .get(&id)
            .await?
            .ok_or(BookingError::ShowtimeNotFound(id))
    }

    /// Three or four screenings per theater per day, starting from today.
    pub fn generate_schedule(&self, movie_id: &MovieId) -> Vec<Showtime> {
        let today = self.clock.now().date_naive();
        let theaters = theaters();
        let mut showtimes = Vec::new();

        for day in 0..self.days_ahead {
            let date: NaiveDate = today + Duration::days(i64::from(day));
            let midnight = date.and_time(NaiveTime::MIN).and_utc();

            for theater in &theaters {
                let screenings = 3 + self.random.next_below(2);

                for i in 0..screenings {
                    let jitter = self.random.next_below(2) as i64;
                    let start_hour = FIRST_SCREENING_HOUR + i as i64 * SCREENING_SPACING_HOURS + jitter;
                    let start_time = midnight + Duration::hours(start_hour);
                    let id = ShowtimeId::new();

                    showtimes.push(Showtime {
                        id,
                        movie_id: movie_id.clone(),
                        date,
                        start_time,
                        end_time: start_time + Duration::hours(SCREENING_LENGTH_HOURS),
                        theater: theater.clone(),
                        seats: self.seat_maps.generate(id),
                    });
                }
            }
        }

        showtimes
    }
}
