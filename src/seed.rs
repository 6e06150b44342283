//! Titles the catalog starts with.

use chrono::NaiveDate;

use crate::models::{Movie, MovieId};

struct SeedMovie {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    director: &'static str,
    writer: &'static str,
    cast: &'static [&'static str],
    duration: u32,
    rating: f32,
    release_date: (i32, u32, u32),
    genres: &'static [&'static str],
    poster_url: &'static str,
    backdrop_url: Option<&'static str>,
    trailer_url: &'static str,
    language: &'static str,
}

const SEED_MOVIES: &[SeedMovie] = &[
    SeedMovie {
        id: "1",
        title: "Inception",
        description: "A thief who steals corporate secrets through dream-sharing technology is given the inverse task of planting an idea.",
        director: "Christopher Nolan",
        writer: "Christopher Nolan",
        cast: &["Leonardo DiCaprio", "Joseph Gordon-Levitt", "Elliot Page", "Tom Hardy"],
        duration: 148,
        rating: 8.8,
        release_date: (2023, 1, 15),
        genres: &["Action", "Adventure", "Sci-Fi"],
        poster_url: "https://images.pexels.com/photos/4571219/pexels-photo-4571219.jpeg",
        backdrop_url: Some("https://images.pexels.com/photos/3131971/pexels-photo-3131971.jpeg"),
        trailer_url: "RjR71XpAu0I",
        language: "English",
    },
    SeedMovie {
        id: "2",
        title: "The Dark Knight",
        description: "Batman faces the Joker, a criminal mastermind who plunges Gotham into anarchy.",
        director: "Christopher Nolan",
        writer: "Jonathan Nolan, Christopher Nolan",
        cast: &["Christian Bale", "Heath Ledger", "Aaron Eckhart", "Michael Caine"],
        duration: 152,
        rating: 9.0,
        release_date: (2022, 12, 10),
        genres: &["Action", "Crime", "Drama"],
        poster_url: "https://images.pexels.com/photos/6426515/pexels-photo-6426515.jpeg",
        backdrop_url: Some("https://images.pexels.com/photos/5699456/pexels-photo-5699456.jpeg"),
        trailer_url: "EXeTwQWrcwY",
        language: "English",
    },
    SeedMovie {
        id: "13",
        title: "Pathaan",
        description: "A field agent returns from a hiatus to stop a major attack.",
        director: "Siddharth Anand",
        writer: "Shridhar Raghavan",
        cast: &["Shah Rukh Khan", "Deepika Padukone", "John Abraham"],
        duration: 146,
        rating: 8.5,
        release_date: (2023, 1, 25),
        genres: &["Action", "Thriller"],
        poster_url: "https://images.pexels.com/photos/2873486/pexels-photo-2873486.jpeg",
        backdrop_url: None,
        trailer_url: "vqu4z34wENw",
        language: "Hindi",
    },
    SeedMovie {
        id: "14",
        title: "RRR",
        description: "A tale of two revolutionaries and their journey far away from home.",
        director: "S.S. Rajamouli",
        writer: "V. Vijayendra Prasad",
        cast: &["N.T. Rama Rao Jr.", "Ram Charan", "Alia Bhatt"],
        duration: 182,
        rating: 9.2,
        release_date: (2023, 3, 24),
        genres: &["Action", "Drama", "Historical"],
        poster_url: "https://images.pexels.com/photos/2406450/pexels-photo-2406450.jpeg",
        backdrop_url: None,
        trailer_url: "f_vbAtFSEc0",
        language: "Telugu",
    },
    SeedMovie {
        id: "15",
        title: "Jailer",
        description: "A retired jailer hunts down the men behind his son's death.",
        director: "Nelson Dilipkumar",
        writer: "Nelson Dilipkumar",
        cast: &["Rajinikanth", "Mohanlal", "Jackie Shroff"],
        duration: 158,
        rating: 8.7,
        release_date: (2023, 8, 10),
        genres: &["Action", "Drama", "Thriller"],
        poster_url: "https://images.pexels.com/photos/2519225/pexels-photo-2519225.jpeg",
        backdrop_url: None,
        trailer_url: "Y6pCyDjTu8w",
        language: "Tamil",
    },
    SeedMovie {
        id: "3",
        title: "Interstellar",
        description: "Explorers travel through a wormhole in an attempt to ensure humanity's survival.",
        director: "Christopher Nolan",
        writer: "Jonathan Nolan, Christopher Nolan",
        cast: &["Matthew McConaughey", "Anne Hathaway", "Jessica Chastain"],
        duration: 169,
        rating: 8.6,
        release_date: (2023, 3, 5),
        genres: &["Adventure", "Drama", "Sci-Fi"],
        poster_url: "https://images.pexels.com/photos/5487669/pexels-photo-5487669.jpeg",
        backdrop_url: Some("https://images.pexels.com/photos/4865035/pexels-photo-4865035.jpeg"),
        trailer_url: "zSWdZVtXT7E",
        language: "English",
    },
    SeedMovie {
        id: "4",
        title: "Pulp Fiction",
        description: "Two hitmen, a boxer, a gangster and a pair of diner bandits cross paths in four tales.",
        director: "Quentin Tarantino",
        writer: "Quentin Tarantino, Roger Avary",
        cast: &["John Travolta", "Uma Thurman", "Samuel L. Jackson", "Bruce Willis"],
        duration: 154,
        rating: 8.9,
        release_date: (2024, 1, 20),
        genres: &["Crime", "Drama"],
        poster_url: "https://images.pexels.com/photos/1304469/pexels-photo-1304469.jpeg",
        backdrop_url: Some("https://images.pexels.com/photos/8088443/pexels-photo-8088443.jpeg"),
        trailer_url: "s7EdQ4FqbhY",
        language: "English",
    },
];

pub fn movies() -> Vec<Movie> {
    SEED_MOVIES
        .iter()
        .map(|m| {
            let (y, mo, d) = m.release_date;
            Movie {
                id: MovieId::from(m.id),
                title: m.title.to_string(),
                description: m.description.to_string(),
                director: m.director.to_string(),
                writer: m.writer.to_string(),
                cast: m.cast.iter().map(|s| s.to_string()).collect(),
                duration: m.duration,
                rating: m.rating,
                release_date: NaiveDate::from_ymd_opt(y, mo, d).unwrap_or_default(),
                genres: m.genres.iter().map(|s| s.to_string()).collect(),
                poster_url: m.poster_url.to_string(),
                backdrop_url: m.backdrop_url.map(str::to_string),
                trailer_url: m.trailer_url.to_string(),
                language: m.language.to_string(),
            }
        })
        .collect()
}
