use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use tokio::runtime::Runtime;

use cinema_booking::config::Config;
use cinema_booking::models::{BookingRequest, MovieId, ShowtimeId, UserId};
use cinema_booking::services::{
    PricingPolicy, SeatMapGenerator, SeededRandom, SystemClock, ThreadRandom,
};
use cinema_booking::store::Stores;
use cinema_booking::AppState;

fn seat_map(c: &mut Criterion) {
    let generator = SeatMapGenerator::new(Arc::new(SeededRandom::new(1)), 0.2);
    c.bench_function("seat_map_generate", |b| {
        b.iter(|| generator.generate(black_box(ShowtimeId::new())))
    });
}

fn pricing(c: &mut Criterion) {
    let policy = PricingPolicy::default();
    c.bench_function("pricing_quote", |b| b.iter(|| policy.quote(black_box(6))));
}

fn book_and_reject(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut config = Config::defaults().unwrap();
    config.inventory.booked_probability = 0.0;

    c.bench_function("create_booking_conflict", |b| {
        b.to_async(&rt).iter_batched(
            || {
                let config = config.clone();
                futures::executor::block_on(async move {
                    let state = AppState::with_environment(
                        config,
                        Stores::in_memory(),
                        Arc::new(SystemClock),
                        Arc::new(ThreadRandom),
                    )
                    .await
                    .unwrap();
                    let showtime = state
                        .catalog
                        .get_showtimes_by_movie_id(&MovieId::from("1"))
                        .await
                        .unwrap()
                        .remove(0);
                    (state, showtime)
                })
            },
            |(state, showtime)| async move {
                let request = BookingRequest {
                    movie_id: showtime.movie_id.clone(),
                    showtime_id: showtime.id,
                    user_id: UserId::from("bench"),
                    seat_ids: showtime.seats.iter().take(4).map(|s| s.id).collect(),
                    total_amount: None,
                    payment_method: "card".to_string(),
                    booking_date: chrono::Utc::now(),
                    hold_id: None,
                };
                state.reservations.create_booking(request.clone()).await.unwrap();
                let _ = black_box(state.reservations.create_booking(request).await);
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, seat_map, pricing, book_and_reject);
criterion_main!(benches);
