mod common;

use chrono::Duration;

use cinema_booking::error::BookingError;
use cinema_booking::models::{HoldId, SeatStatus, UserId};
use cinema_booking::services::CleanupService;
use common::{harness, seat_ids};

#[tokio::test]
async fn held_seats_are_reserved_for_the_holder_only() {
    let h = harness().await;
    let showtime = h.first_showtime().await;
    let seats = seat_ids(&showtime, 2);
    let alice = UserId::from("alice");

    let hold = h
        .state
        .reservations
        .hold_seats(showtime.id, &alice, &seats)
        .await
        .unwrap();
    assert_eq!(hold.expires_at - hold.created_at, Duration::minutes(10));

    let after = h.state.catalog.get_showtime_by_id(showtime.id).await.unwrap();
    assert!(seats
        .iter()
        .all(|id| after.seat(*id).unwrap().status == SeatStatus::Reserved));

    let err = h
        .state
        .reservations
        .create_booking(h.request(&showtime, seats.clone(), "bob"))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::SeatUnavailable(ids) if ids == seats));

    let err = h
        .state
        .reservations
        .hold_seats(showtime.id, &UserId::from("bob"), &seats[..1])
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::SeatUnavailable(_)));
}

#[tokio::test]
async fn booking_with_a_hold_consumes_it() {
    let h = harness().await;
    let showtime = h.first_showtime().await;
    let seats = seat_ids(&showtime, 3);
    let alice = UserId::from("alice");

    let hold = h
        .state
        .reservations
        .hold_seats(showtime.id, &alice, &seats)
        .await
        .unwrap();

    // Checkout keeps two of the three held seats.
    let mut request = h.request(&showtime, seats[..2].to_vec(), "alice");
    request.hold_id = Some(hold.id);
    let booking = h.state.reservations.create_booking(request).await.unwrap();
    assert_eq!(booking.seats.len(), 2);

    let after = h.state.catalog.get_showtime_by_id(showtime.id).await.unwrap();
    assert_eq!(after.seat(seats[0]).unwrap().status, SeatStatus::Booked);
    assert_eq!(after.seat(seats[1]).unwrap().status, SeatStatus::Booked);
    assert_eq!(after.seat(seats[2]).unwrap().status, SeatStatus::Available);

    let err = h.state.reservations.release_hold(hold.id, &alice).await.unwrap_err();
    assert!(matches!(err, BookingError::HoldNotFound(_)));
}

#[tokio::test]
async fn holds_belong_to_their_user() {
    let h = harness().await;
    let showtime = h.first_showtime().await;
    let seats = seat_ids(&showtime, 1);

    let hold = h
        .state
        .reservations
        .hold_seats(showtime.id, &UserId::from("alice"), &seats)
        .await
        .unwrap();

    let mut request = h.request(&showtime, seats.clone(), "bob");
    request.hold_id = Some(hold.id);
    let err = h.state.reservations.create_booking(request).await.unwrap_err();
    assert!(matches!(err, BookingError::HoldNotFound(id) if id == hold.id));

    let err = h
        .state
        .reservations
        .release_hold(hold.id, &UserId::from("bob"))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::HoldNotFound(_)));

    let err = h
        .state
        .reservations
        .release_hold(HoldId::new(), &UserId::from("alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::HoldNotFound(_)));
}

#[tokio::test]
async fn released_hold_returns_seats_to_sale() {
    let h = harness().await;
    let showtime = h.first_showtime().await;
    let seats = seat_ids(&showtime, 2);
    let alice = UserId::from("alice");

    let hold = h
        .state
        .reservations
        .hold_seats(showtime.id, &alice, &seats)
        .await
        .unwrap();
    let released = h.state.reservations.release_hold(hold.id, &alice).await.unwrap();
    assert_eq!(released, hold);

    let after = h.state.catalog.get_showtime_by_id(showtime.id).await.unwrap();
    assert_eq!(after, showtime);

    h.state
        .reservations
        .create_booking(h.request(&showtime, seats, "bob"))
        .await
        .unwrap();
}

#[tokio::test]
async fn expired_hold_frees_seats_on_next_booking() {
    let h = harness().await;
    let showtime = h.first_showtime().await;
    let seats = seat_ids(&showtime, 2);

    h.state
        .reservations
        .hold_seats(showtime.id, &UserId::from("alice"), &seats)
        .await
        .unwrap();

    h.clock.advance(Duration::minutes(10));

    let booking = h
        .state
        .reservations
        .create_booking(h.request(&showtime, seats.clone(), "bob"))
        .await
        .unwrap();
    assert_eq!(booking.seat_ids().collect::<Vec<_>>(), seats);
}

#[tokio::test]
async fn expired_hold_cannot_be_used_for_checkout() {
    let h = harness().await;
    let showtime = h.first_showtime().await;
    let seats = seat_ids(&showtime, 1);

    let hold = h
        .state
        .reservations
        .hold_seats(showtime.id, &UserId::from("alice"), &seats)
        .await
        .unwrap();
    h.clock.advance(Duration::minutes(11));

    let mut request = h.request(&showtime, seats, "alice");
    request.hold_id = Some(hold.id);
    let err = h.state.reservations.create_booking(request).await.unwrap_err();
    assert!(matches!(err, BookingError::HoldNotFound(_)));
}

#[tokio::test]
async fn cleanup_sweeps_only_expired_holds() {
    let h = harness().await;
    let showtimes = h.showtimes().await;
    let (early, late) = (&showtimes[0], &showtimes[1]);

    h.state
        .reservations
        .hold_seats(early.id, &UserId::from("alice"), &seat_ids(early, 2))
        .await
        .unwrap();
    h.clock.advance(Duration::minutes(5));
    h.state
        .reservations
        .hold_seats(late.id, &UserId::from("bob"), &seat_ids(late, 2))
        .await
        .unwrap();
    h.clock.advance(Duration::minutes(6));

    let cleanup = CleanupService::new(h.state.reservations.clone(), std::time::Duration::from_secs(30));
    assert_eq!(cleanup.run_full_cleanup().await, 1);
    assert_eq!(cleanup.run_full_cleanup().await, 0);

    let early_after = h.state.catalog.get_showtime_by_id(early.id).await.unwrap();
    assert_eq!(early_after.count_with_status(SeatStatus::Reserved), 0);
    let late_after = h.state.catalog.get_showtime_by_id(late.id).await.unwrap();
    assert_eq!(late_after.count_with_status(SeatStatus::Reserved), 2);
}
