use axum::{
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};
use std::sync::Arc;

use crate::error::BookingError;
use crate::models::UserId;

/// Header carrying the acting user's id, set by the upstream auth provider.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The user a request acts for. Credentials are checked upstream; this
/// extractor only requires that an identity was forwarded.
#[derive(Debug, Clone)]
pub struct ActorUser {
    pub user_id: UserId,
}

impl FromRequestParts<Arc<crate::AppState>> for ActorUser {
    type Rejection = BookingError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &Arc<crate::AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(BookingError::Unauthorized)?;

        Ok(ActorUser {
            user_id: UserId::new(user_id),
        })
    }
}

// Extractors whose rejections are rendered as `BookingError` bodies.

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(BookingError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(BookingError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(BookingError))]
pub struct ApiQuery<T>(pub T);
