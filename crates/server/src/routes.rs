use std::sync::Arc;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::de::DeserializeOwned;
use service::product::ProductRepository;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::errors::{ApiError, INVALID_PAYLOAD, INVALID_PRODUCT_ID};

pub mod products;

/// Shared handler state: the repository capability, injected at startup.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
}

impl AppState {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self { Self { products } }
}

/// Body of every response for a path (or id segment) no route accepts.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

/// `{id}` path segment. Only `[0-9]+` reaches a handler; anything else is
/// answered as an unknown route. Digits that overflow the id type are a 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| not_found_response())?;
        if !is_decimal_digits(&raw) {
            return Err(not_found_response());
        }
        raw.parse::<i32>()
            .map(ProductId)
            .map_err(|_| ApiError::InvalidInput(INVALID_PRODUCT_ID).into_response())
    }
}

fn is_decimal_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn not_found_response() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
}

/// JSON request body decoded regardless of `Content-Type`; any failure is a 400.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::InvalidInput(INVALID_PAYLOAD))?;
        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|_| ApiError::InvalidInput(INVALID_PAYLOAD))
    }
}

/// Build the application router: the five product routes plus the not-found fallback.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/products", get(products::list))
        .route("/product", post(products::create))
        .route(
            "/product/:id",
            get(products::get).put(products::update).delete(products::delete),
        )
        .fallback(not_found)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
