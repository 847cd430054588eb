use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use models::product;
use rust_decimal::Decimal;
use serde::Deserialize;
use service::pagination::ListWindow;
use tracing::info;

use crate::errors::ApiError;
use crate::routes::{AppState, JsonBody, ProductId};

/// Incoming product fields. An `id` key, if present, is ignored.
/// A missing or `null` price is stored as 0.
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}

impl ProductPayload {
    fn into_model(self, id: i32) -> product::Model {
        product::Model { id, name: self.name, price: self.price.unwrap_or_default() }
    }
}

fn first_value<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<product::Model>>, ApiError> {
    let window = ListWindow::from_raw(first_value(&params, "limit"), first_value(&params, "offset"));
    let list = state.products.fetch_many(window.offset, window.limit).await?;
    info!(count = list.len(), offset = window.offset, limit = window.limit, "list products");
    Ok(Json(list))
}

pub async fn get(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> Result<Json<product::Model>, ApiError> {
    let p = state.products.fetch_one(id).await?;
    info!(id = p.id, "fetched product");
    Ok(Json(p))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ProductPayload>,
) -> Result<(StatusCode, Json<product::Model>), ApiError> {
    let p = state.products.create(input.into_model(0)).await?;
    info!(id = p.id, name = %p.name, "created product");
    Ok((StatusCode::CREATED, Json(p)))
}

/// Always answers with the written fields, whether or not the row existed.
pub async fn update(
    State(state): State<AppState>,
    ProductId(id): ProductId,
    JsonBody(input): JsonBody<ProductPayload>,
) -> Result<Json<product::Model>, ApiError> {
    let p = state.products.update(input.into_model(id)).await?;
    info!(id = p.id, "updated product");
    Ok(Json(p))
}

pub async fn delete(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.products.delete(id).await?;
    info!(id, "deleted product");
    Ok(Json(serde_json::json!({"result": "success"})))
}
