//! `products` table: a named, priced item with a server-assigned id.
use rust_decimal::RoundingStrategy;
use sea_orm::{entity::prelude::*, ConnectionTrait, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::errors;

/// DDL for the table the service reads and writes.
pub const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS products (
    id SERIAL,
    name TEXT NOT NULL,
    price NUMERIC(10,2) NOT NULL DEFAULT 0.00,
    CONSTRAINT products_pkey PRIMARY KEY (id)
)";

/// Largest value `NUMERIC(10,2)` can hold is just below this.
const PRICE_CEILING: i64 = 100_000_000;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Product that has not been stored yet; `id` is assigned on insert.
    pub fn draft(name: impl Into<String>, price: Decimal) -> Self {
        Self { id: 0, name: name.into(), price }
    }

    /// Check the field constraints and normalise `price` to the stored scale.
    pub fn validated(mut self) -> Result<Self, errors::ModelError> {
        validate_name(&self.name)?;
        self.price = normalize_price(self.price)?;
        Ok(self)
    }
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name must not be empty".into()));
    }
    Ok(())
}

/// Round to two fractional digits the way PostgreSQL `NUMERIC` does, then range-check.
pub fn normalize_price(price: Decimal) -> Result<Decimal, errors::ModelError> {
    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if rounded.is_sign_negative() {
        return Err(errors::ModelError::Validation("price must not be negative".into()));
    }
    if rounded >= Decimal::from(PRICE_CEILING) {
        return Err(errors::ModelError::Validation("price exceeds NUMERIC(10,2)".into()));
    }
    Ok(rounded)
}

pub async fn create_table_if_missing(db: &DatabaseConnection) -> Result<(), errors::ModelError> {
    db.execute_unprepared(CREATE_TABLE_SQL)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}
