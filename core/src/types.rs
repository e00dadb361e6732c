//! Domain types for the meal collection.
//!
//! # Design
//! `StoredMeal` is the value shape the store keeps under each key;
//! `MealRecord` is the normalized record with the store key folded in as
//! `id`. The two are kept apart so the wire shape never leaks an `id` field
//! the store does not have.

use serde::{Deserialize, Serialize};

/// A meal as stored under its key in the remote collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredMeal {
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// A normalized meal record. `id` is the store key it was read from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl MealRecord {
    pub fn from_stored(key: String, meal: StoredMeal) -> Self {
        Self {
            id: key,
            name: meal.name,
            description: meal.description,
            price: meal.price,
        }
    }
}
