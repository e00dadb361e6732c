//! Decodes a store collection body into an ordered list of `MealRecord`s.
//!
//! # Design
//! The store answers with a JSON object keyed by opaque store keys. Going
//! through a map type would re-sort the keys, so the collection is decoded
//! with a hand-written `Visitor` that keeps entries in document order.
//!
//! A `null` body is what the store returns for a collection with no
//! children; it decodes to an empty list. Any malformed record fails the
//! whole batch with the decoder's message.

use std::collections::HashSet;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

use crate::error::FetchError;
use crate::types::{MealRecord, StoredMeal};

/// The store's collection in the order its keys were delivered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealCollection {
    entries: Vec<(String, StoredMeal)>,
}

impl MealCollection {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fold each store key into its record as `id`, keeping order.
    pub fn into_records(self) -> Vec<MealRecord> {
        self.entries
            .into_iter()
            .map(|(key, meal)| MealRecord::from_stored(key, meal))
            .collect()
    }
}

impl<'de> Deserialize<'de> for MealCollection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(CollectionVisitor)
    }
}

struct CollectionVisitor;

impl<'de> Visitor<'de> for CollectionVisitor {
    type Value = MealCollection;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of store keys to meals")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, meal)) = access.next_entry::<String, StoredMeal>()? {
            if !seen.insert(key.clone()) {
                return Err(de::Error::custom(format!("duplicate store key `{key}`")));
            }
            entries.push((key, meal));
        }
        Ok(MealCollection { entries })
    }
}

/// Decode a collection body, treating `null` as an empty collection.
pub fn decode_collection(body: &str) -> Result<MealCollection, FetchError> {
    let collection: Option<MealCollection> = serde_json::from_str(body)?;
    Ok(collection.unwrap_or_default())
}

/// Decode a collection body straight into records.
pub fn map_meals(body: &str) -> Result<Vec<MealRecord>, FetchError> {
    Ok(decode_collection(body)?.into_records())
}
