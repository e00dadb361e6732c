//! Pure selection of what the viewer shows for a given `FetchState`.

use std::fmt;

use serde::Serialize;

use crate::controller::FetchState;
use crate::types::MealRecord;

/// Placeholder shown while the collection is loading.
pub const LOADING_TEXT: &str = "Loading...";

/// One rendered meal, keyed by its store key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealItem {
    pub key: String,
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl From<&MealRecord> for MealItem {
    fn from(record: &MealRecord) -> Self {
        Self {
            key: record.id.clone(),
            id: record.id.clone(),
            name: record.name.clone(),
            description: record.description.clone(),
            price: record.price,
        }
    }
}

impl fmt::Display for MealItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - ${:.2}", self.name, self.description, self.price)
    }
}

/// Exactly one of the three outputs of the viewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Loading,
    Error { message: String },
    List { items: Vec<MealItem> },
}

/// Loading wins over error, error wins over the list.
pub fn select_view(state: &FetchState) -> View {
    match state {
        FetchState::Loading => View::Loading,
        FetchState::Error(message) => View::Error {
            message: message.clone(),
        },
        FetchState::Ready(records) => View::List {
            items: records.iter().map(MealItem::from).collect(),
        },
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Loading => f.write_str(LOADING_TEXT),
            View::Error { message } => f.write_str(message),
            View::List { items } => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}
