//! Stateless request builder and response parser for the meal collection.
//!
//! # Design
//! `MealsClient` holds only the collection URL. `build_fetch_meals` produces
//! the single `GET` the viewer ever issues and `parse_fetch_meals` turns the
//! host's `HttpResponse` into records. The caller executes the round-trip in
//! between, keeping this side deterministic and free of I/O.

use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::mapper;
use crate::types::MealRecord;

/// Collection the viewer reads when nothing else is configured.
pub const DEFAULT_COLLECTION_URL: &str =
    "https://react-http-58740-default-rtdb.firebaseio.com/meals.json";

/// Synchronous, stateless client for the meal collection.
#[derive(Debug, Clone)]
pub struct MealsClient {
    url: String,
}

impl MealsClient {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// `GET <collection-url>` with no headers, body or query.
    pub fn build_fetch_meals(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url.clone(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_fetch_meals(&self, response: HttpResponse) -> Result<Vec<MealRecord>, FetchError> {
        check_status(&response)?;
        mapper::map_meals(&response.body)
    }
}

impl Default for MealsClient {
    fn default() -> Self {
        Self::new(DEFAULT_COLLECTION_URL)
    }
}

/// Any status outside 2xx is a failure, whatever the body says.
fn check_status(response: &HttpResponse) -> Result<(), FetchError> {
    if response.is_success() {
        return Ok(());
    }
    Err(FetchError::Status {
        status: response.status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::STATUS_FAILURE_MESSAGE;

    fn client() -> MealsClient {
        MealsClient::new("http://localhost:3000/meals.json")
    }

    #[test]
    fn build_fetch_meals_produces_bare_get() {
        let req = client().build_fetch_meals();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/meals.json");
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = MealsClient::new("http://localhost:3000/meals.json/");
        assert_eq!(client.build_fetch_meals().url, "http://localhost:3000/meals.json");
    }

    #[test]
    fn default_points_at_demo_collection() {
        assert_eq!(MealsClient::default().url(), DEFAULT_COLLECTION_URL);
    }

    #[test]
    fn parse_two_meals_in_order() {
        let body = r#"{"m1": {"name":"Pasta","description":"Creamy","price":9.5}, "m2": {"name":"Salad","description":"Fresh","price":5}}"#;
        let meals = client().parse_fetch_meals(HttpResponse::new(200, body)).unwrap();
        assert_eq!(meals.len(), 2);
        assert_eq!(meals[0].id, "m1");
        assert_eq!(meals[0].name, "Pasta");
        assert_eq!(meals[0].price, 9.5);
        assert_eq!(meals[1].id, "m2");
        assert_eq!(meals[1].name, "Salad");
        assert_eq!(meals[1].price, 5.0);
    }

    #[test]
    fn server_error_hides_body() {
        let response = HttpResponse::new(500, r#"{"error":"database exploded"}"#);
        let err = client().parse_fetch_meals(response).unwrap_err();
        assert_eq!(err, FetchError::Status { status: 500 });
        assert_eq!(err.to_string(), STATUS_FAILURE_MESSAGE);
    }

    #[test]
    fn non_success_with_valid_body_still_fails() {
        let body = r#"{"m1": {"name":"Pasta","description":"Creamy","price":9.5}}"#;
        let err = client().parse_fetch_meals(HttpResponse::new(401, body)).unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 401 }));
    }

    #[test]
    fn bad_json_is_decode_error() {
        let err = client()
            .parse_fetch_meals(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        assert!(!err.to_string().is_empty());
    }
}
