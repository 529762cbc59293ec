use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};

use super::{models::UserRegistration, service::UserService};

pub const REGISTERED: &str = "User successfully registered";
pub const REGISTER_FAILED: &str = "An error has occured while register";

pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .with_state(service)
}

async fn register(
    State(service): State<Arc<UserService>>,
    Json(registration): Json<UserRegistration>,
) -> (StatusCode, Json<Value>) {
    match service.check_and_create(registration).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "user registered");
            (StatusCode::CREATED, Json(json!({ "message": REGISTERED })))
        }
        Err(err) => {
            tracing::debug!(error = %err, "user not registered");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": REGISTER_FAILED })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::user::repository::UserRepository;
    use axum::{body::Body, http::Request};
    use bookhouse_db::MemoryStore;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn router() -> Router {
        routes(Arc::new(UserService::new(UserRepository::new(Arc::new(
            MemoryStore::new(),
        )))))
    }

    async fn post_json(router: &Router, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/auth/register")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn form() -> Value {
        json!({
            "name": "Linus",
            "email": "linus@example.org",
            "password": "penguin",
            "confirm_password": "penguin"
        })
    }

    #[tokio::test]
    async fn test_register_then_duplicate() {
        let router = router();

        let (status, body) = post_json(&router, form()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({"message": "User successfully registered"}));

        let (status, body) = post_json(&router, form()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message": "An error has occured while register"}));
    }

    #[tokio::test]
    async fn test_empty_form_is_rejected() {
        let (status, _) = post_json(&router(), json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
