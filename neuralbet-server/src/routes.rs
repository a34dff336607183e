//! Router construction and HTTP handlers
//!
//! Three route families: `/api/nba` (prediction bridge), `/api/users`
//! (register/login), `/api/health`. Handlers validate presence, delegate to
//! the component, and map its tagged result onto status codes; every failure
//! leaves through [`ApiError`].

use crate::auth;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::NewUser;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use neuralbet_core::{PredictionRequest, PredictionResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/api/nba/predict", post(predict))
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login))
        .route("/api/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PredictBody {
    #[serde(default)]
    player_name: String,
    #[serde(default)]
    stat: String,
}

async fn predict(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PredictBody>,
) -> Result<Json<PredictionResult>, ApiError> {
    let request = PredictionRequest::new(&body.player_name, &body.stat)
        .ok_or(ApiError::MissingPredictionFields)?;

    match state.engine.predict(&request).await {
        result @ PredictionResult::Success(_) => Ok(Json(result)),
        PredictionResult::Failure(failure) => Err(ApiError::PredictionFailed(failure.error)),
    }
}

#[derive(Deserialize)]
struct RegisterBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Deserialize)]
struct LoginBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Serialize)]
struct UserBody {
    id: String,
    name: String,
    email: String,
}

#[derive(Serialize)]
struct AuthResponse {
    message: &'static str,
    user: UserBody,
    token: String,
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let name = body.name.trim();
    let email = body.email.trim();
    if name.is_empty() || email.is_empty() || body.password.is_empty() {
        return Err(ApiError::MissingCredentials);
    }

    if state.users.find_by_email(email).await?.is_some() {
        return Err(ApiError::UserExists);
    }

    let password_hash = auth::hash_password(&body.password)?;
    let user = state
        .users
        .insert(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
        })
        .await?;

    let token = auth::issue_token(&state.config.jwt_secret, &user)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully",
            user: UserBody {
                id: user.id.to_string(),
                name: user.name,
                email: user.email,
            },
            token,
        }),
    ))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginBody>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = state
        .users
        .find_by_email(body.email.trim())
        .await?
        .ok_or(ApiError::UserNotFound)?;

    if !auth::verify_password(&body.password, &user.password_hash)? {
        return Err(ApiError::InvalidCredentials);
    }

    let token = auth::issue_token(&state.config.jwt_secret, &user)?;

    Ok(Json(AuthResponse {
        message: "Login successful",
        user: UserBody {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
        },
        token,
    }))
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    service: &'static str,
    ts: String,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        ts: Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::users::memory::MemoryUserStore;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use neuralbet_core::predictor::EXEC_FAILED;
    use neuralbet_core::{PredictorEngine, ProcessOutcome, ProcessRunner};
    use serde_json::{json, Value};
    use std::path::Path;
    use tower::ServiceExt;

    const SUCCESS_LINE: &str = r#"{"success":true,"player":"LeBron James","prediction":27.0,"confidence":82.0,"range":{"min":22.0,"max":31.0},"mae":3.1,"data_points":41}"#;

    struct StubRunner {
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    }

    #[async_trait]
    impl ProcessRunner for StubRunner {
        async fn run(
            &self,
            _program: &Path,
            _args: &[String],
            _cwd: &Path,
        ) -> std::io::Result<ProcessOutcome> {
            Ok(ProcessOutcome {
                exit_code: self.exit_code,
                stdout: self.stdout.clone(),
                stderr: self.stderr.clone(),
            })
        }
    }

    fn app_with_runner(runner: StubRunner) -> Router {
        let config = test_config();
        let engine = Arc::new(PredictorEngine::with_runner(
            config.predictor.clone(),
            Arc::new(runner),
        ));
        let state = AppState::new(config, Arc::new(MemoryUserStore::default()), engine);
        router(state)
    }

    fn app() -> Router {
        app_with_runner(StubRunner {
            exit_code: Some(0),
            stdout: format!("noise\n{}\n", SUCCESS_LINE),
            stderr: String::new(),
        })
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "neuralbet-server");
        assert!(body["ts"].as_str().unwrap().contains('T'));
    }

    #[tokio::test]
    async fn test_predict_missing_fields() {
        let (status, body) = post_json(&app(), "/api/nba/predict", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Player name and stat are required");

        // blank-after-trim counts as missing
        let (status, _) = post_json(
            &app(),
            "/api/nba/predict",
            json!({"playerName": "   ", "stat": "PTS"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_predict_success() {
        let (status, body) = post_json(
            &app(),
            "/api/nba/predict",
            json!({"playerName": "LeBron James", "stat": "PTS"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["player"], "LeBron James");
        assert_eq!(body["prediction"], 27.0);
        assert_eq!(body["range"]["min"], 22.0);
        assert_eq!(body["range"]["max"], 31.0);
        assert_eq!(body["data_points"], 41);
    }

    #[tokio::test]
    async fn test_predict_script_failure_is_generic_500() {
        let app = app_with_runner(StubRunner {
            exit_code: Some(1),
            stdout: String::new(),
            stderr: "Traceback (most recent call last): ...".to_string(),
        });

        let (status, body) = post_json(
            &app,
            "/api/nba/predict",
            json!({"playerName": "LeBron James", "stat": "PTS"}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], EXEC_FAILED);
        assert!(!body["error"].as_str().unwrap().contains("Traceback"));
    }

    #[tokio::test]
    async fn test_register_login_flow() {
        let app = app();
        let credentials = json!({
            "name": "Gaucho",
            "email": "gaucho@ucsb.edu",
            "password": "hunter2"
        });

        let (status, body) = post_json(&app, "/api/users/register", credentials.clone()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "User registered successfully");
        assert_eq!(body["user"]["name"], "Gaucho");
        assert_eq!(body["user"]["email"], "gaucho@ucsb.edu");
        assert!(!body["user"]["id"].as_str().unwrap().is_empty());
        assert!(!body["token"].as_str().unwrap().is_empty());
        // the password never appears in the response
        assert!(body["user"].get("password").is_none());

        // same email again: rejected, no second account
        let (status, body) = post_json(&app, "/api/users/register", credentials).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "User already exists");

        let (status, body) = post_json(
            &app,
            "/api/users/login",
            json!({"email": "gaucho@ucsb.edu", "password": "hunter2"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Login successful");
        assert!(!body["token"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let app = app();
        post_json(
            &app,
            "/api/users/register",
            json!({"name": "Gaucho", "email": "gaucho@ucsb.edu", "password": "hunter2"}),
        )
        .await;

        let (status, body) = post_json(
            &app,
            "/api/users/login",
            json!({"email": "gaucho@ucsb.edu", "password": "wrong"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let (status, body) = post_json(
            &app(),
            "/api/users/login",
            json!({"email": "nobody@ucsb.edu", "password": "hunter2"}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "User not found");
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let (status, body) = post_json(
            &app(),
            "/api/users/register",
            json!({"name": "Gaucho", "email": "", "password": "hunter2"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Name, email and password are required");
    }
}
