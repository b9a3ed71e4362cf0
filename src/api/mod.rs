//! REST API for the tutorial

mod page;

pub use page::render_page;

use crate::content::{
    Catalog, ChallengeStep, Example, ResourceCategory, TechniqueStep, TutorialSection,
};
use crate::diff::{self, DiffSummary, DiffToken};
use crate::navigation::IterationView;
use crate::newsletter;
use crate::quiz::{self, AnswerOutcome, QuizError, QuizQuestion, QuizResult};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// API state
pub struct ApiState {
    pub catalog: Arc<Catalog>,
    pub cors_permissive: bool,
}

/// Error body: `{"message": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

type ApiError = (StatusCode, Json<MessageResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(MessageResponse {
            message: message.into(),
        }),
    )
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Tutorial overview
#[derive(Debug, Serialize)]
pub struct TutorialResponse {
    pub title: String,
    pub sections: Vec<TutorialSection>,
}

/// Iteration as published by `/api/examples`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationJson {
    /// 1-based position, as shown on the gallery tabs
    pub iteration: usize,
    /// Prompt as plain text
    pub prompt: String,
    pub analysis: String,
    pub image_url: String,
}

#[derive(Debug, Serialize)]
pub struct ExampleJson {
    pub id: String,
    pub title: String,
    pub description: String,
    pub iterations: Vec<IterationJson>,
}

impl From<&Example> for ExampleJson {
    fn from(e: &Example) -> Self {
        Self {
            id: e.id.clone(),
            title: e.title.clone(),
            description: e.description.clone(),
            iterations: e
                .iterations
                .iter()
                .enumerate()
                .map(|(i, it)| IterationJson {
                    iteration: i + 1,
                    prompt: it.prompt.plain_text(),
                    analysis: it.analysis.clone(),
                    image_url: it.image_ref.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExamplesResponse {
    pub examples: Vec<ExampleJson>,
}

#[derive(Debug, Serialize)]
pub struct TechniqueResponse {
    pub steps: Vec<TechniqueStep>,
}

#[derive(Debug, Serialize)]
pub struct ChallengeResponse {
    pub steps: Vec<ChallengeStep>,
}

#[derive(Debug, Serialize)]
pub struct ResourcesResponse {
    pub categories: Vec<ResourceCategory>,
}

/// Request to highlight a prompt against its predecessor
#[derive(Debug, Deserialize)]
pub struct HighlightRequest {
    /// Prompt of the iteration being displayed
    pub current: String,
    /// Prompt of the iteration before it, absent for the first
    #[serde(default)]
    pub previous: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HighlightResponse {
    /// Display markup
    pub markup: String,
    /// Per-word flags (absent without a previous prompt)
    pub tokens: Option<Vec<DiffToken>>,
    pub summary: Option<DiffSummary>,
}

/// Quiz questions without their answers
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question_id: u32,
    pub option: usize,
}

/// Chosen option for every question, in order
#[derive(Debug, Deserialize)]
pub struct ResultRequest {
    pub answers: Vec<usize>,
}

/// Create the API router
pub fn create_router(state: Arc<ApiState>) -> Router {
    let cors_permissive = state.cors_permissive;

    let router = Router::new()
        .route("/", get(tutorial_page))
        .route("/health", get(health_check))
        .route("/api/tutorial", get(get_tutorial))
        .route("/api/examples", get(get_examples))
        .route("/api/examples/:id/iterations/:index", get(get_iteration))
        .route("/api/technique", get(get_technique))
        .route("/api/resources", get(get_resources))
        .route("/api/challenge", get(get_challenge))
        .route("/api/subscribe", post(subscribe))
        .route("/api/highlight", post(highlight))
        .route("/api/quiz", get(get_quiz))
        .route("/api/quiz/answer", post(answer_quiz))
        .route("/api/quiz/result", post(quiz_result));

    let router = if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Tutorial page
async fn tutorial_page(State(state): State<Arc<ApiState>>) -> Html<String> {
    Html(render_page(&state.catalog))
}

async fn get_tutorial(State(state): State<Arc<ApiState>>) -> Json<TutorialResponse> {
    Json(TutorialResponse {
        title: state.catalog.tutorial.title.clone(),
        sections: state.catalog.tutorial.sections.clone(),
    })
}

async fn get_examples(State(state): State<Arc<ApiState>>) -> Json<ExamplesResponse> {
    Json(ExamplesResponse {
        examples: state.catalog.examples.iter().map(ExampleJson::from).collect(),
    })
}

/// One iteration with its diff against the previous one
///
/// `index` is 1-based, matching the gallery tabs.
async fn get_iteration(
    State(state): State<Arc<ApiState>>,
    Path((id, index)): Path<(String, usize)>,
) -> ApiResult<IterationView> {
    let example = state
        .catalog
        .example(&id)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Unknown example: {}", id)))?;

    index
        .checked_sub(1)
        .and_then(|i| IterationView::build(example, i))
        .map(Json)
        .ok_or_else(|| {
            api_error(
                StatusCode::NOT_FOUND,
                format!(
                    "Iteration {} out of range for '{}' (1..={})",
                    index,
                    id,
                    example.iterations.len()
                ),
            )
        })
}

async fn get_technique(State(state): State<Arc<ApiState>>) -> Json<TechniqueResponse> {
    Json(TechniqueResponse {
        steps: state.catalog.technique.clone(),
    })
}

async fn get_resources(State(state): State<Arc<ApiState>>) -> Json<ResourcesResponse> {
    Json(ResourcesResponse {
        categories: state.catalog.resources.clone(),
    })
}

async fn get_challenge(State(state): State<Arc<ApiState>>) -> Json<ChallengeResponse> {
    Json(ChallengeResponse {
        steps: state.catalog.challenge.clone(),
    })
}

/// Newsletter signup; validates only, nothing is persisted
///
/// Any body without a string `email` (no body, not JSON, wrong type) is
/// treated as a missing address.
async fn subscribe(body: Result<Json<Value>, JsonRejection>) -> ApiResult<MessageResponse> {
    let body = match body {
        Ok(Json(body)) => Some(body),
        Err(rejection) => {
            debug!(error = %rejection, "Unreadable subscribe body");
            None
        }
    };
    let email = body.as_ref().and_then(|b| b.get("email")).and_then(Value::as_str);

    match newsletter::subscribe(email) {
        Ok(message) => Ok(Json(MessageResponse {
            message: message.to_string(),
        })),
        Err(e) => Err(api_error(StatusCode::BAD_REQUEST, e.to_string())),
    }
}

async fn highlight(Json(request): Json<HighlightRequest>) -> Json<HighlightResponse> {
    let tokens = diff::diff_text(&request.current, request.previous.as_deref());
    let markup = match &tokens {
        Some(tokens) => diff::render_markup(tokens),
        None => request.current.clone(),
    };
    debug!(words = tokens.as_ref().map(Vec::len), "Highlighted prompt");

    Json(HighlightResponse {
        markup,
        summary: tokens.as_deref().map(DiffSummary::of),
        tokens,
    })
}

async fn get_quiz(State(state): State<Arc<ApiState>>) -> Json<QuizResponse> {
    Json(QuizResponse {
        questions: state.catalog.quiz.clone(),
    })
}

async fn answer_quiz(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<AnswerRequest>,
) -> ApiResult<AnswerOutcome> {
    match quiz::check_answer(&state.catalog.quiz, request.question_id, request.option) {
        Ok(outcome) => Ok(Json(outcome)),
        Err(e @ QuizError::UnknownQuestion(_)) => {
            Err(api_error(StatusCode::NOT_FOUND, e.to_string()))
        }
        Err(e) => Err(api_error(StatusCode::BAD_REQUEST, e.to_string())),
    }
}

/// Score a full run of answers and return the closing verdict
async fn quiz_result(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<ResultRequest>,
) -> ApiResult<QuizResult> {
    quiz::grade(&state.catalog.quiz, &request.answers)
        .map(Json)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(Arc::new(ApiState {
            catalog: Arc::new(Catalog::builtin().unwrap()),
            cors_permissive: true,
        }))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_tutorial() {
        let (status, body) = get_json("/api/tutorial").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "AI Artistry Unveiled: A Gujarati Journey into Detail");
        assert_eq!(body["sections"].as_array().unwrap().len(), 3);
        assert_eq!(body["sections"][0]["id"], "introduction");
    }

    #[tokio::test]
    async fn test_examples_use_plain_prompts() {
        let (status, body) = get_json("/api/examples").await;
        assert_eq!(status, StatusCode::OK);

        let example = &body["examples"][0];
        assert_eq!(example["id"], "rann-utsav");
        let iterations = example["iterations"].as_array().unwrap();
        assert_eq!(iterations.len(), 3);
        assert_eq!(iterations[0]["iteration"], 1);
        assert!(iterations[0]["imageUrl"].as_str().unwrap().starts_with("https://"));
        assert!(!iterations[1]["prompt"].as_str().unwrap().contains('<'));
    }

    #[tokio::test]
    async fn test_iteration_view() {
        let (status, first) = get_json("/api/examples/rann-utsav/iterations/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["index"], 0);
        assert_eq!(first["can_go_back"], false);
        assert!(first["diff"].is_null());

        let (status, second) = get_json("/api/examples/rann-utsav/iterations/2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["can_go_forward"], true);
        assert!(second["summary"]["new_words"].as_u64().unwrap() > 0);
        assert!(second["highlighted_prompt"]
            .as_str()
            .unwrap()
            .contains("<span class=\"new-word\">Vibrant</span>"));
    }

    #[tokio::test]
    async fn test_iteration_not_found() {
        let (status, _) = get_json("/api/examples/rann-utsav/iterations/0").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, body) = get_json("/api/examples/rann-utsav/iterations/5").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].as_str().unwrap().contains("out of range"));
        let (status, _) = get_json("/api/examples/navratri/iterations/1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_technique_and_resources() {
        let (_, technique) = get_json("/api/technique").await;
        assert_eq!(technique["steps"].as_array().unwrap().len(), 4);
        assert_eq!(technique["steps"][0]["title"], "Begin with Basic Concepts");

        let (_, resources) = get_json("/api/resources").await;
        assert_eq!(resources["categories"][1]["icon"], "gallery");
        assert_eq!(resources["categories"][0]["items"][1]["icon"], "video");
    }

    #[tokio::test]
    async fn test_challenge() {
        let (status, body) = get_json("/api/challenge").await;
        assert_eq!(status, StatusCode::OK);
        let steps = body["steps"].as_array().unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[2]["title"], "Cultural Context & Style");
        assert_eq!(steps[1]["example_prompt"][1]["emphasized"], true);
    }

    #[tokio::test]
    async fn test_subscribe() {
        let (status, body) = post_json("/api/subscribe", json!({"email": "a@b.c"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Subscription successful");

        let (status, body) = post_json("/api/subscribe", json!({"email": "a@b"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Valid email is required");

        let (status, _) = post_json("/api/subscribe", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_subscribe_malformed_body() {
        let (status, body) = post_json("/api/subscribe", json!({"email": 123})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Valid email is required");

        let (status, body) = send(
            Request::builder()
                .method("POST")
                .uri("/api/subscribe")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Valid email is required");

        let (status, body) = send(
            Request::builder()
                .method("POST")
                .uri("/api/subscribe")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Valid email is required");
    }

    #[tokio::test]
    async fn test_highlight_endpoint() {
        let (status, body) = post_json(
            "/api/highlight",
            json!({"current": "a b c d", "previous": "a b c"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["markup"], "a b c <span class=\"new-word\">d</span>");
        assert_eq!(body["summary"]["new_words"], 1);
        assert_eq!(body["tokens"][3]["is_new"], true);

        let (_, body) = post_json("/api/highlight", json!({"current": "<b>x</b>"})).await;
        assert_eq!(body["markup"], "<b>x</b>");
        assert!(body["tokens"].is_null());
    }

    #[tokio::test]
    async fn test_quiz_hides_answers() {
        let (status, body) = get_json("/api/quiz").await;
        assert_eq!(status, StatusCode::OK);
        let first = &body["questions"][0];
        assert_eq!(first["options"].as_array().unwrap().len(), 4);
        assert!(first.get("correct_option").is_none());
        assert!(first.get("explanation").is_none());
    }

    #[tokio::test]
    async fn test_quiz_answer() {
        let (status, body) =
            post_json("/api/quiz/answer", json!({"question_id": 1, "option": 1})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["correct"], true);

        let (status, _) =
            post_json("/api/quiz/answer", json!({"question_id": 42, "option": 0})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) =
            post_json("/api/quiz/answer", json!({"question_id": 1, "option": 9})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_quiz_result() {
        let (status, body) =
            post_json("/api/quiz/result", json!({"answers": [1, 2, 1, 1, 2]})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 5);
        assert_eq!(body["verdict"], "perfect");
        assert_eq!(
            body["message"],
            "Perfect score! You're a master of iterative prompting!"
        );

        let (status, body) = post_json("/api/quiz/result", json!({"answers": [1]})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("incomplete"));
    }

    #[tokio::test]
    async fn test_page_served() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("AI Artistry Unveiled"));
        assert!(html.contains("data-theme=\"tutorial\""));
    }
}
