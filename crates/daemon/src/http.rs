use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use taskboard_core::{
    api::{ErrorBody, FEED_UNAVAILABLE_MESSAGE, HEALTH_PATH, SKIPPED_LINES_HEADER, TASKS_PATH},
    FeedError, FeedReader,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    feed: FeedReader,
}

impl AppState {
    pub fn new(feed: FeedReader) -> Self {
        Self { feed }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(healthz))
        .route(TASKS_PATH, get(list_tasks))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

/// Serves the current feed contents. The file is read once per request.
async fn list_tasks(State(st): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let snap = st.feed.read().await?;
    if snap.skipped_lines > 0 {
        tracing::warn!(
            skipped = snap.skipped_lines,
            served = snap.records.len(),
            "feed contained undecodable lines"
        );
    }

    let headers = [
        (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
        (
            HeaderName::from_static(SKIPPED_LINES_HEADER),
            HeaderValue::from(snap.skipped_lines),
        ),
    ];
    Ok((headers, Json(snap.records)))
}

#[derive(Debug)]
pub struct AppError(FeedError);

impl From<FeedError> for AppError {
    fn from(value: FeedError) -> Self {
        Self(value)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // The path stays in the server log; callers only see the generic message.
        tracing::error!(error = %self.0, "task feed read failed");
        let body = Json(ErrorBody::new(FEED_UNAVAILABLE_MESSAGE));
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))],
            body,
        )
            .into_response()
    }
}
