use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::agenda::AgendaState;
use crate::html::{self, Notice};
use crate::llm::GeminiClient;
use crate::scheduler;
use crate::types::{ScheduledItem, TaskRequest};
use crate::variant::Variant;

/// Application state shared across requests.
///
/// `submission` is held for the whole model round trip, so only one
/// submission is in flight at a time. The agenda itself is only locked
/// briefly, so page loads and resets never wait on the model.
pub struct AppState {
    pub agenda: RwLock<AgendaState>,
    pub submission: Mutex<()>,
    pub client: GeminiClient,
    pub variant: Variant,
}

impl AppState {
    pub fn new(client: GeminiClient, variant: Variant) -> Self {
        Self {
            agenda: RwLock::new(AgendaState::new()),
            submission: Mutex::new(()),
            client,
            variant,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/agendar", post(schedule_handler))
        .route("/reiniciar", post(reset_handler))
        .route("/api/agenda", get(agenda_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the web server
pub async fn serve(port: u16, state: AppState) -> anyhow::Result<()> {
    let variant = state.variant;
    let app = router(Arc::new(state));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!(%addr, %variant, "Server running");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Serve the main HTML page
async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let agenda = state.agenda.read().await;
    Html(html::render_page(&agenda, None).into_string())
}

/// Ask the model to place the submitted task
async fn schedule_handler(
    State(state): State<Arc<AppState>>,
    Form(request): Form<TaskRequest>,
) -> Response {
    if request.task.is_empty() {
        return Redirect::to("/").into_response();
    }

    let _submission = state.submission.lock().await;

    // Work on a snapshot so the agenda is not locked during the model call
    let mut draft = state.agenda.read().await.clone();
    match scheduler::schedule_task(&mut draft, &request, &state.client, state.variant).await {
        Ok(placement) => {
            state.agenda.write().await.push(placement.item().clone());
            Redirect::to("/").into_response()
        }
        Err(e) => {
            let notice = if e.is_warning() {
                warn!(task = %request.task, "{}", e);
                Notice::warning(e.user_message())
            } else {
                error!(task = %request.task, "Scheduling failed: {}", e);
                Notice::error(e.user_message())
            };
            let agenda = state.agenda.read().await;
            Html(html::render_page(&agenda, Some(&notice)).into_string()).into_response()
        }
    }
}

/// Put the week back to the fixed blocks
async fn reset_handler(State(state): State<Arc<AppState>>) -> Redirect {
    let mut agenda = state.agenda.write().await;
    agenda.reset();
    info!(count = agenda.len(), "Agenda reset");
    Redirect::to("/")
}

/// Return the agenda as JSON
async fn agenda_handler(State(state): State<Arc<AppState>>) -> Json<Vec<ScheduledItem>> {
    let agenda = state.agenda.read().await;
    Json(agenda.items().to_vec())
}
