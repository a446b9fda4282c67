//! Server-rendered web front end.
//!
//! Every route is a thin adapter: it parses form or query input, makes one
//! or two calls on the shared [`Tasks`] handle and either renders HTML or
//! redirects back to the list.

pub mod handlers;
pub mod pages;

use crate::db::tasks::Tasks;
use crate::libs::error::TaskError;
use crate::libs::messages::Message;
use crate::{msg_print, msg_success, msg_warning};
use anyhow::Result;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// State shared by all handlers.
///
/// The SQLite connection is not `Sync`, so the store sits behind a mutex.
/// Handlers hold the guard for a single store call and never across an
/// `.await`.
#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<Mutex<Tasks>>,
}

impl AppState {
    pub fn new(tasks: Tasks) -> Self {
        AppState {
            tasks: Arc::new(Mutex::new(tasks)),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/add", post(handlers::add_task))
        .route("/done/{id}", post(handlers::mark_done))
        .route("/delete/{id}", post(handlers::delete_task))
        .route("/edit/{id}", get(handlers::edit_form).post(handlers::edit_task))
        .route("/comment/{id}", post(handlers::save_comment))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn start_server(addr: &str, tasks: Tasks) -> Result<()> {
    let app = create_router(AppState::new(tasks));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    msg_success!(Message::ServerListening(listener.local_addr()?.to_string()));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    msg_print!(Message::ServerStopped);
    Ok(())
}

async fn shutdown_signal() {
    wait_for_signal(tokio::signal::ctrl_c()).await
}

/// Resolves when `signal` fires. If the handler could not be installed the
/// server keeps running until the process is killed.
async fn wait_for_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        msg_warning!(Message::ShutdownSignalUnavailable(e.to_string()));
        std::future::pending::<()>().await;
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let status = match &self {
            TaskError::Validation(_) => StatusCode::BAD_REQUEST,
            TaskError::NotFound(_) => StatusCode::NOT_FOUND,
            TaskError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("{}", Message::RequestFailed(self.to_string()));
        } else {
            tracing::debug!("{}", Message::RequestFailed(self.to_string()));
        }

        (status, Html(pages::error_page(status, &self.to_string()))).into_response()
    }
}
