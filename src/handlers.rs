use crate::errors::AppError;
use crate::graphs::Dashboard;
use crate::models::DashboardResponse;
use crate::routes::{resolve, Page};
use crate::state::AppState;
use crate::ui::{render_page, render_statistics};
use axum::{extract::State, http::Uri, response::Html, Json};
use chrono::{Local, NaiveDate};
use tracing::error;

pub async fn page(State(state): State<AppState>, uri: Uri) -> Result<Html<String>, AppError> {
    let page = resolve(uri.path())
        .ok_or_else(|| AppError::not_found(format!("no page at {}", uri.path())))?;
    match page {
        Page::Statistics => {
            let dashboard = load_dashboard(&state).await.0;
            Ok(Html(render_statistics(dashboard.canvases())))
        }
        other => Ok(Html(render_page(other))),
    }
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let (dashboard, loaded) = load_dashboard(&state).await;
    Json(DashboardResponse {
        loaded,
        graphs: dashboard.canvases().filter_map(|canvas| canvas.to_response()).collect(),
    })
}

pub async fn health() -> &'static str {
    "ok"
}

/// Builds a fresh dashboard and waits on its join. Failures stop here.
async fn load_dashboard(state: &AppState) -> (Dashboard, bool) {
    let dashboard = Dashboard::standard(&state.config);
    match dashboard.load(&state.stats, today()).await {
        Ok(()) => (dashboard, true),
        Err(err) => {
            error!("dashboard failed to load: {err}");
            (dashboard, false)
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
