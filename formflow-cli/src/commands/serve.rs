//! Serve the demo form over HTTP

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use console::style;
use formflow::config::FormsConfig;
use formflow::csrf::{CsrfTokens, MemorySession};
use formflow::error::FormError;
use formflow::request::{Method, SubmittedRequest};

use crate::contact::contact_form;

/// Shared server state
///
/// One in-memory session backs every visitor, which is fine for a local demo.
pub struct AppState {
    config: FormsConfig,
    tokens: CsrfTokens<MemorySession>,
}

impl AppState {
    /// Create state for `config`
    #[must_use]
    pub fn new(config: FormsConfig) -> Self {
        let tokens = CsrfTokens::with_settings(MemorySession::default(), &config.security);
        Self { config, tokens }
    }
}

/// A form definition error surfaced as a 500
#[derive(Debug)]
pub struct ServeError(FormError);

impl From<FormError> for ServeError {
    fn from(error: FormError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "form processing failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Form processing failed").into_response()
    }
}

/// Build the router: `GET /` shows the form, `POST /` processes it
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(show).post(accept))
        .with_state(state)
}

/// First view
///
/// # Errors
///
/// Form definition errors.
pub async fn show(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServeError> {
    let mut form = contact_form(&state.config);
    let outcome = form.process(&SubmittedRequest::get(), &state.tokens)?;
    Ok(Html(page(&outcome.html)))
}

/// Submission; the body is `application/x-www-form-urlencoded`
///
/// # Errors
///
/// Form definition errors.
pub async fn accept(State(state): State<Arc<AppState>>, body: String) -> Result<Html<String>, ServeError> {
    let request = SubmittedRequest::from_urlencoded(Method::Post, &body);
    let mut form = contact_form(&state.config);
    let outcome = form.process(&request, &state.tokens)?;
    tracing::info!(state = ?outcome.state, "processed submission");
    Ok(Html(page(&outcome.html)))
}

fn page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Example Contact Form</title>
<style>
label {{ display: inline-block; width: 250px; padding-left: 3em; }}
li label, div.radioset label {{ padding-left: 0.5em; display: inline; }}
div.ok, input.ok, textarea.ok, select.ok {{ border: 2px solid #30cf30; }}
div.required, input.required, textarea.required, select.required {{ border: 2px solid #cf30cf; }}
div.error, input.error, textarea.error, select.error {{ border: 2px solid #cf3030; }}
span.error-msg {{ font-weight: bold; margin-left: 0.5em; }}
</style>
</head>
<body>
<h3>Example Contact Form</h3>
{body}
</body>
</html>
"#
    )
}

/// Run the demo server until interrupted
pub struct ServeCommand {
    bind: String,
    config: Option<PathBuf>,
}

impl ServeCommand {
    /// Create a new command instance
    #[must_use]
    pub const fn new(bind: String, config: Option<PathBuf>) -> Self {
        Self { bind, config }
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Configuration loading, binding or serving failures.
    pub async fn execute(&self) -> Result<()> {
        let config = super::load_config(self.config.as_deref())?;
        let app = router(Arc::new(AppState::new(config)));

        let listener = tokio::net::TcpListener::bind(&self.bind)
            .await
            .with_context(|| format!("Failed to bind {}", self.bind))?;
        println!(
            "{} {}",
            style("Serving").green().bold(),
            style(format!("http://{}", self.bind)).cyan()
        );
        axum::serve(listener, app).await?;
        Ok(())
    }
}
