use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use embedc_core::{DatasheetPayload, Extraction, GeneratedResponse};

use crate::models::{ErrorJson, GenerateJson};
use crate::state::AppState;
use crate::template::{self, PageView};
use crate::upload::{self, FormFields};

pub const EMPTY_QUERY_NOTICE: &str = "Enter a query (and optionally upload a datasheet).";

/// Why a request produced no code.
enum Rejection {
    BadForm(String),
    EmptyQuery,
    Internal(String),
}

impl Rejection {
    fn status(&self) -> StatusCode {
        match self {
            Rejection::BadForm(_) | Rejection::EmptyQuery => StatusCode::BAD_REQUEST,
            Rejection::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Rejection::BadForm(msg) | Rejection::Internal(msg) => msg.clone(),
            Rejection::EmptyQuery => EMPTY_QUERY_NOTICE.to_string(),
        }
    }
}

struct Outcome {
    response: GeneratedResponse,
    /// `None` when no datasheet was uploaded.
    extraction: Option<Extraction>,
    filename: Option<String>,
}

/// Form submission: re-render the page with the generated code.
pub async fn generate_page(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    let backends = state.extractor.backend_names();

    match run(state, multipart).await {
        Ok(outcome) => {
            let summary = outcome
                .extraction
                .as_ref()
                .zip(outcome.filename.as_deref())
                .map(|(extraction, name)| extraction_summary(name, extraction));
            let view = PageView {
                query: outcome.response.query.clone(),
                summary,
                result: Some(outcome.response.to_string()),
                backends,
                ..PageView::default()
            };
            template::render_page(&view).into_response()
        }
        Err((query, rejection)) => {
            let view = PageView {
                query,
                notice: Some(rejection.message()),
                backends,
                ..PageView::default()
            };
            (rejection.status(), template::render_page(&view)).into_response()
        }
    }
}

/// Same inputs as the form, JSON out.
pub async fn generate_json(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    match run(state, multipart).await {
        Ok(outcome) => {
            let extraction = outcome.extraction.unwrap_or_default();
            Json(GenerateJson {
                query: outcome.response.query.clone(),
                peripheral: outcome.response.peripheral.label().to_string(),
                code: outcome.response.to_string(),
                extracted_chars: extraction.text.len(),
                backend: extraction.backend.map(str::to_string),
            })
            .into_response()
        }
        Err((_, rejection)) => (
            rejection.status(),
            Json(ErrorJson {
                error: rejection.message(),
            }),
        )
            .into_response(),
    }
}

/// Parse the form, extract the datasheet off the async runtime, respond.
/// Rejections carry the submitted query so the form can be refilled.
async fn run(
    state: Arc<AppState>,
    multipart: Multipart,
) -> Result<Outcome, (String, Rejection)> {
    let FormFields { query, datasheet } = upload::parse_multipart(multipart)
        .await
        .map_err(|e| (String::new(), Rejection::BadForm(e)))?;

    if query.trim().is_empty() {
        return Err((query, Rejection::EmptyQuery));
    }

    let (extraction, filename) = match datasheet {
        Some(file) => {
            let state = state.clone();
            let data = file.data;
            let extraction = tokio::task::spawn_blocking(move || {
                state
                    .extractor
                    .extract_detailed(DatasheetPayload::Bytes(&data))
            })
            .await
            .map_err(|e| {
                (
                    query.clone(),
                    Rejection::Internal(format!("Extraction task error: {}", e)),
                )
            })?;
            (Some(extraction), Some(file.filename))
        }
        None => (None, None),
    };

    let datasheet_text = extraction
        .as_ref()
        .map(|e| e.text.as_str())
        .unwrap_or_default();
    let response = embedc_core::respond(&query, datasheet_text);
    tracing::info!(
        peripheral = %response.peripheral,
        datasheet_chars = datasheet_text.len(),
        "generated code"
    );

    Ok(Outcome {
        response,
        extraction,
        filename,
    })
}

fn extraction_summary(filename: &str, extraction: &Extraction) -> String {
    match extraction.backend {
        Some(backend) => format!(
            "{}: {} characters extracted from {} pages via {} ({} pages failed)",
            filename,
            extraction.text.len(),
            extraction.pages_total,
            backend,
            extraction.pages_failed
        ),
        None => format!("{}: no text could be extracted", filename),
    }
}
