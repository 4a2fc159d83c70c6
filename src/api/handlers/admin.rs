use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::config::default_slate_date;
use crate::services::{IngestionService, ProcessingService};

use super::AppState;

/// Bearer token expected on `/api/admin/refresh`. Unset means the endpoint
/// stays disabled.
fn admin_token() -> Option<String> {
    std::env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty())
}

fn is_authorized(headers: &HeaderMap, expected: &str) -> bool {
    let expected_header = format!("Bearer {}", expected);
    headers.get("Authorization").and_then(|h| h.to_str().ok()) == Some(expected_header.as_str())
}

pub async fn admin_refresh(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let Some(expected) = admin_token() else {
        return (StatusCode::SERVICE_UNAVAILABLE, "Admin refresh is not configured")
            .into_response();
    };
    if !is_authorized(&headers, &expected) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    tokio::spawn(async move {
        log::info!("Admin triggered refresh started");
        let date = default_slate_date();

        let ingest_result = async {
            let api_key = state.config.api_key()?;
            let mut ingest_service =
                IngestionService::new(state.config.clone(), &api_key, date.clone())?;
            ingest_service.run().await
        }
        .await;
        if let Err(e) = ingest_result {
            log::error!("Refresh failed at ingestion: {:?}", e);
            return;
        }

        let process_result = async {
            let process_service = ProcessingService::new(state.config.clone(), date)?;
            process_service.run()
        }
        .await;
        match process_result {
            Ok(report) if report.is_complete() => {
                log::info!("Admin triggered refresh completed successfully");
            }
            Ok(report) => {
                log::warn!(
                    "Admin triggered refresh left gaps: {}/{} games fully processed",
                    report.processed,
                    report.expected
                );
            }
            Err(e) => log::error!("Refresh failed at processing: {:?}", e),
        }
    });

    (StatusCode::ACCEPTED, "Refresh triggered").into_response()
}
