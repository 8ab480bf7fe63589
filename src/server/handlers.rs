//! Request handlers

use crate::error::ChatAnalyzerError;
use crate::processing::{AnalysisResponse, ChatAnalyzer};
use crate::server::response::{ApiError, ApiResponse};
use crate::server::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Request body for `POST /chat-message`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
}

/// Analyze a chat message and return aggregated nouns, verbs and entities
pub async fn chat_message(
    State(state): State<AppState>,
    payload: Result<Json<ChatMessage>, JsonRejection>,
) -> Result<Json<ApiResponse<AnalysisResponse>>, ApiError> {
    let Json(message) = payload?;

    // Reject blank input before handing work to the blocking pool
    let text = ChatAnalyzer::validate(&message.text)?.to_string();
    log::debug!("Analyzing message of {} characters", text.chars().count());

    let analyzer = state.analyzer.clone();
    let response = tokio::task::spawn_blocking(move || analyzer.analyze(&text))
        .await
        .map_err(ChatAnalyzerError::from)??;

    Ok(Json(ApiResponse::success(response)))
}
