//! Chatbot endpoint

use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{error::AppResult, services::chatbot::ChatbotReply};

use super::AuthenticatedUser;

/// Natural-language query
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatbotQuery {
    pub question: String,
    /// Reserved for future conversational context
    #[schema(value_type = Object, nullable)]
    pub context: Option<serde_json::Value>,
}

/// Answer a natural-language question about the inventory
#[utoipa::path(
    post,
    path = "/chatbot/query",
    tag = "chatbot",
    security(("bearer_auth" = [])),
    request_body = ChatbotQuery,
    responses(
        (status = 200, description = "Chatbot answer", body = ChatbotReply),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn query(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<ChatbotQuery>,
) -> AppResult<Json<ChatbotReply>> {
    let reply = state.services.chatbot.process_query(&data.question).await?;
    Ok(Json(reply))
}
