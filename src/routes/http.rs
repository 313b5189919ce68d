//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs the session id and basic result info.

use std::sync::Arc;
use axum::{extract::{Path, State}, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::contact::{ContactForm, ContactMessage};
use crate::error::{AppError, QuizError};
use crate::logic::*;
use crate::presenter::present;
use crate::protocol::*;
use crate::quiz::QuizSession;
use crate::routes::extract::{ApiJson, ApiQuery};
use crate::share::SharePlatform;
use crate::state::AppState;

fn session_out(state: &AppState, session_id: String, session: &QuizSession) -> SessionOut {
  SessionOut {
    session_id,
    state: session.state(),
    panel: present(&state.quiz, &state.content, session),
  }
}

fn unknown_session(id: &str) -> AppError {
  AppError::NotFound(format!("unknown session: {id}"))
}

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HealthOut { ok: true, sessions: state.session_count().await })
}

#[instrument(level = "info", skip(state))]
pub async fn http_create_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let (id, session) = state.create_session().await;
  Json(session_out(&state, id, &session))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<SessionOut>, AppError> {
  let session = state.session(&id).await.ok_or_else(|| unknown_session(&id))?;
  Ok(Json(session_out(&state, id, &session)))
}

#[instrument(level = "info", skip(state, body), fields(%id, option_id = %body.option_id))]
pub async fn http_post_select(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  ApiJson(body): ApiJson<SelectIn>,
) -> Result<Json<SessionOut>, AppError> {
  let session = state
    .with_session(&id, |s| select_answer(&state, s, &body.option_id).map(|_| s.clone()))
    .await
    .ok_or_else(|| unknown_session(&id))??;
  Ok(Json(session_out(&state, id, &session)))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_post_submit(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<SessionOut>, AppError> {
  let result = state
    .with_session(&id, |s| submit_answer(&state, s).map(|outcome| (outcome, s.clone())))
    .await
    .ok_or_else(|| unknown_session(&id))?;
  let (outcome, session) = result.map_err(|e| match e {
    QuizError::NoSelection => AppError::NoSelection(state.content.no_selection_prompt.clone()),
    other => other.into(),
  })?;
  info!(target: "quiz", session = %id, ?outcome, correct = ?session.is_correct(), "HTTP submit handled");
  Ok(Json(session_out(&state, id, &session)))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_code(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<CopyOut>, AppError> {
  let session = state.session(&id).await.ok_or_else(|| unknown_session(&id))?;
  let (code, message) = copy_code(&state, &session)
    .ok_or_else(|| AppError::NotFound("no access code for this session".into()))?;
  Ok(Json(CopyOut { code, message }))
}

#[instrument(level = "info", skip(state), fields(platform = %q.platform))]
pub async fn http_get_share(
  State(state): State<Arc<AppState>>,
  ApiQuery(q): ApiQuery<ShareQuery>,
) -> Result<Json<ShareOut>, AppError> {
  let platform: SharePlatform = q.platform.parse().map_err(AppError::BadRequest)?;
  let url = share_link(&state, platform, q.page_url.as_deref());
  Ok(Json(ShareOut { platform, url }))
}

/// The contact form is part of the follow-up panels, so it only accepts
/// messages once the session has been submitted.
#[instrument(level = "info", skip(state, body), fields(%id, message_len = body.message.len()))]
pub async fn http_post_contact(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  ApiJson(body): ApiJson<ContactMessage>,
) -> Result<Json<ContactOut>, AppError> {
  let session = state.session(&id).await.ok_or_else(|| unknown_session(&id))?;
  let mut form = ContactForm::from(body);
  let message = submit_contact(&state, &session, &mut form)?;
  Ok(Json(ContactOut { message }))
}
