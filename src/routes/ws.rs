//! WebSocket upgrade + message loop. Each connection is one presentation
//! surface: it owns a single quiz session and contact form draft for its
//! whole lifetime, so a reconnect starts from scratch.
//! Each client message is parsed as JSON and answered with one JSON message.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::contact::ContactForm;
use crate::error::QuizError;
use crate::logic::*;
use crate::presenter::present;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::quiz::QuizSession;
use crate::state::AppState;

/// Everything one connected page owns.
#[derive(Debug, Default)]
pub struct Surface {
  pub session: QuizSession,
  pub contact: ContactForm,
}

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "glitchcore", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "glitchcore", "WebSocket connected");
  let mut surface = Surface::default();

  // Greet with the initial panel so the page can render without asking.
  if send(&mut socket, &panel_message(&state, &surface)).await.is_err() {
    return;
  }

  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "glitchcore", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state, &mut surface)
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        if send(&mut socket, &reply_msg).await.is_err() {
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "glitchcore", final_state = %surface.session.state(), "WebSocket disconnected");
}

async fn send(socket: &mut WebSocket, msg: &ServerWsMessage) -> Result<(), axum::Error> {
  let out = serde_json::to_string(msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  });
  socket.send(Message::Text(out)).await.map_err(|e| {
    error!(target: "glitchcore", error = %e, "WS send error");
    e
  })
}

fn panel_message(state: &AppState, surface: &Surface) -> ServerWsMessage {
  ServerWsMessage::Panel {
    state: surface.session.state(),
    panel: present(&state.quiz, &state.content, &surface.session),
  }
}

pub fn handle_client_ws(msg: ClientWsMessage, state: &AppState, surface: &mut Surface) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::View => panel_message(state, surface),

    ClientWsMessage::SelectOption { option_id } => match select_answer(state, &mut surface.session, &option_id) {
      Ok(_) => panel_message(state, surface),
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },

    ClientWsMessage::Submit => match submit_answer(state, &mut surface.session) {
      Ok(_) => panel_message(state, surface),
      Err(QuizError::NoSelection) => ServerWsMessage::Prompt { message: state.content.no_selection_prompt.clone() },
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },

    ClientWsMessage::CopyCode => match copy_code(state, &surface.session) {
      Some((code, message)) => ServerWsMessage::Copied { code, message },
      None => ServerWsMessage::Error { message: "No access code for this session.".into() },
    },

    ClientWsMessage::Share { platform, page_url } => {
      let url = share_link(state, platform, page_url.as_deref());
      ServerWsMessage::Share { platform, url }
    }

    ClientWsMessage::ContactField { field, value } => match ensure_contact_open(&surface.session) {
      Ok(()) => {
        surface.contact.update(field, value);
        ServerWsMessage::ContactForm { draft: surface.contact.draft().clone() }
      }
      Err(_) => ServerWsMessage::Prompt { message: state.content.contact_locked_prompt.clone() },
    },

    ClientWsMessage::ContactSubmit => match submit_contact(state, &surface.session, &mut surface.contact) {
      Ok(message) => ServerWsMessage::ContactAck { message },
      Err(_) => ServerWsMessage::Prompt { message: state.content.contact_locked_prompt.clone() },
    },
  }
}
