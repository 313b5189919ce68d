//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::contact::{ContactField, ContactMessage};
use crate::presenter::Panel;
use crate::quiz::QuizState;
use crate::share::SharePlatform;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    View,
    SelectOption {
        #[serde(rename = "optionId")]
        option_id: String,
    },
    Submit,
    CopyCode,
    Share {
        platform: SharePlatform,
        #[serde(default, rename = "pageUrl")]
        page_url: Option<String>,
    },
    ContactField {
        field: ContactField,
        value: String,
    },
    ContactSubmit,
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Panel {
        state: QuizState,
        panel: Panel,
    },
    /// User-facing nudge; the session did not change.
    Prompt {
        message: String,
    },
    Copied {
        code: String,
        message: String,
    },
    Share {
        platform: SharePlatform,
        url: String,
    },
    ContactForm {
        #[serde(flatten)]
        draft: ContactMessage,
    },
    ContactAck {
        message: String,
    },
    Error {
        message: String,
    },
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Serialize)]
pub struct SessionOut {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub state: QuizState,
    pub panel: Panel,
}

#[derive(Debug, Deserialize)]
pub struct SelectIn {
    #[serde(rename = "optionId")]
    pub option_id: String,
}

#[derive(Debug, Serialize)]
pub struct CopyOut {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ShareQuery {
    pub platform: String,
    #[serde(rename = "pageUrl")]
    pub page_url: Option<String>,
}
#[derive(Debug, Serialize)]
pub struct ShareOut {
    pub platform: SharePlatform,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ContactOut {
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
    pub sessions: usize,
}
