//! Application state: site config, code generator, contact sink and the
//! in-memory store of HTTP quiz sessions.
//!
//! WebSocket surfaces own their session directly and never touch the store.
//! HTTP sessions are addressed by an opaque id and expire after the
//! configured idle TTL; nothing here outlives the process.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::config::{load_site_config_from_env, SiteConfig, SiteContent};
use crate::contact::{ContactSink, LogSink};
use crate::domain::QuizDefinition;
use crate::quiz::QuizSession;
use crate::reward::{AccessCode, AccessCodeGenerator};

struct SessionEntry {
    session: QuizSession,
    touched: Instant,
}

#[derive(Clone)]
pub struct AppState {
    pub quiz: QuizDefinition,
    pub codes: AccessCodeGenerator,
    pub content: SiteContent,
    pub public_url: String,
    pub contact_sink: Arc<dyn ContactSink>,
    session_ttl: Duration,
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
}

impl AppState {
    /// Build state from env: load config and log the quiz being served.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let state = Self::from_config(load_site_config_from_env(), Arc::new(LogSink));
        info!(
            target: "glitchcore",
            options = state.quiz.options.len(),
            correct = %state.quiz.correct_option_id,
            code_prefix = %state.codes.prefix(),
            ttl_secs = state.session_ttl.as_secs(),
            "Quiz ready"
        );
        state
    }

    pub fn from_config(cfg: SiteConfig, contact_sink: Arc<dyn ContactSink>) -> Self {
        Self {
            quiz: cfg.quiz,
            codes: AccessCodeGenerator::new(cfg.reward.code_prefix),
            content: cfg.content,
            public_url: cfg.public_url,
            contact_sink,
            session_ttl: Duration::from_secs(cfg.session_ttl_secs),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Fresh access code from the thread-local RNG.
    pub fn issue_code(&self) -> AccessCode {
        self.codes.generate(&mut rand::thread_rng())
    }

    /// Start a brand-new session. Expired sessions are dropped first.
    #[instrument(level = "debug", skip(self))]
    pub async fn create_session(&self) -> (String, QuizSession) {
        let id = Uuid::new_v4().to_string();
        let session = QuizSession::new();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        let ttl = self.session_ttl;
        sessions.retain(|_, e| e.touched.elapsed() < ttl);
        let pruned = before - sessions.len();
        if pruned > 0 {
            debug!(target: "quiz", pruned, "Dropped expired sessions");
        }

        sessions.insert(id.clone(), SessionEntry { session: session.clone(), touched: Instant::now() });
        info!(target: "quiz", session = %id, live = sessions.len(), "Session created");
        (id, session)
    }

    /// Snapshot of a session by id.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn session(&self, id: &str) -> Option<QuizSession> {
        self.sessions.read().await.get(id).map(|e| e.session.clone())
    }

    /// Run `f` on a session under the store's write lock.
    /// Concurrent requests against the same session are applied one at a time.
    #[instrument(level = "debug", skip(self, f), fields(%id))]
    pub async fn with_session<T>(&self, id: &str, f: impl FnOnce(&mut QuizSession) -> T) -> Option<T> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(id)?;
        entry.touched = Instant::now();
        Some(f(&mut entry.session))
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
