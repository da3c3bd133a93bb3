//! Chat turn orchestration
//!
//! One logical request per user turn: append the user message, resolve
//! relevant tables, forward the raw text to the gateway, append the answer.
//! The resolver's candidates are reported alongside the answer but are not
//! threaded into the gateway call; the backend receives the user text as-is.

use crate::catalog::SchemaCatalog;
use crate::gateway::Gateway;
use crate::resolver::{RelevanceCandidate, TableResolver};
use crate::session::{ChatMessage, ChatSession};
use tracing::{info, warn};

/// Starter prompts offered when a session has no history yet.
pub const SUGGESTED_PROMPTS: [&str; 3] = [
    "Which parts are low in stock?",
    "Who is my most reliable supplier?",
    "How many Voltway S1 V1 Standard can we produce?",
];

pub struct TurnOutcome {
    pub answer: String,
    pub candidates: Vec<RelevanceCandidate>,
}

pub struct Agent {
    resolver: TableResolver,
    gateway: Gateway,
    catalog: SchemaCatalog,
}

impl Agent {
    pub fn new(resolver: TableResolver, gateway: Gateway, catalog: SchemaCatalog) -> Self {
        Self {
            resolver,
            gateway,
            catalog,
        }
    }

    pub fn catalog(&self) -> &SchemaCatalog {
        &self.catalog
    }

    /// Run one chat turn. Failures never escape: both resolver and gateway
    /// errors degrade to user-visible text, and the session stays usable.
    pub async fn run_turn(&self, session: &mut ChatSession, user_input: &str) -> TurnOutcome {
        session.append(ChatMessage::user(user_input));

        let candidates = match self.resolver.resolve(user_input, &self.catalog).await {
            Ok(candidates) => {
                info!(
                    "Resolved {} relevant table(s) for session {}",
                    candidates.len(),
                    session.id()
                );
                candidates
            }
            Err(e) => {
                // Resolution is advisory for the query path, so a failed
                // resolution downgrades to "no candidates" rather than
                // aborting the turn.
                warn!("Table resolution failed: {}", e);
                Vec::new()
            }
        };

        let answer = match self.gateway.query(user_input).await {
            Ok(answer) => answer,
            Err(e) => format!("Request failed: {}", e),
        };

        session.append(ChatMessage::assistant(answer.clone()));
        TurnOutcome { answer, candidates }
    }
}
