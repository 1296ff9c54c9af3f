//! the three external operations (`start_session`, `respond`, `snapshot`)
//! as a thin synchronous facade over `controller`, plus the serde DTOs a
//! collaborator (an HTTP layer, a CLI, a test harness) serializes instead
//! of reaching into `Controller` internals.

use crate::bank::{Bank, Trait};
use crate::config::Config;
use crate::controller::{Controller, State};
use crate::error::{DoseError, DoseResult};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ItemPrompt {
    pub item_number: u8,
    pub trait_tag: Trait,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TraitEstimate {
    pub trait_tag: Trait,
    pub theta: f64,
    pub se: f64,
    pub items_used: usize,
    pub done: bool,
    pub stopping_reason: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Progress {
    pub estimates: Vec<TraitEstimate>,
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SessionView {
    pub state: &'static str,
    pub current_item: Option<ItemPrompt>,
    pub progress: Progress,
}

fn state_label(state: State) -> &'static str {
    match state {
        State::AwaitingStart => "awaiting_start",
        State::AwaitingResponse => "awaiting_response",
        State::Complete => "complete",
        State::Failed => "failed",
    }
}

fn view_of(controller: &Controller) -> SessionView {
    let current_item = controller.current_item().map(|item_number| ItemPrompt {
        item_number,
        trait_tag: controller.bank_item(item_number).trait_tag,
    });
    let estimates = Trait::ALL
        .iter()
        .map(|&trait_tag| {
            let estimator = controller.estimator(trait_tag);
            TraitEstimate {
                trait_tag,
                theta: estimator.theta(),
                se: estimator.se(),
                items_used: estimator.items_count(),
                done: estimator.done(),
                stopping_reason: estimator.stopping_reason().map(|r| r.as_str()),
            }
        })
        .collect();
    SessionView {
        state: state_label(controller.state()),
        current_item,
        progress: Progress {
            estimates,
            complete: controller.complete(),
        },
    }
}

/// an in-memory table of live sessions, keyed by a caller-supplied id.
/// session persistence across process restarts is the caller's concern.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: BTreeMap<String, Controller>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_session(
        &mut self,
        session_id: impl Into<String>,
        bank: Arc<Bank>,
        config: Config,
    ) -> DoseResult<SessionView> {
        let mut controller = Controller::new(bank, config)?;
        controller.start()?;
        let view = view_of(&controller);
        self.sessions.insert(session_id.into(), controller);
        Ok(view)
    }

    pub fn respond(&mut self, session_id: &str, raw_response: u8) -> DoseResult<SessionView> {
        let controller = self.controller_mut(session_id)?;
        controller.respond(raw_response)?;
        Ok(view_of(controller))
    }

    pub fn snapshot(&self, session_id: &str) -> DoseResult<SessionView> {
        Ok(view_of(self.controller(session_id)?))
    }

    fn controller(&self, session_id: &str) -> DoseResult<&Controller> {
        self.sessions
            .get(session_id)
            .ok_or_else(|| DoseError::UnknownSession {
                session_id: session_id.to_string(),
            })
    }

    fn controller_mut(&mut self, session_id: &str) -> DoseResult<&mut Controller> {
        self.sessions
            .get_mut(session_id)
            .ok_or_else(|| DoseError::UnknownSession {
                session_id: session_id.to_string(),
            })
    }
}
