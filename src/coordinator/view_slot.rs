use anyhow::Result;
use log::{debug, error};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading,
    Ready,
    Error,
}

/// Generation of the refresh a response belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Fresh,
    Failed,
    Stale,
}

/// Latest snapshot of one view plus its refresh state.
///
/// Snapshots are replaced wholesale, never patched. A failed refresh keeps
/// the previous snapshot visible and records a notice.
pub struct ViewSlot<T> {
    name: &'static str,
    state: ViewState,
    generation: u64,
    snapshot: Option<Arc<T>>,
    notice: Option<String>,
}

impl<T> ViewSlot<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: ViewState::Idle,
            generation: 0,
            snapshot: None,
            notice: None,
        }
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.generation += 1;
        self.state = ViewState::Loading;
        debug!("{} view refresh #{} started", self.name, self.generation);
        RefreshTicket(self.generation)
    }

    /// Apply a fetch result. Only the most recently issued ticket is honoured.
    pub fn apply(&mut self, ticket: RefreshTicket, result: Result<T>) -> Applied {
        if ticket.0 != self.generation {
            debug!(
                "{} view dropped stale response #{} (latest #{})",
                self.name, ticket.0, self.generation
            );
            return Applied::Stale;
        }

        match result {
            Ok(snapshot) => {
                self.snapshot = Some(Arc::new(snapshot));
                self.state = ViewState::Ready;
                self.notice = None;
                Applied::Fresh
            }
            Err(e) => {
                error!("{} view refresh failed: {:#}", self.name, e);
                self.state = ViewState::Error;
                self.notice = Some(format!("Could not refresh {}: {:#}", self.name, e));
                Applied::Failed
            }
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn snapshot(&self) -> Option<&T> {
        self.snapshot.as_deref()
    }

    /// Shared handle to the current snapshot version
    pub fn shared(&self) -> Option<Arc<T>> {
        self.snapshot.clone()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}
