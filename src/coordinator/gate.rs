use log::warn;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use crate::submission::MatchSubmission;

type SubmissionKey = (String, String, bool);

/// Refuses a submission while an identical one is still unresolved
#[derive(Clone, Default)]
pub struct SubmissionGate {
    in_flight: Arc<Mutex<HashSet<SubmissionKey>>>,
}

/// Held for the lifetime of one dispatched submission. Dropping it (including
/// when the request future is cancelled) reopens the gate.
pub struct SubmissionPermit {
    in_flight: Arc<Mutex<HashSet<SubmissionKey>>>,
    key: SubmissionKey,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self, submission: &MatchSubmission) -> Option<SubmissionPermit> {
        let key = (
            submission.winner_id.clone(),
            submission.loser_id.clone(),
            submission.draw,
        );

        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(key.clone()) {
            warn!(
                "Submission {} vs {} already in flight, refusing duplicate",
                key.0, key.1
            );
            return None;
        }

        Some(SubmissionPermit {
            in_flight: Arc::clone(&self.in_flight),
            key,
        })
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Drop for SubmissionPermit {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
