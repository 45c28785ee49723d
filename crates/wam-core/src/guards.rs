//! Guards against double submission and accidental destruction.

use crate::error::{WamError, WamResult};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Confirmation phrase required before destructive deletes.
pub const DELETE_CONFIRMATION: &str = "DELETE";

/// Validate a typed confirmation phrase. Only the exact literal passes;
/// case variants and surrounding whitespace do not.
pub fn confirm_destructive(input: &str) -> WamResult<()> {
    if input == DELETE_CONFIRMATION {
        Ok(())
    } else {
        Err(WamError::confirmation_required(DELETE_CONFIRMATION))
    }
}

/// Registry of named actions currently in flight.
///
/// `try_begin` hands out a token that occupies the action slot until
/// dropped, so a second trigger while the first call is still awaiting
/// is rejected instead of queued.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    active: Arc<Mutex<HashSet<String>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for `action`, or fail with `AlreadyRunning`.
    pub fn try_begin(&self, action: &str) -> WamResult<InFlightToken> {
        let mut active = self
            .active
            .lock()
            .map_err(|_| WamError::internal("in-flight registry poisoned"))?;
        if !active.insert(action.to_string()) {
            return Err(WamError::already_running(action));
        }
        Ok(InFlightToken {
            active: Arc::clone(&self.active),
            action: action.to_string(),
        })
    }

    /// Whether `action` currently holds its slot.
    pub fn is_running(&self, action: &str) -> bool {
        self.active
            .lock()
            .map(|a| a.contains(action))
            .unwrap_or(false)
    }
}

/// Releases its action slot when dropped.
#[derive(Debug)]
pub struct InFlightToken {
    active: Arc<Mutex<HashSet<String>>>,
    action: String,
}

impl Drop for InFlightToken {
    fn drop(&mut self) {
        if let Ok(mut active) = self.active.lock() {
            active.remove(&self.action);
        }
    }
}
