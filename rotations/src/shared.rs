use super::state::RotationState;
use log::trace;
use std::sync::{Arc, PoisonError, RwLock};

/// A copy of the rotation taken under the read lock, tagged with the
/// revision it was committed at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub state: RotationState,
    pub revision: u64,
}

#[derive(Debug, Default)]
struct Versioned {
    state: RotationState,
    revision: u64,
}

/// Single-writer, multi-reader handle to one `RotationState`.
///
/// Readers receive copies, never references into the shared value, so a
/// display thread polling `snapshot` cannot observe a half-applied update.
#[derive(Debug, Clone, Default)]
pub struct SharedRotation(Arc<RwLock<Versioned>>);

impl SharedRotation {
    pub fn new(state: RotationState) -> Self {
        Self(Arc::new(RwLock::new(Versioned { state, revision: 0 })))
    }

    pub fn snapshot(&self) -> Snapshot {
        // the state is Copy and only ever replaced whole, a poisoned lock still holds a valid value
        let guard = self.0.read().unwrap_or_else(PoisonError::into_inner);
        Snapshot { state: guard.state, revision: guard.revision }
    }

    pub fn state(&self) -> RotationState {
        self.snapshot().state
    }

    pub fn revision(&self) -> u64 {
        self.snapshot().revision
    }

    /// Applies `f` to a scratch copy and commits it only if `f` succeeds.
    ///
    /// # Returns
    ///
    /// The new revision, or the error returned by `f` with the shared state unchanged.
    pub fn update<F, E>(&self, f: F) -> Result<u64, E>
    where
        F: FnOnce(&mut RotationState) -> Result<(), E>,
    {
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
        let mut scratch = guard.state;
        f(&mut scratch)?;
        guard.state = scratch;
        guard.revision += 1;
        trace!("committed rotation revision {}", guard.revision);
        Ok(guard.revision)
    }
}
