//=========================================================================
// Transition State
//=========================================================================
//
// Explicit state machine for scene handoffs.
//
//   Idle ──open/close (animated)──→ Pending ──playable finished──→ Idle
//   Idle ──open/close (instant)──────────────────────────────────→ Idle
//
// While `Pending`, the manager rejects every new transition and drops
// routed input. The completion record carries everything the finishing
// step needs, so nothing is captured in closures.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::animation::Playable;
use super::params::SceneParams;
use super::SceneId;

//=== Completion ==========================================================

/// Work to run when a transition finishes.
#[derive(Debug)]
pub(crate) enum Completion {
    /// Promote the opened scene; destroy `outgoing` when `closing`.
    Open {
        outgoing: Option<SceneId>,
        closing: bool,
        params: SceneParams,
    },

    /// Destroy `closing` and resume whatever is beneath it.
    Close {
        closing: SceneId,
        params: SceneParams,
    },
}

impl Completion {
    pub fn params(&self) -> &SceneParams {
        match self {
            Completion::Open { params, .. } | Completion::Close { params, .. } => params,
        }
    }
}

//=== TransitionState =====================================================

/// An animated transition in flight.
pub(crate) struct PendingTransition {
    pub from: Option<SceneId>,
    pub to: Option<SceneId>,
    pub completion: Completion,
    pub playable: Box<dyn Playable>,
}

#[derive(Default)]
pub(crate) enum TransitionState {
    #[default]
    Idle,
    Pending(PendingTransition),
}

impl TransitionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, TransitionState::Pending(_))
    }

    pub fn pending_mut(&mut self) -> Option<&mut PendingTransition> {
        match self {
            TransitionState::Pending(pending) => Some(pending),
            TransitionState::Idle => None,
        }
    }

    /// Leaves `Idle` in place and returns the previous state.
    pub fn take(&mut self) -> TransitionState {
        std::mem::take(self)
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::TransitionFrame;
    use std::time::Duration;

    struct Instant;

    impl Playable for Instant {
        fn advance(&mut self, _delta: Duration) -> TransitionFrame {
            TransitionFrame::finished()
        }
    }

    fn pending() -> TransitionState {
        TransitionState::Pending(PendingTransition {
            from: None,
            to: Some(SceneId(1)),
            completion: Completion::Open {
                outgoing: None,
                closing: false,
                params: SceneParams::new(),
            },
            playable: Box::new(Instant),
        })
    }

    #[test]
    fn default_is_idle() {
        let state = TransitionState::default();
        assert!(!state.is_pending());
    }

    #[test]
    fn take_resets_to_idle() {
        let mut state = pending();
        assert!(state.is_pending());

        let previous = state.take();
        assert!(previous.is_pending());
        assert!(!state.is_pending());
    }

    #[test]
    fn pending_mut_exposes_playable() {
        let mut state = pending();
        let frame = state
            .pending_mut()
            .map(|p| p.playable.advance(Duration::from_millis(16)));
        assert_eq!(frame, Some(TransitionFrame::finished()));
        assert!(TransitionState::Idle.pending_mut().is_none());
    }
}
