//! Progress bar coordination for the two list fetches.
//!
//! The board list and the starred list are requested together but resolve
//! independently. The bar is shown once both requests were seen and hidden
//! once both resolutions were seen, so it never flickers when the two
//! fetches overlap.

use boards_logging::boards_debug;

use crate::{Action, ActionType, TaskContext, TaskError};

/// Request types counted while idle.
pub const LIST_FETCH_REQUESTS: [ActionType; 2] = [
    ActionType::BoardsFetchRequest,
    ActionType::BoardsFetchStarredRequest,
];

/// Resolution types counted while the bar is visible.
pub const LIST_FETCH_RESOLUTIONS: [ActionType; 4] = [
    ActionType::BoardsFetchSuccess,
    ActionType::BoardsFetchFailure,
    ActionType::BoardsFetchStarredSuccess,
    ActionType::BoardsFetchStarredFailure,
];

/// Resolutions needed before the bar is hidden again.
const RESOLUTIONS_PER_CYCLE: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressPhase {
    #[default]
    Idle,
    /// One request seen, waiting for the second.
    WaitingForBoth,
    /// Bar shown; `resolved` resolutions seen so far.
    AwaitingResolution { resolved: u8 },
}

/// Pure state machine behind [`coordinate_progress_bar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressCycle {
    phase: ProgressPhase,
}

impl ProgressCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ProgressPhase {
        self.phase
    }

    /// Action types that advance the cycle in its current phase.
    pub fn pattern(&self) -> &'static [ActionType] {
        match self.phase {
            ProgressPhase::Idle | ProgressPhase::WaitingForBoth => &LIST_FETCH_REQUESTS,
            ProgressPhase::AwaitingResolution { .. } => &LIST_FETCH_RESOLUTIONS,
        }
    }

    /// Advances on a matching action type and returns the action to dispatch, if any.
    ///
    /// Types outside [`ProgressCycle::pattern`] leave the cycle untouched.
    pub fn observe(&mut self, action_type: ActionType) -> Option<Action> {
        if !self.pattern().contains(&action_type) {
            return None;
        }

        let (next, emitted) = match self.phase {
            ProgressPhase::Idle => (ProgressPhase::WaitingForBoth, None),
            ProgressPhase::WaitingForBoth => (
                ProgressPhase::AwaitingResolution { resolved: 0 },
                Some(Action::ProgressBarStart),
            ),
            ProgressPhase::AwaitingResolution { resolved } => {
                let resolved = resolved.saturating_add(1);
                if resolved >= RESOLUTIONS_PER_CYCLE {
                    (ProgressPhase::Idle, Some(Action::ProgressBarStop))
                } else {
                    (ProgressPhase::AwaitingResolution { resolved }, None)
                }
            }
        };

        boards_debug!(
            "progress cycle {:?} -> {:?} on {}",
            self.phase,
            next,
            action_type
        );
        self.phase = next;
        emitted
    }
}

/// Long-lived coordinator: toggles the progress bar around paired list fetches.
///
/// Only returns when the action bus closes.
pub async fn coordinate_progress_bar(ctx: &TaskContext) -> Result<(), TaskError> {
    let mut cycle = ProgressCycle::new();
    loop {
        let action = ctx.take(cycle.pattern()).await?;
        if let Some(toggle) = cycle.observe(action.action_type()) {
            ctx.put(toggle).await;
        }
    }
}
