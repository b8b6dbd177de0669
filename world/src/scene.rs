//! Scene state machine and the maze snapshot captured around fights.

use maze_crawl_core::{GridPos, RejectReason, SceneState};

/// Tracks the active scene, validates transitions against the permitted set,
/// and stores the terminal result exactly once.
///
/// Also holds the player's maze cell captured at fight entry. The defeated
/// enemy is cleared rather than restored, so the player cell is the only
/// occupancy that survives a fight.
#[derive(Clone, Debug)]
pub(crate) struct SceneFlow {
    current: SceneState,
    saved_player: Option<GridPos>,
    result: Option<bool>,
}

impl SceneFlow {
    /// Starts in the maze with no saved snapshot and no result.
    pub(crate) fn new() -> Self {
        Self {
            current: SceneState::Maze,
            saved_player: None,
            result: None,
        }
    }

    /// The currently active scene.
    pub(crate) fn current(&self) -> SceneState {
        self.current
    }

    /// Performs a validated transition, returning the scene left behind.
    pub(crate) fn transition_to(&mut self, to: SceneState) -> Result<SceneState, RejectReason> {
        let from = self.current;
        if !from.permits(to) {
            return Err(RejectReason::InvalidTransition { from, to });
        }
        self.current = to;
        Ok(from)
    }

    /// Captures the player's maze cell to restore after the fight.
    pub(crate) fn save_player(&mut self, cell: Option<GridPos>) {
        self.saved_player = cell;
    }

    /// Takes the saved player cell, leaving none behind.
    pub(crate) fn take_saved_player(&mut self) -> Option<GridPos> {
        self.saved_player.take()
    }

    /// Records the terminal result; only the first write sticks.
    pub(crate) fn record_result(&mut self, victory: bool) {
        if self.result.is_none() {
            self.result = Some(victory);
        }
    }

    /// The terminal result, once the game has ended.
    pub(crate) fn result(&self) -> Option<bool> {
        self.result
    }
}
