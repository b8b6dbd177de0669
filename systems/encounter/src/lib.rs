#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Proximity detection that turns maze pursuit into a fight.

use maze_crawl_core::{Command, DetectionConfig, Event, GridPos, GridView, SceneState};

/// Watches the enemy and player positions each maze tick and requests an
/// encounter when the player enters the detection radius.
#[derive(Clone, Copy, Debug, Default)]
pub struct EncounterDetector {
    config: DetectionConfig,
}

impl EncounterDetector {
    /// Creates a detector with the default balance configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detector with explicit detection constants.
    #[must_use]
    pub fn with_config(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Returns the cell the player was spotted in, or `None` when the player
    /// is out of range or hidden behind a wall.
    ///
    /// The returned cell is where the fight anchors; the enemy snaps to it
    /// when the encounter begins.
    #[must_use]
    pub fn spotted(
        &self,
        grid: &GridView<'_>,
        enemy: GridPos,
        player: GridPos,
    ) -> Option<GridPos> {
        if enemy.manhattan_distance(player) > self.config.radius {
            return None;
        }
        if self.config.require_line_of_sight && !line_of_sight(grid, enemy, player) {
            return None;
        }
        Some(player)
    }

    /// Emits at most one `Command::BeginEncounter` per maze tick.
    pub fn handle(
        &mut self,
        events: &[Event],
        scene: SceneState,
        grid: &GridView<'_>,
        out: &mut Vec<Command>,
    ) {
        if scene != SceneState::Maze {
            return;
        }
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }
        let (Some(marker), Some(player)) = (grid.enemy(), grid.player()) else {
            return;
        };

        if let Some(cell) = self.spotted(grid, marker.cell, player) {
            out.push(Command::BeginEncounter {
                cell,
                foe: marker.kind,
            });
        }
    }
}

/// Walks the Bresenham line between the two cells and reports whether every
/// intermediate cell is walkable. Endpoints are not checked; actors may stand
/// on special cells without hiding themselves.
fn line_of_sight(grid: &GridView<'_>, from: GridPos, to: GridPos) -> bool {
    let mut row = i64::from(from.row());
    let mut col = i64::from(from.col());
    let end_row = i64::from(to.row());
    let end_col = i64::from(to.col());

    let d_col = (end_col - col).abs();
    let d_row = -(end_row - row).abs();
    let step_col = if col < end_col { 1 } else { -1 };
    let step_row = if row < end_row { 1 } else { -1 };
    let mut err = d_col + d_row;

    loop {
        if row == end_row && col == end_col {
            return true;
        }
        let doubled = 2 * err;
        if doubled >= d_row {
            err += d_row;
            col += step_col;
        }
        if doubled <= d_col {
            err += d_col;
            row += step_row;
        }
        if row == end_row && col == end_col {
            return true;
        }

        let (Ok(r), Ok(c)) = (u32::try_from(row), u32::try_from(col)) else {
            return false;
        };
        if !grid.is_walkable(GridPos::new(r, c)) {
            return false;
        }
    }
}
