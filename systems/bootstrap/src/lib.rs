#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that loads a level layout into the world and
//! prepares the data required to greet the player.

use maze_crawl_core::{Command, FoeKind, GridPos};
use maze_crawl_world::{query, World};
use serde::{Deserialize, Serialize};

/// Enemy placement declared by a level layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpawn {
    /// Cell the enemy starts in.
    pub cell: GridPos,
    /// Classification of the spawned enemy.
    pub kind: FoeKind,
}

/// Declarative description of one level.
///
/// Layouts are assumed to be validated by whoever authored them: positions
/// in bounds, named cells walkable. The world rejects anything that slipped
/// through, so a malformed layout surfaces as rejection events rather than
/// a panic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLayout {
    /// Number of rows in the walkability grid.
    pub rows: u32,
    /// Number of columns in the walkability grid.
    pub columns: u32,
    /// Cells carved out as walls.
    #[serde(default)]
    pub blocked: Vec<GridPos>,
    /// Cell the player starts in.
    pub player: GridPos,
    /// Enemy placement, if the level has one.
    #[serde(default)]
    pub enemy: Option<EnemySpawn>,
    /// Stairs cell granting victory once the encounters are cleared.
    #[serde(default)]
    pub stairs: Option<GridPos>,
    /// Cell that starts the boss fight when the player enters it.
    #[serde(default)]
    pub boss_trigger: Option<GridPos>,
    /// Regular encounters required before the stairs unlock.
    #[serde(default)]
    pub encounters_required: u32,
}

impl LevelLayout {
    /// Expands the layout into its configuration command batch.
    ///
    /// The order is fixed: grid first, then walls, then named positions, so
    /// replaying the same layout always produces the same event stream.
    #[must_use]
    pub fn commands(&self) -> Vec<Command> {
        let mut batch = vec![Command::ConfigureGrid {
            rows: self.rows,
            columns: self.columns,
        }];
        for cell in &self.blocked {
            batch.push(Command::SetWalkable {
                cell: *cell,
                walkable: false,
            });
        }
        batch.push(Command::SetPlayerPosition { cell: self.player });
        if let Some(spawn) = self.enemy {
            batch.push(Command::SetEnemyPosition {
                cell: spawn.cell,
                foe: spawn.kind,
            });
        }
        if let Some(cell) = self.stairs {
            batch.push(Command::SetStairPosition { cell });
        }
        if let Some(cell) = self.boss_trigger {
            batch.push(Command::SetBossTrigger { cell });
        }
        batch.push(Command::SetEncountersRequired {
            count: self.encounters_required,
        });
        batch
    }
}

/// Produces data required to start the experience.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Queues the layout's configuration commands for the world.
    pub fn load(&self, layout: &LevelLayout, out: &mut Vec<Command>) {
        out.extend(layout.commands());
    }
}
