#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Crawl engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Crawl.";

/// Location of a single grid cell expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    row: u32,
    col: u32,
}

impl GridPos {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn col(&self) -> u32 {
        self.col
    }

    /// Computes the Manhattan distance between two grid positions.
    #[must_use]
    pub fn manhattan_distance(self, other: GridPos) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Returns the neighboring cell in the given direction, if it exists.
    ///
    /// Only the zero boundary is checked here; the upper bounds belong to
    /// whichever grid the caller validates against.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<GridPos> {
        match direction {
            Direction::North => self
                .row
                .checked_sub(1)
                .map(|row| GridPos::new(row, self.col)),
            Direction::South => self
                .row
                .checked_add(1)
                .map(|row| GridPos::new(row, self.col)),
            Direction::West => self
                .col
                .checked_sub(1)
                .map(|col| GridPos::new(self.row, col)),
            Direction::East => self
                .col
                .checked_add(1)
                .map(|col| GridPos::new(self.row, col)),
        }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cardinal movement directions available to actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Derives the direction leading from one cell to an adjacent cell.
    ///
    /// Returns `None` when the cells are not 4-connected neighbors.
    #[must_use]
    pub fn between(from: GridPos, to: GridPos) -> Option<Direction> {
        let row_diff = from.row().abs_diff(to.row());
        let col_diff = from.col().abs_diff(to.col());
        if row_diff + col_diff != 1 {
            return None;
        }

        if col_diff == 1 {
            if to.col() > from.col() {
                Some(Direction::East)
            } else {
                Some(Direction::West)
            }
        } else if to.row() > from.row() {
            Some(Direction::South)
        } else {
            Some(Direction::North)
        }
    }
}

/// Non-negative health pool clamped at zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Health(u32);

impl Health {
    /// Creates a new health pool with the provided value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the remaining health points.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Applies damage, saturating at zero.
    #[must_use]
    pub const fn damaged_by(self, amount: u32) -> Health {
        Health(self.0.saturating_sub(amount))
    }

    /// Reports whether the pool has been reduced to zero.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 == 0
    }
}

/// Player attack selector; damage semantics live in the [`AttackTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    /// Fast low-damage strike.
    Jab,
    /// Standard strike.
    Slash,
    /// Defensive strike that denies the enemy its counter-attack.
    Guard,
}

/// Identifies one of the two sides of a fight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Combatant {
    /// The player character.
    Player,
    /// The opposing enemy or boss.
    Enemy,
}

/// Classifies the enemy occupying the grid's enemy slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoeKind {
    /// Ordinary maze enemy; defeating it returns the player to the maze.
    Regular,
    /// The designated boss; defeating it wins the game.
    Boss,
}

/// Top-level mutually-exclusive game mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneState {
    /// Exploring the maze; the grid is live.
    Maze,
    /// Fighting a regular enemy; combat actors are live.
    EnemyFight,
    /// Fighting the boss; combat actors are live.
    BossFight,
    /// Terminal scene after victory or defeat.
    EndGame,
}

impl SceneState {
    /// Reports whether a transition from this scene to `to` is permitted.
    #[must_use]
    pub const fn permits(self, to: SceneState) -> bool {
        matches!(
            (self, to),
            (SceneState::Maze, SceneState::EnemyFight)
                | (SceneState::Maze, SceneState::BossFight)
                | (SceneState::Maze, SceneState::EndGame)
                | (SceneState::EnemyFight, SceneState::Maze)
                | (SceneState::EnemyFight, SceneState::EndGame)
                | (SceneState::BossFight, SceneState::Maze)
                | (SceneState::BossFight, SceneState::EndGame)
        )
    }

    /// Reports whether combat actors are live in this scene.
    #[must_use]
    pub const fn is_fight(self) -> bool {
        matches!(self, SceneState::EnemyFight | SceneState::BossFight)
    }
}

impl fmt::Display for SceneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SceneState::Maze => "Maze",
            SceneState::EnemyFight => "EnemyFight",
            SceneState::BossFight => "BossFight",
            SceneState::EndGame => "EndGame",
        };
        f.write_str(name)
    }
}

/// Presentation cue the surrounding layer must play out before combat resumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatCue {
    /// The enemy's counter-attack animation/audio is pending.
    EnemyAttack,
    /// The enemy's death animation/audio is pending.
    EnemyDeath,
    /// The player's death animation/audio is pending.
    PlayerDeath,
}

/// Explicit combat sub-state replacing ad hoc wait flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CombatPhase {
    /// The resolver is ready to accept the next player attack.
    AwaitingInput,
    /// A presentation cue is pending acknowledgement.
    AwaitingCue(CombatCue),
    /// The fight is over; the contained combatant won.
    Concluded(Combatant),
}

/// Single outcome produced by one combat round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// The enemy's counter-attack landed on the player.
    PlayerHit,
    /// The player's strike landed and no counter-attack followed.
    EnemyHit,
    /// The player's health reached zero.
    PlayerDead,
    /// The enemy's health reached zero.
    EnemyDead,
    /// Neither side took effective damage this round.
    RoundContinues,
}

impl RoundOutcome {
    /// Reports whether the outcome ends the fight.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, RoundOutcome::PlayerDead | RoundOutcome::EnemyDead)
    }
}

/// Damage formula for a single attack kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackSpec {
    /// Damage dealt to the enemy when the attack lands.
    pub damage: u32,
    /// Whether the attack denies the enemy its counter-attack this round.
    pub blocks_counter: bool,
}

impl AttackSpec {
    /// Creates a new attack specification.
    #[must_use]
    pub const fn new(damage: u32, blocks_counter: bool) -> Self {
        Self {
            damage,
            blocks_counter,
        }
    }
}

/// Designer-tunable damage table keyed by [`AttackKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackTable {
    jab: AttackSpec,
    slash: AttackSpec,
    guard: AttackSpec,
}

impl AttackTable {
    /// Creates a table from explicit per-kind specifications.
    #[must_use]
    pub const fn new(jab: AttackSpec, slash: AttackSpec, guard: AttackSpec) -> Self {
        Self { jab, slash, guard }
    }

    /// Looks up the specification for the provided attack kind.
    #[must_use]
    pub const fn spec_for(&self, kind: AttackKind) -> AttackSpec {
        match kind {
            AttackKind::Jab => self.jab,
            AttackKind::Slash => self.slash,
            AttackKind::Guard => self.guard,
        }
    }
}

impl Default for AttackTable {
    fn default() -> Self {
        Self {
            jab: AttackSpec::new(2, false),
            slash: AttackSpec::new(4, false),
            guard: AttackSpec::new(1, true),
        }
    }
}

/// Balance parameters consumed when a fight scene spawns its combat actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Health granted to the player on fight entry.
    pub player_health: u32,
    /// Health granted to a regular enemy.
    pub regular_health: u32,
    /// Counter-attack damage dealt by a regular enemy.
    pub regular_damage: u32,
    /// Health granted to the boss.
    pub boss_health: u32,
    /// Counter-attack damage dealt by the boss.
    pub boss_damage: u32,
    /// Damage table applied to player attacks.
    pub attacks: AttackTable,
}

impl CombatConfig {
    /// Starting health for the provided foe kind.
    #[must_use]
    pub const fn foe_health(&self, foe: FoeKind) -> Health {
        match foe {
            FoeKind::Regular => Health::new(self.regular_health),
            FoeKind::Boss => Health::new(self.boss_health),
        }
    }

    /// Counter-attack damage for the provided foe kind.
    #[must_use]
    pub const fn foe_damage(&self, foe: FoeKind) -> u32 {
        match foe {
            FoeKind::Regular => self.regular_damage,
            FoeKind::Boss => self.boss_damage,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            player_health: 10,
            regular_health: 6,
            regular_damage: 2,
            boss_health: 14,
            boss_damage: 3,
            attacks: AttackTable::default(),
        }
    }
}

/// Configuration constants governing enemy detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Maximum Manhattan distance at which the enemy spots the player.
    pub radius: u32,
    /// Whether blocked cells between the two actors break detection.
    pub require_line_of_sight: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            radius: 2,
            require_line_of_sight: true,
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Configures the walkability grid with the provided dimensions.
    ///
    /// Every cell starts walkable; the loader carves walls afterwards.
    ConfigureGrid {
        /// Number of rows in the grid.
        rows: u32,
        /// Number of columns in the grid.
        columns: u32,
    },
    /// Mutates the walkability of a single cell.
    SetWalkable {
        /// Cell whose walkability changes.
        cell: GridPos,
        /// New walkability value.
        walkable: bool,
    },
    /// Registers the player's authoritative grid position.
    SetPlayerPosition {
        /// Cell the player occupies; must be walkable.
        cell: GridPos,
    },
    /// Registers the enemy's authoritative grid position and kind.
    SetEnemyPosition {
        /// Cell the enemy occupies; must be walkable.
        cell: GridPos,
        /// Classification of the enemy occupying the slot.
        foe: FoeKind,
    },
    /// Removes the enemy from the grid registry.
    ClearEnemy,
    /// Registers the stairs/exit cell.
    SetStairPosition {
        /// Cell hosting the stairs; must be walkable.
        cell: GridPos,
    },
    /// Registers the optional boss trigger cell.
    SetBossTrigger {
        /// Cell that starts the boss fight when the player enters it.
        cell: GridPos,
    },
    /// Sets how many regular encounters must be cleared before the stairs
    /// grant victory.
    SetEncountersRequired {
        /// Number of remaining required encounters.
        count: u32,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the player advance one cell in the given direction.
    MovePlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that the enemy advance one cell in the given direction.
    StepEnemy {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Starts a fight after the enemy spotted the player.
    BeginEncounter {
        /// Cell that triggered detection; the enemy snaps to it.
        cell: GridPos,
        /// Classification of the opponent.
        foe: FoeKind,
    },
    /// Resolves one combat round using the chosen attack kind.
    Attack {
        /// Player-selected attack.
        kind: AttackKind,
    },
    /// Reports that the presentation layer finished playing a pending cue.
    AcknowledgeCue {
        /// Cue the presentation layer completed.
        cue: CombatCue,
    },
    /// Returns to the maze after a regular fight was won.
    ConcludeFight,
    /// Transitions to the terminal end-game scene.
    EndGame {
        /// Whether the player won.
        victory: bool,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the walkability grid was configured.
    GridConfigured {
        /// Number of rows in the grid.
        rows: u32,
        /// Number of columns in the grid.
        columns: u32,
    },
    /// Confirms that a cell's walkability changed.
    WalkabilityChanged {
        /// Cell whose walkability changed.
        cell: GridPos,
        /// New walkability value.
        walkable: bool,
    },
    /// Confirms that the player occupies a new cell.
    PlayerMoved {
        /// Cell the player occupied before the move, if any.
        from: Option<GridPos>,
        /// Cell the player occupies now.
        to: GridPos,
    },
    /// Confirms that the enemy occupies a new cell.
    EnemyMoved {
        /// Cell the enemy occupied before the move, if any.
        from: Option<GridPos>,
        /// Cell the enemy occupies now.
        to: GridPos,
    },
    /// Confirms that the enemy was removed from the grid.
    EnemyCleared,
    /// Confirms that the stairs cell was registered.
    StairsPlaced {
        /// Cell hosting the stairs.
        cell: GridPos,
    },
    /// Confirms that the boss trigger cell was registered.
    BossTriggerPlaced {
        /// Cell that starts the boss fight.
        cell: GridPos,
    },
    /// Confirms that the required encounter count was set.
    EncountersRequiredSet {
        /// Number of remaining required encounters.
        count: u32,
    },
    /// Announces that the player stands on the stairs cell.
    StairsReached {
        /// The stairs cell.
        cell: GridPos,
        /// Regular encounters still required before the stairs unlock.
        encounters_remaining: u32,
    },
    /// Announces that the player stands on the boss trigger cell.
    BossTriggerReached {
        /// The trigger cell.
        cell: GridPos,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that a fight scene began.
    FightStarted {
        /// Classification of the opponent.
        foe: FoeKind,
        /// Cell that triggered the encounter.
        cell: GridPos,
    },
    /// Reports that an attack dealt damage; doubles as the audio cue.
    AttackLanded {
        /// Side whose attack landed.
        attacker: Combatant,
        /// Damage dealt.
        damage: u32,
        /// Health remaining on the defender after clamping.
        remaining: Health,
    },
    /// Reports that a combatant's health reached zero.
    CombatantDied {
        /// Side that died.
        who: Combatant,
    },
    /// Reports the single outcome of a resolved combat round.
    RoundResolved {
        /// Outcome of the round.
        outcome: RoundOutcome,
    },
    /// Confirms that a pending presentation cue was acknowledged.
    CueCleared {
        /// Cue that completed.
        cue: CombatCue,
    },
    /// Announces the fight's winner; emitted exactly once per fight.
    FightConcluded {
        /// Side that won the fight.
        winner: Combatant,
        /// Classification of the opponent that was fought.
        foe: FoeKind,
    },
    /// Announces that the active scene changed.
    SceneChanged {
        /// Scene that was active before the transition.
        from: SceneState,
        /// Scene that became active.
        to: SceneState,
    },
    /// Announces the terminal result of the game; emitted exactly once.
    GameEnded {
        /// Whether the player won.
        victory: bool,
    },
    /// Reports that a command was rejected without mutating the world.
    CommandRejected {
        /// Why the command was refused.
        reason: RejectReason,
    },
}

/// Failed grid operations reported to the caller instead of being clamped.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridError {
    /// The position lies outside the configured grid.
    #[error("position {0} is outside the grid")]
    OutOfBounds(GridPos),
    /// The target cell is blocked and cannot host a named position.
    #[error("cell {0} is not walkable")]
    NotWalkable(GridPos),
}

/// Reasons the world refuses a command; surfaced as diagnostics.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// A grid operation failed its bounds or walkability precondition.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// The command requires the maze scene.
    #[error("command requires the maze scene")]
    NotInMaze,
    /// The command requires an active fight scene.
    #[error("command requires an active fight scene")]
    NotInFight,
    /// A presentation cue is still pending acknowledgement.
    #[error("a presentation cue is still pending")]
    CuePending,
    /// The acknowledged cue does not match the pending cue.
    #[error("acknowledged cue does not match the pending cue")]
    CueMismatch,
    /// No enemy occupies the grid's enemy slot.
    #[error("no enemy is present on the grid")]
    NoEnemy,
    /// No player has been placed on the grid.
    #[error("no player is present on the grid")]
    NoPlayer,
    /// Required encounters remain before the stairs grant victory.
    #[error("required encounters remain before the stairs unlock")]
    EncountersRemaining,
    /// The fight has not reached a terminal outcome yet.
    #[error("the fight has not concluded")]
    FightInProgress,
    /// The fight already concluded; no further rounds may be resolved.
    #[error("the fight has already concluded")]
    FightOver,
    /// The requested scene transition is not in the permitted set.
    #[error("scene transition from {from} to {to} is not permitted")]
    InvalidTransition {
        /// Scene active when the command arrived.
        from: SceneState,
        /// Scene the command requested.
        to: SceneState,
    },
    /// The game already reached its terminal scene.
    #[error("the game has already ended")]
    GameOver,
}

/// Marker describing the enemy registered on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnemyMarker {
    /// Cell the enemy occupies.
    pub cell: GridPos,
    /// Classification of the enemy.
    pub kind: FoeKind,
}

/// Collision bookkeeping derived from the named positions after every move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionFlags {
    /// The player and enemy occupy the same cell.
    pub enemy: bool,
    /// The player stands on the stairs cell.
    pub stairs: bool,
}

/// Read-only view into the dense walkability grid and named positions.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    cells: &'a [bool],
    rows: u32,
    columns: u32,
    player: Option<GridPos>,
    enemy: Option<EnemyMarker>,
    stairs: Option<GridPos>,
    boss_trigger: Option<GridPos>,
}

impl<'a> GridView<'a> {
    /// Captures a new view backed by the provided row-major cell slice.
    #[must_use]
    pub fn new(
        cells: &'a [bool],
        rows: u32,
        columns: u32,
        player: Option<GridPos>,
        enemy: Option<EnemyMarker>,
        stairs: Option<GridPos>,
        boss_trigger: Option<GridPos>,
    ) -> Self {
        Self {
            cells,
            rows,
            columns,
            player,
            enemy,
            stairs,
            boss_trigger,
        }
    }

    /// Reports whether the cell is walkable; out-of-bounds cells are not.
    #[must_use]
    pub fn is_walkable(&self, cell: GridPos) -> bool {
        self.index(cell)
            .map_or(false, |index| self.cells.get(index).copied().unwrap_or(false))
    }

    /// Reports whether the cell lies within the configured dimensions.
    #[must_use]
    pub const fn in_bounds(&self, cell: GridPos) -> bool {
        cell.row() < self.rows && cell.col() < self.columns
    }

    /// Provides the grid dimensions as `(rows, columns)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.columns)
    }

    /// The player's registered cell, if placed.
    #[must_use]
    pub const fn player(&self) -> Option<GridPos> {
        self.player
    }

    /// The enemy's registered cell and kind, if placed.
    #[must_use]
    pub const fn enemy(&self) -> Option<EnemyMarker> {
        self.enemy
    }

    /// The stairs cell, if placed.
    #[must_use]
    pub const fn stairs(&self) -> Option<GridPos> {
        self.stairs
    }

    /// The boss trigger cell, if placed.
    #[must_use]
    pub const fn boss_trigger(&self) -> Option<GridPos> {
        self.boss_trigger
    }

    fn index(&self, cell: GridPos) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let col = usize::try_from(cell.col()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(col)
    }
}

/// Immutable snapshot of the active fight used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatView {
    /// Remaining player health.
    pub player_health: Health,
    /// Player health at fight entry.
    pub player_max: Health,
    /// Remaining enemy health.
    pub enemy_health: Health,
    /// Enemy health at fight entry.
    pub enemy_max: Health,
    /// Classification of the opponent.
    pub foe: FoeKind,
    /// Current combat sub-state.
    pub phase: CombatPhase,
}

#[cfg(test)]
mod tests {
    use super::{
        AttackKind, AttackTable, Direction, GridError, GridPos, GridView, Health, RejectReason,
        SceneState,
    };
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = GridPos::new(1, 1);
        let destination = GridPos::new(3, 4);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn step_respects_zero_boundary() {
        let corner = GridPos::new(0, 0);
        assert_eq!(corner.step(Direction::North), None);
        assert_eq!(corner.step(Direction::West), None);
        assert_eq!(corner.step(Direction::South), Some(GridPos::new(1, 0)));
        assert_eq!(corner.step(Direction::East), Some(GridPos::new(0, 1)));
    }

    #[test]
    fn direction_between_neighbors() {
        let origin = GridPos::new(3, 3);
        assert_eq!(
            Direction::between(origin, GridPos::new(2, 3)),
            Some(Direction::North)
        );
        assert_eq!(
            Direction::between(origin, GridPos::new(3, 4)),
            Some(Direction::East)
        );
        assert_eq!(
            Direction::between(origin, GridPos::new(4, 3)),
            Some(Direction::South)
        );
        assert_eq!(
            Direction::between(origin, GridPos::new(3, 2)),
            Some(Direction::West)
        );
        assert_eq!(Direction::between(origin, origin), None);
        assert_eq!(Direction::between(origin, GridPos::new(4, 4)), None);
    }

    #[test]
    fn scene_transition_table_matches_contract() {
        use SceneState::*;
        assert!(Maze.permits(EnemyFight));
        assert!(Maze.permits(BossFight));
        assert!(Maze.permits(EndGame));
        assert!(EnemyFight.permits(Maze));
        assert!(EnemyFight.permits(EndGame));
        assert!(BossFight.permits(Maze));
        assert!(BossFight.permits(EndGame));

        assert!(!EnemyFight.permits(BossFight));
        assert!(!EndGame.permits(Maze));
        assert!(!Maze.permits(Maze));
    }

    #[test]
    fn health_clamps_at_zero() {
        let health = Health::new(3);
        let after = health.damaged_by(5);
        assert_eq!(after.get(), 0);
        assert!(after.is_depleted());
        assert!(!health.is_depleted());
    }

    #[test]
    fn attack_table_lookup_is_table_driven() {
        let table = AttackTable::default();
        assert!(!table.spec_for(AttackKind::Slash).blocks_counter);
        assert!(table.spec_for(AttackKind::Guard).blocks_counter);
    }

    #[test]
    fn grid_view_rejects_out_of_bounds_lookups() {
        let cells = vec![true; 6];
        let view = GridView::new(&cells, 2, 3, None, None, None, None);
        assert!(view.is_walkable(GridPos::new(1, 2)));
        assert!(!view.is_walkable(GridPos::new(2, 0)));
        assert!(!view.is_walkable(GridPos::new(0, 3)));
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn grid_pos_round_trips_through_bincode() {
        assert_round_trip(&GridPos::new(7, 11));
    }

    #[test]
    fn reject_reason_round_trips_through_bincode() {
        assert_round_trip(&RejectReason::Grid(GridError::NotWalkable(GridPos::new(
            2, 2,
        ))));
        assert_round_trip(&RejectReason::InvalidTransition {
            from: SceneState::EndGame,
            to: SceneState::Maze,
        });
    }
}
