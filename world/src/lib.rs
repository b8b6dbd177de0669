#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Crawl.
//!
//! The world owns the walkability grid, the named positions, the scene state
//! machine, and — for the duration of a fight — the two combat actors.
//! Adapters and systems mutate it exclusively through [`apply`], which
//! validates every command precondition and either performs the mutation and
//! broadcasts the matching events, or emits a single
//! [`Event::CommandRejected`] diagnostic and leaves the state untouched.

use maze_crawl_core::{
    CombatConfig, Combatant, Command, Event, FoeKind, GridError, RejectReason, SceneState,
    WELCOME_BANNER,
};

mod combat;
mod grid;
mod scene;

use combat::CombatResolver;
use grid::GridMap;
use scene::SceneFlow;

/// Represents the authoritative Maze Crawl world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: GridMap,
    scene: SceneFlow,
    combat: Option<CombatResolver>,
    combat_config: CombatConfig,
    encounters_remaining: u32,
}

impl World {
    /// Creates a new world awaiting level configuration, with default balance.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CombatConfig::default())
    }

    /// Creates a new world using the provided combat balance parameters.
    #[must_use]
    pub fn with_config(combat_config: CombatConfig) -> Self {
        Self {
            banner: WELCOME_BANNER,
            grid: GridMap::new(0, 0),
            scene: SceneFlow::new(),
            combat: None,
            combat_config,
            encounters_remaining: 0,
        }
    }

    fn fight_scene_for(foe: FoeKind) -> SceneState {
        match foe {
            FoeKind::Regular => SceneState::EnemyFight,
            FoeKind::Boss => SceneState::BossFight,
        }
    }

    /// Rejection reason for commands that need the maze while another scene
    /// is active.
    fn maze_guard(&self) -> Option<RejectReason> {
        match self.scene.current() {
            SceneState::Maze => None,
            SceneState::EndGame => Some(RejectReason::GameOver),
            _ => Some(RejectReason::NotInMaze),
        }
    }

    fn fight_guard(&self) -> Option<RejectReason> {
        match self.scene.current() {
            scene if scene.is_fight() => None,
            SceneState::EndGame => Some(RejectReason::GameOver),
            _ => Some(RejectReason::NotInFight),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn reject(out_events: &mut Vec<Event>, reason: RejectReason) {
    out_events.push(Event::CommandRejected { reason });
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid { rows, columns } => {
            if let Some(reason) = world.maze_guard() {
                reject(out_events, reason);
                return;
            }
            world.grid = GridMap::new(rows, columns);
            out_events.push(Event::GridConfigured { rows, columns });
        }
        Command::SetWalkable { cell, walkable } => {
            if let Some(reason) = world.maze_guard() {
                reject(out_events, reason);
                return;
            }
            match world.grid.set_walkable(cell, walkable) {
                Ok(()) => out_events.push(Event::WalkabilityChanged { cell, walkable }),
                Err(error) => reject(out_events, RejectReason::Grid(error)),
            }
        }
        Command::SetPlayerPosition { cell } => {
            if let Some(reason) = world.maze_guard() {
                reject(out_events, reason);
                return;
            }
            match world.grid.place_player(cell) {
                Ok(previous) => out_events.push(Event::PlayerMoved {
                    from: previous,
                    to: cell,
                }),
                Err(error) => reject(out_events, RejectReason::Grid(error)),
            }
        }
        Command::SetEnemyPosition { cell, foe } => {
            if let Some(reason) = world.maze_guard() {
                reject(out_events, reason);
                return;
            }
            match world.grid.place_enemy(cell, foe) {
                Ok(previous) => out_events.push(Event::EnemyMoved {
                    from: previous,
                    to: cell,
                }),
                Err(error) => reject(out_events, RejectReason::Grid(error)),
            }
        }
        Command::ClearEnemy => {
            if let Some(reason) = world.maze_guard() {
                reject(out_events, reason);
                return;
            }
            world.grid.clear_enemy();
            out_events.push(Event::EnemyCleared);
        }
        Command::SetStairPosition { cell } => {
            if let Some(reason) = world.maze_guard() {
                reject(out_events, reason);
                return;
            }
            match world.grid.place_stairs(cell) {
                Ok(()) => out_events.push(Event::StairsPlaced { cell }),
                Err(error) => reject(out_events, RejectReason::Grid(error)),
            }
        }
        Command::SetBossTrigger { cell } => {
            if let Some(reason) = world.maze_guard() {
                reject(out_events, reason);
                return;
            }
            match world.grid.place_boss_trigger(cell) {
                Ok(()) => out_events.push(Event::BossTriggerPlaced { cell }),
                Err(error) => reject(out_events, RejectReason::Grid(error)),
            }
        }
        Command::SetEncountersRequired { count } => {
            if let Some(reason) = world.maze_guard() {
                reject(out_events, reason);
                return;
            }
            world.encounters_remaining = count;
            out_events.push(Event::EncountersRequiredSet { count });
        }
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::MovePlayer { direction } => {
            if let Some(reason) = world.maze_guard() {
                reject(out_events, reason);
                return;
            }
            let Some(from) = world.grid.player() else {
                reject(out_events, RejectReason::NoPlayer);
                return;
            };
            let Some(to) = from.step(direction) else {
                reject(out_events, RejectReason::Grid(GridError::OutOfBounds(from)));
                return;
            };
            match world.grid.place_player(to) {
                Ok(previous) => {
                    out_events.push(Event::PlayerMoved { from: previous, to });
                    if world.grid.collisions().stairs {
                        out_events.push(Event::StairsReached {
                            cell: to,
                            encounters_remaining: world.encounters_remaining,
                        });
                    }
                    if world.grid.boss_trigger() == Some(to) {
                        out_events.push(Event::BossTriggerReached { cell: to });
                    }
                }
                Err(error) => reject(out_events, RejectReason::Grid(error)),
            }
        }
        Command::StepEnemy { direction } => {
            if let Some(reason) = world.maze_guard() {
                reject(out_events, reason);
                return;
            }
            let Some(marker) = world.grid.enemy() else {
                reject(out_events, RejectReason::NoEnemy);
                return;
            };
            let Some(to) = marker.cell.step(direction) else {
                reject(
                    out_events,
                    RejectReason::Grid(GridError::OutOfBounds(marker.cell)),
                );
                return;
            };
            match world.grid.place_enemy(to, marker.kind) {
                Ok(previous) => out_events.push(Event::EnemyMoved { from: previous, to }),
                Err(error) => reject(out_events, RejectReason::Grid(error)),
            }
        }
        Command::BeginEncounter { cell, foe } => {
            let to_scene = World::fight_scene_for(foe);
            if world.scene.current() != SceneState::Maze {
                reject(
                    out_events,
                    RejectReason::InvalidTransition {
                        from: world.scene.current(),
                        to: to_scene,
                    },
                );
                return;
            }
            if foe == FoeKind::Regular && world.grid.enemy().is_none() {
                reject(out_events, RejectReason::NoEnemy);
                return;
            }
            if let Err(error) = world.grid.require_walkable(cell) {
                reject(out_events, RejectReason::Grid(error));
                return;
            }

            world.scene.save_player(world.grid.player());

            // Snap the enemy to the detection cell before the transition.
            match world.grid.place_enemy(cell, foe) {
                Ok(previous) => {
                    out_events.push(Event::EnemyMoved {
                        from: previous,
                        to: cell,
                    });
                }
                Err(error) => {
                    reject(out_events, RejectReason::Grid(error));
                    return;
                }
            }

            match world.scene.transition_to(to_scene) {
                Ok(from) => {
                    world.combat = Some(CombatResolver::new(&world.combat_config, foe));
                    out_events.push(Event::SceneChanged {
                        from,
                        to: to_scene,
                    });
                    out_events.push(Event::FightStarted { foe, cell });
                }
                Err(reason) => reject(out_events, reason),
            }
        }
        Command::Attack { kind } => {
            if let Some(reason) = world.fight_guard() {
                reject(out_events, reason);
                return;
            }
            let Some(resolver) = world.combat.as_mut() else {
                reject(out_events, RejectReason::NotInFight);
                return;
            };
            if let Err(reason) = resolver.resolve_round(kind, out_events) {
                reject(out_events, reason);
            }
        }
        Command::AcknowledgeCue { cue } => {
            if let Some(reason) = world.fight_guard() {
                reject(out_events, reason);
                return;
            }
            let Some(resolver) = world.combat.as_mut() else {
                reject(out_events, RejectReason::NotInFight);
                return;
            };
            if let Err(reason) = resolver.acknowledge(cue, out_events) {
                reject(out_events, reason);
            }
        }
        Command::ConcludeFight => {
            if let Some(reason) = world.fight_guard() {
                reject(out_events, reason);
                return;
            }
            let Some(resolver) = world.combat.as_ref() else {
                reject(out_events, RejectReason::NotInFight);
                return;
            };
            match resolver.winner() {
                None => {
                    reject(out_events, RejectReason::FightInProgress);
                    return;
                }
                Some(Combatant::Player) if resolver.foe() == FoeKind::Regular => {}
                Some(_) => {
                    // Boss victories and defeats leave through EndGame.
                    reject(
                        out_events,
                        RejectReason::InvalidTransition {
                            from: world.scene.current(),
                            to: SceneState::Maze,
                        },
                    );
                    return;
                }
            }

            match world.scene.transition_to(SceneState::Maze) {
                Ok(from) => {
                    world.combat = None;
                    if let Some(player_cell) = world.scene.take_saved_player() {
                        // The saved cell was walkable when captured and
                        // walls cannot change during a fight.
                        if let Ok(previous) = world.grid.place_player(player_cell) {
                            out_events.push(Event::PlayerMoved {
                                from: previous,
                                to: player_cell,
                            });
                        }
                    }
                    world.grid.clear_enemy();
                    out_events.push(Event::EnemyCleared);
                    world.encounters_remaining = world.encounters_remaining.saturating_sub(1);
                    out_events.push(Event::SceneChanged {
                        from,
                        to: SceneState::Maze,
                    });
                }
                Err(reason) => reject(out_events, reason),
            }
        }
        Command::EndGame { victory } => {
            match world.scene.current() {
                SceneState::EndGame => {
                    reject(out_events, RejectReason::GameOver);
                    return;
                }
                SceneState::Maze => {
                    // Only a stairs victory leaves the maze for the end game.
                    if !victory || !world.grid.collisions().stairs {
                        reject(
                            out_events,
                            RejectReason::InvalidTransition {
                                from: SceneState::Maze,
                                to: SceneState::EndGame,
                            },
                        );
                        return;
                    }
                    if world.encounters_remaining > 0 {
                        reject(out_events, RejectReason::EncountersRemaining);
                        return;
                    }
                }
                _ => {
                    let Some(resolver) = world.combat.as_ref() else {
                        reject(out_events, RejectReason::NotInFight);
                        return;
                    };
                    let Some(winner) = resolver.winner() else {
                        reject(out_events, RejectReason::FightInProgress);
                        return;
                    };
                    if victory != (winner == Combatant::Player) {
                        reject(
                            out_events,
                            RejectReason::InvalidTransition {
                                from: world.scene.current(),
                                to: SceneState::EndGame,
                            },
                        );
                        return;
                    }
                }
            }

            match world.scene.transition_to(SceneState::EndGame) {
                Ok(from) => {
                    world.combat = None;
                    world.scene.record_result(victory);
                    out_events.push(Event::SceneChanged {
                        from,
                        to: SceneState::EndGame,
                    });
                    out_events.push(Event::GameEnded { victory });
                }
                Err(reason) => reject(out_events, reason),
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use maze_crawl_core::{CollisionFlags, CombatView, GridView, SceneState};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// The currently active scene.
    #[must_use]
    pub fn scene(world: &World) -> SceneState {
        world.scene.current()
    }

    /// Captures a read-only view of the walkability grid and named positions.
    #[must_use]
    pub fn grid_view(world: &World) -> GridView<'_> {
        world.grid.view()
    }

    /// Snapshot of the active fight; `None` outside fight scenes.
    #[must_use]
    pub fn combat_view(world: &World) -> Option<CombatView> {
        world.combat.as_ref().map(|resolver| resolver.view())
    }

    /// Collision flags derived from the named positions.
    #[must_use]
    pub fn collisions(world: &World) -> CollisionFlags {
        world.grid.collisions()
    }

    /// Regular encounters still required before the stairs grant victory.
    #[must_use]
    pub fn encounters_remaining(world: &World) -> u32 {
        world.encounters_remaining
    }

    /// Terminal result of the game, once it has ended.
    #[must_use]
    pub fn game_result(world: &World) -> Option<bool> {
        world.scene.result()
    }
}
