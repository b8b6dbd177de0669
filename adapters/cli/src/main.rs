#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a seeded, self-playing Maze Crawl session
//! and prints the event stream as the run unfolds.

mod generator;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use maze_crawl_core::{
    AttackKind, CombatPhase, Command, DetectionConfig, Direction, Event, SceneState,
};
use maze_crawl_system_bootstrap::Bootstrap;
use maze_crawl_system_combat::{CombatGate, CombatInput};
use maze_crawl_system_director::Director;
use maze_crawl_system_encounter::EncounterDetector;
use maze_crawl_system_pathfinding::{find_path, PathOutcome, Pursuit};
use maze_crawl_world::{apply, query, World};

const DT: Duration = Duration::from_millis(16);
const ROWS: u32 = 8;
const COLUMNS: u32 = 8;

/// Runs one deterministic Maze Crawl session from a generation seed.
#[derive(Debug, Parser)]
#[command(name = "maze-crawl")]
struct Args {
    /// Seed for deterministic maze generation.
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Maximum number of simulation ticks before the session is cut short.
    #[arg(long, default_value_t = 400)]
    ticks: u64,
    /// Manhattan radius at which the enemy spots the player.
    #[arg(long, default_value_t = 2)]
    radius: u32,
}

/// Entry point for the Maze Crawl command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let layout = generator::generate(args.seed, ROWS, COLUMNS)?;

    let mut world = World::new();
    let bootstrap = Bootstrap::default();
    println!("{}", bootstrap.welcome_banner(&world));
    println!(
        "seed {} | {}x{} maze | {} wall(s)",
        args.seed,
        layout.rows,
        layout.columns,
        layout.blocked.len()
    );

    let mut commands = Vec::new();
    bootstrap.load(&layout, &mut commands);
    let events = apply_all(&mut world, commands);
    report(0, &events);

    let mut pursuit = Pursuit::new();
    let mut detector = EncounterDetector::with_config(DetectionConfig {
        radius: args.radius,
        require_line_of_sight: true,
    });
    let mut gate = CombatGate::new();
    let mut director = Director::new();

    for tick in 1..=args.ticks {
        let mut events = Vec::new();
        apply(&mut world, Command::Tick { dt: DT }, &mut events);

        let mut commands = Vec::new();
        pursuit.handle(
            &events,
            query::scene(&world),
            &query::grid_view(&world),
            &mut commands,
        );
        events.extend(apply_all(&mut world, commands));

        if let Some(command) = player_step(&world) {
            events.extend(apply_all(&mut world, vec![command]));
        }

        let mut commands = Vec::new();
        detector.handle(
            &events,
            query::scene(&world),
            &query::grid_view(&world),
            &mut commands,
        );
        events.extend(apply_all(&mut world, commands));

        let combat = query::combat_view(&world);
        let input = match combat.map(|view| view.phase) {
            Some(CombatPhase::AwaitingInput) => CombatInput::attack(AttackKind::Slash),
            Some(CombatPhase::AwaitingCue(_)) => CombatInput::cue_complete(),
            _ => CombatInput::idle(),
        };
        let mut commands = Vec::new();
        gate.handle(input, query::scene(&world), combat.as_ref(), &mut commands);
        events.extend(apply_all(&mut world, commands));

        report(tick, &events);
        for _ in 0..4 {
            let mut follow_ups = Vec::new();
            director.handle(&events, &mut follow_ups);
            if follow_ups.is_empty() {
                break;
            }
            events = apply_all(&mut world, follow_ups);
            report(tick, &events);
        }

        if query::scene(&world) == SceneState::EndGame {
            break;
        }
    }

    match query::game_result(&world) {
        Some(true) => println!("Victory."),
        Some(false) => println!("Defeat."),
        None => println!("Out of ticks after {}.", args.ticks),
    }
    Ok(())
}

fn apply_all(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        apply(world, command, &mut events);
    }
    events
}

/// Scripted maze movement: seek the roaming enemy while encounters remain,
/// then head for the stairs.
fn player_step(world: &World) -> Option<Command> {
    if query::scene(world) != SceneState::Maze {
        return None;
    }
    let grid = query::grid_view(world);
    let player = grid.player()?;
    let target = if query::encounters_remaining(world) > 0 {
        grid.enemy().map(|marker| marker.cell).or_else(|| grid.stairs())
    } else {
        grid.stairs()
    }?;
    if player == target {
        return None;
    }

    match find_path(&grid, player, target) {
        PathOutcome::Path(path) => {
            let first = path.first().copied()?;
            Direction::between(player, first).map(|direction| Command::MovePlayer { direction })
        }
        PathOutcome::Unreachable => None,
    }
}

fn report(tick: u64, events: &[Event]) {
    for event in events {
        if matches!(event, Event::TimeAdvanced { .. }) {
            continue;
        }
        println!("[{tick:>4}] {event:?}");
    }
}
