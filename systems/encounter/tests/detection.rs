//! Runs the detector against a live world and checks that detection starts
//! the fight at the spotted cell.

use std::time::Duration;

use maze_crawl_core::{Command, Event, FoeKind, GridPos, SceneState};
use maze_crawl_system_encounter::EncounterDetector;
use maze_crawl_world::{apply, query, World};

const DT: Duration = Duration::from_millis(16);

fn apply_all(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        apply(world, command, &mut events);
    }
    events
}

fn maze_world(player: GridPos, enemy: GridPos) -> World {
    let mut world = World::new();
    let _ = apply_all(
        &mut world,
        vec![
            Command::ConfigureGrid { rows: 6, columns: 6 },
            Command::SetPlayerPosition { cell: player },
            Command::SetEnemyPosition {
                cell: enemy,
                foe: FoeKind::Regular,
            },
        ],
    );
    world
}

fn detect(world: &mut World, detector: &mut EncounterDetector) -> Vec<Command> {
    let mut events = Vec::new();
    apply(world, Command::Tick { dt: DT }, &mut events);
    let mut commands = Vec::new();
    detector.handle(
        &events,
        query::scene(world),
        &query::grid_view(world),
        &mut commands,
    );
    commands
}

#[test]
fn detection_starts_the_fight_at_the_spotted_cell() {
    let player = GridPos::new(2, 2);
    let mut world = maze_world(player, GridPos::new(1, 1));
    let mut detector = EncounterDetector::new();

    let commands = detect(&mut world, &mut detector);
    assert_eq!(
        commands,
        vec![Command::BeginEncounter {
            cell: player,
            foe: FoeKind::Regular,
        }]
    );

    let events = apply_all(&mut world, commands);
    assert_eq!(query::scene(&world), SceneState::EnemyFight);
    assert!(events.contains(&Event::FightStarted {
        foe: FoeKind::Regular,
        cell: player,
    }));
    assert_eq!(
        query::grid_view(&world).enemy().map(|marker| marker.cell),
        Some(player)
    );
}

#[test]
fn distant_player_keeps_the_maze_running() {
    let mut world = maze_world(GridPos::new(5, 5), GridPos::new(1, 1));
    let mut detector = EncounterDetector::new();

    let commands = detect(&mut world, &mut detector);

    assert!(commands.is_empty());
    assert_eq!(query::scene(&world), SceneState::Maze);
}

#[test]
fn detector_stays_quiet_during_a_fight() {
    let player = GridPos::new(2, 2);
    let mut world = maze_world(player, GridPos::new(2, 1));
    let mut detector = EncounterDetector::new();

    let commands = detect(&mut world, &mut detector);
    let _ = apply_all(&mut world, commands);
    assert_eq!(query::scene(&world), SceneState::EnemyFight);

    let commands = detect(&mut world, &mut detector);
    assert!(commands.is_empty());
}
