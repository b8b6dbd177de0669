//! Seeded maze generation for the command-line session.
//!
//! Walls are carved one cell at a time; a carve that would disconnect the
//! player from the stairs or strand the enemy is rolled back, so every
//! generated layout is playable.

use anyhow::{ensure, Result};
use maze_crawl_core::{FoeKind, GridPos, GridView};
use maze_crawl_system_bootstrap::{EnemySpawn, LevelLayout};
use maze_crawl_system_pathfinding::{find_path, PathOutcome};
use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generates a deterministic layout for the given seed.
pub(crate) fn generate(seed: u64, rows: u32, columns: u32) -> Result<LevelLayout> {
    ensure!(
        rows >= 3 && columns >= 3,
        "maze generation needs at least a 3x3 grid, got {rows}x{columns}"
    );

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let player = GridPos::new(0, 0);
    let stairs = GridPos::new(0, columns - 1);
    let enemy = GridPos::new(rows - 1, columns - 1);
    let boss_trigger = GridPos::new(rows - 1, 0);
    let reserved = [player, stairs, enemy, boss_trigger];

    let mut cells = vec![true; (rows as usize) * (columns as usize)];
    let mut blocked = Vec::new();
    let attempts = (rows * columns) / 4;
    for _ in 0..attempts {
        let cell = GridPos::new(rng.gen_range(0..rows), rng.gen_range(0..columns));
        if reserved.contains(&cell) || blocked.contains(&cell) {
            continue;
        }

        let index = (cell.row() as usize) * (columns as usize) + cell.col() as usize;
        cells[index] = false;
        let playable = connected(&cells, rows, columns, player, stairs)
            && connected(&cells, rows, columns, enemy, player)
            && connected(&cells, rows, columns, player, boss_trigger);
        if playable {
            blocked.push(cell);
        } else {
            cells[index] = true;
        }
    }

    Ok(LevelLayout {
        rows,
        columns,
        blocked,
        player,
        enemy: Some(EnemySpawn {
            cell: enemy,
            kind: FoeKind::Regular,
        }),
        stairs: Some(stairs),
        boss_trigger: Some(boss_trigger),
        encounters_required: 1,
    })
}

fn connected(cells: &[bool], rows: u32, columns: u32, from: GridPos, to: GridPos) -> bool {
    let view = GridView::new(cells, rows, columns, None, None, None, None);
    !matches!(find_path(&view, from, to), PathOutcome::Unreachable)
}
