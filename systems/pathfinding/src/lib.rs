#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic A* pathfinding and the pursuit system that steps the enemy
//! toward the player each maze tick.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use maze_crawl_core::{Command, Direction, Event, GridPos, GridView, SceneState};

/// Result of a single path query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathOutcome {
    /// Ordered cells from start to goal, exclusive of start, inclusive of
    /// goal. Empty when start equals goal.
    Path(Vec<GridPos>),
    /// The goal is blocked, out of bounds, or no connected route exists.
    ///
    /// This is a normal result, not an error: callers fall back to idling
    /// in place.
    Unreachable,
}

const NEIGHBOR_ORDER: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct OpenNode {
    f: u32,
    h: u32,
    seq: u64,
    cell: GridPos,
}

// BinaryHeap is a max-heap; comparisons are reversed so the pop order is
// lowest f, then lowest h, then earliest insertion.
impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Computes a shortest path over 4-connected walkable cells with unit edge
/// cost and a Manhattan heuristic.
///
/// Each call is a fresh, stateless search: the goal moves every tick, so
/// cached paths would pursue stale positions. Only the goal and interior
/// steps are validated against walkability; a blocked start cell is searched
/// from as-is. Every cell is expanded at most once, so the search always
/// terminates within the fixed grid.
#[must_use]
pub fn find_path(grid: &GridView<'_>, start: GridPos, goal: GridPos) -> PathOutcome {
    if start == goal {
        return PathOutcome::Path(Vec::new());
    }
    if !grid.in_bounds(start) || !grid.is_walkable(goal) {
        return PathOutcome::Unreachable;
    }

    let (rows, columns) = grid.dimensions();
    let width = match usize::try_from(columns) {
        Ok(width) => width,
        Err(_) => return PathOutcome::Unreachable,
    };
    let cell_count = match usize::try_from(rows).map(|height| height.checked_mul(width)) {
        Ok(Some(count)) => count,
        _ => return PathOutcome::Unreachable,
    };
    if cell_count == 0 {
        return PathOutcome::Unreachable;
    }

    let mut g_score = vec![u32::MAX; cell_count];
    let mut came_from: Vec<Option<GridPos>> = vec![None; cell_count];
    let mut closed = vec![false; cell_count];
    let mut open = BinaryHeap::new();
    let mut seq: u64 = 0;

    let start_index = match index(width, start) {
        Some(index) => index,
        None => return PathOutcome::Unreachable,
    };
    g_score[start_index] = 0;
    open.push(OpenNode {
        f: start.manhattan_distance(goal),
        h: start.manhattan_distance(goal),
        seq,
        cell: start,
    });

    while let Some(node) = open.pop() {
        let Some(node_index) = index(width, node.cell) else {
            continue;
        };
        if closed[node_index] {
            continue;
        }
        closed[node_index] = true;

        if node.cell == goal {
            return PathOutcome::Path(reconstruct(&came_from, width, start, goal));
        }

        let next_g = g_score[node_index].saturating_add(1);
        for direction in NEIGHBOR_ORDER {
            let Some(neighbor) = node.cell.step(direction) else {
                continue;
            };
            if !grid.is_walkable(neighbor) {
                continue;
            }
            let Some(neighbor_index) = index(width, neighbor) else {
                continue;
            };
            if closed[neighbor_index] || g_score[neighbor_index] <= next_g {
                continue;
            }

            g_score[neighbor_index] = next_g;
            came_from[neighbor_index] = Some(node.cell);
            let h = neighbor.manhattan_distance(goal);
            seq += 1;
            open.push(OpenNode {
                f: next_g.saturating_add(h),
                h,
                seq,
                cell: neighbor,
            });
        }
    }

    PathOutcome::Unreachable
}

fn reconstruct(
    came_from: &[Option<GridPos>],
    width: usize,
    start: GridPos,
    goal: GridPos,
) -> Vec<GridPos> {
    let mut path = vec![goal];
    let mut cursor = goal;
    while cursor != start {
        let Some(previous) = index(width, cursor).and_then(|index| came_from[index]) else {
            break;
        };
        if previous != start {
            path.push(previous);
        }
        cursor = previous;
    }
    path.reverse();
    path
}

fn index(width: usize, cell: GridPos) -> Option<usize> {
    let row = usize::try_from(cell.row()).ok()?;
    let col = usize::try_from(cell.col()).ok()?;
    row.checked_mul(width)?.checked_add(col)
}

/// Pure system that routes the enemy toward the player while the maze is
/// live.
#[derive(Debug, Default)]
pub struct Pursuit;

impl Pursuit {
    /// Creates a new pursuit system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits at most one `Command::StepEnemy` per tick, recomputed from
    /// scratch against the current player position.
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
        if marker.cell == player {
            return;
        }

        let PathOutcome::Path(path) = find_path(grid, marker.cell, player) else {
            return;
        };
        let Some(first) = path.first().copied() else {
            return;
        };
        if let Some(direction) = Direction::between(marker.cell, first) {
            out.push(Command::StepEnemy { direction });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(cells: &[bool], rows: u32, columns: u32) -> GridView<'_> {
        GridView::new(cells, rows, columns, None, None, None, None)
    }

    fn open_grid(rows: u32, columns: u32) -> Vec<bool> {
        vec![true; (rows * columns) as usize]
    }

    fn block(cells: &mut [bool], columns: u32, cell: GridPos) {
        cells[(cell.row() * columns + cell.col()) as usize] = false;
    }

    #[test]
    fn finds_manhattan_optimal_path_around_a_wall() {
        let mut cells = open_grid(5, 5);
        block(&mut cells, 5, GridPos::new(2, 2));
        let grid = view(&cells, 5, 5);

        let outcome = find_path(&grid, GridPos::new(0, 0), GridPos::new(4, 4));

        let PathOutcome::Path(path) = outcome else {
            panic!("expected a path");
        };
        assert_eq!(path.len(), 8);
        assert_eq!(path.last().copied(), Some(GridPos::new(4, 4)));
        assert!(!path.contains(&GridPos::new(2, 2)));
        assert!(path.iter().all(|cell| grid.is_walkable(*cell)));

        // Consecutive steps are 4-connected.
        let mut previous = GridPos::new(0, 0);
        for cell in &path {
            assert_eq!(previous.manhattan_distance(*cell), 1);
            previous = *cell;
        }
    }

    #[test]
    fn unobstructed_path_length_equals_manhattan_distance() {
        let cells = open_grid(6, 7);
        let grid = view(&cells, 6, 7);
        let start = GridPos::new(1, 1);
        let goal = GridPos::new(4, 6);

        let PathOutcome::Path(path) = find_path(&grid, start, goal) else {
            panic!("expected a path");
        };
        assert_eq!(path.len() as u32, start.manhattan_distance(goal));
    }

    #[test]
    fn isolated_goal_is_unreachable_not_an_empty_success() {
        let mut cells = open_grid(5, 5);
        let goal = GridPos::new(2, 2);
        block(&mut cells, 5, GridPos::new(1, 2));
        block(&mut cells, 5, GridPos::new(3, 2));
        block(&mut cells, 5, GridPos::new(2, 1));
        block(&mut cells, 5, GridPos::new(2, 3));
        let grid = view(&cells, 5, 5);

        assert_eq!(
            find_path(&grid, GridPos::new(0, 0), goal),
            PathOutcome::Unreachable
        );
    }

    #[test]
    fn blocked_goal_is_unreachable() {
        let mut cells = open_grid(3, 3);
        block(&mut cells, 3, GridPos::new(2, 2));
        let grid = view(&cells, 3, 3);

        assert_eq!(
            find_path(&grid, GridPos::new(0, 0), GridPos::new(2, 2)),
            PathOutcome::Unreachable
        );
    }

    #[test]
    fn start_equal_to_goal_is_an_empty_success() {
        let cells = open_grid(3, 3);
        let grid = view(&cells, 3, 3);
        let cell = GridPos::new(1, 1);

        assert_eq!(find_path(&grid, cell, cell), PathOutcome::Path(Vec::new()));
    }

    #[test]
    fn out_of_bounds_endpoints_are_unreachable() {
        let cells = open_grid(3, 3);
        let grid = view(&cells, 3, 3);

        assert_eq!(
            find_path(&grid, GridPos::new(9, 0), GridPos::new(1, 1)),
            PathOutcome::Unreachable
        );
        assert_eq!(
            find_path(&grid, GridPos::new(1, 1), GridPos::new(0, 9)),
            PathOutcome::Unreachable
        );
    }

    #[test]
    fn blocked_start_still_searches_outward() {
        let mut cells = open_grid(3, 3);
        block(&mut cells, 3, GridPos::new(0, 0));
        let grid = view(&cells, 3, 3);

        let PathOutcome::Path(path) = find_path(&grid, GridPos::new(0, 0), GridPos::new(0, 2))
        else {
            panic!("expected a path");
        };
        assert_eq!(path, vec![GridPos::new(0, 1), GridPos::new(0, 2)]);
    }

    #[test]
    fn repeated_searches_are_deterministic() {
        let mut cells = open_grid(5, 5);
        block(&mut cells, 5, GridPos::new(2, 2));
        block(&mut cells, 5, GridPos::new(1, 3));
        let grid = view(&cells, 5, 5);

        let first = find_path(&grid, GridPos::new(0, 0), GridPos::new(4, 4));
        let second = find_path(&grid, GridPos::new(0, 0), GridPos::new(4, 4));
        assert_eq!(first, second);
    }
}
