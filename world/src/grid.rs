//! Walkability grid and named-position registry owned by the world.

use maze_crawl_core::{CollisionFlags, EnemyMarker, FoeKind, GridError, GridPos, GridView};

/// Dense row-major walkability map plus the named positions the rest of the
/// game routes through (player, enemy, stairs, optional boss trigger).
///
/// The map stores walkability only; mutual exclusion of overlapping positions
/// is a semantic concern tracked through [`CollisionFlags`], not storage.
#[derive(Clone, Debug, Default)]
pub(crate) struct GridMap {
    rows: u32,
    columns: u32,
    cells: Vec<bool>,
    player: Option<GridPos>,
    enemy: Option<EnemyMarker>,
    stairs: Option<GridPos>,
    boss_trigger: Option<GridPos>,
    collisions: CollisionFlags,
}

impl GridMap {
    /// Creates a grid of the given dimensions with every cell walkable.
    pub(crate) fn new(rows: u32, columns: u32) -> Self {
        let capacity_u64 = u64::from(rows) * u64::from(columns);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            rows,
            columns,
            cells: vec![true; capacity],
            player: None,
            enemy: None,
            stairs: None,
            boss_trigger: None,
            collisions: CollisionFlags::default(),
        }
    }

    /// Reports whether the cell is walkable; out-of-bounds cells are not.
    pub(crate) fn is_walkable(&self, cell: GridPos) -> bool {
        self.index(cell)
            .map_or(false, |index| self.cells.get(index).copied().unwrap_or(false))
    }

    /// Mutates a single cell's walkability. No mutation on out-of-bounds.
    pub(crate) fn set_walkable(&mut self, cell: GridPos, walkable: bool) -> Result<(), GridError> {
        let index = self.index(cell).ok_or(GridError::OutOfBounds(cell))?;
        if let Some(slot) = self.cells.get_mut(index) {
            *slot = walkable;
        }
        Ok(())
    }

    /// Registers the player position; the target cell must be walkable.
    pub(crate) fn place_player(&mut self, cell: GridPos) -> Result<Option<GridPos>, GridError> {
        self.require_walkable(cell)?;
        let previous = self.player.replace(cell);
        self.refresh_collisions();
        Ok(previous)
    }

    /// Registers the enemy position and kind; the cell must be walkable.
    pub(crate) fn place_enemy(
        &mut self,
        cell: GridPos,
        kind: FoeKind,
    ) -> Result<Option<GridPos>, GridError> {
        self.require_walkable(cell)?;
        let previous = self.enemy.replace(EnemyMarker { cell, kind });
        self.refresh_collisions();
        Ok(previous.map(|marker| marker.cell))
    }

    /// Removes the enemy from the registry.
    pub(crate) fn clear_enemy(&mut self) {
        self.enemy = None;
        self.refresh_collisions();
    }

    /// Registers the stairs cell; the cell must be walkable.
    pub(crate) fn place_stairs(&mut self, cell: GridPos) -> Result<(), GridError> {
        self.require_walkable(cell)?;
        self.stairs = Some(cell);
        self.refresh_collisions();
        Ok(())
    }

    /// Registers the boss trigger cell; the cell must be walkable.
    pub(crate) fn place_boss_trigger(&mut self, cell: GridPos) -> Result<(), GridError> {
        self.require_walkable(cell)?;
        self.boss_trigger = Some(cell);
        Ok(())
    }

    /// The player's registered cell, if placed.
    pub(crate) fn player(&self) -> Option<GridPos> {
        self.player
    }

    /// The enemy's registered marker, if placed.
    pub(crate) fn enemy(&self) -> Option<EnemyMarker> {
        self.enemy
    }

    /// The boss trigger cell, if placed.
    pub(crate) fn boss_trigger(&self) -> Option<GridPos> {
        self.boss_trigger
    }

    /// Collision flags recomputed after the most recent mutation.
    pub(crate) fn collisions(&self) -> CollisionFlags {
        self.collisions
    }

    /// Captures a read-only view of the grid and its named positions.
    pub(crate) fn view(&self) -> GridView<'_> {
        GridView::new(
            &self.cells,
            self.rows,
            self.columns,
            self.player,
            self.enemy,
            self.stairs,
            self.boss_trigger,
        )
    }

    /// Validates that a cell can host a named position without mutating.
    pub(crate) fn require_walkable(&self, cell: GridPos) -> Result<(), GridError> {
        if !self.in_bounds(cell) {
            return Err(GridError::OutOfBounds(cell));
        }
        if !self.is_walkable(cell) {
            return Err(GridError::NotWalkable(cell));
        }
        Ok(())
    }

    fn in_bounds(&self, cell: GridPos) -> bool {
        cell.row() < self.rows && cell.col() < self.columns
    }

    fn refresh_collisions(&mut self) {
        let player = self.player;
        self.collisions = CollisionFlags {
            enemy: matches!(
                (player, self.enemy),
                (Some(p), Some(marker)) if p == marker.cell
            ),
            stairs: matches!(
                (player, self.stairs),
                (Some(p), Some(stairs)) if p == stairs
            ),
        };
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
