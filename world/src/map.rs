//! Grid bounds, permanent walls, transient ice walls and hazards.

use std::collections::{BTreeMap, HashSet};

use frostbite_core::{CellKind, Location, ObstacleKind};

use crate::Obstacle;

/// Static and transient blocking state of a level's grid.
///
/// Entities are never recorded here: their own locations are the single
/// source of truth and are looked up by scanning the level rosters.
#[derive(Clone, Debug)]
pub struct Map {
    width: i32,
    height: i32,
    walls: HashSet<Location>,
    ice_walls: HashSet<Location>,
    obstacles: BTreeMap<Location, Obstacle>,
}

impl Map {
    /// Creates an open map with the provided dimensions and no walls.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: i32::try_from(width).unwrap_or(i32::MAX),
            height: i32::try_from(height).unwrap_or(i32::MAX),
            walls: HashSet::new(),
            ice_walls: HashSet::new(),
            obstacles: BTreeMap::new(),
        }
    }

    /// Creates a map whose outermost ring of cells is walled off.
    #[must_use]
    pub fn bordered(width: u32, height: u32) -> Self {
        let mut map = Self::new(width, height);
        for location in border_cells(map.width, map.height) {
            let _ = map.add_wall(location);
        }
        map
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Reports whether the location lies within the grid bounds.
    #[must_use]
    pub fn in_bounds(&self, location: Location) -> bool {
        (0..self.width).contains(&location.x()) && (0..self.height).contains(&location.y())
    }

    /// Reports whether an entity may stand on the location.
    #[must_use]
    pub fn is_valid_position(&self, location: Location) -> bool {
        self.in_bounds(location)
            && !self.walls.contains(&location)
            && !self.ice_walls.contains(&location)
    }

    /// Adds a permanent wall, returning `true` when the wall is new.
    pub fn add_wall(&mut self, location: Location) -> bool {
        if !self.in_bounds(location) {
            return false;
        }
        let _ = self.ice_walls.remove(&location);
        self.walls.insert(location)
    }

    /// Reports whether a permanent wall occupies the location.
    #[must_use]
    pub fn has_wall(&self, location: Location) -> bool {
        self.walls.contains(&location)
    }

    /// Permanent walls in ascending location order.
    #[must_use]
    pub fn walls(&self) -> Vec<Location> {
        let mut walls: Vec<Location> = self.walls.iter().copied().collect();
        walls.sort_unstable();
        walls
    }

    /// Adds an ice wall on an in-bounds cell free of permanent walls.
    ///
    /// Returns `true` when a new ice wall was placed.
    pub fn add_ice_wall(&mut self, location: Location) -> bool {
        if !self.in_bounds(location) || self.walls.contains(&location) {
            return false;
        }
        self.ice_walls.insert(location)
    }

    /// Removes an ice wall, returning `true` when one was present.
    pub fn remove_ice_wall(&mut self, location: Location) -> bool {
        self.ice_walls.remove(&location)
    }

    /// Reports whether an ice wall occupies the location.
    #[must_use]
    pub fn has_ice_wall(&self, location: Location) -> bool {
        self.ice_walls.contains(&location)
    }

    /// Ice walls currently on the map in ascending location order.
    #[must_use]
    pub fn ice_walls(&self) -> Vec<Location> {
        let mut walls: Vec<Location> = self.ice_walls.iter().copied().collect();
        walls.sort_unstable();
        walls
    }

    /// Removes every ice wall from the map.
    pub fn clear_ice_walls(&mut self) {
        self.ice_walls.clear();
    }

    /// Places a hazard, replacing any hazard already on that cell.
    ///
    /// Hazards outside the grid are rejected and `false` is returned.
    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> bool {
        if !self.in_bounds(obstacle.location()) {
            return false;
        }
        let _ = self.obstacles.insert(obstacle.location(), obstacle);
        true
    }

    /// Places a hot tile at the provided location.
    pub fn add_hot_tile(&mut self, location: Location) -> bool {
        self.add_obstacle(Obstacle::hot_tile(location))
    }

    /// Places a burning campfire at the provided location.
    pub fn add_campfire(&mut self, location: Location) -> bool {
        self.add_obstacle(Obstacle::campfire(location))
    }

    /// Hazard occupying the location, if any.
    #[must_use]
    pub fn obstacle_at(&self, location: Location) -> Option<&Obstacle> {
        self.obstacles.get(&location)
    }

    pub(crate) fn obstacle_at_mut(&mut self, location: Location) -> Option<&mut Obstacle> {
        self.obstacles.get_mut(&location)
    }

    /// Iterator over every hazard in ascending location order.
    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.values()
    }

    /// Classifies a single cell. Out-of-bounds cells report as walls.
    #[must_use]
    pub fn cell_kind(&self, location: Location) -> CellKind {
        if !self.in_bounds(location) || self.walls.contains(&location) {
            return CellKind::Wall;
        }
        if self.ice_walls.contains(&location) {
            return CellKind::Ice;
        }
        match self.obstacles.get(&location).map(Obstacle::kind) {
            Some(ObstacleKind::HotTile) => CellKind::HotTile,
            Some(ObstacleKind::Campfire) => CellKind::Campfire,
            None => CellKind::Empty,
        }
    }

    /// Row-major grid of cell classifications, indexed `[y][x]`.
    #[must_use]
    pub fn grid(&self) -> Vec<Vec<CellKind>> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| self.cell_kind(Location::new(x, y)))
                    .collect()
            })
            .collect()
    }
}

fn border_cells(width: i32, height: i32) -> Vec<Location> {
    if width <= 0 || height <= 0 {
        return Vec::new();
    }

    let mut cells = Vec::new();
    for x in 0..width {
        cells.push(Location::new(x, 0));
        cells.push(Location::new(x, height - 1));
    }
    for y in 1..height - 1 {
        cells.push(Location::new(0, y));
        cells.push(Location::new(width - 1, y));
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_outside_bounds_are_never_valid() {
        let map = Map::new(5, 4);
        for location in [
            Location::new(-1, 0),
            Location::new(0, -1),
            Location::new(5, 0),
            Location::new(0, 4),
            Location::new(5, 4),
        ] {
            assert!(!map.is_valid_position(location), "{location:?}");
        }
        assert!(map.is_valid_position(Location::new(4, 3)));
    }

    #[test]
    fn bordered_map_walls_the_perimeter() {
        let map = Map::bordered(6, 5);
        assert!(map.has_wall(Location::new(0, 0)));
        assert!(map.has_wall(Location::new(5, 4)));
        assert!(map.has_wall(Location::new(0, 2)));
        assert!(!map.has_wall(Location::new(1, 1)));
        assert!(map.is_valid_position(Location::new(4, 3)));
        assert!(!map.is_valid_position(Location::new(5, 3)));
    }

    #[test]
    fn ice_walls_block_until_removed() {
        let mut map = Map::bordered(5, 5);
        let cell = Location::new(2, 2);
        assert!(map.add_ice_wall(cell));
        assert!(!map.add_ice_wall(cell));
        assert!(!map.is_valid_position(cell));
        assert!(map.remove_ice_wall(cell));
        assert!(!map.remove_ice_wall(cell));
        assert!(map.is_valid_position(cell));
    }

    #[test]
    fn ice_never_lands_on_walls_or_outside() {
        let mut map = Map::bordered(5, 5);
        assert!(!map.add_ice_wall(Location::new(0, 0)));
        assert!(!map.add_ice_wall(Location::new(7, 1)));
        assert!(map.ice_walls().is_empty());
    }

    #[test]
    fn grid_is_row_major() {
        let mut map = Map::bordered(4, 3);
        let _ = map.add_ice_wall(Location::new(1, 1));
        let _ = map.add_campfire(Location::new(2, 1));
        let grid = map.grid();
        assert_eq!(grid.len(), 3);
        assert!(grid.iter().all(|row| row.len() == 4));
        assert_eq!(grid[1][1], CellKind::Ice);
        assert_eq!(grid[1][2], CellKind::Campfire);
        assert_eq!(grid[0][2], CellKind::Wall);
    }
}
