use crate::direction::Direction;
use std::fmt;

/// A cell on the toroidal grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Grid dimensions; all coordinate arithmetic wraps on both axes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub width: usize,
    pub height: usize,
}

impl GridSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of cells
    #[inline]
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    /// Row-major index of a position
    #[inline]
    pub fn index(&self, pos: Position) -> usize {
        debug_assert!(self.contains(pos));
        pos.y * self.width + pos.x
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// `pos + (dx, dy)`, wrapped onto the torus
    #[inline]
    pub fn offset(&self, pos: Position, dx: isize, dy: isize) -> Position {
        Position::new(
            wrap(pos.x as isize + dx, self.width),
            wrap(pos.y as isize + dy, self.height),
        )
    }

    #[inline]
    pub fn neighbor(&self, pos: Position, dir: Direction) -> Position {
        let (dx, dy) = dir.offset();
        self.offset(pos, dx, dy)
    }

    /// The four neighbours in [`Direction::ALL`] order
    pub fn neighbors(&self, pos: Position) -> [Position; 4] {
        Direction::ALL.map(|dir| self.neighbor(pos, dir))
    }

    /// Manhattan distance taking the shorter way round on each axis
    pub fn manhattan(&self, a: Position, b: Position) -> usize {
        axis_distance(a.x, b.x, self.width) + axis_distance(a.y, b.y, self.height)
    }

    /// One greedy step from `from` towards `to`.
    ///
    /// Each axis moves at most one unit, in the direction of the shorter
    /// wrapped delta. Both axes move in the same step.
    pub fn step_towards(&self, from: Position, to: Position) -> Position {
        let dx = shortest_delta(from.x, to.x, self.width).signum();
        let dy = shortest_delta(from.y, to.y, self.height).signum();
        self.offset(from, dx, dy)
    }
}

#[inline]
fn wrap(value: isize, size: usize) -> usize {
    value.rem_euclid(size as isize) as usize
}

fn axis_distance(a: usize, b: usize, size: usize) -> usize {
    let d = a.abs_diff(b);
    d.min(size - d)
}

/// Signed delta from `from` to `to` on a ring of `size`.
///
/// Forward deltas beyond half the ring go the other way round.
fn shortest_delta(from: usize, to: usize, size: usize) -> isize {
    let forward = (to + size - from) % size;
    if forward > size / 2 {
        forward as isize - size as isize
    } else {
        forward as isize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_wraps() {
        let grid = GridSize::new(10, 5);
        assert_eq!(grid.offset(Position::new(0, 0), -1, -1), Position::new(9, 4));
        assert_eq!(grid.offset(Position::new(9, 4), 1, 1), Position::new(0, 0));
        assert_eq!(grid.neighbor(Position::new(3, 0), Direction::North), Position::new(3, 4));
    }

    #[test]
    fn test_manhattan_uses_shorter_path() {
        let grid = GridSize::new(10, 10);
        assert_eq!(grid.manhattan(Position::new(0, 0), Position::new(9, 9)), 2);
        assert_eq!(grid.manhattan(Position::new(2, 3), Position::new(5, 3)), 3);
        assert_eq!(grid.manhattan(Position::new(1, 1), Position::new(1, 1)), 0);
    }

    #[test]
    fn test_step_towards_goes_round_the_edge() {
        let grid = GridSize::new(10, 10);
        // 0 -> 8 is shorter backwards through 9
        assert_eq!(
            grid.step_towards(Position::new(0, 5), Position::new(8, 5)),
            Position::new(9, 5)
        );
        assert_eq!(
            grid.step_towards(Position::new(2, 2), Position::new(4, 0)),
            Position::new(3, 1)
        );
        assert_eq!(
            grid.step_towards(Position::new(4, 4), Position::new(4, 4)),
            Position::new(4, 4)
        );
    }

    #[test]
    fn test_step_towards_reaches_target() {
        let grid = GridSize::new(7, 11);
        let target = Position::new(1, 9);
        let mut pos = Position::new(5, 2);
        let mut steps = 0;
        while pos != target {
            pos = grid.step_towards(pos, target);
            steps += 1;
            assert!(steps <= 11);
        }
    }

    #[test]
    fn test_index_is_row_major() {
        let grid = GridSize::new(4, 3);
        assert_eq!(grid.area(), 12);
        assert_eq!(grid.index(Position::new(3, 2)), 11);
        assert_eq!(grid.index(Position::new(1, 0)), 1);
    }
}
