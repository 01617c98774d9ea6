use std::collections::HashSet;

use super::session_rng::SessionRng;
use super::types::{FieldSize, Point};

/// Static obstacle cells, rolled once per game and immutable afterwards.
pub struct ObstacleField {
    cells: Vec<Point>,
    lookup: HashSet<Point>,
}

impl ObstacleField {
    pub fn empty() -> Self {
        Self {
            cells: Vec::new(),
            lookup: HashSet::new(),
        }
    }

    pub fn from_cells(cells: impl IntoIterator<Item = Point>) -> Self {
        let mut field = Self::empty();
        for cell in cells {
            if field.lookup.insert(cell) {
                field.cells.push(cell);
            }
        }
        field
    }

    /// Samples up to `count` distinct cells outside `forbidden`. Attempts are
    /// bounded at `count * 10`; a crowded field yields fewer obstacles rather
    /// than an error.
    pub fn generate(
        count: usize,
        forbidden: &HashSet<Point>,
        field: &FieldSize,
        rng: &mut SessionRng,
    ) -> Self {
        let mut result = Self::empty();
        let mut attempts = 0;
        while result.cells.len() < count && attempts < count * 10 {
            attempts += 1;
            let cell = Point::new(
                rng.random_range(0..field.width),
                rng.random_range(0..field.height),
            );
            if forbidden.contains(&cell) || !result.lookup.insert(cell) {
                continue;
            }
            result.cells.push(cell);
        }
        result
    }

    pub fn contains(&self, cell: &Point) -> bool {
        self.lookup.contains(cell)
    }

    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    pub fn cell_set(&self) -> &HashSet<Point> {
        &self.lookup
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> FieldSize {
        FieldSize {
            width: 10,
            height: 10,
        }
    }

    #[test]
    fn test_generates_requested_count_on_open_field() {
        let mut rng = SessionRng::new(3);
        let obstacles = ObstacleField::generate(12, &HashSet::new(), &field(), &mut rng);
        assert_eq!(obstacles.len(), 12);
        let unique: HashSet<Point> = obstacles.cells().iter().copied().collect();
        assert_eq!(unique.len(), 12);
    }

    #[test]
    fn test_forbidden_cells_are_avoided() {
        let forbidden: HashSet<Point> = (0..10).map(|x| Point::new(x, 5)).collect();
        let mut rng = SessionRng::new(11);
        let obstacles = ObstacleField::generate(20, &forbidden, &field(), &mut rng);
        for cell in obstacles.cells() {
            assert!(!forbidden.contains(cell));
        }
    }

    #[test]
    fn test_crowded_field_underfills_without_error() {
        let forbidden: HashSet<Point> = (0..10)
            .flat_map(|x| (0..10).map(move |y| Point::new(x, y)))
            .collect();
        let mut rng = SessionRng::new(7);
        let obstacles = ObstacleField::generate(5, &forbidden, &field(), &mut rng);
        assert!(obstacles.is_empty());
    }

    #[test]
    fn test_zero_count_generates_nothing() {
        let mut rng = SessionRng::new(1);
        let obstacles = ObstacleField::generate(0, &HashSet::new(), &field(), &mut rng);
        assert!(obstacles.is_empty());
    }

    #[test]
    fn test_from_cells_deduplicates() {
        let obstacles = ObstacleField::from_cells([
            Point::new(1, 1),
            Point::new(2, 2),
            Point::new(1, 1),
        ]);
        assert_eq!(obstacles.len(), 2);
        assert!(obstacles.contains(&Point::new(1, 1)));
        assert!(obstacles.contains(&Point::new(2, 2)));
        assert!(!obstacles.contains(&Point::new(3, 3)));
    }
}
