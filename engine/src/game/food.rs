use std::collections::HashSet;

use super::grid::random_free_cell;
use super::power::PowerUpKind;
use super::session_rng::SessionRng;
use super::types::{FieldSize, Point};

/// The single food item. `pos` is `None` while no free cell exists.
pub struct Food {
    pos: Option<Point>,
}

impl Food {
    pub fn empty() -> Self {
        Self { pos: None }
    }

    pub fn spawn(
        field: &FieldSize,
        occupied: &HashSet<Point>,
        forbidden: &HashSet<Point>,
        rng: &mut SessionRng,
    ) -> Self {
        Self {
            pos: random_free_cell(field, occupied, forbidden, rng),
        }
    }

    pub fn respawn(
        &mut self,
        field: &FieldSize,
        occupied: &HashSet<Point>,
        forbidden: &HashSet<Point>,
        rng: &mut SessionRng,
    ) {
        self.pos = random_free_cell(field, occupied, forbidden, rng);
    }

    pub fn pos(&self) -> Option<Point> {
        self.pos
    }

    #[cfg(test)]
    pub(crate) fn set_pos(&mut self, pos: Option<Point>) {
        self.pos = pos;
    }
}

/// A power-up item on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Point,
}

impl PowerUp {
    /// Rolls a kind uniformly, then looks for a free cell. `None` when the
    /// board has no room left.
    pub fn spawn(
        field: &FieldSize,
        occupied: &HashSet<Point>,
        forbidden: &HashSet<Point>,
        rng: &mut SessionRng,
    ) -> Option<Self> {
        let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
        let pos = random_free_cell(field, occupied, forbidden, rng)?;
        Some(Self { kind, pos })
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
    fn test_food_avoids_occupied_and_forbidden_cells() {
        let occupied: HashSet<Point> = (0..10).map(|x| Point::new(x, 0)).collect();
        let forbidden: HashSet<Point> = (0..10).map(|x| Point::new(x, 1)).collect();
        let mut rng = SessionRng::new(21);
        for _ in 0..50 {
            let food = Food::spawn(&field(), &occupied, &forbidden, &mut rng);
            let pos = food.pos().expect("free cells remain");
            assert!(!occupied.contains(&pos));
            assert!(!forbidden.contains(&pos));
        }
    }

    #[test]
    fn test_food_on_full_field_has_no_position() {
        let occupied: HashSet<Point> = (0..10)
            .flat_map(|x| (0..10).map(move |y| Point::new(x, y)))
            .collect();
        let mut rng = SessionRng::new(21);
        let food = Food::spawn(&field(), &occupied, &HashSet::new(), &mut rng);
        assert_eq!(food.pos(), None);
    }

    #[test]
    fn test_powerup_avoids_occupied_and_forbidden_cells() {
        let occupied: HashSet<Point> = (0..10).map(|x| Point::new(x, 2)).collect();
        let forbidden: HashSet<Point> = [Point::new(4, 4)].into();
        let mut rng = SessionRng::new(13);
        for _ in 0..50 {
            let powerup =
                PowerUp::spawn(&field(), &occupied, &forbidden, &mut rng).expect("room left");
            assert!(!occupied.contains(&powerup.pos));
            assert!(!forbidden.contains(&powerup.pos));
        }
    }

    #[test]
    fn test_powerup_on_full_field_is_not_spawned() {
        let occupied: HashSet<Point> = (0..10)
            .flat_map(|x| (0..10).map(move |y| Point::new(x, y)))
            .collect();
        let mut rng = SessionRng::new(13);
        assert_eq!(
            PowerUp::spawn(&field(), &occupied, &HashSet::new(), &mut rng),
            None
        );
    }

    #[test]
    fn test_every_kind_is_eventually_rolled() {
        let mut rng = SessionRng::new(5);
        let mut seen: HashSet<PowerUpKind> = HashSet::new();
        for _ in 0..200 {
            let powerup =
                PowerUp::spawn(&field(), &HashSet::new(), &HashSet::new(), &mut rng).unwrap();
            seen.insert(powerup.kind);
        }
        assert_eq!(seen.len(), PowerUpKind::ALL.len());
    }
}
