use std::collections::HashSet;

use super::session_rng::SessionRng;
use super::types::{FieldSize, Point};

/// Picks a uniformly random cell that is in neither `occupied` nor
/// `extra_forbidden`. Returns `None` when the whole field is taken; callers
/// treat that as "nothing to place right now", not as an error.
pub fn random_free_cell(
    field: &FieldSize,
    occupied: &HashSet<Point>,
    extra_forbidden: &HashSet<Point>,
    rng: &mut SessionRng,
) -> Option<Point> {
    let mut free = Vec::with_capacity(field.cell_count());
    for x in 0..field.width {
        for y in 0..field.height {
            let cell = Point::new(x, y);
            if !occupied.contains(&cell) && !extra_forbidden.contains(&cell) {
                free.push(cell);
            }
        }
    }
    if free.is_empty() {
        None
    } else {
        Some(free[rng.random_range(0..free.len())])
    }
}

pub fn wrapping_inc(value: usize, max: usize) -> usize {
    if value + 1 >= max { 0 } else { value + 1 }
}

pub fn wrapping_dec(value: usize, max: usize) -> usize {
    if value == 0 { max - 1 } else { value - 1 }
}
