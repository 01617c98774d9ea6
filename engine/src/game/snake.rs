use std::collections::{HashSet, VecDeque};

use super::grid::{wrapping_dec, wrapping_inc};
use super::logic::EngineError;
use super::types::{DeathReason, Direction, FieldSize, Point, WallCollisionMode};

/// The player snake: head at the front of `body`, with a hash index kept in
/// lockstep for O(1) collision checks.
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
    direction: Direction,
    pending_direction: Option<Direction>,
    pending_growth: u32,
}

impl Snake {
    /// Lays `length` segments starting at `head`, trailing away opposite to
    /// `direction`. Fails when a segment would fall outside the field.
    pub fn new(
        head: Point,
        direction: Direction,
        length: usize,
        field: &FieldSize,
    ) -> Result<Self, EngineError> {
        if length == 0 {
            return Err(EngineError::SnakeSpawn {
                width: field.width,
                height: field.height,
            });
        }

        let (dx, dy) = direction.offset();
        let mut body = VecDeque::with_capacity(length);
        let mut body_set = HashSet::with_capacity(length);

        for i in 0..length {
            let x = head.x as i64 - dx as i64 * i as i64;
            let y = head.y as i64 - dy as i64 * i as i64;
            if x < 0 || y < 0 || x >= field.width as i64 || y >= field.height as i64 {
                return Err(EngineError::SnakeSpawn {
                    width: field.width,
                    height: field.height,
                });
            }
            let segment = Point::new(x as usize, y as usize);
            body.push_back(segment);
            body_set.insert(segment);
        }

        Ok(Self {
            body,
            body_set,
            direction,
            pending_direction: None,
            pending_growth: 0,
        })
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("snake body is never empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("snake body is never empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn cells(&self) -> Vec<Point> {
        self.body.iter().copied().collect()
    }

    pub fn contains(&self, cell: &Point) -> bool {
        self.body_set.contains(cell)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    pub fn grow(&mut self, amount: u32) {
        self.pending_growth += amount;
    }

    /// Stages a direction change for the next step. A change onto the exact
    /// opposite of the committed direction is ignored, so a snake can never
    /// fold back onto its own neck — even when several changes arrive within
    /// one tick.
    pub fn set_direction(&mut self, direction: Direction) {
        if direction.is_opposite(&self.direction) {
            return;
        }
        self.pending_direction = Some(direction);
    }

    /// Advances one cell. Returns the collision that stopped the snake, in
    /// which case the body is left untouched. Moving onto the current tail
    /// cell is legal while no growth is pending: the tail vacates it this
    /// very tick.
    pub fn step(
        &mut self,
        field: &FieldSize,
        mode: WallCollisionMode,
    ) -> Result<(), DeathReason> {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        let next_head = self.next_head(field, mode)?;
        let vacates_tail = self.pending_growth == 0;

        if self.body_set.contains(&next_head) && !(vacates_tail && next_head == self.tail()) {
            return Err(DeathReason::SelfCollision);
        }

        if vacates_tail {
            let tail = self.body.pop_back().expect("snake body is never empty");
            self.body_set.remove(&tail);
        } else {
            self.pending_growth -= 1;
        }
        self.body.push_front(next_head);
        self.body_set.insert(next_head);

        Ok(())
    }

    fn next_head(
        &self,
        field: &FieldSize,
        mode: WallCollisionMode,
    ) -> Result<Point, DeathReason> {
        let head = self.head();

        match mode {
            WallCollisionMode::Death => match self.direction {
                Direction::Up => {
                    if head.y == 0 {
                        return Err(DeathReason::WallCollision);
                    }
                    Ok(Point::new(head.x, head.y - 1))
                }
                Direction::Down => {
                    if head.y >= field.height - 1 {
                        return Err(DeathReason::WallCollision);
                    }
                    Ok(Point::new(head.x, head.y + 1))
                }
                Direction::Left => {
                    if head.x == 0 {
                        return Err(DeathReason::WallCollision);
                    }
                    Ok(Point::new(head.x - 1, head.y))
                }
                Direction::Right => {
                    if head.x >= field.width - 1 {
                        return Err(DeathReason::WallCollision);
                    }
                    Ok(Point::new(head.x + 1, head.y))
                }
            },
            WallCollisionMode::WrapAround => match self.direction {
                Direction::Up => Ok(Point::new(head.x, wrapping_dec(head.y, field.height))),
                Direction::Down => Ok(Point::new(head.x, wrapping_inc(head.y, field.height))),
                Direction::Left => Ok(Point::new(wrapping_dec(head.x, field.width), head.y)),
                Direction::Right => Ok(Point::new(wrapping_inc(head.x, field.width), head.y)),
            },
        }
    }
}
