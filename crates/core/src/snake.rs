//! Snake subsystem - heading, wrap-around advance, growth and food placement
//!
//! The snake is an ordered list of entity ids, head first. Every advance is a
//! synchronized shift: segment `i` takes the cell segment `i - 1` held before
//! the move. Exiting one edge re-enters from the opposite edge.

use tracing::{debug, info};

use crate::entity::{Entity, EntityId};
use crate::types::{
    Direction, EntityKind, BOARD_HEIGHT, BOARD_WIDTH, FOOD_PLACEMENT_ATTEMPTS, FOOD_SCORE,
    SNAKE_SELF_COLLISION,
};
use crate::world::World;

/// Segment order and heading of the snake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    segments: Vec<EntityId>,
    heading: Direction,
}

impl Snake {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            heading: Direction::Right,
        }
    }

    pub fn head(&self) -> Option<EntityId> {
        self.segments.first().copied()
    }

    /// Segment ids, head first
    pub fn segments(&self) -> &[EntityId] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Turn only across the current axis; reversals and same-axis requests are ignored.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if direction.is_horizontal() == self.heading.is_horizontal() {
            return false;
        }
        self.heading = direction;
        true
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap a cell onto the board torus
pub fn wrap_cell(x: i32, y: i32) -> (i32, i32) {
    (
        x.rem_euclid(BOARD_WIDTH as i32),
        y.rem_euclid(BOARD_HEIGHT as i32),
    )
}

impl World {
    /// Create the snake head at (x, y), wrapped onto the board, and make sure food exists.
    pub(crate) fn spawn_snake_head(&mut self, x: i32, y: i32) -> EntityId {
        let (x, y) = wrap_cell(x, y);
        let id = self.session.alloc_id();
        self.entities
            .insert(Entity::cell(id, EntityKind::SnakeHead, x, y));
        self.snake.segments.clear();
        self.snake.segments.push(id);
        info!(%id, x, y, "snake spawned");

        self.ensure_food();
        id
    }

    /// Create a food entity on a random cell free of snake segments.
    pub(crate) fn spawn_food(&mut self) -> EntityId {
        let (x, y) = self.food_cell();
        let id = self.session.alloc_id();
        self.entities.insert(Entity::cell(id, EntityKind::Food, x, y));
        info!(%id, x, y, "food spawned");
        id
    }

    /// Spawn food if none exists. Returns the new food id.
    pub(crate) fn ensure_food(&mut self) -> Option<EntityId> {
        if self.entities.count_kind(EntityKind::Food) > 0 {
            return None;
        }
        Some(self.spawn_food())
    }

    /// Random cell not covered by the snake.
    ///
    /// After `FOOD_PLACEMENT_ATTEMPTS` rejections the cell is (0, 0) regardless of occupancy.
    fn food_cell(&mut self) -> (i32, i32) {
        for _ in 0..FOOD_PLACEMENT_ATTEMPTS {
            let (x, y) = self.rng.next_cell(BOARD_WIDTH as i32, BOARD_HEIGHT as i32);
            if !self.snake_occupies(x, y, 0) {
                return (x, y);
            }
        }
        debug!(
            attempts = FOOD_PLACEMENT_ATTEMPTS,
            "no free cell found for food, using origin"
        );
        (0, 0)
    }

    /// True if any segment from `from` onwards sits on (x, y)
    fn snake_occupies(&self, x: i32, y: i32, from: usize) -> bool {
        self.snake
            .segments
            .iter()
            .skip(from)
            .filter_map(|id| self.entities.get(*id))
            .any(|segment| segment.is_at(x, y))
    }

    pub(crate) fn steer_snake(&mut self, direction: Direction) -> bool {
        if self.snake.is_empty() {
            return false;
        }
        let accepted = self.snake.steer(direction);
        debug!(
            direction = direction.as_str(),
            accepted,
            heading = self.snake.heading.as_str(),
            "snake steer"
        );
        accepted
    }

    /// Move the snake one cell along its heading.
    ///
    /// Returns false when there is no snake or the move ran into the body, which
    /// ends the session without touching any segment.
    pub(crate) fn advance_snake(&mut self) -> bool {
        let Some(head_id) = self.snake.head() else {
            return false;
        };
        let Some(head) = self.entities.get(head_id).copied() else {
            return false;
        };
        self.ensure_food();

        let (dx, dy) = self.snake.heading.delta();
        let (nx, ny) = wrap_cell(head.x + dx, head.y + dy);

        if self.snake_occupies(nx, ny, 1) {
            self.session.end_game(SNAKE_SELF_COLLISION);
            return false;
        }

        let eaten = self.entities.find_at(EntityKind::Food, nx, ny);
        let previous: Vec<(i32, i32)> = self
            .snake
            .segments
            .iter()
            .filter_map(|id| self.entities.get(*id))
            .map(Entity::position)
            .collect();

        for (i, id) in self.snake.segments.iter().enumerate() {
            let target = if i == 0 {
                Some((nx, ny))
            } else {
                previous.get(i - 1).copied()
            };
            if let (Some((x, y)), Some(segment)) = (target, self.entities.get_mut(*id)) {
                segment.x = x;
                segment.y = y;
            }
        }

        if let Some(food_id) = eaten {
            self.session.add_score(FOOD_SCORE);

            let (tx, ty) = previous.last().copied().unwrap_or((nx, ny));
            let tail = self.session.alloc_id();
            self.entities
                .insert(Entity::cell(tail, EntityKind::SnakeBody, tx, ty));
            self.snake.segments.push(tail);

            let (fx, fy) = self.food_cell();
            if let Some(food) = self.entities.get_mut(food_id) {
                food.x = fx;
                food.y = fy;
            }
            info!(
                length = self.snake.len(),
                food_x = fx,
                food_y = fy,
                "snake ate food"
            );
        }

        true
    }

    /// Generic move for free entities such as food: offset clamped into the board.
    pub(crate) fn move_clamped(&mut self, id: EntityId, dx: i32, dy: i32) -> bool {
        let Some(entity) = self.entities.get_mut(id) else {
            return false;
        };
        let max_x = (BOARD_WIDTH as i32 - entity.width).max(0);
        let max_y = (BOARD_HEIGHT as i32 - entity.height).max(0);
        entity.x = entity.x.saturating_add(dx).clamp(0, max_x);
        entity.y = entity.y.saturating_add(dy).clamp(0, max_y);
        debug!(%id, dx, dy, x = entity.x, y = entity.y, "entity moved");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steer_only_across_axis() {
        let mut snake = Snake::new();
        assert_eq!(snake.heading(), Direction::Right);

        assert!(!snake.steer(Direction::Left));
        assert!(!snake.steer(Direction::Right));
        assert!(snake.steer(Direction::Up));
        assert!(!snake.steer(Direction::Down));
        assert!(snake.steer(Direction::Left));
        assert_eq!(snake.heading(), Direction::Left);
    }

    #[test]
    fn test_wrap_cell() {
        assert_eq!(wrap_cell(10, 5), (0, 5));
        assert_eq!(wrap_cell(-1, 5), (9, 5));
        assert_eq!(wrap_cell(3, 20), (3, 0));
        assert_eq!(wrap_cell(3, -1), (3, 19));
    }

    #[test]
    fn test_spawn_head_creates_food() {
        let mut world = World::new(5);
        let head = world.spawn_block("Snake", 2, 3).expect("head");

        assert_eq!(world.snake().head(), Some(head));
        assert_eq!(world.entities().count_kind(EntityKind::Food), 1);
        let food = world
            .entities()
            .iter()
            .find(|e| e.kind == EntityKind::Food)
            .expect("food");
        assert!(!food.is_at(2, 3));
    }

    #[test]
    fn test_food_placement_falls_back_to_origin() {
        let mut world = World::new(11);
        world.spawn_block("Snake", 0, 0);
        // Cover every cell with a segment so no attempt can succeed.
        for y in 0..BOARD_HEIGHT as i32 {
            for x in 0..BOARD_WIDTH as i32 {
                if (x, y) == (0, 0) {
                    continue;
                }
                let id = world.session.alloc_id();
                world
                    .entities
                    .insert(Entity::cell(id, EntityKind::SnakeBody, x, y));
                world.snake.segments.push(id);
            }
        }

        assert_eq!(world.food_cell(), (0, 0));
    }

    #[test]
    fn test_move_clamped_stays_on_board() {
        let mut world = World::new(2);
        world.spawn_block("Snake", 5, 5);
        let food = world.spawn_block("Food", 0, 0).expect("food");

        world.move_entity(food, -100, 100);
        let entity = world.entity(food).expect("food entity");
        assert_eq!((entity.x, entity.y), (0, BOARD_HEIGHT as i32 - 1));
    }

    #[test]
    fn test_move_clamped_saturates_huge_offsets() {
        let mut world = World::new(2);
        world.spawn_block("Snake", 5, 5);
        let food = world.spawn_block("Food", 0, 0).expect("food");

        assert!(world.move_entity(food, i32::MAX, i32::MIN));
        let entity = world.entity(food).expect("food entity");
        assert_eq!((entity.x, entity.y), (BOARD_WIDTH as i32 - 1, 0));
    }
}
