//! Snake ruleset driven through the world operations

use grid_arcade::core::{EntityId, World};
use grid_arcade::types::{
    Command, Direction, EntityKind, GameMode, BOARD_HEIGHT, BOARD_WIDTH, SNAKE_SELF_COLLISION,
};

const W: i32 = BOARD_WIDTH as i32;
const H: i32 = BOARD_HEIGHT as i32;

fn food(world: &World) -> (EntityId, i32, i32) {
    let food = world
        .entities()
        .iter()
        .find(|e| e.kind == EntityKind::Food)
        .expect("food exists");
    (food.id, food.x, food.y)
}

/// Move the food onto (x, y) through the clamped generic move.
fn place_food(world: &mut World, x: i32, y: i32) {
    let (id, fx, fy) = food(world);
    assert!(world.move_entity(id, x - fx, y - fy));
    let (_, fx, fy) = food(world);
    assert_eq!((fx, fy), (x, y));
}

fn head_position(world: &World, head: EntityId) -> (i32, i32) {
    world.entity(head).map(|e| (e.x, e.y)).unwrap()
}

#[test]
fn eating_food_grows_by_one_and_scores_one() {
    let mut world = World::new(21);
    let head = world.spawn_block("Snake", 3, 3).unwrap();
    place_food(&mut world, 4, 3);

    assert!(world.move_entity(head, 0, 0));

    assert_eq!(world.snake().len(), 2);
    assert_eq!(world.score(), 1);
    assert_eq!(head_position(&world, head), (4, 3));

    let tail = world.snake().segments()[1];
    let tail = world.entity(tail).unwrap();
    assert_eq!(tail.kind, EntityKind::SnakeBody);
    assert_eq!((tail.x, tail.y), (3, 3));

    let (_, fx, fy) = food(&world);
    assert_ne!((fx, fy), (4, 3));
    assert_ne!((fx, fy), (3, 3));
    assert_eq!(world.entities().count_kind(EntityKind::Food), 1);
}

#[test]
fn reversal_in_the_same_tick_is_ignored() {
    let mut world = World::new(21);
    let head = world.spawn_block("Snake", 3, 3).unwrap();

    assert!(!world.apply_command(Command::Steer(Direction::Left)));
    assert_eq!(world.snake().heading(), Direction::Right);

    world.move_entity(head, 0, 0);
    assert_eq!(head_position(&world, head), (4, 3));
}

#[test]
fn wraps_on_all_four_edges() {
    let mut world = World::new(9);
    let head = world.spawn_block("Snake", W - 1, 5).unwrap();
    // Park the food where the head never goes.
    place_food(&mut world, 5, 0);

    world.move_entity(head, 0, 0);
    assert_eq!(head_position(&world, head), (0, 5));

    world.apply_command(Command::Steer(Direction::Up));
    for _ in 0..6 {
        world.move_entity(head, 0, 0);
    }
    assert_eq!(head_position(&world, head), (0, H - 1));

    world.apply_command(Command::Steer(Direction::Left));
    world.move_entity(head, 0, 0);
    assert_eq!(head_position(&world, head), (W - 1, H - 1));

    world.apply_command(Command::Steer(Direction::Down));
    world.move_entity(head, 0, 0);
    assert_eq!(head_position(&world, head), (W - 1, 0));

    assert!(!world.is_game_ended());
    assert_eq!(world.snake().len(), 1);
}

#[test]
fn head_spawn_coordinates_wrap() {
    let mut world = World::new(4);
    let head = world.spawn_block("Snake", -1, H).unwrap();
    assert_eq!(head_position(&world, head), (W - 1, 0));
}

#[test]
fn segments_follow_their_predecessors() {
    let mut world = World::new(33);
    let head = world.spawn_block("Snake", 2, 8).unwrap();

    for x in 3..6 {
        place_food(&mut world, x, 8);
        world.move_entity(head, 0, 0);
    }
    assert_eq!(world.snake().len(), 4);
    assert_eq!(world.score(), 3);

    place_food(&mut world, 0, 0);
    world.apply_command(Command::Steer(Direction::Down));
    world.move_entity(head, 0, 0);

    let cells: Vec<(i32, i32)> = world
        .snake()
        .segments()
        .iter()
        .map(|id| head_position(&world, *id))
        .collect();
    assert_eq!(cells, vec![(5, 9), (5, 8), (4, 8), (3, 8)]);
}

#[test]
fn running_into_the_body_ends_the_game() {
    let mut world = World::new(33);
    let head = world.spawn_block("Snake", 2, 8).unwrap();
    for x in 3..7 {
        place_food(&mut world, x, 8);
        world.move_entity(head, 0, 0);
    }
    assert_eq!(world.snake().len(), 5);
    place_food(&mut world, 0, 0);

    world.apply_command(Command::Steer(Direction::Down));
    world.move_entity(head, 0, 0);
    world.apply_command(Command::Steer(Direction::Left));
    world.move_entity(head, 0, 0);
    world.apply_command(Command::Steer(Direction::Up));
    let before = head_position(&world, head);

    assert!(!world.move_entity(head, 0, 0));
    assert!(world.is_game_ended());
    assert_eq!(world.end_reason(), Some(SNAKE_SELF_COLLISION));
    assert_eq!(head_position(&world, head), before);
    assert_eq!(world.score(), 4);
}

#[test]
fn second_snake_spawn_adds_food_and_locks_mode() {
    let mut world = World::new(8);
    let head = world.spawn_block("Snake", 1, 1).unwrap();
    let extra = world.spawn_block("Snake", 7, 7).unwrap();

    assert_ne!(head, extra);
    assert_eq!(world.entity(extra).map(|e| e.kind), Some(EntityKind::Food));
    assert_eq!(world.entities().count_kind(EntityKind::SnakeHead), 1);
    assert_eq!(world.mode(), Some(GameMode::Snake));
    assert!(world.spawn_block("T", 0, 0).is_none());
}

#[test]
fn body_segments_cannot_be_moved_directly() {
    let mut world = World::new(21);
    let head = world.spawn_block("Snake", 3, 3).unwrap();
    place_food(&mut world, 4, 3);
    world.move_entity(head, 0, 0);

    let tail = world.snake().segments()[1];
    assert!(!world.move_entity(tail, 1, 0));
    assert_eq!(head_position(&world, tail), (3, 3));
}

#[test]
fn huge_offsets_clamp_food_to_the_board_edge() {
    let mut world = World::new(21);
    world.spawn_block("Snake", 3, 3).unwrap();
    let (food_id, _, _) = food(&world);

    assert!(world.move_entity(food_id, i32::MAX, 0));
    let (_, fx, _) = food(&world);
    assert_eq!(fx, W - 1);

    assert!(world.move_entity(food_id, i32::MIN, i32::MAX));
    let (_, fx, fy) = food(&world);
    assert_eq!((fx, fy), (0, H - 1));
}
