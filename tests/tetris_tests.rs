//! Tetris ruleset driven through the world operations

use grid_arcade::core::{World, SPAWN_X, SPAWN_Y, SHAPES};
use grid_arcade::types::{
    EntityKind, GameMode, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH, TETRIS_GAME_OVER,
};

const W: i32 = BOARD_WIDTH as i32;
const H: i32 = BOARD_HEIGHT as i32;

#[test]
fn hard_dropped_i_settles_on_bottom_row() {
    let mut world = World::new(7);
    let id = world.spawn_block("I", 0, 0).unwrap();

    let piece = world.entity(id).unwrap();
    assert_eq!((piece.x, piece.y, piece.rotation), (W / 2 - 1, 0, 0));

    assert!(world.drop_entity(id));

    for x in W / 2 - 1..=W / 2 + 2 {
        assert_eq!(world.board().get(x, H - 1), Some(ShapeKind::I.marker()));
    }
    assert_eq!(world.board().occupied_count(), 4);
    assert_eq!(world.score(), 0, "a fix that clears nothing scores nothing");
    assert!(world.entity(id).is_none(), "fixed piece leaves the store");
    assert_ne!(world.active_piece(), Some(id));
    assert_eq!(world.entities().count_kind(EntityKind::ActivePiece), 1);
}

#[test]
fn completing_a_row_clears_it_and_scores_100() {
    let mut world = World::new(7);
    for x in 0..W {
        if !(SPAWN_X..SPAWN_X + 4).contains(&x) {
            world.board_mut().set(x, H - 1, 2);
        }
    }
    world.board_mut().set(0, H - 2, 5);
    world.board_mut().set(9, H - 3, 6);

    let id = world.spawn_block("I", 0, 0).unwrap();
    world.drop_entity(id);

    assert_eq!(world.score(), 100);
    assert_eq!(world.board().occupied_count(), 2);
    assert_eq!(world.board().get(0, H - 1), Some(5));
    assert_eq!(world.board().get(9, H - 2), Some(6));
    for x in 0..W {
        assert_eq!(world.board().get(x, 0), Some(0));
    }
}

#[test]
fn clearing_four_rows_scores_800() {
    let mut world = World::new(7);
    for y in H - 4..H {
        for x in 1..W {
            world.board_mut().set(x, y, 3);
        }
    }

    let id = world.spawn_block("I", 0, 0).unwrap();
    // Stand the I up: rotation 1 reaches three rows above its origin.
    world.move_entity(id, 0, 3);
    assert!(world.rotate_entity(id));
    world.move_entity(id, -SPAWN_X, 0);
    world.drop_entity(id);

    assert_eq!(world.score(), 800);
    assert_eq!(world.board().occupied_count(), 0);
}

#[test]
fn collision_is_monotonic_in_occupancy() {
    let mut world = World::new(1);
    let mut before = Vec::new();
    for shape in 0..SHAPES.len() {
        for rotation in 0..4u8 {
            for y in -2..H + 2 {
                for x in -2..W + 2 {
                    before.push(world.collides(x, y, shape, rotation));
                }
            }
        }
    }

    world.board_mut().set(3, 15, 1);
    world.board_mut().set(8, 4, 1);

    let mut i = 0;
    for shape in 0..SHAPES.len() {
        for rotation in 0..4u8 {
            for y in -2..H + 2 {
                for x in -2..W + 2 {
                    if before[i] {
                        assert!(world.collides(x, y, shape, rotation));
                    }
                    i += 1;
                }
            }
        }
    }
}

#[test]
fn walls_and_floor_stop_sideways_and_fix_downward() {
    let mut world = World::new(3);
    let id = world.spawn_block("O", 0, 0).unwrap();

    assert!(world.move_entity(id, -SPAWN_X, 0));
    assert!(!world.move_entity(id, -1, 0));
    assert_eq!(world.entity(id).map(|e| e.x), Some(0));

    for _ in 0..H - 2 {
        assert!(world.move_entity(id, 0, 1));
    }
    assert!(!world.move_entity(id, 0, 1));
    assert!(world.entity(id).is_none());
    assert_eq!(world.board().get(0, H - 1), Some(ShapeKind::O.marker()));
}

#[test]
fn auto_drop_steps_once_per_interval() {
    let mut world = World::with_auto_drop(5, 1000);
    let id = world.spawn_block("T", 0, 0).unwrap();

    assert!(!world.tick(999));
    assert_eq!(world.entity(id).map(|e| e.y), Some(SPAWN_Y));
    assert!(world.tick(1));
    assert_eq!(world.entity(id).map(|e| e.y), Some(SPAWN_Y + 1));
    assert!(!world.tick(500));
    assert_eq!(world.entity(id).map(|e| e.y), Some(SPAWN_Y + 1));
}

#[test]
fn stacking_to_the_top_ends_the_game() {
    let mut world = World::new(11);
    for y in 2..H {
        world.board_mut().set(SPAWN_X, y, 1);
    }

    let id = world.spawn_block("O", 0, 0).unwrap();
    world.drop_entity(id);

    // The O fixed at rows 0..1 and every shape's spawn area is now blocked.
    assert!(world.is_game_ended());
    assert_eq!(world.end_reason(), Some(TETRIS_GAME_OVER));
    assert_eq!(world.active_piece(), None);
    assert!(world.spawn_block("Tetris", 0, 0).is_none());
}

#[test]
fn huge_offsets_leave_the_piece_in_place() {
    let mut world = World::new(3);
    let id = world.spawn_block("L", 0, 0).unwrap();

    assert!(!world.move_entity(id, i32::MAX, 0));
    assert!(!world.move_entity(id, i32::MIN, 0));

    assert_eq!(world.entity(id).map(|e| (e.x, e.y)), Some((SPAWN_X, SPAWN_Y)));
    assert!(!world.is_game_ended());
}

#[test]
fn piece_mode_rejects_snake() {
    let mut world = World::new(2);
    world.spawn_block("Block", 0, 0).unwrap();

    assert_eq!(world.mode(), Some(GameMode::Tetris));
    assert!(world.spawn_block("Snake", 3, 3).is_none());
    assert_eq!(world.entities().count_kind(EntityKind::SnakeHead), 0);
}
