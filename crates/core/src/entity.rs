//! Entity Store - id to mutable entity records
//!
//! Entities live in insertion order in a plain vector with linear id lookup.
//! No rule may depend on that order; the snake keeps its own segment list.

use std::fmt;

use crate::shapes::{placed_cells, ShapeCells};
use crate::types::{EntityKind, ShapeKind};

/// Unique entity id, allocated from a monotonically increasing counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity {
    pub id: EntityId,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub kind: EntityKind,
    /// Present only for piece-like kinds
    pub shape: Option<ShapeKind>,
    /// Quarter turns, 0..=3
    pub rotation: u8,
}

impl Entity {
    /// A new active piece at rotation 0
    pub fn piece(id: EntityId, shape: ShapeKind, x: i32, y: i32) -> Self {
        Self {
            id,
            x,
            y,
            width: 1,
            height: 1,
            kind: EntityKind::ActivePiece,
            shape: Some(shape),
            rotation: 0,
        }
    }

    /// A new single-cell entity (snake segment or food)
    pub fn cell(id: EntityId, kind: EntityKind, x: i32, y: i32) -> Self {
        Self {
            id,
            x,
            y,
            width: 1,
            height: 1,
            kind,
            shape: None,
            rotation: 0,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn is_at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }

    /// Absolute board cells covered by a piece, None for non-piece entities
    pub fn piece_cells(&self) -> Option<ShapeCells> {
        self.shape
            .map(|shape| placed_cells(shape, self.rotation, self.x, self.y))
    }
}

#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn insert(&mut self, entity: Entity) {
        debug_assert!(!self.contains(entity.id), "entity id reused");
        self.entities.push(entity);
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let pos = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(pos))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }

    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    /// First entity of `kind` occupying (x, y)
    pub fn find_at(&self, kind: EntityKind, x: i32, y: i32) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|e| e.kind == kind && e.is_at(x, y))
            .map(|e| e.id)
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}
