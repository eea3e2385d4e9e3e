//! Drag-and-drop: level projection and the reorder/reparent engine

pub mod engine;
pub mod level;

pub use engine::{DragEnd, DragKind, DragState, DropOutcome, InvalidMove, PendingPreview, ReorderEngine};
pub use level::{array_move, calc_level, DragMove, LevelPreview};
