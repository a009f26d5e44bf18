//! # Janban Core
//!
//! Core domain model and query engine for Janban kanban board tracking.
//!
//! This crate provides boards, ordered columns, and cards together with
//! keyword search, type filtering, and aggregate statistics, without any
//! dependency on specific UI implementations. A JSON-file storage backend
//! is included behind the [`Storage`] trait.

pub mod domain;
pub mod error;
pub mod events;
pub mod storage;

// Re-export commonly used types
pub use domain::{
    board::KanbanBoard,
    board_list::BoardList,
    card::{Card, CardId, CardType},
    column::{Column, ColumnId},
};
pub use error::{JanbanError, Result};
pub use events::{Event, EventSink, MemorySink, NullSink};
pub use storage::{JsonFileStorage, Storage};
