use crate::domain::board::KanbanBoard;
use crate::error::{JanbanError, Result};
use crate::events::{Event, EventSink, NullSink};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// The persistence root: a flat, append-only collection of kanban boards.
///
/// Carries an injected [`EventSink`] that is notified after successful
/// mutations; the default sink discards everything.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardList {
    boards: Vec<KanbanBoard>,
    #[serde(skip)]
    sink: Arc<dyn EventSink>,
}

impl BoardList {
    /// Creates an empty list with the no-op event sink.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(NullSink))
    }

    /// Creates an empty list reporting mutations to the given sink.
    pub fn with_sink(sink: Arc<dyn EventSink>) -> Self {
        Self {
            boards: Vec::new(),
            sink,
        }
    }

    pub fn add_board(&mut self, board: KanbanBoard) {
        self.sink.record(Event::new(format!(
            "Adding kanban board '{}' to list",
            board.name()
        )));

        self.boards.push(board);
    }

    /// Replaces the event sink, e.g. to attach one to a list rebuilt from
    /// storage.
    pub fn set_sink(&mut self, sink: Arc<dyn EventSink>) {
        self.sink = sink;
    }

    pub fn boards(&self) -> &[KanbanBoard] {
        &self.boards
    }

    pub fn get_board(&self, index: usize) -> Result<&KanbanBoard> {
        self.boards.get(index).ok_or(JanbanError::IndexOutOfRange {
            index,
            len: self.boards.len(),
        })
    }

    pub fn get_board_mut(&mut self, index: usize) -> Result<&mut KanbanBoard> {
        let len = self.boards.len();
        self.boards
            .get_mut(index)
            .ok_or(JanbanError::IndexOutOfRange { index, len })
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }
}

impl Default for BoardList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BoardList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardList")
            .field("boards", &self.boards)
            .finish_non_exhaustive()
    }
}

impl PartialEq for BoardList {
    fn eq(&self, other: &Self) -> bool {
        self.boards == other.boards
    }
}

impl Eq for BoardList {}
