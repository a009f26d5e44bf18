use crate::domain::card::CardId;
use crate::domain::column::{Column, ColumnId};
use crate::error::{JanbanError, Result};
use serde::Serialize;

/// A named kanban board: an ordered set of columns, one of which is
/// distinguished by name as holding completed work.
///
/// The completed column is tracked as a cached identity token that is
/// updated transactionally on every column add, remove, and rename. All
/// three of those mutations therefore have to go through the board's own
/// operations; renaming a column behind the board's back would leave the
/// cache stale.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanBoard {
    name: String,
    description: String,
    completed_column_name: String,
    columns: Vec<Column>,
    #[serde(skip)]
    completed_column: Option<ColumnId>,
}

impl KanbanBoard {
    pub const DEFAULT_BACKLOG_COLUMN_NAME: &'static str = "Backlog";
    pub const DEFAULT_WIP_COLUMN_NAME: &'static str = "In Progress";

    /// Creates a board with no columns. Persistence re-adds columns through
    /// [`KanbanBoard::add_column`] so the completed-column cache populates
    /// itself during reconstruction.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        completed_column_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            completed_column_name: completed_column_name.into(),
            columns: Vec::new(),
            completed_column: None,
        }
    }

    /// Creates a board pre-populated with the default backlog, in-progress,
    /// and completed columns.
    pub fn with_default_columns(
        name: impl Into<String>,
        description: impl Into<String>,
        completed_column_name: impl Into<String>,
    ) -> Result<Self> {
        let mut board = Self::new(name, description, completed_column_name);
        board.add_default_columns()?;
        Ok(board)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// The name that marks a column as holding completed work. Fixed at
    /// construction.
    pub fn completed_column_name(&self) -> &str {
        &self.completed_column_name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_at(&self, index: usize) -> Result<&Column> {
        self.columns.get(index).ok_or(JanbanError::IndexOutOfRange {
            index,
            len: self.columns.len(),
        })
    }

    /// Mutable access to a column for card-level edits. Renames are not
    /// reachable this way; they go through
    /// [`KanbanBoard::edit_column_name`].
    pub fn column_mut(&mut self, id: ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|column| column.id() == id)
    }

    pub fn has_column_with_name(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column.name() == name)
    }

    /// The column currently holding completed cards, or `None` when no
    /// column carries the configured completed-column name.
    pub fn get_completed_column(&self) -> Option<&Column> {
        let id = self.completed_column?;
        self.columns.iter().find(|column| column.id() == id)
    }

    /// Generates and adds the default backlog, in-progress, and completed
    /// columns for this board, in that order. A name collision surfaces the
    /// same way it would through [`KanbanBoard::add_column`].
    pub fn add_default_columns(&mut self) -> Result<()> {
        self.add_column(Column::new(Self::DEFAULT_BACKLOG_COLUMN_NAME)?)?;
        self.add_column(Column::new(Self::DEFAULT_WIP_COLUMN_NAME)?)?;
        self.add_column(Column::new(self.completed_column_name.clone())?)?;
        Ok(())
    }

    /// Appends a column. Fails when another column already carries the same
    /// name (case-sensitive); the board is left unchanged on failure.
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        if self.has_column_with_name(column.name()) {
            return Err(JanbanError::DuplicateColumnName(column.name().to_string()));
        }

        if column.name() == self.completed_column_name {
            self.completed_column = Some(column.id());
        }

        self.columns.push(column);
        Ok(())
    }

    /// Removes a column and hands it back, or returns `None` when the
    /// column is not part of this board. Removing the completed column
    /// resets the cache.
    pub fn remove_column(&mut self, id: ColumnId) -> Option<Column> {
        let position = self.columns.iter().position(|column| column.id() == id)?;

        if self.completed_column == Some(id) {
            self.completed_column = None;
        }

        Some(self.columns.remove(position))
    }

    /// Renames a column. Unknown columns are a silent no-op; a blank name
    /// falls back to the column's default sentinel; colliding with a
    /// *different* column's name fails with `DuplicateColumnName` and
    /// leaves the board unchanged. Renaming a column to its own current
    /// name is allowed and keeps its completed-column status.
    pub fn edit_column_name(&mut self, id: ColumnId, new_name: impl Into<String>) -> Result<()> {
        if !self.columns.iter().any(|column| column.id() == id) {
            return Ok(());
        }

        let effective_name = Column::validate_name(new_name.into())?;

        let collision = self
            .columns
            .iter()
            .any(|column| column.id() != id && column.name() == effective_name);
        if collision {
            return Err(JanbanError::DuplicateColumnName(effective_name));
        }

        // Clear before matching the new name, so a self-rename of the
        // completed column re-marks it rather than dropping it.
        if self.completed_column == Some(id) {
            self.completed_column = None;
        }

        let matches_completed = effective_name == self.completed_column_name;
        if let Some(column) = self.columns.iter_mut().find(|column| column.id() == id) {
            column.set_name(effective_name);
        }

        if matches_completed {
            self.completed_column = Some(id);
        }

        Ok(())
    }

    /// Moves a card between this board's columns, removing it from its
    /// current column first so it is never present in two columns at once.
    /// Unknown destinations and cards not on this board are silent no-ops.
    pub fn move_card(&mut self, card_id: CardId, destination_id: ColumnId) {
        if !self.columns.iter().any(|c| c.id() == destination_id) {
            return;
        }

        let source = self
            .columns
            .iter_mut()
            .find(|column| column.contains_card(card_id));

        let card = match source.and_then(|column| column.remove_card(card_id)) {
            Some(card) => card,
            None => return,
        };

        if let Some(destination) = self.column_mut(destination_id) {
            destination.add_card(card);
        }
    }

    /// Total story points across every column of this board.
    pub fn total_story_points(&self) -> i32 {
        self.columns.iter().map(Column::total_story_points).sum()
    }

    /// Total story points in the completed column, or 0 when the board has
    /// no completed column.
    pub fn completed_story_points(&self) -> i32 {
        self.get_completed_column()
            .map(Column::total_story_points)
            .unwrap_or(0)
    }

    /// Number of cards on the board, optionally leaving out those in the
    /// completed column.
    pub fn card_count(&self, include_completed: bool) -> usize {
        let total: usize = self.columns.iter().map(|column| column.cards().len()).sum();

        if include_completed {
            return total;
        }

        let completed = self
            .get_completed_column()
            .map(|column| column.cards().len())
            .unwrap_or(0);
        total - completed
    }
}

/// Field-wise equality over the serialized fields; the derived cache is
/// excluded (it tracks session identity, which equality deliberately
/// ignores).
impl PartialEq for KanbanBoard {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.completed_column_name == other.completed_column_name
            && self.columns == other.columns
    }
}

impl Eq for KanbanBoard {}
