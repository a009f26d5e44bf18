use crate::{
    domain::BoardList,
    error::Result,
    events::{Event, EventSink, NullSink},
    storage::{json, Storage},
};
use async_trait::async_trait;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::fs;

/// File-based storage: the whole board list lives in one JSON file.
pub struct JsonFileStorage {
    path: PathBuf,
    sink: Arc<dyn EventSink>,
}

impl JsonFileStorage {
    /// Creates a storage handle for the given save file with the no-op
    /// event sink.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_sink(path, Arc::new(NullSink))
    }

    /// Creates a storage handle reporting reads and writes to the given
    /// sink. Loaded board lists inherit the same sink.
    pub fn with_sink(path: impl Into<PathBuf>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            path: path.into(),
            sink,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Storage for JsonFileStorage {
    async fn save_boards(&self, boards: &BoardList) -> Result<()> {
        self.sink.record(Event::new(format!(
            "Writing kanban boards to {}",
            self.path.display()
        )));

        let json = json::encode_board_list(boards)?;

        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        fs::write(&self.path, json).await?;
        log::debug!(
            "saved {} board(s) to {}",
            boards.len(),
            self.path.display()
        );
        Ok(())
    }

    async fn load_boards(&self) -> Result<BoardList> {
        self.sink.record(Event::new(format!(
            "Reading kanban boards from {}",
            self.path.display()
        )));

        let contents = fs::read_to_string(&self.path).await?;
        let mut boards = json::decode_board_list(&contents)?;
        boards.set_sink(self.sink.clone());

        log::debug!(
            "loaded {} board(s) from {}",
            boards.len(),
            self.path.display()
        );
        Ok(boards)
    }

    async fn is_initialized(&self) -> bool {
        self.path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Card, CardType, KanbanBoard};
    use crate::error::JanbanError;
    use crate::events::MemorySink;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn sample_list() -> BoardList {
        let mut board =
            KanbanBoard::with_default_columns("Project", "Test project", "Done").unwrap();
        let backlog_id = board.column_at(0).unwrap().id();
        board.column_mut(backlog_id).unwrap().add_card(
            Card::new("Task", "", "John Doe", CardType::Task, BTreeSet::new(), 3).unwrap(),
        );

        let mut list = BoardList::new();
        list.add_board(board);
        list
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path().join("boards.json"));

        assert!(!storage.is_initialized().await);

        let list = sample_list();
        storage.save_boards(&list).await.unwrap();

        assert!(storage.is_initialized().await);

        let loaded = storage.load_boards().await.unwrap();
        assert_eq!(loaded, list);

        let board = loaded.get_board(0).unwrap();
        assert_eq!(board.get_completed_column().unwrap().name(), "Done");
    }

    #[tokio::test]
    async fn test_save_creates_missing_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("data").join("saves").join("boards.json");
        let storage = JsonFileStorage::new(&nested);

        storage.save_boards(&BoardList::new()).await.unwrap();
        assert!(nested.exists());
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path().join("missing.json"));

        let result = storage.load_boards().await;
        assert!(matches!(result, Err(JanbanError::Io(_))));
    }

    #[tokio::test]
    async fn test_load_invalid_save_is_corrupted_data() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("boards.json");

        let invalid = r#"{
            "boards": [{
                "name": "B", "description": "", "completedColumnName": "Done",
                "columns": [{
                    "name": "Backlog",
                    "cards": [{
                        "title": "Bad", "description": "", "assignee": "",
                        "type": "TASK", "tags": [], "storyPoints": -1
                    }]
                }]
            }]
        }"#;
        tokio::fs::write(&path, invalid).await.unwrap();

        let storage = JsonFileStorage::new(&path);
        let result = storage.load_boards().await;
        assert!(matches!(result, Err(JanbanError::CorruptedData(_))));
    }

    #[tokio::test]
    async fn test_reads_and_writes_are_recorded_on_the_sink() {
        let temp_dir = TempDir::new().unwrap();
        let sink = Arc::new(MemorySink::new());
        let storage =
            JsonFileStorage::with_sink(temp_dir.path().join("boards.json"), sink.clone());

        storage.save_boards(&BoardList::new()).await.unwrap();
        storage.load_boards().await.unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(events[0].description().starts_with("Writing kanban boards to"));
        assert!(events[1].description().starts_with("Reading kanban boards from"));
    }
}
