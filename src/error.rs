use thiserror::Error;

pub type Result<T> = std::result::Result<T, JanbanError>;

#[derive(Debug, Error)]
pub enum JanbanError {
    #[error("Story points must be non-negative, got {0}")]
    InvalidStoryPoints(i32),

    #[error("Invalid column name: {0}")]
    InvalidColumnName(String),

    #[error("Column with name '{0}' already exists")]
    DuplicateColumnName(String),

    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Corrupted save data: {0}")]
    CorruptedData(#[source] Box<JanbanError>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl JanbanError {
    /// Wraps a validation error raised while rebuilding a saved model,
    /// marking the save data itself as the culprit.
    pub fn corrupted(source: JanbanError) -> Self {
        Self::CorruptedData(Box::new(source))
    }
}
