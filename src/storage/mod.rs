use crate::{domain::BoardList, error::Result};
use async_trait::async_trait;

pub mod file_storage;
pub mod json;

pub use file_storage::JsonFileStorage;

/// Storage trait for persisting the board list.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Saves the full board list, replacing any previous save.
    async fn save_boards(&self, boards: &BoardList) -> Result<()>;

    /// Loads the board list from the save location.
    async fn load_boards(&self) -> Result<BoardList>;

    /// Checks whether a save exists at the storage location.
    async fn is_initialized(&self) -> bool;
}
