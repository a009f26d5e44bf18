pub mod board;
pub mod board_list;
pub mod card;
pub mod column;
pub mod query;

pub use board::KanbanBoard;
pub use board_list::BoardList;
pub use card::{Card, CardId, CardType};
pub use column::{Column, ColumnId};
