//! Wire mapping between the save format and the domain model.
//!
//! Writing is a plain serialization of the domain types. Reading goes the
//! long way round on purpose: saved records are rebuilt through the domain
//! constructors and mutation operations, so card back-references and the
//! board's completed-column cache re-establish themselves, and any record
//! that violates a model invariant surfaces as `CorruptedData`.

use crate::domain::{BoardList, Card, CardType, Column, KanbanBoard};
use crate::error::{JanbanError, Result};
use serde::Deserialize;
use std::collections::BTreeSet;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoardListRecord {
    boards: Vec<BoardRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoardRecord {
    name: String,
    description: String,
    completed_column_name: String,
    columns: Vec<ColumnRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ColumnRecord {
    name: String,
    cards: Vec<CardRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardRecord {
    title: String,
    description: String,
    assignee: String,
    #[serde(rename = "type")]
    card_type: CardType,
    tags: Vec<String>,
    story_points: i32,
}

/// Renders a board list as pretty-printed JSON.
pub fn encode_board_list(boards: &BoardList) -> Result<String> {
    Ok(serde_json::to_string_pretty(boards)?)
}

/// Parses a board list from JSON, rebuilding it through the domain API.
///
/// Malformed JSON surfaces as `Serialization`; records that parse but
/// violate a model invariant surface as `CorruptedData`.
pub fn decode_board_list(json: &str) -> Result<BoardList> {
    let record: BoardListRecord = serde_json::from_str(json)?;

    let mut boards = BoardList::new();
    for board_record in record.boards {
        boards.add_board(decode_board(board_record)?);
    }

    Ok(boards)
}

fn decode_board(record: BoardRecord) -> Result<KanbanBoard> {
    let mut board = KanbanBoard::new(
        record.name,
        record.description,
        record.completed_column_name,
    );

    for column_record in record.columns {
        let column = decode_column(column_record)?;
        board.add_column(column).map_err(JanbanError::corrupted)?;
    }

    Ok(board)
}

fn decode_column(record: ColumnRecord) -> Result<Column> {
    let mut column = Column::new(record.name).map_err(JanbanError::corrupted)?;

    for card_record in record.cards {
        column.add_card(decode_card(card_record)?);
    }

    Ok(column)
}

fn decode_card(record: CardRecord) -> Result<Card> {
    let tags: BTreeSet<String> = record.tags.into_iter().collect();

    Card::new(
        record.title,
        record.description,
        record.assignee,
        record.card_type,
        tags,
        record.story_points,
    )
    .map_err(JanbanError::corrupted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn sample_list() -> BoardList {
        let mut board = KanbanBoard::with_default_columns(
            "Website Redesign",
            "Everything front-end",
            "Done",
        )
        .unwrap();

        let backlog_id = board.column_at(0).unwrap().id();
        board.column_mut(backlog_id).unwrap().add_card(
            Card::new(
                "Center a div on the UI",
                "This div needs to be centered",
                "John Doe",
                CardType::Issue,
                tags(&["fix", "ui", "urgent", "div", "center"]),
                8,
            )
            .unwrap(),
        );

        let done_id = board.get_completed_column().unwrap().id();
        board.column_mut(done_id).unwrap().add_card(
            Card::new(
                "Ship the login page",
                "",
                "Jane Doe",
                CardType::UserStory,
                tags(&["auth"]),
                5,
            )
            .unwrap(),
        );

        let mut list = BoardList::new();
        list.add_board(board);
        list
    }

    #[test]
    fn test_round_trip_preserves_field_wise_equality() {
        let original = sample_list();

        let json = encode_board_list(&original).unwrap();
        let decoded = decode_board_list(&json).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn test_round_trip_reestablishes_completed_column_cache() {
        let json = encode_board_list(&sample_list()).unwrap();
        let decoded = decode_board_list(&json).unwrap();

        let board = decoded.get_board(0).unwrap();
        let completed = board.get_completed_column().unwrap();
        assert_eq!(completed.name(), "Done");
        assert_eq!(board.completed_story_points(), 5);
    }

    #[test]
    fn test_round_trip_reestablishes_card_back_references() {
        let json = encode_board_list(&sample_list()).unwrap();
        let decoded = decode_board_list(&json).unwrap();

        let board = decoded.get_board(0).unwrap();
        for column in board.columns() {
            for card in column.cards() {
                assert_eq!(card.containing_column(), Some(column.id()));
            }
        }
    }

    #[test]
    fn test_encoded_json_uses_contract_field_names() {
        let json = encode_board_list(&sample_list()).unwrap();

        assert!(json.contains("\"boards\""));
        assert!(json.contains("\"completedColumnName\""));
        assert!(json.contains("\"storyPoints\""));
        assert!(json.contains("\"type\": \"ISSUE\""));
    }

    #[test]
    fn test_negative_story_points_surface_as_corrupted_data() {
        let json = r#"{
            "boards": [{
                "name": "B", "description": "", "completedColumnName": "Done",
                "columns": [{
                    "name": "Backlog",
                    "cards": [{
                        "title": "Bad", "description": "", "assignee": "",
                        "type": "TASK", "tags": [], "storyPoints": -3
                    }]
                }]
            }]
        }"#;

        let result = decode_board_list(json);
        assert!(matches!(result, Err(JanbanError::CorruptedData(_))));
    }

    #[test]
    fn test_duplicate_column_names_surface_as_corrupted_data() {
        let json = r#"{
            "boards": [{
                "name": "B", "description": "", "completedColumnName": "Done",
                "columns": [
                    {"name": "Backlog", "cards": []},
                    {"name": "Backlog", "cards": []}
                ]
            }]
        }"#;

        let result = decode_board_list(json);
        assert!(matches!(result, Err(JanbanError::CorruptedData(_))));
    }

    #[test]
    fn test_malformed_json_surfaces_as_serialization_error() {
        let result = decode_board_list("{ not json");
        assert!(matches!(result, Err(JanbanError::Serialization(_))));
    }

    #[test]
    fn test_empty_list_round_trips() {
        let json = encode_board_list(&BoardList::new()).unwrap();
        let decoded = decode_board_list(&json).unwrap();
        assert!(decoded.is_empty());
    }
}
