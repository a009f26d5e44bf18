use crate::domain::column::ColumnId;
use crate::error::{JanbanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// Session-scoped identity token for a card.
///
/// Cards carry no durable key in the save format; identity only matters
/// while a model is live, so a fresh token is minted per construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId(Uuid);

impl CardId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Kind of work a card tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    UserStory,
    Task,
    Issue,
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserStory => write!(f, "User Story"),
            Self::Task => write!(f, "Task"),
            Self::Issue => write!(f, "Issue"),
        }
    }
}

/// The most basic unit of organization within a kanban board: one tracked
/// goal or task, together with its search metadata.
///
/// A card is created detached. Its back-reference to the owning column is
/// written exclusively by [`Column`](crate::domain::column::Column) mutation
/// operations; callers never set it directly.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(skip)]
    id: CardId,
    title: String,
    description: String,
    assignee: String,
    #[serde(rename = "type")]
    card_type: CardType,
    tags: BTreeSet<String>,
    story_points: i32,
    #[serde(skip)]
    containing_column: Option<ColumnId>,
}

impl Card {
    /// Substituted for a blank title instead of rejecting the card.
    pub const DEFAULT_TITLE: &'static str = "Untitled Card";

    /// Creates a detached card. A blank title is silently replaced by
    /// [`Card::DEFAULT_TITLE`]; negative story points are rejected.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        assignee: impl Into<String>,
        card_type: CardType,
        tags: BTreeSet<String>,
        story_points: i32,
    ) -> Result<Self> {
        if story_points < 0 {
            return Err(JanbanError::InvalidStoryPoints(story_points));
        }

        Ok(Self {
            id: CardId::generate(),
            title: Self::title_or_default(title.into()),
            description: description.into(),
            assignee: assignee.into(),
            card_type,
            tags: normalize_tags(tags),
            story_points,
            containing_column: None,
        })
    }

    fn title_or_default(title: String) -> String {
        if title.trim().is_empty() {
            Self::DEFAULT_TITLE.to_string()
        } else {
            title
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sets the title, falling back to [`Card::DEFAULT_TITLE`] when blank.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Self::title_or_default(title.into());
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn assignee(&self) -> &str {
        &self.assignee
    }

    pub fn set_assignee(&mut self, assignee: impl Into<String>) {
        self.assignee = assignee.into();
    }

    pub fn card_type(&self) -> CardType {
        self.card_type
    }

    pub fn set_card_type(&mut self, card_type: CardType) {
        self.card_type = card_type;
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Replaces the tag set. Tags are lowercase-normalized so that exact
    /// matches against lowercased query keywords work.
    pub fn set_tags(&mut self, tags: BTreeSet<String>) {
        self.tags = normalize_tags(tags);
    }

    pub fn story_points(&self) -> i32 {
        self.story_points
    }

    /// Sets the story point estimate. A negative value is rejected and the
    /// prior estimate is retained.
    pub fn set_story_points(&mut self, story_points: i32) -> Result<()> {
        if story_points < 0 {
            return Err(JanbanError::InvalidStoryPoints(story_points));
        }

        self.story_points = story_points;
        Ok(())
    }

    /// The column currently holding this card, if any.
    pub fn containing_column(&self) -> Option<ColumnId> {
        self.containing_column
    }

    pub(crate) fn set_containing_column(&mut self, column: Option<ColumnId>) {
        self.containing_column = column;
    }

    /// Scores how relevant this card is to a query: for each keyword, +1
    /// when it is a case-insensitive substring of the title, +1 for the
    /// description, and +1 when it is an exact (lowercased) tag. Zero means
    /// not relevant at all.
    pub fn query_relevancy_score(&self, keywords: &BTreeSet<String>) -> u32 {
        let mut score = 0;

        let normalized_title = self.title.to_lowercase();
        let normalized_description = self.description.to_lowercase();

        for keyword in keywords {
            let normalized_keyword = keyword.to_lowercase();

            if normalized_title.contains(&normalized_keyword) {
                score += 1;
            }

            if normalized_description.contains(&normalized_keyword) {
                score += 1;
            }

            if self.tags.contains(&normalized_keyword) {
                score += 1;
            }
        }

        score
    }
}

/// Field-wise equality over the serialized fields; identity tokens and the
/// column back-reference are deliberately excluded so that a round-tripped
/// card compares equal to its original.
impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.description == other.description
            && self.assignee == other.assignee
            && self.card_type == other.card_type
            && self.tags == other.tags
            && self.story_points == other.story_points
    }
}

impl Eq for Card {}

fn normalize_tags(tags: BTreeSet<String>) -> BTreeSet<String> {
    tags.into_iter().map(|tag| tag.to_lowercase()).collect()
}
