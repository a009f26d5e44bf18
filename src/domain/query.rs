//! Relevancy ranking shared by the column query operations.

use crate::domain::card::Card;
use std::collections::BTreeSet;

/// Ranks cards against a keyword set: cards scoring zero are dropped and
/// the rest are ordered by score, most relevant first. The sort is stable,
/// so cards with equal scores keep their original relative order.
pub fn rank_by_relevancy<'a>(cards: &'a [Card], keywords: &BTreeSet<String>) -> Vec<&'a Card> {
    let mut scored: Vec<(u32, &Card)> = cards
        .iter()
        .map(|card| (card.query_relevancy_score(keywords), card))
        .filter(|(score, _)| *score > 0)
        .collect();

    scored.sort_by(|(a, _), (b, _)| b.cmp(a));
    scored.into_iter().map(|(_, card)| card).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::CardType;

    fn keywords(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn card(title: &str, description: &str, tags: &[&str]) -> Card {
        Card::new(title, description, "", CardType::Task, keywords(tags), 1).unwrap()
    }

    #[test]
    fn test_zero_scores_are_dropped() {
        let cards = vec![card("alpha", "", &[]), card("beta", "", &[])];

        let ranked = rank_by_relevancy(&cards, &keywords(&["alpha"]));
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].title(), "alpha");
    }

    #[test]
    fn test_higher_scores_come_first() {
        let cards = vec![
            card("fix here", "", &[]),
            card("fix this", "fix description", &["fix"]),
        ];

        let ranked = rank_by_relevancy(&cards, &keywords(&["fix"]));
        assert_eq!(ranked[0].title(), "fix this");
        assert_eq!(ranked[1].title(), "fix here");
    }

    #[test]
    fn test_removing_a_keyword_never_raises_a_score() {
        let cards = vec![card("alpha beta", "beta", &["alpha"])];

        let wide = cards[0].query_relevancy_score(&keywords(&["alpha", "beta"]));
        let narrow = cards[0].query_relevancy_score(&keywords(&["beta"]));
        assert!(narrow <= wide);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let cards: Vec<Card> = Vec::new();
        assert!(rank_by_relevancy(&cards, &keywords(&["anything"])).is_empty());
    }
}
