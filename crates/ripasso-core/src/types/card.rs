// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::card_id::CardId;
use crate::types::date::Date;
use crate::types::timestamp::Timestamp;

/// How many times in a row a card has been remembered. Zero means new.
pub type Level = u32;

/// A saved word or collocation and its study metadata.
///
/// The schedule fields are only changed through [`crate::scheduler::review_card`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    id: CardId,
    term: String,
    meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    context: Option<String>,
    proficiency_level: Level,
    next_review_due_at: Date,
    created_at: Timestamp,
}

impl Card {
    /// Create a new card. It starts at level zero, due on the day it was
    /// created.
    pub fn new(term: &str, meaning: &str, created_at: Timestamp) -> Fallible<Self> {
        let term = term.trim();
        let meaning = meaning.trim();
        if term.is_empty() {
            return fail("card term is empty.");
        }
        if meaning.is_empty() {
            return fail("card meaning is empty.");
        }
        Ok(Self {
            id: CardId::for_entry(term, meaning),
            term: term.to_string(),
            meaning: meaning.to_string(),
            context: None,
            proficiency_level: 0,
            next_review_due_at: created_at.date(),
            created_at,
        })
    }

    /// Attach an example sentence.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context: String = context.into();
        let context = context.trim();
        self.context = if context.is_empty() {
            None
        } else {
            Some(context.to_string())
        };
        self
    }

    /// Rebuild a card from persisted fields.
    pub fn restore(
        id: CardId,
        term: String,
        meaning: String,
        context: Option<String>,
        proficiency_level: Level,
        next_review_due_at: Date,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            term,
            meaning,
            context,
            proficiency_level,
            next_review_due_at,
            created_at,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn meaning(&self) -> &str {
        &self.meaning
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn proficiency_level(&self) -> Level {
        self.proficiency_level
    }

    pub fn next_review_due_at(&self) -> Date {
        self.next_review_due_at
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn is_new(&self) -> bool {
        self.proficiency_level == 0
    }

    /// A card that has been learned and whose review day has come.
    pub fn is_due(&self, today: Date) -> bool {
        !self.is_new() && self.next_review_due_at <= today
    }

    pub(crate) fn set_schedule(&mut self, level: Level, due: Date) {
        self.proficiency_level = level;
        self.next_review_due_at = due;
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_new_card_is_due_on_creation_day() -> Fallible<()> {
        let card = Card::new(" in bocca al lupo ", "good luck", ts("2024-05-01T18:45:00.000"))?;
        assert_eq!(card.term(), "in bocca al lupo");
        assert_eq!(card.proficiency_level(), 0);
        assert!(card.is_new());
        assert_eq!(card.next_review_due_at(), day("2024-05-01"));
        assert_eq!(card.id(), CardId::for_entry("in bocca al lupo", "good luck"));
        Ok(())
    }

    #[test]
    fn test_new_card_rejects_blank_fields() {
        let at = ts("2024-05-01T00:00:00.000");
        assert!(Card::new("  ", "x", at).is_err());
        assert!(Card::new("x", "", at).is_err());
    }

    #[test]
    fn test_context() -> Fallible<()> {
        let at = ts("2024-05-01T00:00:00.000");
        let card = Card::new("magari", "if only", at)?.with_context("Magari fosse vero!");
        assert_eq!(card.context(), Some("Magari fosse vero!"));
        let card = card.with_context("   ");
        assert_eq!(card.context(), None);
        Ok(())
    }

    #[test]
    fn test_new_cards_are_never_due_reviews() {
        let card = card("ciao", 0, "2024-01-01", "2024-01-01T00:00:00.000");
        assert!(!card.is_due(day("2024-06-01")));
    }

    #[test]
    fn test_due_boundary() {
        let card = card("ciao", 2, "2024-01-10", "2024-01-01T00:00:00.000");
        assert!(!card.is_due(day("2024-01-09")));
        assert!(card.is_due(day("2024-01-10")));
        assert!(card.is_due(day("2024-01-11")));
    }

    #[test]
    fn test_json_shape() -> Fallible<()> {
        let card = card("ciao", 1, "2024-01-02", "2024-01-01T09:00:00.000");
        let json = serde_json::to_value(&card)?;
        assert_eq!(json["term"], "ciao");
        assert_eq!(json["proficiencyLevel"], 1);
        assert_eq!(json["nextReviewDueAt"], "2024-01-02");
        assert_eq!(json["createdAt"], "2024-01-01T09:00:00.000");
        assert!(json.get("context").is_none());
        let back: Card = serde_json::from_value(json)?;
        assert_eq!(back, card);
        Ok(())
    }
}
