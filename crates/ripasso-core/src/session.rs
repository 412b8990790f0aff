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

use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::date::Date;

/// Most new cards an intelligent session will add.
const INTELLIGENT_MAX_NEW: usize = 5;

/// An intelligent session adds one new card per this many due reviews.
const INTELLIGENT_REVIEWS_PER_NEW: usize = 3;

/// Size of a weak points session.
const WEAK_POINTS_SIZE: usize = 10;

/// How many cards of a kind to take: a positive number, or all of them.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "CountRepr", into = "CountRepr")]
pub enum ItemCount {
    All,
    Limit(usize),
}

impl ItemCount {
    fn take<T>(self, items: Vec<T>) -> Vec<T> {
        match self {
            ItemCount::All => items,
            ItemCount::Limit(n) => items.into_iter().take(n).collect(),
        }
    }
}

impl Display for ItemCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemCount::All => write!(f, "all"),
            ItemCount::Limit(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for ItemCount {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(ItemCount::All);
        }
        match s.parse::<usize>() {
            Ok(0) | Err(_) => fail(format!(
                "invalid item count: '{s}' (expected a positive number or 'all')"
            )),
            Ok(n) => Ok(ItemCount::Limit(n)),
        }
    }
}

/// Item counts are written either as a bare number or as the word "all".
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CountRepr {
    Number(usize),
    Word(String),
}

impl TryFrom<CountRepr> for ItemCount {
    type Error = ErrorReport;

    fn try_from(value: CountRepr) -> Result<Self, Self::Error> {
        match value {
            CountRepr::Number(n) => n.to_string().parse(),
            CountRepr::Word(word) => word.parse(),
        }
    }
}

impl From<ItemCount> for CountRepr {
    fn from(count: ItemCount) -> Self {
        match count {
            ItemCount::All => CountRepr::Word("all".to_string()),
            ItemCount::Limit(n) => CountRepr::Number(n),
        }
    }
}

/// How to pick the cards of a session.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SessionMode {
    /// Fixed numbers of new cards and due reviews.
    #[serde(rename_all = "camelCase")]
    Standard {
        new_items: ItemCount,
        review_items: ItemCount,
    },
    /// Every due review, plus new cards in proportion to the review load.
    Intelligent,
    /// The lowest-level learned cards, due or not.
    WeakPoints,
}

impl SessionMode {
    pub fn kind(&self) -> SessionKind {
        match self {
            SessionMode::Standard { .. } => SessionKind::Standard,
            SessionMode::Intelligent => SessionKind::Intelligent,
            SessionMode::WeakPoints => SessionKind::WeakPoints,
        }
    }
}

/// The mode a plan was built with, without its parameters.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Standard,
    Intelligent,
    WeakPoints,
}

impl Display for SessionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionKind::Standard => write!(f, "standard"),
            SessionKind::Intelligent => write!(f, "intelligent"),
            SessionKind::WeakPoints => write!(f, "weak_points"),
        }
    }
}

/// The cards chosen for one study session. Never empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPlan {
    #[serde(rename = "mode")]
    kind: SessionKind,
    new_cards: Vec<Card>,
    review_cards: Vec<Card>,
}

impl SessionPlan {
    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn new_cards(&self) -> &[Card] {
        &self.new_cards
    }

    pub fn review_cards(&self) -> &[Card] {
        &self.review_cards
    }

    pub fn into_parts(self) -> (Vec<Card>, Vec<Card>) {
        (self.new_cards, self.review_cards)
    }
}

/// Choose the cards for a study session.
///
/// Returns `None` when there is nothing to study, in which case no session
/// should be started.
pub fn compose_session(cards: &[Card], mode: &SessionMode, today: Date) -> Option<SessionPlan> {
    let mut new_cards: Vec<&Card> = cards.iter().filter(|card| card.is_new()).collect();
    new_cards.sort_by_key(|card| card.created_at());
    let due_cards: Vec<&Card> = cards.iter().filter(|card| card.is_due(today)).collect();

    let (new_cards, review_cards): (Vec<&Card>, Vec<&Card>) = match mode {
        SessionMode::Standard {
            new_items,
            review_items,
        } => (new_items.take(new_cards), review_items.take(due_cards)),
        SessionMode::Intelligent => {
            let count = intelligent_new_count(due_cards.len(), new_cards.len());
            let new_cards = new_cards.into_iter().take(count).collect();
            (new_cards, due_cards)
        }
        SessionMode::WeakPoints => {
            let mut learned: Vec<&Card> = cards.iter().filter(|card| !card.is_new()).collect();
            // Stable, so equal levels keep collection order.
            learned.sort_by_key(|card| card.proficiency_level());
            learned.truncate(WEAK_POINTS_SIZE);
            (Vec::new(), learned)
        }
    };

    if new_cards.is_empty() && review_cards.is_empty() {
        return None;
    }
    Some(SessionPlan {
        kind: mode.kind(),
        new_cards: new_cards.into_iter().cloned().collect(),
        review_cards: review_cards.into_iter().cloned().collect(),
    })
}

/// About one new card per three due reviews, at least one and at most five,
/// and never more than exist.
fn intelligent_new_count(due: usize, available: usize) -> usize {
    let scaled = (due / INTELLIGENT_REVIEWS_PER_NEW).max(1);
    scaled.min(INTELLIGENT_MAX_NEW).min(available)
}
