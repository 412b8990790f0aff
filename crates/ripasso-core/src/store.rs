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

//! The persistence seam. Hosts load a [`Collection`], run the scheduler over
//! it, and save it back through a [`Store`].

use std::cell::RefCell;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::streak::record_study_session;
use crate::types::card::Card;
use crate::types::card_id::CardId;
use crate::types::date::Date;
use crate::types::study_event::StudyEvent;

/// Shortest id prefix accepted when looking a card up.
const MIN_PREFIX_LEN: usize = 4;

/// Every card a learner has saved, and the days they studied.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub cards: Vec<Card>,
    pub events: Vec<StudyEvent>,
}

impl Collection {
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id() == id)
    }

    /// Add a new card. Fails if the same word is already saved.
    pub fn insert(&mut self, card: Card) -> Fallible<()> {
        if self.get(card.id()).is_some() {
            return fail(format!("'{}' is already in the collection.", card.term()));
        }
        self.cards.push(card);
        Ok(())
    }

    /// Replace the card with the same id, keeping its position, or append it.
    pub fn upsert(&mut self, card: Card) {
        match self.cards.iter_mut().find(|c| c.id() == card.id()) {
            Some(slot) => *slot = card,
            None => self.cards.push(card),
        }
    }

    /// Look a card up by a prefix of its hex id.
    pub fn find(&self, prefix: &str) -> Fallible<&Card> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.len() < MIN_PREFIX_LEN {
            return fail(format!(
                "card id prefix must be at least {MIN_PREFIX_LEN} characters."
            ));
        }
        let mut matches = self
            .cards
            .iter()
            .filter(|card| card.id().to_hex().starts_with(&prefix));
        match (matches.next(), matches.next()) {
            (Some(card), None) => Ok(card),
            (None, _) => fail(format!("no card with id '{prefix}'.")),
            (Some(_), Some(_)) => fail(format!("card id '{prefix}' is ambiguous.")),
        }
    }

    /// Note that the learner studied on `today`.
    pub fn record_study(&mut self, today: Date) {
        self.events = record_study_session(&self.events, today);
    }
}

/// Durable storage for a collection.
///
/// `save` must never delete cards or rewrite study events that are already
/// stored: cards are upserted, events are appended if missing.
pub trait Store {
    fn load(&self) -> Fallible<Collection>;

    fn save(&self, collection: &Collection) -> Fallible<()>;
}

/// A store that lives in memory.
#[derive(Default)]
pub struct MemoryStore {
    inner: RefCell<Collection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Fallible<Collection> {
        Ok(self.inner.borrow().clone())
    }

    fn save(&self, collection: &Collection) -> Fallible<()> {
        let mut stored = self.inner.borrow_mut();
        for card in &collection.cards {
            stored.upsert(card.clone());
        }
        for event in &collection.events {
            if !stored.events.contains(event) {
                stored.events.push(*event);
            }
        }
        Ok(())
    }
}
