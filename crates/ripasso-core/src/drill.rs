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

use std::collections::HashSet;
use std::collections::VecDeque;

use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::intervals::IntervalTable;
use crate::scheduler::review_card;
use crate::session::SessionPlan;
use crate::types::card::Card;
use crate::types::card_id::CardId;
use crate::types::date::Date;

/// Walks through the cards of a session one at a time.
///
/// Due reviews come first, then new cards. A forgotten card goes to the back
/// of the queue once, so it is seen again before the session ends.
pub struct Drill {
    queue: VecDeque<Card>,
    requeued: HashSet<CardId>,
    total: usize,
    remembered: usize,
    forgotten: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillSummary {
    pub reviewed: usize,
    pub remembered: usize,
    pub forgotten: usize,
}

impl Drill {
    pub fn new(plan: SessionPlan) -> Self {
        let (new_cards, review_cards) = plan.into_parts();
        let queue: VecDeque<Card> = review_cards.into_iter().chain(new_cards).collect();
        Self {
            total: queue.len(),
            queue,
            requeued: HashSet::new(),
            remembered: 0,
            forgotten: 0,
        }
    }

    /// The card to show next.
    pub fn current(&self) -> Option<&Card> {
        self.queue.front()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Number of distinct cards the session started with.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    /// Grade the current card. Returns the rescheduled card, which the
    /// caller should persist.
    pub fn grade(
        &mut self,
        remembered: bool,
        today: Date,
        intervals: &IntervalTable,
    ) -> Fallible<Card> {
        let Some(card) = self.queue.pop_front() else {
            return fail("no cards left in this session.");
        };
        let updated: Card = review_card(&card, remembered, today, intervals);
        if remembered {
            self.remembered += 1;
        } else {
            self.forgotten += 1;
            if self.requeued.insert(updated.id()) {
                self.queue.push_back(updated.clone());
            }
        }
        Ok(updated)
    }

    pub fn summary(&self) -> DrillSummary {
        DrillSummary {
            reviewed: self.remembered + self.forgotten,
            remembered: self.remembered,
            forgotten: self.forgotten,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ItemCount;
    use crate::session::SessionMode;
    use crate::session::compose_session;
    use crate::types::card::fixtures::card;
    use crate::types::card::fixtures::day;

    const TODAY: &str = "2024-05-10";

    fn plan() -> SessionPlan {
        let cards = vec![
            card("nuova", 0, "2024-05-01", "2024-05-01T00:00:00.000"),
            card("vecchia", 2, TODAY, "2024-01-01T00:00:00.000"),
        ];
        let mode = SessionMode::Standard {
            new_items: ItemCount::All,
            review_items: ItemCount::All,
        };
        compose_session(&cards, &mode, day(TODAY)).unwrap()
    }

    #[test]
    fn test_reviews_come_first() {
        let drill = Drill::new(plan());
        assert_eq!(drill.total(), 2);
        assert_eq!(drill.current().map(|c| c.term()), Some("vecchia"));
    }

    #[test]
    fn test_all_remembered() -> Fallible<()> {
        let table = IntervalTable::default();
        let mut drill = Drill::new(plan());
        let first = drill.grade(true, day(TODAY), &table)?;
        assert_eq!(first.proficiency_level(), 3);
        assert_eq!(first.next_review_due_at(), day("2024-05-17"));
        let second = drill.grade(true, day(TODAY), &table)?;
        assert_eq!(second.term(), "nuova");
        assert_eq!(second.proficiency_level(), 1);
        assert!(drill.is_finished());
        assert_eq!(
            drill.summary(),
            DrillSummary {
                reviewed: 2,
                remembered: 2,
                forgotten: 0
            }
        );
        assert!(drill.grade(true, day(TODAY), &table).is_err());
        Ok(())
    }

    #[test]
    fn test_forgotten_card_comes_back_once() -> Fallible<()> {
        let table = IntervalTable::default();
        let mut drill = Drill::new(plan());
        let forgot = drill.grade(false, day(TODAY), &table)?;
        assert_eq!(forgot.proficiency_level(), 1);
        assert_eq!(drill.remaining(), 2);
        drill.grade(true, day(TODAY), &table)?;
        // The forgotten card is back, carrying its reset schedule.
        let again = drill.current().cloned().unwrap();
        assert_eq!(again.term(), "vecchia");
        assert_eq!(again.proficiency_level(), 1);
        drill.grade(false, day(TODAY), &table)?;
        assert!(drill.is_finished());
        assert_eq!(drill.summary().reviewed, 3);
        assert_eq!(drill.summary().forgotten, 2);
        Ok(())
    }
}
