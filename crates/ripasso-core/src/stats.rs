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

use std::collections::BTreeMap;

use serde::Serialize;

use crate::intervals::IntervalTable;
use crate::streak::compute_streak;
use crate::types::card::Card;
use crate::types::card::Level;
use crate::types::date::Date;
use crate::types::study_event::StudyEvent;

/// Length of the weekly goal window, today included.
const WEEK_DAYS: i64 = 7;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_count: usize,
    pub new_count: usize,
    pub due_today_count: usize,
    pub due_tomorrow_count: usize,
    pub learning_count: usize,
    pub mastered_count: usize,
    /// Number of cards at each level.
    pub levels: BTreeMap<Level, usize>,
    pub added_this_week: usize,
    pub weekly_goal: Option<usize>,
    pub streak: u32,
}

impl Stats {
    /// Whether the weekly goal has been met. `None` when there is no goal.
    pub fn weekly_goal_met(&self) -> Option<bool> {
        self.weekly_goal.map(|goal| self.added_this_week >= goal)
    }
}

pub fn collection_stats(
    cards: &[Card],
    events: &[StudyEvent],
    intervals: &IntervalTable,
    today: Date,
    weekly_goal: Option<usize>,
) -> Stats {
    let tomorrow = today.next();
    let week_start = today.add_days(1 - WEEK_DAYS);
    let mut levels: BTreeMap<Level, usize> = BTreeMap::new();
    for card in cards {
        *levels.entry(card.proficiency_level()).or_default() += 1;
    }
    let count = |pred: &dyn Fn(&Card) -> bool| cards.iter().filter(|c| pred(c)).count();
    Stats {
        total_count: cards.len(),
        new_count: count(&|c| c.is_new()),
        due_today_count: count(&|c| c.is_due(today)),
        due_tomorrow_count: count(&|c| c.is_due(tomorrow) && !c.is_due(today)),
        learning_count: count(&|c| !c.is_new() && !intervals.is_mastered(c.proficiency_level())),
        mastered_count: count(&|c| intervals.is_mastered(c.proficiency_level())),
        levels,
        added_this_week: count(&|c| {
            let created = c.created_at().date();
            week_start <= created && created <= today
        }),
        weekly_goal,
        streak: compute_streak(events, today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::card::fixtures::card;
    use crate::types::card::fixtures::day;

    #[test]
    fn test_counts() {
        let today = day("2024-05-10");
        let cards = vec![
            card("a", 0, "2024-05-10", "2024-05-10T09:00:00.000"),
            card("b", 0, "2024-05-03", "2024-05-03T09:00:00.000"),
            card("c", 1, "2024-05-10", "2024-05-04T09:00:00.000"),
            card("d", 2, "2024-05-11", "2024-04-01T09:00:00.000"),
            card("e", 6, "2024-06-01", "2024-01-01T09:00:00.000"),
            card("f", 3, "2024-05-02", "2024-01-01T09:00:00.000"),
        ];
        let events = vec![StudyEvent::new(day("2024-05-09"))];
        let stats = collection_stats(
            &cards,
            &events,
            &IntervalTable::default(),
            today,
            Some(3),
        );
        assert_eq!(stats.total_count, 6);
        assert_eq!(stats.new_count, 2);
        assert_eq!(stats.due_today_count, 2);
        assert_eq!(stats.due_tomorrow_count, 1);
        assert_eq!(stats.learning_count, 3);
        assert_eq!(stats.mastered_count, 1);
        assert_eq!(stats.levels.get(&0), Some(&2));
        assert_eq!(stats.levels.get(&6), Some(&1));
        // The window opens on 2024-05-04, so "b" just misses it.
        assert_eq!(stats.added_this_week, 2);
        assert_eq!(stats.weekly_goal_met(), Some(false));
        assert_eq!(stats.streak, 1);
    }

    #[test]
    fn test_empty_collection() {
        let stats = collection_stats(&[], &[], &IntervalTable::default(), day("2024-05-10"), None);
        assert_eq!(stats.total_count, 0);
        assert!(stats.levels.is_empty());
        assert_eq!(stats.weekly_goal_met(), None);
        assert_eq!(stats.streak, 0);
    }
}
