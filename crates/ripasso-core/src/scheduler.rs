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

use crate::intervals::IntervalTable;
use crate::types::card::Card;
use crate::types::card::Level;
use crate::types::date::Date;

/// Level a learned card drops to when it is forgotten.
const RESET_LEVEL: Level = 1;

/// Days until a forgotten card is tested again.
const RELEARN_INTERVAL: i64 = 1;

/// Apply one grading to a card and return the updated card.
///
/// - Remembered: the level goes up by one and the card waits the interval
///   for its old level.
/// - Forgotten while new: nothing changes, the card stays in the new pool.
/// - Forgotten after being learned: back to level one, due tomorrow, however
///   high the level was.
pub fn review_card(card: &Card, remembered: bool, today: Date, intervals: &IntervalTable) -> Card {
    let level: Level = card.proficiency_level();
    let mut next: Card = card.clone();
    if remembered {
        let interval = intervals.interval_for(level);
        next.set_schedule(level.saturating_add(1), today.add_days(interval as i64));
    } else if level > 0 {
        next.set_schedule(RESET_LEVEL, today.add_days(RELEARN_INTERVAL));
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::card::fixtures::card;
    use crate::types::card::fixtures::day;

    const CREATED: &str = "2024-01-01T08:00:00.000";

    #[test]
    fn test_remembered_level_two() {
        let table = IntervalTable::default();
        let before = card("la pazienza", 2, "2024-02-01", CREATED);
        let after = review_card(&before, true, day("2024-02-01"), &table);
        assert_eq!(after.proficiency_level(), 3);
        assert_eq!(after.next_review_due_at(), day("2024-02-08"));
    }

    #[test]
    fn test_remembered_walks_the_table() {
        let table = IntervalTable::default();
        let today = day("2024-03-01");
        let expected = [1, 3, 7, 14, 30, 30, 30];
        for (level, days) in expected.iter().enumerate() {
            let before = card("andare", level as Level, "2024-03-01", CREATED);
            let after = review_card(&before, true, today, &table);
            assert_eq!(after.proficiency_level(), level as Level + 1);
            assert_eq!(after.next_review_due_at(), today.add_days(*days));
            assert!(after.next_review_due_at() > today);
        }
    }

    #[test]
    fn test_new_card_forgotten_is_unchanged() {
        let table = IntervalTable::default();
        let before = card("sbrigarsi", 0, "2024-01-01", CREATED);
        let after = review_card(&before, false, day("2024-01-20"), &table);
        assert_eq!(after, before);
    }

    #[test]
    fn test_forgotten_resets_to_level_one() {
        let table = IntervalTable::default();
        let today = day("2024-04-10");
        for level in [1, 2, 5, 9] {
            let before = card("il cassetto", level, "2024-04-10", CREATED);
            let after = review_card(&before, false, today, &table);
            assert_eq!(after.proficiency_level(), 1);
            assert_eq!(after.next_review_due_at(), day("2024-04-11"));
        }
    }

    #[test]
    fn test_only_schedule_changes() {
        let table = IntervalTable::default();
        let before = card("la nebbia", 3, "2024-04-10", CREATED);
        let after = review_card(&before, true, day("2024-04-12"), &table);
        assert_eq!(after.id(), before.id());
        assert_eq!(after.term(), before.term());
        assert_eq!(after.created_at(), before.created_at());
    }

    #[test]
    fn test_custom_table() {
        let table = IntervalTable::new(vec![2, 5]).unwrap();
        let today = day("2024-01-01");
        let after = review_card(&card("x", 0, "2024-01-01", CREATED), true, today, &table);
        assert_eq!(after.next_review_due_at(), day("2024-01-03"));
        let after = review_card(&card("x", 7, "2024-01-01", CREATED), true, today, &table);
        assert_eq!(after.next_review_due_at(), day("2024-01-06"));
    }
}
