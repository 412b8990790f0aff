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

use std::collections::BTreeSet;

use crate::types::date::Date;
use crate::types::study_event::StudyEvent;

/// Count the consecutive study days ending at the most recent one.
///
/// The streak survives one missed day: if the last study day was yesterday
/// the count is still reported. Events dated after `today` are ignored.
pub fn compute_streak(events: &[StudyEvent], today: Date) -> u32 {
    let days: BTreeSet<Date> = events
        .iter()
        .map(|event| event.day())
        .filter(|day| *day <= today)
        .collect();
    let mut days = days.into_iter().rev();
    let Some(last_day) = days.next() else {
        return 0;
    };
    if last_day < today.previous() {
        return 0;
    }
    let mut streak = 1;
    let mut expected = last_day.previous();
    for day in days {
        if day != expected {
            break;
        }
        streak += 1;
        expected = expected.previous();
    }
    streak
}

/// Record that the user studied today. Appends at most one event per day.
pub fn record_study_session(events: &[StudyEvent], today: Date) -> Vec<StudyEvent> {
    let mut events: Vec<StudyEvent> = events.to_vec();
    if !events.iter().any(|event| event.day() == today) {
        events.push(StudyEvent::new(today));
    }
    events
}
