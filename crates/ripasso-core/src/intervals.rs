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

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Level;

/// The default review intervals in days.
pub const DEFAULT_INTERVALS: [u32; 5] = [1, 3, 7, 14, 30];

/// Longest interval accepted, about a century.
pub const MAX_INTERVAL_DAYS: u32 = 36500;

/// Fixed day-intervals indexed by proficiency level.
///
/// A card remembered at level `n` waits `intervals[n]` days. Levels past the
/// end of the table reuse the last entry, so intervals never shrink.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct IntervalTable {
    days: Vec<u32>,
}

impl IntervalTable {
    /// Fails if the table is empty, or any interval is zero or longer than
    /// [`MAX_INTERVAL_DAYS`].
    pub fn new(days: Vec<u32>) -> Fallible<Self> {
        if days.is_empty() {
            return fail("interval table is empty.");
        }
        if let Some(pos) = days.iter().position(|d| *d == 0) {
            return fail(format!("interval at position {pos} is zero."));
        }
        if let Some(pos) = days.iter().position(|d| *d > MAX_INTERVAL_DAYS) {
            return fail(format!(
                "interval at position {pos} is longer than {MAX_INTERVAL_DAYS} days."
            ));
        }
        Ok(Self { days })
    }

    /// The interval in days for a card remembered at `level`.
    pub fn interval_for(&self, level: Level) -> u32 {
        let last = self.days.len() - 1;
        let index = (level as usize).min(last);
        self.days[index]
    }

    /// A card is mastered once its level is past the end of the table.
    pub fn is_mastered(&self, level: Level) -> bool {
        level as usize > self.days.len()
    }

    pub fn days(&self) -> &[u32] {
        &self.days
    }
}

impl Default for IntervalTable {
    fn default() -> Self {
        Self {
            days: DEFAULT_INTERVALS.to_vec(),
        }
    }
}

impl TryFrom<Vec<u32>> for IntervalTable {
    type Error = ErrorReport;

    fn try_from(value: Vec<u32>) -> Result<Self, Self::Error> {
        IntervalTable::new(value)
    }
}

impl From<IntervalTable> for Vec<u32> {
    fn from(table: IntervalTable) -> Vec<u32> {
        table.days
    }
}
