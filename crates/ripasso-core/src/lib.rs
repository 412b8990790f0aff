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

//! ripasso-core: spaced repetition scheduling for vocabulary cards.
//!
//! This library is pure: every operation takes "today" as an argument and
//! returns new values. It provides:
//! - A Leitner-style interval table and the per-card scheduler
//! - Study streak tracking
//! - Session composition (standard, intelligent and weak points modes)
//! - A drill queue and collection statistics
//! - The `Store` trait that hosts implement for persistence

pub mod drill;
pub mod error;
pub mod intervals;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod store;
pub mod streak;
pub mod types;

// Re-exports for convenience
pub use drill::{Drill, DrillSummary};
pub use error::{ErrorReport, Fallible, fail};
pub use intervals::IntervalTable;
pub use scheduler::review_card;
pub use session::{ItemCount, SessionKind, SessionMode, SessionPlan, compose_session};
pub use stats::{Stats, collection_stats};
pub use store::{Collection, MemoryStore, Store};
pub use streak::{compute_streak, record_study_session};
pub use types::card::{Card, Level};
pub use types::card_id::CardId;
pub use types::date::Date;
pub use types::study_event::StudyEvent;
pub use types::timestamp::Timestamp;
