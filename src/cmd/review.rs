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

use ripasso_core::Card;
use ripasso_core::Date;
use ripasso_core::Store;
use ripasso_core::review_card;

use crate::error::Fallible;
use crate::library::Library;

/// Grade a single card outside of a drill, and record today as a study day.
pub fn review_one(
    library: &Library,
    id_prefix: &str,
    remembered: bool,
    today: Date,
) -> Fallible<Card> {
    let mut collection = library.db.load()?;
    let card: Card = collection.find(id_prefix)?.clone();
    let updated: Card = review_card(&card, remembered, today, &library.config.intervals);
    log::debug!(
        "Reviewed '{}': level {} -> {}, due {}",
        card.term(),
        card.proficiency_level(),
        updated.proficiency_level(),
        updated.next_review_due_at()
    );
    collection.upsert(updated.clone());
    collection.record_study(today);
    library.db.save(&collection)?;
    Ok(updated)
}

pub fn run_review(directory: Option<String>, id: String, remembered: bool) -> Fallible<()> {
    let library = Library::open(directory)?;
    let card = review_one(&library, &id, remembered, Date::today())?;
    println!(
        "{}: level {}, next review on {}.",
        card.term(),
        card.proficiency_level(),
        card.next_review_due_at()
    );
    Ok(())
}
