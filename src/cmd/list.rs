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

use crate::error::Fallible;
use crate::library::Library;

/// One line of the card listing.
pub fn format_card(card: &Card, today: Date) -> String {
    let status = if card.is_new() {
        "new".to_string()
    } else if card.is_due(today) {
        "due".to_string()
    } else {
        format!("in {}d", card.next_review_due_at().days_since(today))
    };
    format!(
        "{}  L{:<2} {:<7} {} = {}",
        card.id().short(),
        card.proficiency_level(),
        status,
        card.term(),
        card.meaning()
    )
}

pub fn list_cards(directory: Option<String>) -> Fallible<()> {
    let library = Library::open(directory)?;
    let collection = library.db.load()?;
    let today = Date::today();
    for card in &collection.cards {
        println!("{}", format_card(card, today));
    }
    Ok(())
}
