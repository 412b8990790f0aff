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
use ripasso_core::Store;
use ripasso_core::Timestamp;

use crate::error::Fallible;
use crate::library::Library;

/// Save a new word to the collection.
pub fn add_card(
    library: &Library,
    term: &str,
    meaning: &str,
    context: Option<String>,
    now: Timestamp,
) -> Fallible<Card> {
    let mut collection = library.db.load()?;
    let card = Card::new(term, meaning, now)?;
    let card = match context {
        Some(context) => card.with_context(context),
        None => card,
    };
    collection.insert(card.clone())?;
    library.db.save(&collection)?;
    log::info!(
        "Added '{}' to {}.",
        card.term(),
        library.directory.display()
    );
    Ok(card)
}

pub fn run_add(
    directory: Option<String>,
    term: String,
    meaning: String,
    context: Option<String>,
) -> Fallible<()> {
    let library = Library::open(directory)?;
    let card = add_card(&library, &term, &meaning, context, Timestamp::now())?;
    println!("Added {} ({}).", card.term(), card.id().short());
    Ok(())
}
