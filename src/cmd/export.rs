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

use std::fs::write;

use ripasso_core::Store;

use crate::error::Fallible;
use crate::library::Library;

/// Dump every card and study day as pretty-printed JSON.
pub fn collection_json(library: &Library) -> Fallible<String> {
    let collection = library.db.load()?;
    Ok(serde_json::to_string_pretty(&collection)?)
}

pub fn export_collection(directory: Option<String>, output: Option<String>) -> Fallible<()> {
    let library = Library::open(directory)?;
    let json: String = collection_json(&library)?;
    match output {
        Some(path) => {
            write(&path, json)?;
            log::info!("Exported collection to {path}.");
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::read_to_string;

    use ripasso_core::Collection;

    use super::*;
    use crate::cmd::add::add_card;
    use crate::cmd::review::review_one;
    use crate::helper::create_tmp_library;
    use crate::helper::day;
    use crate::helper::ts;

    #[test]
    fn test_export_to_file() -> Fallible<()> {
        let (dir, library) = create_tmp_library()?;
        let card = add_card(&library, "magari", "if only", None, ts("2024-03-01T08:00:00.000"))?;
        review_one(&library, &card.id().short(), true, day("2024-03-01"))?;

        let path = dir.path().join("export.json");
        export_collection(
            Some(dir.path().display().to_string()),
            Some(path.display().to_string()),
        )?;
        let exported: Collection = serde_json::from_str(&read_to_string(&path)?)?;
        assert_eq!(exported, library.db.load()?);
        assert_eq!(exported.cards[0].proficiency_level(), 1);
        assert_eq!(exported.events.len(), 1);

        let json = collection_json(&library)?;
        assert!(json.contains("\"nextReviewDueAt\": \"2024-03-02\""));
        Ok(())
    }
}
