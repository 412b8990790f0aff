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

use clap::Args;
use ripasso_core::Date;
use ripasso_core::ItemCount;
use ripasso_core::SessionMode;
use ripasso_core::SessionPlan;
use ripasso_core::Store;
use ripasso_core::compose_session;

use crate::cmd::OutputFormat;
use crate::config::Config;
use crate::config::ModeName;
use crate::error::Fallible;
use crate::library::Library;

/// Command line overrides for the configured session defaults.
#[derive(Args, Clone, Copy, Debug, Default)]
pub struct SessionArgs {
    /// How to pick cards. Defaults to the `[session]` table of `ripasso.toml`.
    #[arg(long)]
    pub mode: Option<ModeName>,
    /// New cards to include in a standard session: a number or `all`.
    #[arg(long)]
    pub new_items: Option<ItemCount>,
    /// Due reviews to include in a standard session: a number or `all`.
    #[arg(long)]
    pub review_items: Option<ItemCount>,
}

impl SessionArgs {
    pub fn resolve(&self, config: &Config) -> SessionMode {
        config.session_mode(self.mode, self.new_items, self.review_items)
    }
}

pub fn plan_session(
    library: &Library,
    mode: &SessionMode,
    today: Date,
) -> Fallible<Option<SessionPlan>> {
    let collection = library.db.load()?;
    let plan = compose_session(&collection.cards, mode, today);
    match &plan {
        Some(plan) => log::debug!(
            "Composed {} session: {} new, {} reviews.",
            plan.kind(),
            plan.new_cards().len(),
            plan.review_cards().len()
        ),
        None => log::debug!("Nothing to study for {mode:?}."),
    }
    Ok(plan)
}

pub fn format_plan(plan: &SessionPlan) -> String {
    let mut out = format!(
        "Session ({}): {} new, {} to review.\n",
        plan.kind(),
        plan.new_cards().len(),
        plan.review_cards().len()
    );
    for card in plan.review_cards() {
        out.push_str(&format!(
            "  review  {}  L{}  {}\n",
            card.id().short(),
            card.proficiency_level(),
            card.term()
        ));
    }
    for card in plan.new_cards() {
        out.push_str(&format!("  new     {}  {}\n", card.id().short(), card.term()));
    }
    out
}

pub fn print_session(
    directory: Option<String>,
    args: SessionArgs,
    format: OutputFormat,
) -> Fallible<()> {
    let library = Library::open(directory)?;
    let mode = args.resolve(&library.config);
    let plan = plan_session(&library, &mode, Date::today())?;
    match (format, plan) {
        (OutputFormat::Text, Some(plan)) => print!("{}", format_plan(&plan)),
        (OutputFormat::Text, None) => println!("No session."),
        (OutputFormat::Json, plan) => println!("{}", serde_json::to_string_pretty(&plan)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::add::add_card;
    use crate::cmd::review::review_one;
    use crate::helper::create_tmp_library;
    use crate::helper::day;
    use crate::helper::ts;

    #[test]
    fn test_empty_collection_has_no_session() -> Fallible<()> {
        let (_dir, library) = create_tmp_library()?;
        let plan = plan_session(&library, &SessionMode::Intelligent, day("2024-03-01"))?;
        assert_eq!(plan, None);
        Ok(())
    }

    #[test]
    fn test_plan_from_stored_cards() -> Fallible<()> {
        let (_dir, library) = create_tmp_library()?;
        let old = add_card(&library, "la pioggia", "the rain", None, ts("2024-03-01T08:00:00.000"))?;
        add_card(&library, "il sole", "the sun", None, ts("2024-03-02T08:00:00.000"))?;
        add_card(&library, "la neve", "the snow", None, ts("2024-03-03T08:00:00.000"))?;
        review_one(&library, &old.id().short(), true, day("2024-03-03"))?;

        let mode = SessionMode::Standard {
            new_items: ItemCount::Limit(1),
            review_items: ItemCount::All,
        };
        let plan = plan_session(&library, &mode, day("2024-03-04"))?.unwrap();
        assert_eq!(plan.review_cards()[0].term(), "la pioggia");
        assert_eq!(plan.new_cards().len(), 1);
        assert_eq!(plan.new_cards()[0].term(), "il sole");

        let text = format_plan(&plan);
        assert!(text.starts_with("Session (standard): 1 new, 1 to review.\n"));
        assert!(text.contains("la pioggia"));
        Ok(())
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config::default();
        assert_eq!(
            SessionArgs::default().resolve(&config),
            SessionMode::Standard {
                new_items: ItemCount::Limit(10),
                review_items: ItemCount::All,
            }
        );
        let args = SessionArgs {
            mode: Some(ModeName::WeakPoints),
            ..SessionArgs::default()
        };
        assert_eq!(args.resolve(&config), SessionMode::WeakPoints);
    }
}
