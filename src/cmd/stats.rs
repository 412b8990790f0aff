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

use ripasso_core::Date;
use ripasso_core::Stats;
use ripasso_core::Store;
use ripasso_core::collection_stats;

use crate::cmd::OutputFormat;
use crate::error::Fallible;
use crate::library::Library;

pub fn deck_stats(library: &Library, today: Date) -> Fallible<Stats> {
    let collection = library.db.load()?;
    Ok(collection_stats(
        &collection.cards,
        &collection.events,
        &library.config.intervals,
        today,
        library.config.weekly_goal,
    ))
}

pub fn format_stats(stats: &Stats) -> String {
    let mut out = String::new();
    out.push_str(&format!("Cards:        {}\n", stats.total_count));
    out.push_str(&format!("  new:        {}\n", stats.new_count));
    out.push_str(&format!("  learning:   {}\n", stats.learning_count));
    out.push_str(&format!("  mastered:   {}\n", stats.mastered_count));
    out.push_str(&format!("Due today:    {}\n", stats.due_today_count));
    out.push_str(&format!("Due tomorrow: {}\n", stats.due_tomorrow_count));
    match stats.weekly_goal {
        Some(goal) => out.push_str(&format!(
            "This week:    {} / {} new words\n",
            stats.added_this_week, goal
        )),
        None => out.push_str(&format!(
            "This week:    {} new words\n",
            stats.added_this_week
        )),
    }
    out.push_str(&format!("Streak:       {} days\n", stats.streak));
    if !stats.levels.is_empty() {
        out.push_str("Levels:\n");
        for (level, count) in &stats.levels {
            out.push_str(&format!("  L{level}: {count}\n"));
        }
    }
    out
}

pub fn print_stats(directory: Option<String>, format: OutputFormat) -> Fallible<()> {
    let library = Library::open(directory)?;
    let stats = deck_stats(&library, Date::today())?;
    match format {
        OutputFormat::Text => print!("{}", format_stats(&stats)),
        OutputFormat::Json => {
            let stats_json = serde_json::to_string_pretty(&stats)?;
            println!("{}", stats_json);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use super::*;
    use crate::cmd::add::add_card;
    use crate::cmd::review::review_one;
    use crate::config::CONFIG_FILE;
    use crate::helper::day;
    use crate::helper::ts;
    use crate::library::Library;

    #[test]
    fn test_stats_use_configured_goal() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        write(dir.path().join(CONFIG_FILE), "weekly_goal = 2\n")?;
        let library = Library::open(Some(dir.path().display().to_string()))?;
        let card = add_card(&library, "uno", "one", None, ts("2024-03-01T08:00:00.000"))?;
        add_card(&library, "due", "two", None, ts("2024-03-02T08:00:00.000"))?;
        review_one(&library, &card.id().short(), true, day("2024-03-02"))?;

        let stats = deck_stats(&library, day("2024-03-03"))?;
        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.new_count, 1);
        assert_eq!(stats.due_today_count, 1);
        assert_eq!(stats.added_this_week, 2);
        assert_eq!(stats.weekly_goal_met(), Some(true));
        assert_eq!(stats.streak, 1);

        let text = format_stats(&stats);
        assert!(text.contains("This week:    2 / 2 new words\n"));
        assert!(text.contains("  L0: 1\n"));

        let json = serde_json::to_value(&stats)?;
        assert_eq!(json["dueTodayCount"], 1);
        assert_eq!(json["weeklyGoal"], 2);
        Ok(())
    }
}
