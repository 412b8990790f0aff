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

use std::io::BufRead;
use std::io::Write;

use ripasso_core::Card;
use ripasso_core::Date;
use ripasso_core::Drill;
use ripasso_core::DrillSummary;
use ripasso_core::SessionMode;
use ripasso_core::Store;
use ripasso_core::compose_session;

use crate::cmd::session::SessionArgs;
use crate::error::Fallible;
use crate::library::Library;

enum Answer {
    Remembered,
    Forgot,
    Quit,
}

/// Run an interactive session over `input` and `output`. Every grading is
/// saved before the next card is shown. Returns `None` when there is nothing
/// to study.
pub fn run_drill<R: BufRead, W: Write>(
    library: &Library,
    mode: &SessionMode,
    today: Date,
    input: &mut R,
    output: &mut W,
) -> Fallible<Option<DrillSummary>> {
    let mut collection = library.db.load()?;
    let Some(plan) = compose_session(&collection.cards, mode, today) else {
        writeln!(output, "No session.")?;
        return Ok(None);
    };
    log::info!(
        "Starting {} drill in {}.",
        plan.kind(),
        library.directory.display()
    );
    let mut drill = Drill::new(plan);
    writeln!(output, "{} cards to study.", drill.total())?;

    while let Some(card) = drill.current().cloned() {
        match ask(&card, drill.remaining(), input, output)? {
            Answer::Quit => break,
            answer => {
                let remembered = matches!(answer, Answer::Remembered);
                let updated: Card = drill.grade(remembered, today, &library.config.intervals)?;
                log::debug!(
                    "Graded '{}': level {}, due {}",
                    updated.term(),
                    updated.proficiency_level(),
                    updated.next_review_due_at()
                );
                collection.upsert(updated);
                collection.record_study(today);
                library.db.save(&collection)?;
            }
        }
    }

    let summary = drill.summary();
    writeln!(
        output,
        "Reviewed {} cards: {} remembered, {} forgotten.",
        summary.reviewed, summary.remembered, summary.forgotten
    )?;
    Ok(Some(summary))
}

fn ask<R: BufRead, W: Write>(
    card: &Card,
    remaining: usize,
    input: &mut R,
    output: &mut W,
) -> Fallible<Answer> {
    writeln!(output)?;
    writeln!(output, "[{remaining} left] {}", card.term())?;
    if let Some(context) = card.context() {
        writeln!(output, "  {context}")?;
    }
    write!(output, "Press Enter to reveal. ")?;
    output.flush()?;
    if read_line(input)?.is_none() {
        return Ok(Answer::Quit);
    }
    writeln!(output, "  = {}", card.meaning())?;
    loop {
        write!(output, "Remembered? [y/n/q] ")?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(Answer::Quit);
        };
        match line.as_str() {
            "y" | "yes" => return Ok(Answer::Remembered),
            "n" | "no" => return Ok(Answer::Forgot),
            "q" | "quit" => return Ok(Answer::Quit),
            _ => writeln!(output, "Please answer y, n or q.")?,
        }
    }
}

/// Read one line, trimmed and lowercased. `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Fallible<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

pub fn start_drill(directory: Option<String>, args: SessionArgs) -> Fallible<()> {
    let library = Library::open(directory)?;
    let mode = args.resolve(&library.config);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_drill(
        &library,
        &mode,
        Date::today(),
        &mut stdin.lock(),
        &mut stdout.lock(),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use ripasso_core::ItemCount;
    use ripasso_core::StudyEvent;

    use super::*;
    use crate::cmd::add::add_card;
    use crate::helper::create_tmp_library;
    use crate::helper::day;
    use crate::helper::ts;

    fn everything() -> SessionMode {
        SessionMode::Standard {
            new_items: ItemCount::All,
            review_items: ItemCount::All,
        }
    }

    #[test]
    fn test_drill_with_nothing_to_study() -> Fallible<()> {
        let (_dir, library) = create_tmp_library()?;
        let mut output: Vec<u8> = Vec::new();
        let summary = run_drill(
            &library,
            &everything(),
            day("2024-03-01"),
            &mut Cursor::new(""),
            &mut output,
        )?;
        assert_eq!(summary, None);
        assert_eq!(String::from_utf8(output).unwrap(), "No session.\n");
        Ok(())
    }

    #[test]
    fn test_drill_requeues_forgotten_card() -> Fallible<()> {
        let (_dir, library) = create_tmp_library()?;
        add_card(&library, "pazienza", "patience", None, ts("2024-03-01T08:00:00.000"))?;
        add_card(
            &library,
            "boh",
            "who knows",
            Some("Dov'è? Boh.".to_string()),
            ts("2024-03-01T09:00:00.000"),
        )?;

        let mut input = Cursor::new("\ny\n\nmaybe\nn\n\ny\n");
        let mut output: Vec<u8> = Vec::new();
        let summary = run_drill(
            &library,
            &everything(),
            day("2024-03-01"),
            &mut input,
            &mut output,
        )?
        .unwrap();
        assert_eq!(summary.reviewed, 3);
        assert_eq!(summary.remembered, 2);
        assert_eq!(summary.forgotten, 1);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("[2 left] pazienza"));
        assert!(text.contains("  Dov'è? Boh."));
        assert!(text.contains("Please answer y, n or q."));
        assert!(text.ends_with("Reviewed 3 cards: 2 remembered, 1 forgotten.\n"));

        let collection = library.db.load()?;
        for card in &collection.cards {
            assert_eq!(card.proficiency_level(), 1);
            assert_eq!(card.next_review_due_at(), day("2024-03-02"));
        }
        assert_eq!(collection.events, vec![StudyEvent::new(day("2024-03-01"))]);
        Ok(())
    }

    #[test]
    fn test_quit_saves_nothing() -> Fallible<()> {
        let (_dir, library) = create_tmp_library()?;
        add_card(&library, "dai", "come on", None, ts("2024-03-01T08:00:00.000"))?;
        let mut output: Vec<u8> = Vec::new();
        let summary = run_drill(
            &library,
            &everything(),
            day("2024-03-01"),
            &mut Cursor::new("\nq\n"),
            &mut output,
        )?
        .unwrap();
        assert_eq!(summary.reviewed, 0);
        let collection = library.db.load()?;
        assert_eq!(collection.cards[0].proficiency_level(), 0);
        assert!(collection.events.is_empty());
        Ok(())
    }
}
