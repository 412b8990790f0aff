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

use clap::Parser;

use crate::cmd::OutputFormat;
use crate::cmd::add::run_add;
use crate::cmd::drill::start_drill;
use crate::cmd::export::export_collection;
use crate::cmd::list::list_cards;
use crate::cmd::review::run_review;
use crate::cmd::session::SessionArgs;
use crate::cmd::session::print_session;
use crate::cmd::stats::print_stats;
use crate::cmd::streak::print_streak;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Save a new word or collocation.
    Add {
        /// The Italian word or phrase.
        term: String,
        /// What it means.
        meaning: String,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// An example sentence to show alongside the term.
        #[arg(long)]
        context: Option<String>,
    },
    /// List every card with its level and due date.
    List {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Grade a single card.
    Review {
        /// The card id, or a prefix of at least four characters.
        id: String,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// The card was remembered.
        #[arg(long, conflicts_with = "forgot", required_unless_present = "forgot")]
        remembered: bool,
        /// The card was forgotten.
        #[arg(long)]
        forgot: bool,
    },
    /// Print the cards today's session would contain.
    Session {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        #[command(flatten)]
        session: SessionArgs,
        /// Which output format to use.
        #[arg(long, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Drill today's session in the terminal.
    Drill {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Print the current study streak.
    Streak {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Print collection statistics.
    Stats {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Export a collection.
    Export {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Optional path to the output file. By default, the output is printed to stdout.
        #[arg(long)]
        output: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Add {
            term,
            meaning,
            directory,
            context,
        } => run_add(directory, term, meaning, context),
        Command::List { directory } => list_cards(directory),
        Command::Review {
            id,
            directory,
            remembered,
            forgot: _,
        } => run_review(directory, id, remembered),
        Command::Session {
            directory,
            session,
            format,
        } => print_session(directory, session, format),
        Command::Drill { directory, session } => start_drill(directory, session),
        Command::Streak { directory } => print_streak(directory),
        Command::Stats { directory, format } => print_stats(directory, format),
        Command::Export { directory, output } => export_collection(directory, output),
    }
}
