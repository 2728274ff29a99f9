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

use std::time::Duration;

use clap::Parser;

use crate::cmd::add::AddArgs;
use crate::cmd::add::add_card;
use crate::cmd::add::lesson_arg;
use crate::cmd::check::check_deck;
use crate::cmd::due::list_due;
use crate::cmd::next::show_next;
use crate::cmd::review::review_card;
use crate::cmd::stats::print_deck_stats;
use crate::config::difficulty::Difficulty;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Add a card to the deck.
    Add {
        term: String,
        translation: String,
        /// The language pair the card belongs to.
        #[arg(long, default_value = "default")]
        pair: String,
        /// The lesson that introduces the card.
        #[arg(long)]
        lesson: Option<String>,
        /// The card's position in the lesson.
        #[arg(long)]
        order: Option<u32>,
        /// Path to the deck directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// List the cards that are due now.
    Due {
        /// Path to the deck directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Show the next card to review, and how to present it.
    Next {
        /// Work through this lesson's new cards first.
        #[arg(long)]
        lesson: Option<String>,
        /// Present the card with this preset instead of the configured one.
        #[arg(long, value_enum)]
        difficulty: Option<Difficulty>,
        /// Path to the deck directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Record the answer to a card.
    Review {
        /// The card's id, or a prefix of it.
        id: String,
        #[arg(long, conflicts_with = "incorrect", required_unless_present = "incorrect")]
        correct: bool,
        #[arg(long)]
        incorrect: bool,
        /// Time spent answering, in milliseconds.
        #[arg(long, default_value_t = 0)]
        time_ms: u64,
        /// Path to the deck directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Print deck statistics as JSON.
    Stats {
        /// Path to the deck directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Check the configuration and cards for errors.
    Check {
        /// Path to the deck directory.
        #[arg(long)]
        directory: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Add {
            term,
            translation,
            pair,
            lesson,
            order,
            directory,
        } => {
            let lesson = lesson_arg(lesson, order)?;
            add_card(
                directory,
                AddArgs {
                    term,
                    translation,
                    language_pair_id: pair,
                    lesson,
                },
            )
        }
        Command::Due { directory } => list_due(directory),
        Command::Next {
            lesson,
            difficulty,
            directory,
        } => show_next(directory, lesson, difficulty),
        Command::Review {
            id,
            correct,
            incorrect: _,
            time_ms,
            directory,
        } => review_card(directory, &id, correct, Duration::from_millis(time_ms)),
        Command::Stats { directory } => print_deck_stats(directory),
        Command::Check { directory } => check_deck(directory),
    }
}
