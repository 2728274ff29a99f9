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

use std::env::current_dir;
use std::path::PathBuf;
use std::time::Instant;

use crate::clock::SystemClock;
use crate::config::Config;
use crate::error::Fallible;
use crate::error::fail;
use crate::repository::CardRepository;
use crate::repository::DeckFile;
use crate::rng::ThreadRandom;
use crate::session::Session;

/// A deck directory: its configuration and its cards.
pub struct Collection {
    pub directory: PathBuf,
    pub config: Config,
    pub deck: DeckFile,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };

        let config = Config::load(&directory)?;

        let deck = {
            log::debug!("Loading deck...");
            let start = Instant::now();
            let deck = DeckFile::open(&directory)?;
            let duration = start.elapsed().as_millis();
            log::debug!("Deck loaded in {duration}ms.");
            deck
        };

        Ok(Self {
            directory,
            config,
            deck,
        })
    }

    /// Checks the configuration and every card.
    pub fn check(&self) -> Fallible<usize> {
        self.config.validate()?;
        let cards = self.deck.cards()?;
        for card in &cards {
            card.validate()?;
        }
        Ok(cards.len())
    }

    /// A session over this collection using the system clock.
    pub fn into_session(self) -> Session<DeckFile, SystemClock, ThreadRandom> {
        Session::new(self.config, self.deck, SystemClock, ThreadRandom::new())
    }
}
