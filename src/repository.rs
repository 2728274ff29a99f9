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

//! Where cards live between reviews. The scheduler never touches storage:
//! it is handed cards and hands updated cards back through this boundary.

use std::collections::BTreeMap;
use std::fs::File;
use std::fs::rename;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::card_id::CardId;
use crate::types::review::ReviewRecord;

/// The file name of a deck directory's card store.
pub const DECK_FILE_NAME: &str = "deck.json";

pub trait CardRepository {
    /// Every card, ordered by id.
    fn cards(&self) -> Fallible<Vec<Card>>;

    fn get(&self, id: CardId) -> Fallible<Card>;

    /// Adds a new card. Fails if a card with the same id exists.
    fn insert(&mut self, card: Card) -> Fallible<()>;

    /// Replaces an existing card. Fails if there is no card with its id.
    fn save(&mut self, card: Card) -> Fallible<()>;

    /// Appends to the review log.
    fn record(&mut self, review: ReviewRecord) -> Fallible<()>;

    fn reviews(&self) -> Fallible<Vec<ReviewRecord>>;
}

/// A repository that only lives in memory.
#[derive(Default)]
pub struct MemoryRepository {
    cards: BTreeMap<CardId, Card>,
    reviews: Vec<ReviewRecord>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Fallible<Self> {
        let mut repo = Self::new();
        for card in cards {
            repo.insert(card)?;
        }
        Ok(repo)
    }
}

impl CardRepository for MemoryRepository {
    fn cards(&self) -> Fallible<Vec<Card>> {
        Ok(self.cards.values().cloned().collect())
    }

    fn get(&self, id: CardId) -> Fallible<Card> {
        self.cards
            .get(&id)
            .cloned()
            .ok_or_else(|| ErrorReport::new(format!("no card with id {id}")))
    }

    fn insert(&mut self, card: Card) -> Fallible<()> {
        let id = card.id();
        if self.cards.contains_key(&id) {
            return fail(format!("card {id} already exists"));
        }
        self.cards.insert(id, card);
        Ok(())
    }

    fn save(&mut self, card: Card) -> Fallible<()> {
        let Some(slot) = self.cards.get_mut(&card.id()) else {
            return fail(format!("no card with id {}", card.id()));
        };
        *slot = card;
        Ok(())
    }

    fn record(&mut self, review: ReviewRecord) -> Fallible<()> {
        self.reviews.push(review);
        Ok(())
    }

    fn reviews(&self) -> Fallible<Vec<ReviewRecord>> {
        Ok(self.reviews.clone())
    }
}

#[derive(Default, Serialize, Deserialize)]
struct DeckDocument {
    #[serde(default)]
    cards: Vec<Card>,
    #[serde(default)]
    reviews: Vec<ReviewRecord>,
}

/// A repository backed by a JSON file. Changes are held in memory until
/// [`DeckFile::flush`].
pub struct DeckFile {
    path: PathBuf,
    inner: MemoryRepository,
}

impl DeckFile {
    /// Opens the deck file in `directory`. A missing file is an empty deck.
    pub fn open(directory: &Path) -> Fallible<Self> {
        let path = directory.join(DECK_FILE_NAME);
        let document = if path.exists() {
            log::debug!("Loading deck from {}", path.display());
            let reader = BufReader::new(File::open(&path)?);
            serde_json::from_reader(reader)?
        } else {
            log::debug!("No {DECK_FILE_NAME}, starting with an empty deck.");
            DeckDocument::default()
        };
        let mut inner = MemoryRepository::from_cards(document.cards)?;
        inner.reviews = document.reviews;
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the deck to a temporary file next to the target, then renames
    /// it over the target.
    pub fn flush(&self) -> Fallible<()> {
        let document = DeckDocument {
            cards: self.inner.cards()?,
            reviews: self.inner.reviews()?,
        };
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer_pretty(&mut writer, &document)?;
            writer.flush()?;
        }
        rename(&tmp, &self.path)?;
        log::debug!(
            "Wrote {} cards and {} reviews to {}",
            document.cards.len(),
            document.reviews.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl CardRepository for DeckFile {
    fn cards(&self) -> Fallible<Vec<Card>> {
        self.inner.cards()
    }

    fn get(&self, id: CardId) -> Fallible<Card> {
        self.inner.get(id)
    }

    fn insert(&mut self, card: Card) -> Fallible<()> {
        self.inner.insert(card)
    }

    fn save(&mut self, card: Card) -> Fallible<()> {
        self.inner.save(card)
    }

    fn record(&mut self, review: ReviewRecord) -> Fallible<()> {
        self.inner.record(review)
    }

    fn reviews(&self) -> Fallible<Vec<ReviewRecord>> {
        self.inner.reviews()
    }
}
