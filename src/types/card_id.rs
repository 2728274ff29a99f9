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

use std::cmp::Ordering;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de;

use crate::error::ErrorReport;
use crate::error::Fallible;

/// A card's identifier: the blake3 hash of its language pair and text.
///
/// Wraps the hash because blake3 does not implement Ord and PartialOrd.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CardId {
    inner: blake3::Hash,
}

impl CardId {
    pub fn for_content(language_pair_id: &str, term: &str, translation: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        // Length prefixes keep ("ab", "c") and ("a", "bc") apart.
        for part in [language_pair_id, term, translation] {
            hasher.update(&(part.len() as u64).to_le_bytes());
            hasher.update(part.as_bytes());
        }
        Self {
            inner: hasher.finalize(),
        }
    }

    pub fn to_hex(self) -> String {
        self.inner.to_hex().to_string()
    }

    pub fn from_hex(s: &str) -> Fallible<Self> {
        let inner = blake3::Hash::from_hex(s)?;
        Ok(Self { inner })
    }

    /// The first eight hex digits, for listings.
    pub fn short(self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(8);
        hex
    }
}

impl PartialOrd for CardId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CardId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.as_bytes().cmp(other.inner.as_bytes())
    }
}

impl Display for CardId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for CardId {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardId::from_hex(s)
    }
}

impl Serialize for CardId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for CardId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CardId::from_hex(&s).map_err(|e| de::Error::custom(e.message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_addressing() {
        let a = CardId::for_content("en-es", "dog", "perro");
        let b = CardId::for_content("en-es", "dog", "perro");
        let c = CardId::for_content("en-it", "dog", "perro");
        let d = CardId::for_content("en-es", "dogp", "erro");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_hex_round_trip() -> Fallible<()> {
        let id = CardId::for_content("en-es", "cat", "gato");
        let parsed: CardId = id.to_hex().parse()?;
        assert_eq!(id, parsed);
        assert_eq!(id.short().len(), 8);
        assert!(id.to_hex().starts_with(&id.short()));
        Ok(())
    }

    #[test]
    fn test_invalid_hex() {
        assert!(CardId::from_hex("not-a-hash").is_err());
    }

    #[test]
    fn test_ordering() -> Fallible<()> {
        let a =
            CardId::from_hex("0000000000000000000000000000000000000000000000000000000000000000")?;
        let b =
            CardId::from_hex("0000000000000000000000000000000000000000000000000000000000000001")?;
        assert!(a < b);
        Ok(())
    }

    #[test]
    fn test_serde() -> Fallible<()> {
        let id = CardId::for_content("en-es", "cat", "gato");
        let json = serde_json::to_string(&id)?;
        assert_eq!(json, format!("\"{}\"", id.to_hex()));
        let back: CardId = serde_json::from_str(&json)?;
        assert_eq!(back, id);
        Ok(())
    }
}
