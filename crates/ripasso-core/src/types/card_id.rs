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

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;

/// Number of hex digits shown in listings.
const SHORT_LEN: usize = 8;

/// Identifies a card. Derived from the normalised term and meaning, so saving
/// the same word twice produces the same id.
///
/// Wraps the hash rather than exposing it because blake3 does not implement
/// Ord and PartialOrd.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardId {
    #[serde(skip)]
    inner: blake3::Hash,
}

impl CardId {
    pub fn for_entry(term: &str, meaning: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(normalize(term).as_bytes());
        // Separator, so that ("ab", "c") and ("a", "bc") differ.
        hasher.update(&[0]);
        hasher.update(normalize(meaning).as_bytes());
        Self {
            inner: hasher.finalize(),
        }
    }

    pub fn to_hex(self) -> String {
        self.inner.to_hex().to_string()
    }

    /// The leading hex digits, enough to tell cards apart in a listing.
    pub fn short(self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(SHORT_LEN);
        hex
    }

    pub fn from_hex(s: &str) -> Fallible<Self> {
        let inner = blake3::Hash::from_hex(s)
            .map_err(|_| ErrorReport::new(format!("invalid card id: '{s}'")))?;
        Ok(Self { inner })
    }
}

fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
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

impl TryFrom<String> for CardId {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CardId::from_hex(&value)
    }
}

impl From<CardId> for String {
    fn from(id: CardId) -> String {
        id.to_hex()
    }
}
