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

use chrono::TimeDelta;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

/// Delay used if the interval table is consulted with zero successful
/// reviews.
const FALLBACK_INTERVAL: Interval = Interval::Minutes(1);

/// A single entry of the interval table. Each entry names exactly one unit,
/// e.g. `{ hours = 24 }` in a configuration file.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Minutes(u32),
    Hours(u32),
    Days(u32),
}

impl Interval {
    pub fn to_delta(self) -> TimeDelta {
        match self {
            Interval::Minutes(n) => TimeDelta::minutes(n.into()),
            Interval::Hours(n) => TimeDelta::hours(n.into()),
            Interval::Days(n) => TimeDelta::days(n.into()),
        }
    }
}

/// The delays applied after correct answers, indexed by the number of
/// successful reviews. Never empty.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<Interval>", into = "Vec<Interval>")]
pub struct IntervalTable {
    entries: Vec<Interval>,
}

impl IntervalTable {
    pub fn new(entries: Vec<Interval>) -> Fallible<Self> {
        if entries.is_empty() {
            return fail("invalid configuration: the interval table is empty");
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Interval] {
        &self.entries
    }

    /// The interval after the `successful_reviews`-th success. The first
    /// success uses the first entry; counts past the end reuse the last.
    pub fn for_successful_reviews(&self, successful_reviews: u32) -> Interval {
        let Some(n) = successful_reviews.checked_sub(1) else {
            return FALLBACK_INTERVAL;
        };
        let last = self.entries.len() - 1;
        let index = usize::try_from(n).map_or(last, |n| n.min(last));
        self.entries[index]
    }
}

impl Default for IntervalTable {
    fn default() -> Self {
        Self {
            entries: vec![
                Interval::Minutes(1),
                Interval::Minutes(10),
                Interval::Minutes(30),
                Interval::Hours(24),
                Interval::Days(7),
                Interval::Days(24),
            ],
        }
    }
}

impl TryFrom<Vec<Interval>> for IntervalTable {
    type Error = ErrorReport;

    fn try_from(value: Vec<Interval>) -> Result<Self, Self::Error> {
        IntervalTable::new(value)
    }
}

impl From<IntervalTable> for Vec<Interval> {
    fn from(value: IntervalTable) -> Self {
        value.entries
    }
}
