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

//! vocabcards: a spaced repetition scheduler for vocabulary flashcards.
//!
//! A card's progress score decides how it is presented (the display mode)
//! and, together with review outcomes, when it is due again.

pub mod cli;
pub mod clock;
pub mod cmd;
pub mod collection;
pub mod config;
pub mod direction;
pub mod error;
pub mod mode;
pub mod query;
pub mod repository;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod types;

pub use error::ErrorReport;
pub use error::Fallible;
pub use error::fail;
