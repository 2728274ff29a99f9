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

use crate::collection::Collection;
use crate::config::difficulty::Difficulty;
use crate::error::Fallible;

pub fn show_next(
    directory: Option<String>,
    lesson: Option<String>,
    difficulty: Option<Difficulty>,
) -> Fallible<()> {
    let mut coll = Collection::new(directory)?;
    if difficulty.is_some() {
        coll.config.difficulty = difficulty;
    }
    let mut session = coll.into_session();
    match session.next_prompt(lesson.as_deref())? {
        Some(prompt) => {
            println!("{}", serde_json::to_string_pretty(&prompt)?);
        }
        None => {
            println!("No cards due.");
            if let Some(remaining) = session.time_until_next()? {
                println!("Next card due in {remaining}.");
            }
        }
    }
    Ok(())
}
