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
use crate::error::Fallible;

pub fn check_deck(directory: Option<String>) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let count = coll.check()?;
    log::debug!("Checked {count} cards.");
    println!("ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::check_deck;
    use crate::error::Fallible;

    #[test]
    fn test_non_existent_directory() {
        assert!(check_deck(Some("./derpherp".to_string())).is_err());
    }

    #[test]
    fn test_empty_directory() -> Fallible<()> {
        let dir = tempdir()?;
        check_deck(Some(dir.path().display().to_string()))
    }

    #[test]
    fn test_bad_config() -> Fallible<()> {
        let dir = tempdir()?;
        std::fs::write(dir.path().join("config.toml"), "intervals = []\n")?;
        assert!(check_deck(Some(dir.path().display().to_string())).is_err());
        Ok(())
    }
}
