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

use std::fs::write;

use crate::db::DB_FILE;
use crate::db::Database;
use crate::error::Fallible;
use crate::utils::data_dir;

/// Dumps the whole deck collection as pretty-printed JSON.
pub fn export_decks(directory: Option<String>, output: Option<String>) -> Fallible<()> {
    let directory = data_dir(directory)?;
    let db = Database::open(&directory.join(DB_FILE))?;
    let decks = db.fetch_decks()?;
    let json = serde_json::to_string_pretty(&decks)?;
    match output {
        Some(path) => write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use flashdecks_core::Card;
    use flashdecks_core::DeckStore;
    use flashdecks_core::Timestamp;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_export_writes_all_decks() {
        let dir = tempdir().unwrap();
        let db = Database::open(&dir.path().join(DB_FILE)).unwrap();
        let mut store = DeckStore::new();
        let deck = store
            .create("React", vec![Card::new("q", "a")])
            .clone();
        db.insert_deck(&deck, Timestamp::now()).unwrap();
        drop(db);

        let out = dir.path().join("decks.json");
        export_decks(
            Some(dir.path().display().to_string()),
            Some(out.display().to_string()),
        )
        .unwrap();
        let json = std::fs::read_to_string(out).unwrap();
        assert!(json.contains("\"React\""));
        assert!(json.contains(&deck.id().to_hex()));
    }

    #[test]
    fn test_export_on_missing_directory_fails() {
        let result = export_decks(Some("./derpherp".to_string()), None);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "error: directory does not exist."
        );
    }
}
