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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use ripasso_core::Card;
use ripasso_core::CardId;
use ripasso_core::Collection;
use ripasso_core::Date;
use ripasso_core::Level;
use ripasso_core::Store;
use ripasso_core::StudyEvent;
use ripasso_core::Timestamp;
use rusqlite::Connection;
use rusqlite::Transaction;
use rusqlite::config::DbConfig;

use crate::error::Fallible;

/// SQLite-backed card store.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating schema in {database_path}");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        let conn = Arc::new(Mutex::new(conn));
        Ok(Self { conn })
    }

    /// Number of cards stored.
    pub fn card_count(&self) -> Fallible<usize> {
        let conn = self.acquire();
        let count: i64 = conn.query_row("select count(*) from cards;", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn acquire(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }

    fn load_collection(&self) -> Fallible<Collection> {
        let conn = self.acquire();
        let mut cards = Vec::new();
        {
            let sql = "select card_id, term, meaning, context, level, due_date, created_at from cards order by rowid;";
            let mut stmt = conn.prepare(sql)?;
            let mut rows = stmt.query([])?;
            while let Some(row) = rows.next()? {
                let card_id: String = row.get(0)?;
                let term: String = row.get(1)?;
                let meaning: String = row.get(2)?;
                let context: Option<String> = row.get(3)?;
                let level: Level = row.get(4)?;
                let due_date: String = row.get(5)?;
                let created_at: String = row.get(6)?;
                cards.push(Card::restore(
                    CardId::from_hex(&card_id)?,
                    term,
                    meaning,
                    context,
                    level,
                    Date::try_from(due_date)?,
                    Timestamp::try_from(created_at)?,
                ));
            }
        }
        let mut events = Vec::new();
        {
            let mut stmt = conn.prepare("select day from study_days order by rowid;")?;
            let mut rows = stmt.query([])?;
            while let Some(row) = rows.next()? {
                let day: String = row.get(0)?;
                events.push(StudyEvent::new(Date::try_from(day)?));
            }
        }
        log::debug!(
            "Loaded {} cards and {} study days.",
            cards.len(),
            events.len()
        );
        Ok(Collection { cards, events })
    }
}

impl Store for Database {
    fn load(&self) -> ripasso_core::Fallible<Collection> {
        Ok(self.load_collection()?)
    }

    fn save(&self, collection: &Collection) -> ripasso_core::Fallible<()> {
        Ok(self.save_collection(collection)?)
    }
}

impl Database {
    fn save_collection(&self, collection: &Collection) -> Fallible<()> {
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        for card in &collection.cards {
            upsert_card(&tx, card)?;
        }
        for event in &collection.events {
            insert_study_day(&tx, event.day())?;
        }
        tx.commit()?;
        Ok(())
    }
}

fn upsert_card(tx: &Transaction, card: &Card) -> Fallible<()> {
    let sql = "insert into cards (card_id, term, meaning, context, level, due_date, created_at) values (?, ?, ?, ?, ?, ?, ?) on conflict (card_id) do update set context = excluded.context, level = excluded.level, due_date = excluded.due_date;";
    tx.execute(
        sql,
        (
            card.id().to_hex(),
            card.term(),
            card.meaning(),
            card.context(),
            card.proficiency_level(),
            card.next_review_due_at().to_string(),
            card.created_at().to_string(),
        ),
    )?;
    Ok(())
}

fn insert_study_day(tx: &Transaction, day: Date) -> Fallible<()> {
    let sql = "insert or ignore into study_days (day) values (?);";
    tx.execute(sql, [day.to_string()])?;
    Ok(())
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["cards"], |row| row.get(0))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use ripasso_core::IntervalTable;
    use ripasso_core::review_card;
    use tempfile::tempdir;

    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::new(NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.3f").unwrap())
    }

    fn day(s: &str) -> Date {
        Date::try_from(s.to_string()).unwrap()
    }

    fn open(dir: &std::path::Path) -> Fallible<Database> {
        let path = dir.join("ripasso.db");
        Database::new(path.to_str().unwrap())
    }

    #[test]
    fn test_empty_database() -> Fallible<()> {
        let dir = tempdir()?;
        let db = open(dir.path())?;
        assert_eq!(db.load_collection()?, Collection::default());
        assert_eq!(db.card_count()?, 0);
        Ok(())
    }

    #[test]
    fn test_roundtrip_and_reopen() -> Fallible<()> {
        let dir = tempdir()?;
        let mut collection = Collection::default();
        let first = Card::new("la spesa", "the groceries", ts("2024-02-01T09:30:00.250"))?
            .with_context("Vado a fare la spesa.");
        let second = Card::new("il conto", "the bill", ts("2024-02-02T20:00:00.000"))?;
        collection.insert(first)?;
        collection.insert(second)?;
        collection.record_study(day("2024-02-03"));
        collection.record_study(day("2024-02-01"));
        {
            let db = open(dir.path())?;
            db.save(&collection)?;
        }
        let db = open(dir.path())?;
        let loaded = db.load()?;
        assert_eq!(loaded, collection);
        assert_eq!(loaded.cards[0].context(), Some("Vado a fare la spesa."));
        assert_eq!(db.card_count()?, 2);
        Ok(())
    }

    #[test]
    fn test_save_updates_schedule_without_deleting() -> Fallible<()> {
        let dir = tempdir()?;
        let db = open(dir.path())?;
        let mut collection = Collection::default();
        let card = Card::new("ciao", "hi", ts("2024-02-01T09:00:00.000"))?;
        collection.insert(card.clone())?;
        collection.insert(Card::new("grazie", "thanks", ts("2024-02-01T09:01:00.000"))?)?;
        db.save(&collection)?;

        let reviewed = review_card(&card, true, day("2024-02-05"), &IntervalTable::default());
        let partial = Collection {
            cards: vec![reviewed.clone()],
            events: vec![StudyEvent::new(day("2024-02-05"))],
        };
        db.save(&partial)?;
        db.save(&partial)?;

        let loaded = db.load()?;
        assert_eq!(loaded.cards.len(), 2);
        assert_eq!(loaded.cards[0], reviewed);
        assert_eq!(loaded.cards[0].proficiency_level(), 1);
        assert_eq!(loaded.cards[0].next_review_due_at(), day("2024-02-06"));
        assert_eq!(loaded.events, partial.events);
        Ok(())
    }
}
