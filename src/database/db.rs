//! Database operations for the vocabulary trainer
//!
//! Handles SQLite database initialization, CRUD operations for wordlists and
//! vocab items, and spaced repetition scheduling state.

use crate::models::{ItemKind, Library, ReviewState, VocabItem, Wordlist};
use chrono::{Days, Local, NaiveDate};
use rusqlite::{Connection, Result, params};

/// Dates are stored as ISO-8601 text, which compares correctly as strings.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Opens the database file and initializes the schema
pub fn init_database() -> Result<Connection> {
    let conn = Connection::open("vocab.sqlite3")?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Creates tables for wordlists, vocab items, scheduling state, and app state.
/// Sets current date to today if not already initialized.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS wordlists (
            name TEXT PRIMARY KEY
        )",
        (),
    )?;

    // Vocab items table with auto-increment ID
    conn.execute(
        "CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            wordlist_name TEXT NOT NULL,
            kind TEXT NOT NULL,
            text TEXT NOT NULL,
            meaning TEXT NOT NULL,
            FOREIGN KEY (wordlist_name) REFERENCES wordlists(name),
            UNIQUE(wordlist_name, text)
        )",
        (),
    )?;

    // Scheduling state table, one row per item, SM-2 defaults
    conn.execute(
        "CREATE TABLE IF NOT EXISTS review_states (
            item_id INTEGER PRIMARY KEY,
            difficulty REAL NOT NULL DEFAULT 2.5,
            interval_days INTEGER NOT NULL DEFAULT 0,
            repetitions INTEGER NOT NULL DEFAULT 0,
            next_review_at TEXT NOT NULL,
            FOREIGN KEY (item_id) REFERENCES items(id) ON DELETE CASCADE
        )",
        (),
    )?;

    // App state table for storing the current (simulated) date
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    let today = Local::now().date_naive().format(DATE_FORMAT).to_string();
    conn.execute(
        "INSERT OR IGNORE INTO app_state (key, value) VALUES ('current_date', ?1)",
        params![today],
    )?;

    Ok(())
}

/// Retrieves current simulated date from database
pub fn get_current_date(conn: &Connection) -> Result<NaiveDate> {
    let stored: String = conn.query_row(
        "SELECT value FROM app_state WHERE key = 'current_date'",
        [],
        |row| row.get(0),
    )?;

    Ok(NaiveDate::parse_from_str(&stored, DATE_FORMAT).unwrap_or_default())
}

/// Advances current date by one day (for testing spaced repetition)
pub fn advance_day(conn: &Connection) -> Result<()> {
    let next_day = get_current_date(conn)? + Days::new(1);

    conn.execute(
        "UPDATE app_state SET value = ?1 WHERE key = 'current_date'",
        params![next_day.format(DATE_FORMAT).to_string()],
    )?;

    Ok(())
}

/// Creates a new wordlist in the database
pub fn new_wordlist(name: &str, conn: &Connection) -> Result<()> {
    conn.execute("INSERT INTO wordlists (name) VALUES (?1)", params![name])?;
    println!("Wordlist '{}' created successfully.", name);
    Ok(())
}

/// Adds a vocab item to a wordlist and initializes its scheduling state
///
/// Returns the item ID. If the item already exists (same wordlist + text),
/// it's ignored due to UNIQUE constraint.
pub fn add_item(wordlist_name: &str, item: &VocabItem, conn: &Connection) -> Result<i64> {
    conn.execute(
        "INSERT OR IGNORE INTO items (wordlist_name, kind, text, meaning) VALUES (?1, ?2, ?3, ?4)",
        params![wordlist_name, item.kind.as_str(), item.text, item.meaning],
    )?;

    let item_id: i64 = conn.query_row(
        "SELECT id FROM items WHERE wordlist_name = ?1 AND text = ?2",
        params![wordlist_name, item.text],
        |row| row.get(0),
    )?;

    // Fresh items are due immediately
    let today = get_current_date(conn)?;
    let fresh = ReviewState::new_for_item(item_id, today);
    conn.execute(
        "INSERT OR IGNORE INTO review_states (item_id, difficulty, interval_days, repetitions, next_review_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            fresh.item_id,
            fresh.difficulty,
            fresh.interval_days,
            fresh.repetitions,
            fresh.next_review_at.format(DATE_FORMAT).to_string()
        ],
    )?;

    Ok(item_id)
}

/// Retrieves all vocab items for a given wordlist
///
/// Returns vector of (item_id, VocabItem) tuples
pub fn get_items_for_wordlist(
    wordlist_name: &str,
    conn: &Connection,
) -> Result<Vec<(i64, VocabItem)>> {
    let mut stmt =
        conn.prepare("SELECT id, kind, text, meaning FROM items WHERE wordlist_name = ?1")?;

    let items = stmt
        .query_map(params![wordlist_name], |row| {
            Ok((
                row.get(0)?,
                VocabItem {
                    kind: ItemKind::from_str(&row.get::<_, String>(1)?),
                    text: row.get(2)?,
                    meaning: row.get(3)?,
                },
            ))
        })?
        .collect::<Result<Vec<(i64, VocabItem)>>>()?;

    Ok(items)
}

/// Updates scheduling state for an item after a review
pub fn update_review_state(state: &ReviewState, conn: &Connection) -> Result<()> {
    conn.execute(
        "UPDATE review_states
         SET difficulty = ?1, interval_days = ?2, repetitions = ?3, next_review_at = ?4
         WHERE item_id = ?5",
        params![
            state.difficulty,
            state.interval_days,
            state.repetitions,
            state.next_review_at.format(DATE_FORMAT).to_string(),
            state.item_id
        ],
    )?;

    Ok(())
}

/// Retrieves vocab items due for review in a wordlist
///
/// Returns items where next_review_at <= current date,
/// ordered by next_review_at (oldest first).
pub fn get_items_due_for_review(
    wordlist_name: &str,
    conn: &Connection,
) -> Result<Vec<(i64, VocabItem, ReviewState)>> {
    let today = get_current_date(conn)?.format(DATE_FORMAT).to_string();

    let mut stmt = conn.prepare(
        "SELECT i.id, i.kind, i.text, i.meaning, r.difficulty, r.interval_days, r.repetitions, r.next_review_at
         FROM items i
         JOIN review_states r ON i.id = r.item_id
         WHERE i.wordlist_name = ?1 AND r.next_review_at <= ?2
         ORDER BY r.next_review_at ASC",
    )?;

    let items = stmt
        .query_map(params![wordlist_name, today], |row| {
            let id: i64 = row.get(0)?;
            Ok((
                id,
                VocabItem {
                    kind: ItemKind::from_str(&row.get::<_, String>(1)?),
                    text: row.get(2)?,
                    meaning: row.get(3)?,
                },
                ReviewState {
                    item_id: id,
                    difficulty: row.get(4)?,
                    interval_days: row.get(5)?,
                    repetitions: row.get(6)?,
                    next_review_at: NaiveDate::parse_from_str(
                        &row.get::<_, String>(7)?,
                        DATE_FORMAT,
                    )
                    .unwrap_or_default(),
                },
            ))
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(items)
}

/// Retrieves all wordlist names from database
pub fn get_all_wordlists(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM wordlists")?;
    let wordlists = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<String>>>()?;
    Ok(wordlists)
}

/// Loads all wordlists with their items into memory
///
/// Does not load scheduling state - that's fetched separately when starting
/// a review session.
pub fn load_library(conn: &Connection) -> Result<Library> {
    let names = get_all_wordlists(conn)?;

    let mut wordlists = Vec::new();

    for name in names {
        let items_with_ids = get_items_for_wordlist(&name, conn)?;
        // Strip IDs - we only need them for review sessions
        let items = items_with_ids.into_iter().map(|(_, item)| item).collect();

        wordlists.push(Wordlist { name, items });
    }

    Ok(Library { wordlists })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn word(text: &str, meaning: &str) -> VocabItem {
        VocabItem {
            text: text.to_string(),
            meaning: meaning.to_string(),
            kind: ItemKind::Word,
        }
    }

    #[test]
    fn test_new_item_is_due_immediately() {
        let conn = test_conn();
        new_wordlist("Spanish", &conn).unwrap();
        let id = add_item("Spanish", &word("perro", "dog"), &conn).unwrap();

        let due = get_items_due_for_review("Spanish", &conn).unwrap();
        assert_eq!(due.len(), 1);

        let (due_id, item, state) = &due[0];
        assert_eq!(*due_id, id);
        assert_eq!(item.text, "perro");

        // The stored row is exactly the fresh-state constructor's output
        let today = get_current_date(&conn).unwrap();
        assert_eq!(*state, ReviewState::new_for_item(id, today));
    }

    #[test]
    fn test_duplicate_items_are_ignored() {
        let conn = test_conn();
        new_wordlist("Spanish", &conn).unwrap();
        let first = add_item("Spanish", &word("perro", "dog"), &conn).unwrap();
        let second = add_item("Spanish", &word("perro", "dog"), &conn).unwrap();

        assert_eq!(first, second);
        assert_eq!(get_items_for_wordlist("Spanish", &conn).unwrap().len(), 1);
    }

    #[test]
    fn test_advance_day_moves_current_date() {
        let conn = test_conn();
        let before = get_current_date(&conn).unwrap();
        advance_day(&conn).unwrap();
        let after = get_current_date(&conn).unwrap();

        assert_eq!(after, before + Days::new(1));
    }

    #[test]
    fn test_items_become_due_as_days_pass() {
        let conn = test_conn();
        new_wordlist("Spanish", &conn).unwrap();
        let id = add_item("Spanish", &word("gato", "cat"), &conn).unwrap();

        // Schedule the item three days out
        let today = get_current_date(&conn).unwrap();
        let state = ReviewState {
            item_id: id,
            difficulty: 2.5,
            interval_days: 3,
            repetitions: 1,
            next_review_at: today + Days::new(3),
        };
        update_review_state(&state, &conn).unwrap();

        assert!(get_items_due_for_review("Spanish", &conn).unwrap().is_empty());

        advance_day(&conn).unwrap();
        advance_day(&conn).unwrap();
        assert!(get_items_due_for_review("Spanish", &conn).unwrap().is_empty());

        advance_day(&conn).unwrap();
        let due = get_items_due_for_review("Spanish", &conn).unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].2, state);
    }

    #[test]
    fn test_due_items_are_ordered_oldest_first() {
        let conn = test_conn();
        new_wordlist("Spanish", &conn).unwrap();
        let newer = add_item("Spanish", &word("uno", "one"), &conn).unwrap();
        let older = add_item("Spanish", &word("dos", "two"), &conn).unwrap();

        let today = get_current_date(&conn).unwrap();
        let overdue = ReviewState {
            item_id: older,
            difficulty: 2.5,
            interval_days: 1,
            repetitions: 1,
            next_review_at: today - Days::new(5),
        };
        update_review_state(&overdue, &conn).unwrap();

        let due = get_items_due_for_review("Spanish", &conn).unwrap();
        assert_eq!(due.len(), 2);
        assert_eq!(due[0].0, older);
        assert_eq!(due[1].0, newer);
    }

    #[test]
    fn test_load_library_groups_items_by_wordlist() {
        let conn = test_conn();
        new_wordlist("Spanish", &conn).unwrap();
        new_wordlist("French", &conn).unwrap();
        add_item("Spanish", &word("perro", "dog"), &conn).unwrap();
        add_item("Spanish", &word("gato", "cat"), &conn).unwrap();
        add_item("French", &word("chien", "dog"), &conn).unwrap();

        let library = load_library(&conn).unwrap();
        assert_eq!(library.wordlists.len(), 2);

        let spanish = library
            .wordlists
            .iter()
            .find(|w| w.name == "Spanish")
            .unwrap();
        assert_eq!(spanish.items.len(), 2);
    }

    #[test]
    fn test_item_kind_survives_storage() {
        let conn = test_conn();
        new_wordlist("Spanish", &conn).unwrap();
        let sentence = VocabItem {
            text: "el perro come".to_string(),
            meaning: "the dog eats".to_string(),
            kind: ItemKind::Sentence,
        };
        add_item("Spanish", &sentence, &conn).unwrap();

        let items = get_items_for_wordlist("Spanish", &conn).unwrap();
        assert_eq!(items[0].1.kind, ItemKind::Sentence);
    }
}
