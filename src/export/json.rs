//! JSON import/export module for wordlists.
//! Provides functionality to save and load Wordlist structures to/from JSON files.

use crate::models::Wordlist;
use std::fs::File;
use std::io::{Read, Write};

/// Exports a wordlist to a JSON file at the specified path.
/// Returns an error if file creation or writing fails.
pub fn export_json_to_path(
    wordlist: &Wordlist,
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_string = serde_json::to_string_pretty(wordlist)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    Ok(())
}

/// Imports a wordlist from a JSON file.
/// Returns an error if the file doesn't exist or contains invalid JSON.
pub fn import_json(filename: &str) -> Result<Wordlist, Box<dyn std::error::Error>> {
    let mut file = File::open(filename)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let wordlist: Wordlist = serde_json::from_str(&contents)?;

    println!("Wordlist '{}' imported from '{}'", wordlist.name, filename);
    Ok(wordlist)
}
