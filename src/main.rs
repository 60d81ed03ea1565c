mod app;
use vocab_app::*;

use app::MyApp;
use database::db::{get_all_wordlists, init_database, load_library, new_wordlist};
use models::ItemKind;

fn main() -> eframe::Result<()> {
    let conn = init_database().expect("Failed to initialize database");

    if get_all_wordlists(&conn).unwrap_or_default().is_empty() {
        let _ = new_wordlist("Spanish Basics", &conn);

        let samples = [
            ("perro", "dog", ItemKind::Word),
            ("gato", "cat", ItemKind::Word),
            ("gracias", "thank you", ItemKind::Word),
            ("el perro come pan", "the dog eats bread", ItemKind::Sentence),
        ];
        for (text, meaning, kind) in samples {
            let item = VocabItem {
                text: text.to_string(),
                meaning: meaning.to_string(),
                kind,
            };
            let _ = database::db::add_item("Spanish Basics", &item, &conn);
        }

        println!("Sample data created!");
    }

    let library = load_library(&conn).expect("Failed to load wordlists from database");

    println!("Loaded {} wordlists from database", library.wordlists.len());
    for wordlist in &library.wordlists {
        println!("  - {} ({} items)", wordlist.name, wordlist.items.len());
    }
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([500.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Vocabulary Trainer",
        options,
        Box::new(|_cc| Ok(Box::new(MyApp::new_with_library(library, conn)))),
    )
}
