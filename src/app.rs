//! Main application UI and state management.
//! Handles the vocabulary trainer interface, wordlist management, and review sessions.

use vocab_app::database::db;
use vocab_app::export::json::{export_json_to_path, import_json};
use vocab_app::models::{ItemKind, Library, ReviewSession, SentenceBuilder, VocabItem, Wordlist};
use chrono::NaiveDate;
use eframe::egui;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Application screen states
#[derive(Default)]
enum AppScreen {
    #[default]
    Main,
    ReviewSession,
}

/// Main application state
#[derive(Default)]
pub struct MyApp {
    show_confirmation_dialog: bool,
    allowed_to_close: bool,
    library: Library,
    selected_list_index: Option<usize>,
    current_text: String,
    current_meaning: String,
    current_kind: ItemKind,
    new_list_name: String,
    conn: Option<Arc<Mutex<Connection>>>,

    current_screen: AppScreen,
    review_session: Option<ReviewSession>,
    // Board for the sentence item currently under review, if any
    builder: Option<SentenceBuilder>,

    current_date_display: String,

    show_export_dialog: bool,
    show_import_result_dialog: bool,
    import_result_message: String,
}

/// Formats a date as YYYY-MM-DD string
fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl eframe::App for MyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.current_screen {
            AppScreen::Main => self.render_main_screen(ctx),
            AppScreen::ReviewSession => self.render_review_screen(ctx),
        }

        // Handle window close requests with confirmation dialog
        if ctx.input(|i| i.viewport().close_requested()) {
            if self.allowed_to_close {
                // Allow close
            } else {
                ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
                self.show_confirmation_dialog = true;
            }
        }

        if self.show_confirmation_dialog {
            egui::Window::new("Do you want to quit?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("No").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = false;
                        }

                        if ui.button("Yes").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = true;
                            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
        }
        // exporting a wordlist
        if self.show_export_dialog {
            let mut export_list_index: Option<usize> = None;
            let mut should_cancel = false;

            egui::Window::new("Export Wordlist")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label("Select a wordlist to export:");
                    ui.separator();

                    for (i, wordlist) in self.library.wordlists.iter().enumerate() {
                        if ui
                            .button(format!(
                                "{} ({} items)",
                                wordlist.name,
                                wordlist.items.len()
                            ))
                            .clicked()
                        {
                            export_list_index = Some(i);
                        }
                    }

                    ui.separator();

                    if ui.button("Cancel").clicked() {
                        should_cancel = true;
                    }
                });

            if let Some(i) = export_list_index {
                self.handle_export(i);
            }
            if should_cancel {
                self.show_export_dialog = false;
            }
        }

        if self.show_import_result_dialog {
            egui::Window::new("Import/Export Result")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&self.import_result_message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.show_import_result_dialog = false;
                    }
                });
        }
    }
}

impl MyApp {
    /// Creates a new application instance with wordlists loaded from database
    pub fn new_with_library(library: Library, conn: Connection) -> Self {
        let current_date = db::get_current_date(&conn)
            .map(format_date)
            .unwrap_or_else(|_| "Unknown".to_string());
        let has_lists = !library.wordlists.is_empty();
        Self {
            library,
            selected_list_index: if has_lists { Some(0) } else { None },
            current_text: String::new(),
            current_meaning: String::new(),
            current_kind: ItemKind::Word,
            new_list_name: String::new(),
            show_confirmation_dialog: false,
            allowed_to_close: false,
            conn: Some(Arc::new(Mutex::new(conn))),
            current_screen: AppScreen::Main,
            review_session: None,
            builder: None,
            current_date_display: current_date,
            show_export_dialog: false,
            show_import_result_dialog: false,
            import_result_message: String::new(),
        }
    }

    /// Renders the main screen with wordlist management interface
    fn render_main_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                // Fetch and display current date from database
                if let Some(conn) = &self.conn {
                    if let Ok(conn_guard) = conn.lock() {
                        if let Ok(current_date) = db::get_current_date(&conn_guard) {
                            self.current_date_display = format_date(current_date);
                        }
                    }
                }
                ui.label(format!("{}", self.current_date_display));

                if ui.button("Next Day").clicked() {
                    if let Some(conn) = &self.conn {
                        let conn = conn.lock().unwrap();
                        let _ = db::advance_day(&conn);
                        if let Ok(current_date) = db::get_current_date(&conn) {
                            self.current_date_display = format_date(current_date);
                        }
                    }
                }
            });
            ui.separator();

            // Import/Export buttons
            ui.horizontal(|ui| {
                if ui.button("Export Wordlist").clicked() {
                    self.show_export_dialog = true;
                }
                if ui.button("Import Wordlist").clicked() {
                    self.handle_import();
                }
            });

            ui.separator();

            // Wordlist creation section
            ui.heading("Create New Wordlist");
            ui.horizontal(|ui| {
                ui.label("Wordlist name:");
                ui.text_edit_singleline(&mut self.new_list_name);
                if ui.button("Create Wordlist").clicked() {
                    if !self.new_list_name.is_empty() {
                        self.library.wordlists.push(Wordlist {
                            name: self.new_list_name.clone(),
                            items: Vec::new(),
                        });

                        // Save to database
                        if let Some(conn) = &self.conn {
                            let conn = conn.lock().unwrap();
                            let _ = db::new_wordlist(&self.new_list_name, &conn);
                        }

                        self.new_list_name.clear();
                    }
                }
            });

            ui.separator();

            ui.heading(format!("Wordlists ({})", self.library.wordlists.len()));

            // We store actions to execute after UI rendering to avoid borrowing conflicts
            let mut action_select: Option<usize> = None;
            let mut action_review: Option<usize> = None;

            egui::ScrollArea::vertical()
                .id_source("wordlists_list")
                .max_height(150.0)
                .show(ui, |ui| {
                    for (i, wordlist) in self.library.wordlists.iter().enumerate() {
                        let is_selected = self.selected_list_index == Some(i);

                        ui.horizontal(|ui| {
                            if ui
                                .selectable_label(
                                    is_selected,
                                    format!(
                                        "{}. {} ({} items)",
                                        i + 1,
                                        wordlist.name,
                                        wordlist.items.len()
                                    ),
                                )
                                .clicked()
                            {
                                action_select = Some(i);
                            }

                            if ui.button("Review").clicked() {
                                action_review = Some(i);
                            }
                        });
                    }
                });

            // Execute deferred actions
            if let Some(i) = action_select {
                self.selected_list_index = Some(i);
            }
            if let Some(i) = action_review {
                self.start_review_session(i);
            }

            ui.separator();

            // Item management for selected wordlist
            if let Some(list_index) = self.selected_list_index {
                if let Some(current_list) = self.library.wordlists.get_mut(list_index) {
                    ui.heading(format!("Selected Wordlist: {}", current_list.name));

                    egui::ComboBox::from_label("Kind")
                        .selected_text(match self.current_kind {
                            ItemKind::Word => "Word",
                            ItemKind::Sentence => "Sentence",
                        })
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut self.current_kind, ItemKind::Word, "Word");
                            ui.selectable_value(
                                &mut self.current_kind,
                                ItemKind::Sentence,
                                "Sentence",
                            );
                        });

                    ui.horizontal(|ui| {
                        ui.label("Text:");
                        ui.text_edit_singleline(&mut self.current_text);
                    });

                    ui.horizontal(|ui| {
                        ui.label("Meaning:");
                        ui.text_edit_singleline(&mut self.current_meaning);
                    });
                    if ui.button("Add Item").clicked() {
                        if !self.current_text.is_empty() && !self.current_meaning.is_empty() {
                            let item = VocabItem {
                                text: self.current_text.clone(),
                                meaning: self.current_meaning.clone(),
                                kind: self.current_kind,
                            };
                            current_list.items.push(item.clone());
                            // Save to database with fresh scheduling state
                            if let Some(conn) = &self.conn {
                                let conn = conn.lock().unwrap();
                                let _ = db::add_item(&current_list.name, &item, &conn);
                            }
                            self.current_text.clear();
                            self.current_meaning.clear();
                        }
                    }

                    ui.separator();

                    ui.heading(format!("Items ({})", current_list.items.len()));

                    egui::ScrollArea::vertical()
                        .id_source("items_list")
                        .max_height(200.0)
                        .show(ui, |ui| {
                            for (i, item) in current_list.items.iter().enumerate() {
                                ui.group(|ui| {
                                    ui.label(format!(
                                        "{}. [{}] {}",
                                        i + 1,
                                        item.kind.as_str(),
                                        item.text
                                    ));
                                    ui.label(format!("   Meaning: {}", item.meaning));
                                });
                            }
                        });
                }
            } else {
                ui.label("Select a wordlist to add items");
            }
        });
    }

    /// Renders the review session screen: term/meaning cards for words,
    /// the sentence-builder board for sentences
    fn render_review_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(session) = &mut self.review_session {
                ui.heading(format!("Reviewing: {}", session.wordlist_name));

                ui.label(session.phase_message());

                ui.label(format!(
                    "Progress: {} / {} recalled ({} remaining)",
                    session.recalled_count(),
                    session.total_count(),
                    session.remaining_count()
                ));

                ui.add_space(20.0);

                if session.is_completed() {
                    ui.heading("Congratulations!");
                    ui.label("You've reviewed everything that was due!");

                    ui.add_space(20.0);

                    if ui.button("Back to Main Screen").clicked() {
                        self.current_screen = AppScreen::Main;
                        self.review_session = None;
                        self.builder = None;
                    }
                } else if let Some(study_item) = session.current_item() {
                    // Clone values to avoid borrowing issues
                    let show_meaning = session.show_meaning;
                    let is_recalled = study_item.is_recalled;
                    let kind = study_item.item.kind;
                    let text = study_item.item.text.clone();
                    let meaning = study_item.item.meaning.clone();

                    // Store actions to execute after UI rendering
                    let mut action_toggle_meaning = false;
                    let mut action_grade: Option<i32> = None;
                    let mut action_pick: Option<usize> = None;
                    let mut action_back = false;

                    match kind {
                        ItemKind::Word => {
                            ui.group(|ui| {
                                ui.set_min_height(200.0);
                                ui.vertical_centered(|ui| {
                                    ui.add_space(20.0);

                                    ui.heading("Term:");
                                    ui.label(&text);

                                    ui.add_space(20.0);

                                    if show_meaning {
                                        ui.heading("Meaning:");
                                        ui.label(&meaning);
                                    } else {
                                        ui.label("(Click 'Show Meaning' to reveal)");
                                    }

                                    ui.add_space(20.0);
                                });
                            });

                            ui.add_space(20.0);

                            if !show_meaning {
                                if ui.button("Show Meaning").clicked() {
                                    action_toggle_meaning = true;
                                }
                            }

                            // Quality rating buttons (0-5) - only show after revealing the meaning
                            if show_meaning && !is_recalled {
                                ui.label("Rate your response:");
                                ui.horizontal(|ui| {
                                    if ui.button("0 - Blackout").clicked() {
                                        action_grade = Some(0);
                                    }
                                    if ui.button("1 - Wrong").clicked() {
                                        action_grade = Some(1);
                                    }
                                    if ui.button("2 - Wrong (familiar)").clicked() {
                                        action_grade = Some(2);
                                    }
                                });
                                ui.horizontal(|ui| {
                                    if ui.button("3 - Difficult").clicked() {
                                        action_grade = Some(3);
                                    }
                                    if ui.button("4 - Correct").clicked() {
                                        action_grade = Some(4);
                                    }
                                    if ui.button("5 - Perfect").clicked() {
                                        action_grade = Some(5);
                                    }
                                });
                            }
                        }
                        ItemKind::Sentence => {
                            // Lazily set up the board for this sentence
                            if self.builder.is_none() {
                                self.builder = Some(SentenceBuilder::new(&text));
                            }
                            let builder = self.builder.as_ref().unwrap();

                            ui.group(|ui| {
                                ui.set_min_height(200.0);
                                ui.vertical_centered(|ui| {
                                    ui.add_space(20.0);

                                    ui.heading("Rebuild the sentence:");
                                    ui.label(&meaning);

                                    ui.add_space(20.0);

                                    let progress = builder.progress();
                                    if progress.is_empty() {
                                        ui.label("(Pick the first word below)");
                                    } else {
                                        ui.label(progress);
                                    }

                                    ui.add_space(20.0);
                                });
                            });

                            ui.add_space(10.0);

                            if builder.is_complete() {
                                ui.label(format!(
                                    "Sentence rebuilt with {} mistake(s)!",
                                    builder.mistakes
                                ));
                                if ui.button("Continue").clicked() {
                                    action_grade = Some(builder.suggested_quality());
                                }
                            } else {
                                ui.label(format!("Mistakes: {}", builder.mistakes));
                                ui.horizontal_wrapped(|ui| {
                                    for (i, token) in builder.bank.iter().enumerate() {
                                        if ui.button(token.as_str()).clicked() {
                                            action_pick = Some(i);
                                        }
                                    }
                                });

                                ui.add_space(10.0);

                                if ui.button("Give Up").clicked() {
                                    action_grade = Some(SentenceBuilder::ABANDONED_QUALITY);
                                }
                            }
                        }
                    }

                    ui.add_space(20.0);

                    if ui.button("Back to Main Screen").clicked() {
                        action_back = true;
                    }

                    // Execute deferred actions
                    if action_toggle_meaning {
                        session.toggle_meaning();
                    }
                    if let Some(i) = action_pick {
                        if let Some(builder) = &mut self.builder {
                            builder.pick(i);
                        }
                    }
                    if let Some(quality) = action_grade {
                        session.grade_current_item(quality);
                        // After grading, move to next item and drop any board
                        session.next_item();
                        self.builder = None;
                    }
                    if action_back {
                        self.current_screen = AppScreen::Main;
                        self.review_session = None;
                        self.builder = None;
                    }
                }
            }
        });
    }

    /// Starts a review session with items due for review
    fn start_review_session(&mut self, list_index: usize) {
        if let Some(wordlist) = self.library.wordlists.get(list_index) {
            if let Some(conn) = &self.conn {
                let conn_guard = conn.lock().unwrap();

                // Fetch only items due for review today
                let due_items = db::get_items_due_for_review(&wordlist.name, &conn_guard)
                    .unwrap_or_default();

                drop(conn_guard);

                if !due_items.is_empty() {
                    self.review_session = Some(ReviewSession::new_from_due_items(
                        wordlist.name.clone(),
                        due_items,
                        Arc::clone(self.conn.as_ref().unwrap()),
                    ));
                    self.builder = None;
                    self.current_screen = AppScreen::ReviewSession;
                }
            }
        }
    }

    /// Handles wordlist export to JSON file
    fn handle_export(&mut self, list_index: usize) {
        if let Some(wordlist) = self.library.wordlists.get(list_index) {
            // Open file save dialog
            if let Some(path) = rfd::FileDialog::new()
                .set_file_name(format!("{}.json", wordlist.name))
                .add_filter("JSON files", &["json"])
                .save_file()
            {
                match export_json_to_path(wordlist, path.to_str().unwrap()) {
                    Ok(_) => {
                        self.import_result_message =
                            format!("Wordlist '{}' exported successfully!", wordlist.name);
                        self.show_import_result_dialog = true;
                    }
                    Err(e) => {
                        self.import_result_message = format!("Export failed: {}", e);
                        self.show_import_result_dialog = true;
                    }
                }
            }
        }
        self.show_export_dialog = false;
    }

    /// Handles wordlist import from JSON file
    fn handle_import(&mut self) {
        // Open file selection dialog
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        {
            match import_json(path.to_str().unwrap()) {
                Ok(wordlist) => {
                    // Check if a wordlist with this name already exists
                    if self
                        .library
                        .wordlists
                        .iter()
                        .any(|w| w.name == wordlist.name)
                    {
                        self.import_result_message = format!(
                            "Wordlist '{}' already exists! Please rename it in the JSON file.",
                            wordlist.name
                        );
                        self.show_import_result_dialog = true;
                        return;
                    }

                    // Add wordlist to database
                    if let Some(conn) = &self.conn {
                        let conn_guard = conn.lock().unwrap();

                        if let Err(e) = db::new_wordlist(&wordlist.name, &conn_guard) {
                            self.import_result_message =
                                format!("Failed to create wordlist: {}", e);
                            self.show_import_result_dialog = true;
                            return;
                        }

                        // Add items with fresh scheduling state
                        for item in &wordlist.items {
                            if let Err(e) = db::add_item(&wordlist.name, item, &conn_guard) {
                                self.import_result_message =
                                    format!("Failed to import item '{}': {}", item.text, e);
                                self.show_import_result_dialog = true;
                                return;
                            }
                        }

                        drop(conn_guard);
                    }

                    // Add to in-memory Library
                    self.library.wordlists.push(wordlist.clone());

                    self.import_result_message = format!(
                        "Wordlist '{}' imported successfully with {} items!",
                        wordlist.name,
                        wordlist.items.len()
                    );
                    self.show_import_result_dialog = true;
                }
                Err(e) => {
                    self.import_result_message = format!(
                        "Import failed: {}\n\nPlease check if the file has correct structure:\n{{\n  \"name\": \"Wordlist Name\",\n  \"items\": [...]\n}}",
                        e
                    );
                    self.show_import_result_dialog = true;
                }
            }
        }
    }
}
