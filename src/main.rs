//! SMDB Browser - desktop client for the SMDB movie/series catalog
//! Filtering, sorting, favorites and genre statistics over a backend-served
//! entry list.

// Hide console window on Windows release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// Use mimalloc for faster memory allocation (Linux, macOS)
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

mod api;
mod catalog;
mod config;
mod favorites;
mod models;

#[cfg(test)]
mod app_tests;
#[cfg(test)]
mod favorites_tests;

use api::SmdbClient;
use catalog::{compose_view, count_by_medium, genre_stats, FilterState, SortOption, SortState};
use config::AppConfig;
use favorites::FavoritesLedger;
use models::{Entry, EntryId, FavoriteRecord, GenreStat, Medium, Tab, TopActor};

/// Get current time as HH:MM:SS (UTC)
fn timestamp_now() -> String {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let secs = now % 86400;
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Application icon: purple gradient tile with a clapperboard stripe
fn load_icon() -> egui::IconData {
    let size: usize = 64;
    let mut rgba = vec![0u8; size * size * 4];

    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) * 4;
            let nx = x as f32 / size as f32;
            let ny = y as f32 / size as f32;

            // Purple gradient background (#667eea to #764ba2)
            let t = nx * 0.5 + ny * 0.5;
            let mut r = (102.0 + (118.0 - 102.0) * t) as u8;
            let mut g = (126.0 + (75.0 - 126.0) * t) as u8;
            let mut b = (234.0 + (162.0 - 234.0) * t) as u8;

            // Clapperboard stripe across the top
            let in_stripe = ny >= 0.12 && ny <= 0.28;
            if in_stripe {
                let band = ((nx + ny) * 8.0) as usize % 2 == 0;
                let v = if band { 235 } else { 25 };
                r = v;
                g = v;
                b = v;
            }

            // Screen area below the stripe
            let in_screen = nx >= 0.15 && nx <= 0.85 && ny >= 0.36 && ny <= 0.82;
            if in_screen {
                r = 25;
                g = 25;
                b = 35;

                // Play triangle
                let px = nx - 0.42;
                let py = ny - 0.59;
                if px >= 0.0 && px <= 0.18 && py.abs() <= (0.18 - px) * 0.7 {
                    r = 240;
                    g = 240;
                    b = 245;
                }
            }

            rgba[idx] = r;
            rgba[idx + 1] = g;
            rgba[idx + 2] = b;
            rgba[idx + 3] = 255;
        }
    }

    egui::IconData {
        rgba,
        width: size as u32,
        height: size as u32,
    }
}

/// Background task messages
enum TaskResult {
    EntriesLoaded(Vec<Entry>),
    TopActorsLoaded(Vec<TopActor>),
    // Top-actor failures must not clear the catalog loading flag
    TopActorsError(String),
    Error(String),
}

fn main() -> Result<(), eframe::Error> {
    // Force X11 backend on Linux before any windowing code runs
    #[cfg(target_os = "linux")]
    {
        std::env::set_var("WINIT_UNIX_BACKEND", "x11");
        std::env::remove_var("WAYLAND_DISPLAY");
    }

    let icon = load_icon();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 680.0])
            .with_min_inner_size([860.0, 520.0])
            .with_icon(icon),
        vsync: true,
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        ..Default::default()
    };

    eframe::run_native(
        "SMDB Browser",
        options,
        Box::new(|cc| Ok(Box::new(SmdbApp::new(cc)))),
    )
}

struct SmdbApp {
    config: AppConfig,
    current_tab: Tab,

    // Catalog data, replaced wholesale on every load
    entries: Vec<Entry>,
    top_actors: Vec<TopActor>,
    genre_stats: Vec<GenreStat>,
    movie_count: usize,
    series_count: usize,

    // Derived-view parameters
    filters: FilterState,
    sort: SortState,

    favorites: FavoritesLedger,

    // UI state
    selected_entry: Option<EntryId>,
    backend_url_input: String,
    status_message: String,
    loading: bool,
    console_log: Vec<String>,

    // Background task channel
    task_receiver: Receiver<TaskResult>,
    task_sender: Sender<TaskResult>,
}

impl SmdbApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::load();

        if config.dark_mode {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
        } else {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
        }

        // Scale all text styles relative to the 12pt baseline
        if config.font_size != 12 {
            let scale = config.font_size as f32 / 12.0;
            let mut style = (*cc.egui_ctx.style()).clone();
            for font in style.text_styles.values_mut() {
                font.size *= scale;
            }
            cc.egui_ctx.set_style(style);
        }

        let (task_sender, task_receiver) = channel();
        let backend_url_input = config.backend_url.clone();

        let mut app = Self {
            config,
            current_tab: Tab::Browse,
            entries: Vec::new(),
            top_actors: Vec::new(),
            genre_stats: Vec::new(),
            movie_count: 0,
            series_count: 0,
            filters: FilterState::default(),
            sort: SortState::default(),
            favorites: FavoritesLedger::open(),
            selected_entry: None,
            backend_url_input,
            status_message: "Starting...".to_string(),
            loading: false,
            console_log: Vec::new(),
            task_receiver,
            task_sender,
        };

        app.log(&format!(
            "[INFO] SMDB Browser started - backend: {}",
            app.config.backend_url
        ));
        app.log(&format!(
            "[INFO] {} favorites loaded from disk",
            app.favorites.count()
        ));
        app.load_entries();
        app.load_top_actors();
        app
    }

    fn log(&mut self, message: &str) {
        let timestamp = timestamp_now();
        self.console_log.push(format!("[{}] {}", timestamp, message));
        // Keep last 500 lines
        if self.console_log.len() > 500 {
            self.console_log.remove(0);
        }
    }

    /// Fetch the catalog on a background thread. On failure the existing
    /// entry list is left untouched.
    fn load_entries(&mut self) {
        if self.loading {
            return;
        }
        self.loading = true;
        self.status_message = "Loading catalog...".to_string();

        let client = SmdbClient::new(&self.config.backend_url);
        let sender = self.task_sender.clone();
        thread::spawn(move || match client.fetch_entries() {
            Ok(entries) => {
                let _ = sender.send(TaskResult::EntriesLoaded(entries));
            }
            Err(e) => {
                let _ = sender.send(TaskResult::Error(format!("Catalog: {}", e)));
            }
        });
    }

    fn load_top_actors(&mut self) {
        let client = SmdbClient::new(&self.config.backend_url);
        let sender = self.task_sender.clone();
        thread::spawn(move || match client.fetch_top_actors() {
            Ok(actors) => {
                let _ = sender.send(TaskResult::TopActorsLoaded(actors));
            }
            Err(e) => {
                let _ = sender.send(TaskResult::TopActorsError(e));
            }
        });
    }

    fn reload(&mut self) {
        if self.backend_url_input != self.config.backend_url {
            self.config.backend_url = self.backend_url_input.clone();
            self.config.save();
            self.log(&format!(
                "[INFO] Backend URL changed to {}",
                self.config.backend_url
            ));
        }
        self.load_entries();
        self.load_top_actors();
    }

    fn toggle_favorite(&mut self, entry: &Entry) {
        let added = self.favorites.toggle(entry);
        self.status_message = if added {
            format!("Added '{}' to favorites", entry.title)
        } else {
            format!("Removed '{}' from favorites", entry.title)
        };
    }

    /// Reset filters and sorting to defaults, as one action. The
    /// favorites-only toggle is left alone.
    fn reset_filters(&mut self) {
        self.filters.reset();
        self.sort.reset();
        self.status_message = "Filters reset".to_string();
    }

    fn reset_sorting(&mut self) {
        self.sort.reset();
    }

    fn process_tasks(&mut self) {
        while let Ok(result) = self.task_receiver.try_recv() {
            match result {
                TaskResult::EntriesLoaded(entries) => {
                    self.movie_count = count_by_medium(&entries, Medium::Movie);
                    self.series_count = count_by_medium(&entries, Medium::Series);
                    self.genre_stats = genre_stats(&entries);
                    self.entries = entries;
                    self.loading = false;
                    self.status_message = format!("Loaded {} entries", self.entries.len());
                    self.log(&format!(
                        "[INFO] Loaded {} entries - Movies: {}, Series: {}",
                        self.entries.len(),
                        self.movie_count,
                        self.series_count
                    ));
                }
                TaskResult::TopActorsLoaded(actors) => {
                    self.log(&format!("[INFO] Loaded {} top actors", actors.len()));
                    self.top_actors = actors;
                }
                TaskResult::TopActorsError(msg) => {
                    self.log(&format!("[ERROR] Top actors: {}", msg));
                    self.status_message = format!("Error: Top actors: {}", msg);
                }
                TaskResult::Error(msg) => {
                    self.log(&format!("[ERROR] {}", msg));
                    self.loading = false;
                    self.status_message = format!("Error: {}", msg);
                }
            }
        }
    }

    fn show_browse_tab(&mut self, ui: &mut egui::Ui) {
        let sort_before = self.sort;

        // Filter and sort controls
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.filters.medium, Medium::Movie, "🎬 Movies");
            ui.selectable_value(&mut self.filters.medium, Medium::Series, "📺 Series");
            ui.separator();

            ui.add(
                egui::TextEdit::singleline(&mut self.filters.search_title)
                    .hint_text("Title starts with...")
                    .desired_width(150.0),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.filters.search_director)
                    .hint_text("Director starts with...")
                    .desired_width(150.0),
            );
            ui.checkbox(&mut self.filters.show_only_favorites, "⭐ Favorites only");

            ui.separator();
            let sort_text = match self.sort.selected {
                Some(option) => option.label(),
                None => "Default order",
            };
            egui::ComboBox::from_id_salt("sort_by")
                .selected_text(sort_text)
                .show_ui(ui, |ui| {
                    if ui
                        .selectable_label(self.sort.selected.is_none(), "Default order")
                        .clicked()
                    {
                        self.reset_sorting();
                    }
                    for option in SortOption::ALL {
                        ui.selectable_value(&mut self.sort.selected, Some(*option), option.label());
                    }
                });
            if ui
                .button(self.sort.order_icon())
                .on_hover_text(if self.sort.ascending {
                    "Ascending - click for descending"
                } else {
                    "Descending - click for ascending"
                })
                .clicked()
            {
                self.sort.toggle_order();
            }

            if ui.button("Reset").clicked() {
                self.reset_filters();
            }
        });
        if self.sort != sort_before {
            let key = self.sort.sort_key();
            self.log(&format!(
                "[INFO] Sort key: '{}'",
                if key.is_empty() { "(default order)" } else { key.as_str() }
            ));
        }
        ui.separator();

        self.show_detail_panel(ui);

        let view = compose_view(&self.entries, &self.filters, &self.sort, &self.favorites);
        let mut toggle_fav: Option<Entry> = None;
        let mut select: Option<EntryId> = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                if view.is_empty() {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.label(if self.entries.is_empty() {
                            "No entries loaded"
                        } else {
                            "No entries match the current filters"
                        });
                    });
                    return;
                }

                egui::Grid::new("entry_grid")
                    .num_columns(6)
                    .striped(true)
                    .min_col_width(60.0)
                    .show(ui, |ui| {
                        ui.label("");
                        ui.strong("Title");
                        ui.strong("Director");
                        ui.strong("Released");
                        ui.strong("Genre");
                        ui.strong("IMDb");
                        ui.end_row();

                        for entry in &view {
                            let is_fav = self.favorites.is_favorite(entry);
                            let fav_text = if is_fav {
                                egui::RichText::new("★").size(16.0).color(egui::Color32::GOLD)
                            } else {
                                egui::RichText::new("☆").size(16.0).color(egui::Color32::GRAY)
                            };
                            if ui
                                .button(fav_text)
                                .on_hover_text(if is_fav {
                                    "Remove from favorites"
                                } else {
                                    "Add to favorites"
                                })
                                .clicked()
                            {
                                toggle_fav = Some(entry.clone());
                            }

                            let id = entry.id();
                            let selected = self.selected_entry.as_ref() == Some(&id);
                            if ui.selectable_label(selected, &entry.title).clicked() {
                                select = Some(id);
                            }
                            ui.label(entry.director.as_deref().unwrap_or("-"));
                            ui.label(&entry.release_date);
                            ui.label(entry.genre.as_deref().unwrap_or(catalog::UNKNOWN_GENRE));
                            ui.label(entry.imdb_rating.as_deref().unwrap_or("-"));
                            ui.end_row();
                        }
                    });
            });

        if let Some(entry) = toggle_fav {
            self.toggle_favorite(&entry);
        }
        if let Some(id) = select {
            // Clicking the selected row again closes the detail view
            if self.selected_entry.as_ref() == Some(&id) {
                self.selected_entry = None;
            } else {
                self.selected_entry = Some(id);
            }
        }
    }

    fn show_detail_panel(&mut self, ui: &mut egui::Ui) {
        let selected = match self.selected_entry.clone() {
            Some(id) => id,
            None => return,
        };
        let entry = match self.entries.iter().find(|e| e.id() == selected) {
            Some(entry) => entry.clone(),
            None => {
                // Entry vanished on reload
                self.selected_entry = None;
                return;
            }
        };

        ui.horizontal(|ui| {
            ui.heading(&entry.title);
            ui.label(format!("({})", entry.medium.label()));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("✖").clicked() {
                    self.selected_entry = None;
                }
            });
        });
        if let Some(descr) = &entry.descr {
            ui.label(descr);
        }
        egui::Grid::new("detail_grid").num_columns(2).show(ui, |ui| {
            if let Some(director) = &entry.director {
                ui.strong("Director");
                ui.label(director);
                ui.end_row();
            }
            if let Some(actor) = &entry.actor {
                ui.strong("Starring");
                ui.label(actor);
                ui.end_row();
            }
            if let Some(category) = &entry.category {
                ui.strong("Category");
                ui.label(category);
                ui.end_row();
            }
            ui.strong("Released");
            ui.label(&entry.release_date);
            ui.end_row();
        });
        ui.horizontal(|ui| {
            if let Some(stream) = &entry.stream_link {
                ui.hyperlink_to("▶ Stream", stream);
            }
            if let Some(trailer) = &entry.trailer_link {
                ui.hyperlink_to("🎬 Trailer", trailer);
            }
            if let Some(img) = &entry.img {
                ui.hyperlink_to("🖼 Poster", img);
            }
        });
        ui.separator();
    }

    fn show_favorites_tab(&mut self, ui: &mut egui::Ui) {
        ui.heading(format!("⭐ Favorites ({})", self.favorites.count()));
        ui.separator();

        if self.favorites.count() == 0 {
            ui.label("No favorites yet - star entries in the browse tab");
            return;
        }

        let records: Vec<FavoriteRecord> = self.favorites.records().to_vec();
        let mut remove: Option<EntryId> = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                egui::Grid::new("favorites_grid")
                    .num_columns(6)
                    .striped(true)
                    .min_col_width(60.0)
                    .show(ui, |ui| {
                        ui.label("");
                        ui.strong("Title");
                        ui.strong("Type");
                        ui.strong("Director");
                        ui.strong("Released");
                        ui.strong("IMDb");
                        ui.end_row();

                        for record in &records {
                            let star = egui::RichText::new("★").size(16.0).color(egui::Color32::GOLD);
                            if ui.button(star).on_hover_text("Remove from favorites").clicked() {
                                remove = Some(record.id());
                            }
                            ui.label(&record.title);
                            ui.label(record.medium.label());
                            ui.label(record.director.as_deref().unwrap_or("-"));
                            ui.label(&record.release_date);
                            ui.label(record.imdb_rating.as_deref().unwrap_or("-"));
                            ui.end_row();
                        }
                    });
            });

        if let Some(id) = remove {
            if self.favorites.remove(&id) {
                self.status_message = format!("Removed '{}' from favorites", id.title);
            }
        }
    }

    fn show_stats_tab(&mut self, ui: &mut egui::Ui) {
        ui.heading("📊 Catalog statistics");
        ui.separator();

        ui.horizontal(|ui| {
            ui.label(format!("🎬 {} movies", self.movie_count));
            ui.separator();
            ui.label(format!("📺 {} series", self.series_count));
            ui.separator();
            ui.label(format!("⭐ {} favorites", self.favorites.count()));
        });
        ui.add_space(12.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.strong("Genres");
                if self.genre_stats.is_empty() {
                    ui.label("No entries loaded");
                } else {
                    for stat in &self.genre_stats {
                        ui.horizontal(|ui| {
                            ui.add_sized([120.0, 18.0], egui::Label::new(&stat.name));
                            ui.add(
                                egui::ProgressBar::new(stat.percent as f32 / 100.0)
                                    .desired_width(240.0)
                                    .text(format!("{} ({}%)", stat.count, stat.percent)),
                            );
                        });
                    }
                }

                ui.add_space(12.0);
                ui.strong("Top actors");
                if self.top_actors.is_empty() {
                    ui.label("No actor data loaded");
                } else {
                    egui::Grid::new("actors_grid")
                        .num_columns(2)
                        .striped(true)
                        .min_col_width(120.0)
                        .show(ui, |ui| {
                            ui.strong("Actor");
                            ui.strong("Appearances");
                            ui.end_row();
                            for actor in &self.top_actors {
                                ui.label(&actor.name);
                                ui.label(actor.appearances.to_string());
                                ui.end_row();
                            }
                        });
                }
            });
    }

    fn show_console_tab(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("🖥 Console");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Clear").clicked() {
                    self.console_log.clear();
                }
            });
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in &self.console_log {
                    ui.monospace(line);
                }
            });
    }
}

impl eframe::App for SmdbApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Process background task results (non-blocking)
        self.process_tasks();
        if self.loading {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("🎬 SMDB");
                ui.separator();
                ui.label("Backend:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.backend_url_input).desired_width(280.0),
                );
                if ui
                    .add_enabled(!self.loading, egui::Button::new("⟳ Reload"))
                    .clicked()
                {
                    self.reload();
                }
                if self.loading {
                    ui.spinner();
                }
            });
        });

        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!(
                        "{} movies | {} series | {} favorites",
                        self.movie_count,
                        self.series_count,
                        self.favorites.count()
                    ));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            // Tab bar
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.current_tab, Tab::Browse, "🎬 BROWSE");
                ui.selectable_value(&mut self.current_tab, Tab::Favorites, "⭐ FAVORITES");
                ui.selectable_value(&mut self.current_tab, Tab::Stats, "📊 STATS");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.selectable_value(&mut self.current_tab, Tab::Console, "🖥 CONSOLE");
                });
            });
            ui.separator();

            match self.current_tab {
                Tab::Browse => self.show_browse_tab(ui),
                Tab::Favorites => self.show_favorites_tab(ui),
                Tab::Stats => self.show_stats_tab(ui),
                Tab::Console => self.show_console_tab(ui),
            }
        });
    }
}
