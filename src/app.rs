//! Main application UI.
//! Browsing and flipping cards, favorites, and the review screen that rates due cards.

use chrono::Utc;
use eframe::egui;
use knowledge_cards::catalog::CatalogLoader;
use knowledge_cards::config::AppConfig;
use knowledge_cards::database::{KeyValueStore, MemoryStore, SqliteStore};
use knowledge_cards::i18n::{self, t};
use knowledge_cards::models::card::resolve_content_or_fallback;
use knowledge_cards::models::{Card, Locale, ReviewScore};
use knowledge_cards::store::{CardStore, PersistedState, spawn_rehydration};
use std::collections::{BTreeSet, HashSet};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

/// Application screen states
#[derive(Default, PartialEq, Eq, Clone, Copy)]
enum AppScreen {
    #[default]
    Cards,
    Review,
}

/// Actions collected while drawing and applied afterwards, to avoid borrowing the store twice
enum CardAction {
    Flip(String),
    ToggleFavorite(String),
    Rate(String, ReviewScore),
}

pub struct KnowledgeCardsApp {
    store: CardStore,
    catalog: CatalogLoader,
    rehydration: Option<Receiver<PersistedState>>,
    current_screen: AppScreen,
    /// Cards on the browse screen currently showing their answer
    flipped: HashSet<String>,
    review_index: usize,
    review_show_answer: bool,
    load_error: Option<String>,
}

impl KnowledgeCardsApp {
    /// Opens storage, starts rehydration in the background and loads the catalog
    pub fn new(config: AppConfig) -> Self {
        let (storage, rehydration) = match &config.database_path {
            Some(path) => match SqliteStore::open(path) {
                Ok(store) => {
                    log::info!("Using storage at {:?}", path);
                    (
                        Box::new(store) as Box<dyn KeyValueStore>,
                        Some(spawn_rehydration(path.clone())),
                    )
                }
                Err(e) => {
                    log::warn!("Storage unavailable ({}), progress will not be saved", e);
                    (Box::new(MemoryStore::new()) as Box<dyn KeyValueStore>, None)
                }
            },
            None => {
                log::info!("Running with in-memory storage");
                (Box::new(MemoryStore::new()) as Box<dyn KeyValueStore>, None)
            }
        };

        let mut store = CardStore::new(storage);
        store.set_locale(config.locale);
        if rehydration.is_none() {
            store.rehydrate();
        }

        let mut app = Self {
            store,
            catalog: CatalogLoader::new(config.catalog_path),
            rehydration,
            current_screen: AppScreen::Cards,
            flipped: HashSet::new(),
            review_index: 0,
            review_show_answer: false,
            load_error: None,
        };
        app.reload_catalog(false);
        app
    }

    fn reload_catalog(&mut self, force_refresh: bool) {
        let result = self
            .catalog
            .load(force_refresh, self.store.storage(), Utc::now());
        if let Some(backup) = self.catalog.take_backup() {
            self.store.queue_catalog_backup(backup);
        }
        match result {
            Ok(cards) => {
                self.store.set_cards(cards);
                self.load_error = None;
            }
            Err(e) => {
                log::error!("Catalog unavailable: {}", e);
                self.load_error = Some(e.to_string());
            }
        }
        self.flipped.clear();
        self.review_index = 0;
        self.review_show_answer = false;
    }

    fn handle_open_catalog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        {
            self.catalog.set_path(path);
            self.reload_catalog(true);
        }
    }

    /// Applies the background rehydration result once it arrives
    fn poll_rehydration(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.rehydration else {
            return;
        };
        match rx.try_recv() {
            Ok(state) => {
                self.store.apply_rehydration(state);
                self.rehydration = None;
            }
            Err(TryRecvError::Empty) => {
                ctx.request_repaint_after(Duration::from_millis(50));
            }
            Err(TryRecvError::Disconnected) => {
                log::warn!("Rehydration thread ended without a result");
                self.store.apply_rehydration(PersistedState::default());
                self.rehydration = None;
            }
        }
    }

    fn apply(&mut self, action: CardAction) {
        match action {
            CardAction::Flip(id) => {
                if !self.flipped.remove(&id) {
                    self.flipped.insert(id);
                }
            }
            CardAction::ToggleFavorite(id) => {
                self.store.toggle_favorite(&id);
            }
            CardAction::Rate(id, score) => {
                if let Err(e) = self.store.mark_reviewed(&id, score.value()) {
                    log::error!("Rating rejected for '{}': {}", id, e);
                }
            }
        }
    }

    /// Navigation bar with screen tabs, locale switcher and catalog controls
    fn render_nav(&mut self, ctx: &egui::Context) {
        let locale = self.store.locale();
        let mut new_locale = None;
        let mut open_catalog = false;
        let mut reload = false;

        egui::TopBottomPanel::top("nav").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.current_screen, AppScreen::Cards, t(&i18n::nav::CARDS, locale));
                ui.selectable_value(&mut self.current_screen, AppScreen::Review, t(&i18n::nav::REVIEW, locale));

                ui.separator();

                for candidate in Locale::ALL {
                    if ui
                        .selectable_label(candidate == locale, candidate.native_name())
                        .clicked()
                    {
                        new_locale = Some(candidate);
                    }
                }

                ui.separator();

                if ui.button(t(&i18n::nav::OPEN_CATALOG, locale)).clicked() {
                    open_catalog = true;
                }
                if ui.button(t(&i18n::nav::RELOAD, locale)).clicked() {
                    reload = true;
                }
            });
        });

        if let Some(l) = new_locale {
            self.store.set_locale(l);
        }
        if open_catalog {
            self.handle_open_catalog();
        }
        if reload {
            self.reload_catalog(true);
        }
    }

    fn render_stats(&self, ctx: &egui::Context) {
        let locale = self.store.locale();
        let stats = self.store.stats();

        egui::TopBottomPanel::bottom("stats").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{}: {}", t(&i18n::stats::TOTAL, locale), stats.total));
                ui.separator();
                ui.label(format!("{}: {}", t(&i18n::stats::REVIEWED, locale), stats.reviewed));
                ui.separator();
                ui.label(format!("{}: {}", t(&i18n::stats::NEED_WORK, locale), stats.need_work));
                ui.separator();
                ui.label(format!("{}: {}", t(&i18n::stats::PENDING, locale), stats.due));

                if !self.store.is_hydrated() {
                    ui.separator();
                    ui.spinner();
                    ui.label(t(&i18n::loading::LOADING_PROGRESS, locale));
                }
            });
        });
    }

    /// Renders every card with flip, favorite and rating controls
    fn render_cards_screen(&mut self, ctx: &egui::Context) {
        let locale = self.store.locale();
        let mut actions = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(t(&i18n::cards_page::TITLE, locale));
            self.render_load_error(ui, locale);

            let categories: BTreeSet<&str> =
                self.store.cards().iter().map(|c| c.category.as_str()).collect();
            ui.label(format!(
                "{}: {}   {}: {}",
                t(&i18n::cards_page::TOTAL_CARDS, locale),
                self.store.cards().len(),
                t(&i18n::cards_page::CATEGORIES, locale),
                categories.len()
            ));
            ui.separator();

            if self.store.cards().is_empty() {
                ui.label(t(&i18n::cards_page::NO_CARDS, locale));
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                for card in self.store.cards() {
                    let flipped = self.flipped.contains(&card.id);
                    ui.push_id(&card.id, |ui| {
                        self.render_card(ui, card, flipped, &mut actions);
                    });
                    ui.add_space(8.0);
                }
            });
        });

        for action in actions {
            self.apply(action);
        }
    }

    /// Shows due cards one at a time; rating "good" or "easy" removes a card from the list
    fn render_review_screen(&mut self, ctx: &egui::Context) {
        let locale = self.store.locale();
        let mut actions = Vec::new();
        let mut step: isize = 0;
        let mut toggle_answer = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(t(&i18n::review_page::TITLE, locale));
            ui.label(t(&i18n::review_page::SUBTITLE, locale));
            self.render_load_error(ui, locale);
            ui.separator();

            let due = self.store.due_cards();
            if due.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.heading(t(&i18n::review_page::ALL_CAUGHT_UP, locale));
                    ui.label(t(&i18n::review_page::CONGRATS, locale));
                });
                return;
            }

            let index = self.review_index % due.len();
            let card = due[index];
            ui.label(format!(
                "{} / {}  ({} {})",
                index + 1,
                due.len(),
                due.len(),
                t(&i18n::review_page::CARDS_TO_REVIEW, locale)
            ));
            ui.add_space(10.0);

            ui.group(|ui| {
                ui.set_min_height(200.0);
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    match resolve_content_or_fallback(card, locale) {
                        Some(content) => {
                            ui.heading(t(&i18n::card::QUESTION, locale));
                            ui.label(&content.question);
                            ui.add_space(20.0);
                            if self.review_show_answer {
                                ui.heading(t(&i18n::card::ANSWER, locale));
                                ui.label(&content.answer);
                            }
                        }
                        None => {
                            ui.label(t(&i18n::card::MISSING_CONTENT, locale));
                        }
                    }
                    ui.add_space(20.0);
                });
            });

            ui.add_space(10.0);

            let flip_label = if self.review_show_answer {
                &i18n::card::SHOW_QUESTION
            } else {
                &i18n::card::SHOW_ANSWER
            };
            if ui.button(t(flip_label, locale)).clicked() {
                toggle_answer = true;
            }

            if self.review_show_answer {
                self.render_rating_buttons(ui, card, &mut actions);
            }

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button(t(&i18n::review_page::PREVIOUS, locale)).clicked() {
                    step = -1;
                }
                if ui.button(t(&i18n::review_page::NEXT, locale)).clicked() {
                    step = 1;
                }
            });
        });

        if toggle_answer {
            self.review_show_answer = !self.review_show_answer;
        }

        let rated_hard = actions
            .iter()
            .any(|a| matches!(a, CardAction::Rate(_, ReviewScore::Hard)));
        let rated = actions.iter().any(|a| matches!(a, CardAction::Rate(..)));
        for action in actions {
            self.apply(action);
        }

        // A card rated good/easy leaves the due list, so the same index already shows the next one
        if rated {
            self.review_show_answer = false;
            if rated_hard {
                self.review_index += 1;
            }
        }
        if step != 0 {
            let len = self.store.due_cards().len().max(1);
            self.review_index = (self.review_index % len + len).wrapping_add_signed(step) % len;
            self.review_show_answer = false;
        }
    }

    fn render_card(&self, ui: &mut egui::Ui, card: &Card, flipped: bool, actions: &mut Vec<CardAction>) {
        let locale = self.store.locale();

        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(format!("{}: {}", t(&i18n::card::CATEGORY, locale), card.category));
                if !card.tags.is_empty() {
                    ui.separator();
                    ui.label(format!("{}: {}", t(&i18n::card::TAGS, locale), card.tags.join(", ")));
                }
            });

            match resolve_content_or_fallback(card, locale) {
                Some(content) if flipped => {
                    ui.strong(t(&i18n::card::ANSWER, locale));
                    ui.label(&content.answer);
                }
                Some(content) => {
                    ui.strong(t(&i18n::card::QUESTION, locale));
                    ui.label(&content.question);
                }
                None => {
                    ui.label(t(&i18n::card::MISSING_CONTENT, locale));
                }
            }

            ui.horizontal(|ui| {
                let flip_label = if flipped {
                    &i18n::card::SHOW_QUESTION
                } else {
                    &i18n::card::SHOW_ANSWER
                };
                if ui.button(t(flip_label, locale)).clicked() {
                    actions.push(CardAction::Flip(card.id.clone()));
                }

                let favorite_label = if self.store.is_favorite(&card.id) {
                    format!("★ {}", t(&i18n::card::FAVORITED, locale))
                } else {
                    format!("☆ {}", t(&i18n::card::FAVORITE, locale))
                };
                if ui
                    .add_enabled(self.store.is_hydrated(), egui::Button::new(favorite_label))
                    .clicked()
                {
                    actions.push(CardAction::ToggleFavorite(card.id.clone()));
                }
            });

            if flipped {
                self.render_rating_buttons(ui, card, actions);
            }
        });
    }

    /// Hard / good / easy. Disabled until stored ratings are loaded, so a rating
    /// cannot be overwritten by rehydration.
    fn render_rating_buttons(&self, ui: &mut egui::Ui, card: &Card, actions: &mut Vec<CardAction>) {
        let locale = self.store.locale();
        let enabled = self.store.is_hydrated();
        let current = self.store.score(&card.id);

        ui.horizontal(|ui| {
            for score in ReviewScore::ALL {
                let label = match score {
                    ReviewScore::Hard => &i18n::card::MARK_HARD,
                    ReviewScore::Good => &i18n::card::MARK_GOOD,
                    ReviewScore::Easy => &i18n::card::MARK_EASY,
                };
                let button = egui::Button::new(t(label, locale))
                    .selected(current == Some(score.value()));
                if ui.add_enabled(enabled, button).clicked() {
                    actions.push(CardAction::Rate(card.id.clone(), score));
                }
            }
        });
    }

    fn render_load_error(&self, ui: &mut egui::Ui, locale: Locale) {
        if let Some(error) = &self.load_error {
            ui.colored_label(
                egui::Color32::from_rgb(200, 60, 60),
                format!("{}: {}", t(&i18n::error::LOAD_FAILED, locale), error),
            );
        }
    }
}

impl eframe::App for KnowledgeCardsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_rehydration(ctx);

        self.render_nav(ctx);
        self.render_stats(ctx);
        match self.current_screen {
            AppScreen::Cards => self.render_cards_screen(ctx),
            AppScreen::Review => self.render_review_screen(ctx),
        }

        // The frame is drawn; persist whatever changed during it
        if self.store.has_pending_writes() {
            self.store.flush_pending();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        let written = self.store.flush_pending();
        log::info!("Flushed {} pending write(s) on exit", written);
    }
}
