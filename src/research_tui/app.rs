//! Main TUI application state and logic

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use super::events::{AppEvent, RequestFailure};
use super::handlers::CommonKeyHandler;
use super::screens::resource::admin_screens;
use super::screens::*;
use super::traits::{AdminView, ScreenAction};
use super::ui::centered_rect;
use crate::api::{AdminResource, RecordSource};
use crate::config::Config;

/// Application screens
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    MainMenu,
    Documents,
    Admin(AdminResource),
    Help,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::MainMenu => "Menu principal",
            Screen::Documents => "Documents",
            Screen::Admin(resource) => resource.label(),
            Screen::Help => "Aide",
        }
    }
}

/// Main TUI application state
pub struct App {
    /// Current active screen
    pub current_screen: Screen,
    /// Previous screen for navigation
    pub previous_screen: Option<Screen>,
    /// Application configuration
    pub config: Config,

    // Screen states
    pub main_menu: MainMenuScreen,
    pub documents: DocumentsScreen,
    admin: Vec<Box<dyn AdminView>>,
    pub help: HelpScreen,

    source: Arc<dyn RecordSource>,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,

    // Global application state
    pub should_quit: bool,
    pub show_help_popup: bool,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
}

impl App {
    /// Create a new TUI application
    pub fn new(config: Config, source: Arc<dyn RecordSource>, username: Option<String>) -> Self {
        let page_size = config.page_size();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            current_screen: Screen::MainMenu,
            previous_screen: None,
            config,

            main_menu: MainMenuScreen::new(username),
            documents: DocumentsScreen::new(page_size),
            admin: admin_screens(page_size),
            help: HelpScreen::new(),

            source,
            events_tx,
            events_rx,

            should_quit: false,
            show_help_popup: false,
            status_message: None,
            error_message: None,
        }
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.set_status("Prêt".to_string());

        loop {
            terminal.draw(|f| self.draw(f))?;

            while let Ok(app_event) = self.events_rx.try_recv() {
                self.handle_app_event(app_event);
            }

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Wait for the next background result
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.events_rx.recv().await
    }

    pub fn admin_view(&self, resource: AdminResource) -> Option<&dyn AdminView> {
        self.admin
            .iter()
            .find(|view| view.resource() == resource)
            .map(|view| view.as_ref())
    }

    fn admin_view_mut(&mut self, resource: AdminResource) -> Option<&mut Box<dyn AdminView>> {
        self.admin.iter_mut().find(|view| view.resource() == resource)
    }

    /// Whether the active screen has a focused text input
    fn is_editing(&self) -> bool {
        match &self.current_screen {
            Screen::Documents => self.documents.is_editing(),
            Screen::Admin(resource) => self
                .admin_view(*resource)
                .map(|view| view.is_editing())
                .unwrap_or(false),
            _ => false,
        }
    }

    /// Handle keyboard input events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.show_help_popup {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                self.show_help_popup = false;
            }
            return;
        }

        if !self.is_editing() {
            match key.code {
                KeyCode::F(1) | KeyCode::Char('?') => {
                    self.show_help_popup = true;
                    return;
                }
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                _ => {}
            }
        }

        let action = match self.current_screen.clone() {
            Screen::MainMenu => self.main_menu.handle_key(key),
            Screen::Documents => self.documents.handle_key(key),
            Screen::Admin(resource) => {
                self.admin_view_mut(resource).and_then(|view| view.handle_key(key))
            }
            Screen::Help => self.help.handle_key(key),
        };

        if let Some(action) = action.or_else(|| CommonKeyHandler::handle_global_keys(key)) {
            self.apply_action(action);
        }
    }

    /// Carry out what a screen asked for
    pub fn apply_action(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::NavigateTo(screen) => self.navigate_to_screen(screen),
            ScreenAction::NavigateBack => self.navigate_back(),
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::SetStatus(message) => self.set_status(message),
            ScreenAction::SetError(message) => self.set_error(message),
            ScreenAction::Reload(resource) => self.load_resource(resource),
            ScreenAction::Delete { resource, id } => self.delete_record(resource, id),
            ScreenAction::Search(query) => self.search_documents(query),
            ScreenAction::None => {}
        }
    }

    /// Navigate to a specific screen, loading admin records on first visit
    pub fn navigate_to_screen(&mut self, screen: Screen) {
        debug!("Navigating to {:?}", screen);
        self.previous_screen = Some(self.current_screen.clone());
        self.current_screen = screen.clone();
        self.clear_messages();

        if let Screen::Admin(resource) = screen {
            let needs_load = self
                .admin_view(resource)
                .map(|view| !view.is_loaded() && !view.is_loading())
                .unwrap_or(false);
            if needs_load {
                self.load_resource(resource);
            }
        }
    }

    /// Help returns where it came from, every other screen to the main menu
    pub fn navigate_back(&mut self) {
        let target = match self.current_screen {
            Screen::MainMenu => return,
            Screen::Help => self.previous_screen.clone().unwrap_or(Screen::MainMenu),
            _ => Screen::MainMenu,
        };
        self.previous_screen = Some(self.current_screen.clone());
        self.current_screen = target;
        self.clear_messages();
    }

    /// Set status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.status_message = None;
    }

    /// Clear status and error messages
    pub fn clear_messages(&mut self) {
        self.status_message = None;
        self.error_message = None;
    }

    /// Fetch an admin resource in the background
    pub fn load_resource(&mut self, resource: AdminResource) {
        if let Some(view) = self.admin_view_mut(resource) {
            view.set_loading(true);
        }
        self.set_status(format!("Chargement: {}...", resource.label()));

        let source = Arc::clone(&self.source);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let app_event = match source.fetch(resource).await {
                Ok(payload) => AppEvent::RecordsLoaded(payload),
                Err(e) => AppEvent::LoadFailed(
                    RequestFailure::new(format!("Chargement {}", resource.label()), &e)
                        .for_resource(resource),
                ),
            };
            let _ = tx.send(app_event);
        });
    }

    fn delete_record(&mut self, resource: AdminResource, id: String) {
        info!("Deleting {} {}", resource, id);
        self.set_status(format!("Suppression de {}...", id));

        let source = Arc::clone(&self.source);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let app_event = match source.delete(resource, &id).await {
                Ok(()) => AppEvent::RecordDeleted { resource, id },
                Err(e) => AppEvent::LoadFailed(
                    RequestFailure::new("Suppression", &e).for_resource(resource),
                ),
            };
            let _ = tx.send(app_event);
        });
    }

    fn search_documents(&mut self, query: String) {
        self.set_status(format!("Recherche de « {} »...", query));

        let source = Arc::clone(&self.source);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let app_event = match source.search_documents(&query).await {
                Ok(documents) => AppEvent::DocumentsLoaded { query, documents },
                Err(e) => AppEvent::LoadFailed(RequestFailure::new("Recherche", &e)),
            };
            let _ = tx.send(app_event);
        });
    }

    /// Apply a background result to the screens
    pub fn handle_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::RecordsLoaded(payload) => {
                let resource = payload.resource();
                let count = payload.len();
                if let Some(view) = self.admin_view_mut(resource) {
                    view.apply_payload(payload);
                }
                info!("Loaded {} {}", count, resource);
                self.set_status(format!("{}: {} enregistrement(s)", resource.label(), count));
            }
            AppEvent::DocumentsLoaded { query, documents } => {
                let count = documents.len();
                self.documents.apply_results(query, documents);
                self.set_status(format!("{} document(s) trouvé(s)", count));
            }
            AppEvent::RecordDeleted { resource, id } => {
                self.set_status(format!("{} supprimé", id));
                self.load_resource(resource);
            }
            AppEvent::LoadFailed(failure) => {
                warn!("{}: {}", failure.context, failure.message);
                match failure.resource {
                    Some(resource) => {
                        if let Some(view) = self.admin_view_mut(resource) {
                            view.set_loading(false);
                        }
                    }
                    None => self.documents.is_searching = false,
                }
                self.set_error(failure.describe());
            }
        }
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        // Main layout: status bar at bottom, content area above
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        match self.current_screen.clone() {
            Screen::MainMenu => self.main_menu.draw(f, chunks[0]),
            Screen::Documents => self.documents.draw(f, chunks[0]),
            Screen::Admin(resource) => {
                if let Some(view) = self.admin_view_mut(resource) {
                    view.draw(f, chunks[0]);
                }
            }
            Screen::Help => self.help.draw(f, chunks[0]),
        }

        self.draw_status_bar(f, chunks[1]);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if let Some(ref msg) = self.status_message {
            msg.clone()
        } else if let Some(ref err) = self.error_message {
            format!("Erreur: {}", err)
        } else {
            format!(
                "Perfect Research - {} | Échap: retour | q: quitter | F1/?: aide",
                self.current_screen.title()
            )
        };

        let style = if self.error_message.is_some() {
            Style::default().fg(Color::Red)
        } else if self.status_message.is_some() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };

        let status_bar = Paragraph::new(status_text)
            .style(style)
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(status_bar, area);
    }

    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(80, 70, area);

        f.render_widget(Clear, popup_area);

        let help_popup = Paragraph::new(self.get_context_help())
            .block(
                Block::default()
                    .title("Aide - raccourcis")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        f.render_widget(help_popup, popup_area);
    }

    fn get_context_help(&self) -> String {
        let global_help = "Global:\n\
            Échap - Retour\n\
            q - Quitter\n\
            F1 / ? - Afficher / masquer cette aide\n\n";

        let table_help = "Tableau:\n\
            / - Filtrer (Entrée ou Échap pour terminer)\n\
            1-9 - Trier sur la colonne N\n\
            s - Lignes par page (5, 10, 15, 20, 25)\n\
            ←/→ PgPréc/PgSuiv - Page précédente / suivante\n\
            Début/Fin - Première / dernière page\n\
            ↑/↓ - Sélection\n\
            g/G - Première / dernière ligne";

        let screen_help = match self.current_screen {
            Screen::MainMenu => "Menu principal:\n\
                ↑/↓ - Se déplacer\n\
                Entrée - Ouvrir\n\
                D/A/E/P/I/U/H - Accès direct"
                .to_string(),
            Screen::Documents => format!(
                "Documents:\n\
                Tab / n - Saisir une requête\n\
                Entrée - Lancer la recherche / détail du document\n\n{}",
                table_help
            ),
            Screen::Admin(_) => format!(
                "Administration:\n\
                r - Recharger\n\
                x / Suppr - Supprimer la ligne (o pour confirmer)\n\n{}",
                table_help
            ),
            Screen::Help => "Aide:\n\
                ↑/↓ - Rubriques\n\
                PgPréc/PgSuiv - Défiler"
                .to_string(),
        };

        format!("{}{}", global_help, screen_help)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::source::testing::MemorySource;
    use crate::models::{Document, Year};
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn years() -> Vec<Year> {
        vec![
            Year { id: "1".to_string(), year: 2020 },
            Year { id: "2".to_string(), year: 2019 },
            Year { id: "3".to_string(), year: 2019 },
        ]
    }

    fn app_with(source: MemorySource) -> App {
        App::new(Config::default(), Arc::new(source), Some("admin".to_string()))
    }

    async fn pump(app: &mut App) {
        let app_event = app.next_event().await.expect("channel open");
        app.handle_app_event(app_event);
    }

    #[tokio::test]
    async fn test_first_visit_loads_records() {
        let mut app = app_with(MemorySource::with_years(years()));
        app.handle_key_event(key(KeyCode::Char('a')));
        assert_eq!(app.current_screen, Screen::Admin(AdminResource::Years));
        assert!(app.admin_view(AdminResource::Years).unwrap().is_loading());

        pump(&mut app).await;
        let view = app.admin_view(AdminResource::Years).unwrap();
        assert!(view.is_loaded());
        assert!(!view.is_loading());
        assert_eq!(view.record_count(), 3);

        // second visit does not refetch
        app.handle_key_event(key(KeyCode::Esc));
        assert_eq!(app.current_screen, Screen::MainMenu);
        app.navigate_to_screen(Screen::Admin(AdminResource::Years));
        assert!(!app.admin_view(AdminResource::Years).unwrap().is_loading());
    }

    #[tokio::test]
    async fn test_delete_then_reload() {
        let source = Arc::new(MemorySource::with_years(years()));
        let mut app = App::new(Config::default(), source.clone(), None);
        app.navigate_to_screen(Screen::Admin(AdminResource::Years));
        pump(&mut app).await;

        app.handle_key_event(key(KeyCode::Char('x')));
        app.handle_key_event(key(KeyCode::Char('o')));
        pump(&mut app).await; // deleted, triggers reload
        assert!(app.admin_view(AdminResource::Years).unwrap().is_loading());
        pump(&mut app).await;

        assert_eq!(app.admin_view(AdminResource::Years).unwrap().record_count(), 2);
        assert_eq!(source.years.lock().unwrap().len(), 2);
        assert!(app.error_message.is_none());
    }

    #[tokio::test]
    async fn test_load_failure_sets_error() {
        let source = MemorySource {
            fail_with_status: Some(500),
            ..Default::default()
        };
        let mut app = app_with(source);
        app.navigate_to_screen(Screen::Admin(AdminResource::Countries));
        pump(&mut app).await;

        let view = app.admin_view(AdminResource::Countries).unwrap();
        assert!(!view.is_loading());
        assert!(!view.is_loaded());
        assert!(app.error_message.as_deref().unwrap().contains("simulated failure"));
    }

    #[tokio::test]
    async fn test_document_search() {
        let source = MemorySource::default();
        source.documents.lock().unwrap().push(Document {
            id: "7".to_string(),
            title: "Érosion des sols".to_string(),
            author: None,
            discipline: Some("Géologie".to_string()),
            university: None,
            year: Some(2022),
            uploaded_at: None,
        });
        let mut app = app_with(source);
        app.navigate_to_screen(Screen::Documents);

        // 'q' is text while the query box has focus
        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        app.handle_key_event(key(KeyCode::Backspace));

        for c in "sols".chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
        app.handle_key_event(key(KeyCode::Enter));
        pump(&mut app).await;

        assert_eq!(app.documents.table.records().len(), 1);
        assert_eq!(app.status_message.as_deref(), Some("1 document(s) trouvé(s)"));
    }

    #[tokio::test]
    async fn test_global_keys() {
        let mut app = app_with(MemorySource::default());
        app.handle_key_event(key(KeyCode::Char('?')));
        assert!(app.show_help_popup);
        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        app.handle_key_event(key(KeyCode::Esc));
        assert!(!app.show_help_popup);

        app.handle_key_event(key(KeyCode::Char('h')));
        assert_eq!(app.current_screen, Screen::Help);
        app.handle_key_event(key(KeyCode::Esc));
        assert_eq!(app.current_screen, Screen::MainMenu);

        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_draw_status_bar() {
        let mut app = app_with(MemorySource::default());
        app.set_error("boom".to_string());

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
        }
        assert!(text.contains("Menu principal"));
        assert!(text.contains("Erreur: boom"));
        assert!(text.contains("(admin)"));
    }
}
