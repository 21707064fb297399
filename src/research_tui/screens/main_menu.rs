//! Main menu screen for the Perfect Research TUI

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::api::AdminResource;
use crate::research_tui::{
    app::Screen,
    handlers::{CommonKeyHandler, MenuHandler},
    traits::{Navigable, ScreenAction},
    ui::Styles,
};

/// Main menu options
#[derive(Debug, Clone)]
pub struct MenuOption {
    pub title: String,
    pub description: String,
    pub shortcut: char,
    pub screen: Screen,
}

impl MenuOption {
    pub fn new(title: &str, description: &str, shortcut: char, screen: Screen) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            shortcut,
            screen,
        }
    }
}

/// Main menu screen state
pub struct MainMenuScreen {
    pub menu_state: ListState,
    pub menu_options: Vec<MenuOption>,
    /// Shown in the title bar once logged in
    pub username: Option<String>,
}

impl MainMenuScreen {
    pub fn new(username: Option<String>) -> Self {
        let menu_options = vec![
            MenuOption::new(
                "Documents",
                "Rechercher des documents par titre, auteur ou discipline",
                'D',
                Screen::Documents,
            ),
            MenuOption::new(
                "Années",
                "Gérer les années académiques",
                'A',
                Screen::Admin(AdminResource::Years),
            ),
            MenuOption::new(
                "Universités",
                "Gérer les universités et leurs sigles",
                'E',
                Screen::Admin(AdminResource::Universities),
            ),
            MenuOption::new(
                "Pays",
                "Gérer les pays",
                'P',
                Screen::Admin(AdminResource::Countries),
            ),
            MenuOption::new(
                "Disciplines",
                "Gérer les disciplines de recherche",
                'I',
                Screen::Admin(AdminResource::Disciplines),
            ),
            MenuOption::new(
                "Utilisateurs",
                "Comptes, rôles et dernières connexions",
                'U',
                Screen::Admin(AdminResource::Users),
            ),
            MenuOption::new("Aide", "Raccourcis clavier et aide", 'H', Screen::Help),
        ];

        let mut menu_state = ListState::default();
        menu_state.select(Some(0));

        Self {
            menu_state,
            menu_options,
            username,
        }
    }

    /// Handle key events for the main menu
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenAction> {
        if let Some(action) = CommonKeyHandler::handle_navigation_keys(self, key) {
            return Some(action);
        }

        let actions: Vec<ScreenAction> = self
            .menu_options
            .iter()
            .map(|option| ScreenAction::NavigateTo(option.screen.clone()))
            .collect();
        if let Some(action) = MenuHandler::handle_menu_selection(self, key, &actions) {
            return Some(action);
        }

        let shortcuts: Vec<(char, ScreenAction)> = self
            .menu_options
            .iter()
            .map(|option| (option.shortcut, ScreenAction::NavigateTo(option.screen.clone())))
            .collect();
        MenuHandler::handle_menu_shortcuts(key, &shortcuts)
    }

    /// Draw the main menu screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Menu
                Constraint::Length(5), // Instructions
            ])
            .split(area);

        self.draw_title(f, chunks[0]);
        self.draw_menu(f, chunks[1]);
        self.draw_instructions(f, chunks[2]);
    }

    fn draw_title(&self, f: &mut Frame, area: Rect) {
        let text = match &self.username {
            Some(name) => format!("Perfect Research - Administration ({})", name),
            None => "Perfect Research - Administration (non connecté)".to_string(),
        };
        let title = Paragraph::new(text)
            .style(Styles::title())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn draw_menu(&mut self, f: &mut Frame, area: Rect) {
        let selected = self.menu_state.selected();
        let items: Vec<ListItem> = self
            .menu_options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let style = if Some(i) == selected {
                    Styles::selected()
                } else {
                    Style::default()
                };

                let content = vec![
                    Line::from(vec![
                        Span::styled(format!("[{}] ", option.shortcut), Styles::info()),
                        Span::styled(option.title.clone(), style.add_modifier(Modifier::BOLD)),
                    ]),
                    Line::from(Span::styled(
                        format!("     {}", option.description),
                        if Some(i) == selected { style } else { Styles::inactive() },
                    )),
                ];

                ListItem::new(content)
            })
            .collect();

        let menu = List::new(items)
            .block(
                Block::default()
                    .title("Menu principal")
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            )
            .highlight_style(Styles::selected());

        f.render_stateful_widget(menu, area, &mut self.menu_state);
    }

    fn draw_instructions(&self, f: &mut Frame, area: Rect) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let instructions = vec![
            Line::from(vec![
                Span::styled("Navigation: ", Styles::info()),
                Span::raw("↑/↓ pour se déplacer, "),
                Span::styled("Entrée", bold),
                Span::raw(" pour ouvrir"),
            ]),
            Line::from(vec![
                Span::styled("Raccourcis: ", Styles::info()),
                Span::styled("D/A/E/P/I/U/H", bold),
                Span::raw(" accès direct, "),
                Span::styled("F1/?", bold),
                Span::raw(" aide, "),
                Span::styled("q", bold),
                Span::raw(" quitter"),
            ]),
        ];

        let instructions_paragraph = Paragraph::new(instructions).block(
            Block::default()
                .title("Instructions")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        );

        f.render_widget(instructions_paragraph, area);
    }
}

impl Navigable for MainMenuScreen {
    fn navigate_up(&mut self) {
        let count = self.menu_options.len();
        let selected = self.menu_state.selected().unwrap_or(0);
        self.menu_state
            .select(Some(if selected == 0 { count - 1 } else { selected - 1 }));
    }

    fn navigate_down(&mut self) {
        let selected = self.menu_state.selected().unwrap_or(0);
        self.menu_state
            .select(Some((selected + 1) % self.menu_options.len()));
    }

    fn get_selected_index(&self) -> Option<usize> {
        self.menu_state.selected()
    }

    fn set_selected_index(&mut self, index: Option<usize>) {
        self.menu_state.select(index);
    }

    fn get_item_count(&self) -> usize {
        self.menu_options.len()
    }
}
