//! Document search screen: query box on top, results table below

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row},
    Frame,
};

use crate::models::{columns, Document};
use crate::research_tui::components::DataTable;
use crate::research_tui::traits::ScreenAction;
use crate::research_tui::ui::{InputField, Styles};
use crate::table::PageSize;

pub struct DocumentsScreen {
    pub query: InputField,
    pub table: DataTable<Document>,
    pub is_searching: bool,
    /// Query of the results currently shown
    pub last_query: Option<String>,
}

impl DocumentsScreen {
    pub fn new(page_size: PageSize) -> Self {
        let mut query = InputField::new("Recherche de documents (Entrée pour lancer)")
            .with_placeholder("titre, auteur, discipline...");
        query.set_focus(true);

        Self {
            query,
            table: DataTable::new("Documents", columns::documents())
                .with_page_size(page_size)
                .with_widths(vec![
                    Constraint::Percentage(35),
                    Constraint::Percentage(20),
                    Constraint::Percentage(15),
                    Constraint::Percentage(20),
                    Constraint::Percentage(10),
                ]),
            is_searching: false,
            last_query: None,
        }
    }

    pub fn apply_results(&mut self, query: String, documents: Vec<Document>) {
        self.table.set_records(documents);
        self.is_searching = false;
        self.last_query = Some(query);
        if !self.table.records().is_empty() {
            self.query.set_focus(false);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenAction> {
        if self.query.is_focused {
            return Some(self.handle_query_key(key));
        }
        if self.table.is_search_focused() {
            return self.table.handle_key(key);
        }

        match key.code {
            KeyCode::Tab | KeyCode::Char('n') => {
                self.query.set_focus(true);
                Some(ScreenAction::None)
            }
            KeyCode::Enter => Some(match self.table.selected_record() {
                Some(document) => ScreenAction::SetStatus(describe(document)),
                None => ScreenAction::None,
            }),
            _ => self.table.handle_key(key),
        }
    }

    fn handle_query_key(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Enter => {
                let query = self.query.value.trim().to_string();
                if query.is_empty() {
                    return ScreenAction::SetError("Saisissez un terme de recherche".to_string());
                }
                self.is_searching = true;
                ScreenAction::Search(query)
            }
            KeyCode::Esc | KeyCode::Tab => {
                self.query.set_focus(false);
                ScreenAction::None
            }
            KeyCode::Char(c) => {
                self.query.insert_char(c);
                ScreenAction::None
            }
            KeyCode::Backspace => {
                self.query.delete_char();
                ScreenAction::None
            }
            KeyCode::Delete => {
                self.query.delete_char_forward();
                ScreenAction::None
            }
            KeyCode::Left => {
                self.query.move_cursor_left();
                ScreenAction::None
            }
            KeyCode::Right => {
                self.query.move_cursor_right();
                ScreenAction::None
            }
            _ => ScreenAction::None,
        }
    }

    /// Text inputs swallow global keys while focused
    pub fn is_editing(&self) -> bool {
        self.query.is_focused || self.table.is_search_focused()
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        self.query.render(f, chunks[0]);

        let info = if self.is_searching {
            Span::styled("Recherche en cours...", Styles::warning())
        } else {
            match &self.last_query {
                Some(query) => Span::styled(
                    format!("{} résultat(s) pour « {} »", self.table.records().len(), query),
                    Styles::info(),
                ),
                None => Span::styled("Tab: basculer entre la recherche et le tableau", Styles::inactive()),
            }
        };
        f.render_widget(Paragraph::new(Line::from(info)), chunks[1]);

        self.table.render(f, chunks[2], document_row);
    }
}

fn describe(document: &Document) -> String {
    let mut parts = vec![document.title.clone()];
    if let Some(author) = &document.author {
        parts.push(author.clone());
    }
    if let Some(university) = &document.university {
        parts.push(university.clone());
    }
    if let Some(year) = document.year {
        parts.push(year.to_string());
    }
    parts.join(" | ")
}

pub fn document_row(document: &Document) -> Row<'static> {
    Row::new(vec![
        Cell::from(document.title.clone()),
        Cell::from(document.author.clone().unwrap_or_default()),
        Cell::from(document.discipline.clone().unwrap_or_default()),
        Cell::from(document.university.clone().unwrap_or_default()),
        Cell::from(document.year.map(|y| y.to_string()).unwrap_or_default()),
    ])
}
