//! Admin screen: one table per resource with reload and delete

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row},
    Frame,
};

use crate::api::resource::AdminRecord;
use crate::api::{AdminResource, ResourcePayload};
use crate::models::{Country, Discipline, University, User, Year};
use crate::research_tui::components::DataTable;
use crate::research_tui::traits::{AdminView, ScreenAction};
use crate::research_tui::ui::Styles;
use crate::table::PageSize;

pub struct ResourceScreen<R> {
    table: DataTable<R>,
    render_row: fn(&R) -> Row<'static>,
    is_loading: bool,
    loaded_at: Option<DateTime<Local>>,
    /// Id awaiting delete confirmation
    pending_delete: Option<String>,
}

impl<R: AdminRecord> ResourceScreen<R> {
    pub fn new(page_size: PageSize, render_row: fn(&R) -> Row<'static>) -> Self {
        Self {
            table: DataTable::new(R::RESOURCE.label(), R::columns()).with_page_size(page_size),
            render_row,
            is_loading: false,
            loaded_at: None,
            pending_delete: None,
        }
    }

    pub fn table(&self) -> &DataTable<R> {
        &self.table
    }

    fn describe(&self, record: &R) -> String {
        self.table
            .columns()
            .first()
            .map(|column| record.field_text(&column.key))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| record.id().to_string())
    }

    fn draw_info(&self, f: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            format!("{} ", R::RESOURCE.label()),
            Styles::title(),
        )];
        if self.is_loading {
            spans.push(Span::styled("Chargement...", Styles::warning()));
        } else if let Some(at) = self.loaded_at {
            spans.push(Span::styled(
                format!("{} enregistrements, chargés à {}", self.table.records().len(), at.format("%H:%M:%S")),
                Styles::inactive(),
            ));
        }
        spans.push(Span::styled("   r recharger  x supprimer  Échap retour", Styles::disabled()));
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl<R: AdminRecord> AdminView for ResourceScreen<R> {
    fn resource(&self) -> AdminResource {
        R::RESOURCE
    }

    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        self.draw_info(f, chunks[0]);
        let render_row = self.render_row;
        self.table.render(f, chunks[1], render_row);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenAction> {
        if self.table.is_search_focused() {
            return self.table.handle_key(key);
        }

        if let Some(id) = self.pending_delete.take() {
            return Some(match key.code {
                KeyCode::Char('o') | KeyCode::Char('y') => ScreenAction::Delete {
                    resource: R::RESOURCE,
                    id,
                },
                _ => ScreenAction::SetStatus("Suppression annulée".to_string()),
            });
        }

        match key.code {
            KeyCode::Char('r') => Some(ScreenAction::Reload(R::RESOURCE)),
            KeyCode::Char('x') | KeyCode::Delete => match self.table.selected_record() {
                Some(record) => {
                    let label = self.describe(record);
                    self.pending_delete = Some(record.id().to_string());
                    Some(ScreenAction::SetStatus(format!(
                        "Supprimer « {} » ? o pour confirmer, autre touche pour annuler",
                        label
                    )))
                }
                None => Some(ScreenAction::SetError("Aucune ligne sélectionnée".to_string())),
            },
            _ => self.table.handle_key(key),
        }
    }

    fn apply_payload(&mut self, payload: ResourcePayload) -> bool {
        match R::from_payload(payload) {
            Some(records) => {
                self.table.set_records(records);
                self.is_loading = false;
                self.loaded_at = Some(Local::now());
                self.pending_delete = None;
                true
            }
            None => false,
        }
    }

    fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    fn is_loading(&self) -> bool {
        self.is_loading
    }

    fn is_editing(&self) -> bool {
        self.table.is_search_focused()
    }

    fn is_loaded(&self) -> bool {
        self.loaded_at.is_some()
    }

    fn record_count(&self) -> usize {
        self.table.records().len()
    }
}

pub fn year_row(year: &Year) -> Row<'static> {
    Row::new(vec![Cell::from(year.year.to_string())])
}

pub fn university_row(university: &University) -> Row<'static> {
    Row::new(vec![
        Cell::from(university.name.clone()),
        Cell::from(university.acronym.clone().unwrap_or_default()),
        Cell::from(university.country.clone().unwrap_or_default()),
    ])
}

pub fn country_row(country: &Country) -> Row<'static> {
    Row::new(vec![
        Cell::from(country.name.clone()),
        Cell::from(country.code.clone().unwrap_or_default()),
    ])
}

pub fn discipline_row(discipline: &Discipline) -> Row<'static> {
    Row::new(vec![
        Cell::from(discipline.name.clone()),
        Cell::from(discipline.description.clone().unwrap_or_default()),
    ])
}

pub fn user_row(user: &User) -> Row<'static> {
    let status_style = if user.is_active {
        Styles::success()
    } else {
        Styles::error()
    };
    Row::new(vec![
        Cell::from(user.username.clone()),
        Cell::from(user.email.clone()),
        Cell::from(user.role.as_str().to_string()),
        Cell::from(user.status_label().to_string()).style(status_style),
        Cell::from(user.last_login_label()),
    ])
}

/// One boxed screen per admin resource
pub fn admin_screens(page_size: PageSize) -> Vec<Box<dyn AdminView>> {
    vec![
        Box::new(ResourceScreen::<Year>::new(page_size, year_row)),
        Box::new(ResourceScreen::<University>::new(page_size, university_row)),
        Box::new(ResourceScreen::<Country>::new(page_size, country_row)),
        Box::new(ResourceScreen::<Discipline>::new(page_size, discipline_row)),
        Box::new(ResourceScreen::<User>::new(page_size, user_row)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn year(id: &str, year: i32) -> Year {
        Year {
            id: id.to_string(),
            year,
        }
    }

    fn loaded_years() -> ResourceScreen<Year> {
        let mut screen = ResourceScreen::new(PageSize::Five, year_row);
        assert!(screen.apply_payload(ResourcePayload::Years(vec![
            year("1", 2020),
            year("2", 2019),
            year("3", 2019),
        ])));
        screen
    }

    #[test]
    fn test_apply_payload_rejects_other_resource() {
        let mut screen = loaded_years();
        assert!(!screen.apply_payload(ResourcePayload::Countries(vec![])));
        assert_eq!(screen.record_count(), 3);
        assert!(screen.is_loaded());
        assert!(!screen.is_loading());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut screen = loaded_years();
        screen.handle_key(key(KeyCode::Down));

        let action = screen.handle_key(key(KeyCode::Char('x')));
        assert!(matches!(action, Some(ScreenAction::SetStatus(msg)) if msg.contains("2019")));
        assert_eq!(
            screen.handle_key(key(KeyCode::Char('o'))),
            Some(ScreenAction::Delete {
                resource: AdminResource::Years,
                id: "2".to_string()
            })
        );

        screen.handle_key(key(KeyCode::Delete));
        assert_eq!(
            screen.handle_key(key(KeyCode::Char('n'))),
            Some(ScreenAction::SetStatus("Suppression annulée".to_string()))
        );
    }

    #[test]
    fn test_delete_without_rows() {
        let mut screen: ResourceScreen<Country> = ResourceScreen::new(PageSize::Five, country_row);
        assert!(matches!(
            screen.handle_key(key(KeyCode::Char('x'))),
            Some(ScreenAction::SetError(_))
        ));
    }

    #[test]
    fn test_reload_and_table_keys() {
        let mut screen = loaded_years();
        assert_eq!(
            screen.handle_key(key(KeyCode::Char('r'))),
            Some(ScreenAction::Reload(AdminResource::Years))
        );

        screen.handle_key(key(KeyCode::Char('1')));
        let ids: Vec<_> = screen.table().page_items().iter().map(|y| y.id.clone()).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);

        // 'r' is filter text while searching
        screen.handle_key(key(KeyCode::Char('/')));
        assert_eq!(screen.handle_key(key(KeyCode::Char('r'))), Some(ScreenAction::None));
        assert_eq!(screen.table().filter_text(), "r");
    }

    #[test]
    fn test_draw_users() {
        let mut screen = ResourceScreen::new(PageSize::Five, user_row);
        let users: Vec<User> = serde_json::from_str(
            r#"[{"id": 1, "username": "alice", "email": "alice@example.org", "role": "admin", "is_active": true},
                {"id": 2, "username": "bob", "email": "bob@example.org", "role": "user", "is_active": false}]"#,
        )
        .unwrap();
        screen.apply_payload(ResourcePayload::Users(users));

        let mut terminal = Terminal::new(TestBackend::new(120, 16)).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                screen.draw(f, area);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
        }
        assert!(text.contains("alice@example.org"));
        assert!(text.contains("Inactif"));
        assert!(text.contains("Jamais"));
        assert!(text.contains("Page 1 sur 1"));
    }

    #[test]
    fn test_admin_screens_cover_every_resource() {
        let screens = admin_screens(PageSize::Ten);
        let resources: Vec<_> = screens.iter().map(|s| s.resource()).collect();
        assert_eq!(resources, AdminResource::ALL.to_vec());
    }
}
