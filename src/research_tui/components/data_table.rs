//! Sortable, filterable, paginated table component
//!
//! `DataTable<R>` owns the sort, filter and page state for one list of
//! records and renders it with ratatui. Callers hand over a fresh record
//! list with [`DataTable::set_records`] on every reload and decide how a row
//! looks through the `render_row` callback; the component only decides which
//! records are visible and in what order.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::research_tui::handlers::CommonKeyHandler;
use crate::research_tui::traits::{Navigable, Paginated, ScreenAction};
use crate::research_tui::ui::{InputField, Styles};
use crate::table::column;
use crate::table::pipeline::page_range;
use crate::table::{
    AriaSort, Column, DerivedView, PageSize, PageState, PageView, Record, SortDirection, SortSpec,
    SortState,
};

/// User-visible strings of the table
#[derive(Debug, Clone)]
pub struct TableLabels {
    pub search_title: String,
    pub search_placeholder: String,
    pub rows_per_page: String,
    pub previous: String,
    pub next: String,
    /// Shown when there are no records at all
    pub empty: String,
    /// Shown when the filter hides every record
    pub no_match: String,
    /// `{current}` and `{total}` are substituted
    pub page_format: String,
}

impl Default for TableLabels {
    fn default() -> Self {
        Self {
            search_title: "Rechercher".to_string(),
            search_placeholder: "Rechercher...".to_string(),
            rows_per_page: "Lignes par page".to_string(),
            previous: "◀ Précédent".to_string(),
            next: "Suivant ▶".to_string(),
            empty: "Aucune donnée".to_string(),
            no_match: "Aucun résultat pour ce filtre".to_string(),
            page_format: "Page {current} sur {total}".to_string(),
        }
    }
}

impl TableLabels {
    pub fn page_text(&self, current: usize, total: usize) -> String {
        self.page_format
            .replace("{current}", &current.to_string())
            .replace("{total}", &total.to_string())
    }
}

pub struct DataTable<R> {
    title: String,
    columns: Vec<Column>,
    widths: Option<Vec<Constraint>>,
    labels: TableLabels,
    records: Vec<R>,
    /// Bumped on every `set_records`, keys the memoized view
    generation: u64,
    sort: SortState,
    search: InputField,
    page: PageState,
    derived: DerivedView,
    row_state: TableState,
}

impl<R: Record> DataTable<R> {
    pub fn new(title: &str, columns: Vec<Column>) -> Self {
        let labels = TableLabels::default();
        let search =
            InputField::new(&labels.search_title).with_placeholder(&labels.search_placeholder);
        let mut table = Self {
            title: title.to_string(),
            columns,
            widths: None,
            labels,
            records: Vec::new(),
            generation: 0,
            sort: None,
            search,
            page: PageState::default(),
            derived: DerivedView::new(),
            row_state: TableState::default(),
        };
        table.refresh();
        table
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.set_page_size(page_size);
        self
    }

    pub fn with_labels(mut self, labels: TableLabels) -> Self {
        self.search.label = labels.search_title.clone();
        self.search.placeholder = labels.search_placeholder.clone();
        self.labels = labels;
        self
    }

    /// Column widths; defaults to an even split
    pub fn with_widths(mut self, widths: Vec<Constraint>) -> Self {
        self.widths = Some(widths);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Replace the record list. Sort, filter and page size are kept; the
    /// current page is clamped to the new page count.
    pub fn set_records(&mut self, records: Vec<R>) {
        let selected = self.selected_id();
        self.records = records;
        self.generation = self.generation.wrapping_add(1);
        self.refresh();
        self.restore_selection(selected.as_deref());
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Toggle the sort on a column: a new column starts ascending, the
    /// ascending column flips to descending, the descending column goes back
    /// to ascending. Returns false, changing nothing, for unknown or
    /// non-sortable columns. The current page is kept.
    pub fn request_sort(&mut self, key: &str) -> bool {
        match column::find(&self.columns, key) {
            Some(column) if column.sortable => {}
            _ => return false,
        }

        let selected = self.selected_id();
        self.sort = Some(match self.sort.take() {
            Some(spec) if spec.key == key && spec.direction == SortDirection::Ascending => {
                SortSpec::descending(key)
            }
            _ => SortSpec::ascending(key),
        });
        self.refresh();
        self.restore_selection(selected.as_deref());
        true
    }

    /// Sort state of a column for assistive output; `None` for columns that
    /// are not sortable
    pub fn aria_sort(&self, key: &str) -> Option<AriaSort> {
        let column = column::find(&self.columns, key)?;
        if !column.sortable {
            return None;
        }
        Some(match &self.sort {
            Some(spec) if spec.key == key => match spec.direction {
                SortDirection::Ascending => AriaSort::Ascending,
                SortDirection::Descending => AriaSort::Descending,
            },
            _ => AriaSort::None,
        })
    }

    pub fn filter_text(&self) -> &str {
        &self.search.value
    }

    /// Replace the filter verbatim
    pub fn set_filter_text(&mut self, text: &str) {
        self.search.set_value(text);
        self.on_filter_changed();
    }

    fn on_filter_changed(&mut self) {
        let selected = self.selected_id();
        self.refresh();
        self.restore_selection(selected.as_deref());
    }

    pub fn page_size(&self) -> PageSize {
        self.page.page_size
    }

    /// Change the page size and go back to page 1
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page.page_size = page_size;
        self.page.current_page = 1;
        self.restore_selection(None);
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    /// Records matching the filter
    pub fn filtered_count(&self) -> usize {
        self.derived.filtered_count()
    }

    /// The visible page
    pub fn view(&self) -> PageView<'_, R> {
        self.derived.page(&self.records, &self.page)
    }

    pub fn page_items(&self) -> Vec<&R> {
        self.view().items
    }

    pub fn page_text(&self) -> String {
        self.labels.page_text(self.current_page(), self.total_pages())
    }

    pub fn is_search_focused(&self) -> bool {
        self.search.is_focused
    }

    pub fn focus_search(&mut self, focused: bool) {
        self.search.set_focus(focused);
        if focused {
            self.search.move_cursor_to_end();
        }
    }

    /// Highlighted record on the current page
    pub fn selected_record(&self) -> Option<&R> {
        let index = self.row_state.selected()?;
        let range = self.visible_range();
        if index >= range.len() {
            return None;
        }
        let record_index = *self.derived.order().get(range.start + index)?;
        self.records.get(record_index)
    }

    pub fn selected_id(&self) -> Option<String> {
        self.selected_record().map(|r| r.id().to_string())
    }

    fn visible_range(&self) -> std::ops::Range<usize> {
        page_range(self.derived.filtered_count(), &self.page)
    }

    /// Re-derive if needed and keep the page in range
    fn refresh(&mut self) {
        self.derived.refresh(
            self.generation,
            &self.records,
            &self.columns,
            &self.sort,
            &self.search.value,
        );
        let total = self.page.total_pages(self.derived.filtered_count());
        self.page.clamp_to(total);
    }

    /// Keep the highlight on the same record if it is still on the page,
    /// else on the first row
    fn restore_selection(&mut self, id: Option<&str>) {
        let range = self.visible_range();
        if range.is_empty() {
            self.row_state.select(None);
            return;
        }
        let visible = &self.derived.order()[range];
        let position = id.and_then(|id| visible.iter().position(|&i| self.records[i].id() == id));
        self.row_state.select(Some(position.unwrap_or(0)));
    }

    /// Handle a key press. Returns `None` when the key is not a table key.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenAction> {
        if self.search.is_focused {
            return Some(self.handle_search_key(key));
        }

        match key.code {
            KeyCode::Char('/') => {
                self.focus_search(true);
                Some(ScreenAction::None)
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as u8 - b'1') as usize;
                let column = self.columns.get(index)?.clone();
                if self.request_sort(&column.key) {
                    let direction = self
                        .sort
                        .as_ref()
                        .map(|s| s.direction.indicator())
                        .unwrap_or_default();
                    Some(ScreenAction::SetStatus(format!("Tri: {} {}", column.label, direction)))
                } else {
                    Some(ScreenAction::SetStatus(format!(
                        "La colonne « {} » n'est pas triable",
                        column.label
                    )))
                }
            }
            KeyCode::Char('s') => {
                let next = self.page_size().cycle();
                self.set_page_size(next);
                Some(ScreenAction::SetStatus(format!("{}: {}", self.labels.rows_per_page, next)))
            }
            _ => CommonKeyHandler::handle_pagination_keys(self, key)
                .or_else(|| CommonKeyHandler::handle_navigation_keys(self, key)),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => {
                self.focus_search(false);
            }
            KeyCode::Char(c) => {
                self.search.insert_char(c);
                self.on_filter_changed();
            }
            KeyCode::Backspace => {
                self.search.delete_char();
                self.on_filter_changed();
            }
            KeyCode::Delete => {
                self.search.delete_char_forward();
                self.on_filter_changed();
            }
            KeyCode::Left => self.search.move_cursor_left(),
            KeyCode::Right => self.search.move_cursor_right(),
            KeyCode::Home => self.search.move_cursor_to_start(),
            KeyCode::End => self.search.move_cursor_to_end(),
            _ => {}
        }
        ScreenAction::None
    }

    fn header_row(&self) -> Row<'static> {
        let cells = self.columns.iter().map(|column| {
            let text = match &self.sort {
                Some(spec) if spec.key == column.key => {
                    format!("{} {}", column.label, spec.direction.indicator())
                }
                _ => column.label.clone(),
            };
            let style = if column.sortable {
                Styles::header()
            } else {
                Styles::title()
            };
            Cell::from(text).style(style)
        });
        Row::new(cells).height(1)
    }

    fn column_widths(&self) -> Vec<Constraint> {
        match &self.widths {
            Some(widths) => widths.clone(),
            None => {
                let count = self.columns.len().max(1) as u32;
                self.columns.iter().map(|_| Constraint::Ratio(1, count)).collect()
            }
        }
    }

    fn footer_line(&self) -> Line<'static> {
        let enabled = |on: bool| if on { Styles::info() } else { Styles::disabled() };
        Line::from(vec![
            Span::styled(self.labels.previous.clone(), enabled(self.can_previous())),
            Span::raw("  "),
            Span::styled(self.page_text(), Styles::title()),
            Span::raw("  "),
            Span::styled(self.labels.next.clone(), enabled(self.can_next())),
            Span::raw("   "),
            Span::styled(
                format!("{}: {}", self.labels.rows_per_page, self.page_size()),
                Styles::inactive(),
            ),
            Span::styled("   / filtrer  1-9 trier  s taille", Styles::disabled()),
        ])
    }

    /// Draw search box, table and pagination footer. `render_row` turns one
    /// record into a row with one cell per column.
    pub fn render<'a, F>(&mut self, f: &mut Frame, area: Rect, render_row: F)
    where
        F: Fn(&R) -> Row<'a>,
    {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        self.search.render(f, chunks[0]);

        let title = format!("{} ({})", self.title, self.derived.filtered_count());
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(if self.search.is_focused {
                Styles::inactive_border()
            } else {
                Styles::active_border()
            });

        let page = self.derived.page(&self.records, &self.page);
        if page.is_empty() {
            let message = if self.records.is_empty() {
                &self.labels.empty
            } else {
                &self.labels.no_match
            };
            let paragraph = Paragraph::new(message.as_str())
                .style(Styles::inactive())
                .block(block);
            f.render_widget(paragraph, chunks[1]);
        } else {
            let rows: Vec<Row<'a>> = page.items.iter().map(|record| render_row(record)).collect();
            let table = Table::new(rows, self.column_widths())
                .header(self.header_row())
                .block(block)
                .highlight_style(Styles::selected())
                .highlight_symbol("> ");
            f.render_stateful_widget(table, chunks[1], &mut self.row_state);
        }

        f.render_widget(Paragraph::new(self.footer_line()), chunks[2]);
    }
}

impl<R: Record> Paginated for DataTable<R> {
    fn current_page(&self) -> usize {
        self.page.current_page
    }

    fn go_to_page(&mut self, page: usize) {
        self.page.current_page = page;
        let total = self.total_pages();
        self.page.clamp_to(total);
        self.restore_selection(None);
    }

    fn total_pages(&self) -> usize {
        self.page.total_pages(self.derived.filtered_count())
    }
}

impl<R: Record> Navigable for DataTable<R> {
    fn navigate_up(&mut self) {
        let count = self.get_item_count();
        if count == 0 {
            return;
        }
        let i = match self.row_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.row_state.select(Some(i));
    }

    fn navigate_down(&mut self) {
        let count = self.get_item_count();
        if count == 0 {
            return;
        }
        let i = match self.row_state.selected() {
            Some(i) if i + 1 < count => i + 1,
            _ => 0,
        };
        self.row_state.select(Some(i));
    }

    fn get_selected_index(&self) -> Option<usize> {
        self.row_state.selected()
    }

    fn set_selected_index(&mut self, index: Option<usize>) {
        let count = self.get_item_count();
        self.row_state.select(index.filter(|&i| i < count));
    }

    fn get_item_count(&self) -> usize {
        self.visible_range().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::JsonRecord;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn rec(value: serde_json::Value) -> JsonRecord {
        serde_json::from_value(value).unwrap()
    }

    fn years() -> Vec<JsonRecord> {
        vec![
            rec(json!({"id": "1", "year": 2020})),
            rec(json!({"id": "2", "year": 2019})),
            rec(json!({"id": "3", "year": 2019})),
        ]
    }

    fn year_table() -> DataTable<JsonRecord> {
        let mut table = DataTable::new(
            "Années",
            vec![Column::new("year", "Année").sortable(), Column::new("actions", "Actions")],
        );
        table.set_records(years());
        table
    }

    fn numbered(count: usize) -> DataTable<JsonRecord> {
        let mut table = DataTable::new("Items", vec![Column::new("n", "N").sortable()]);
        table.set_records(
            (1..=count)
                .map(|i| rec(json!({"id": i.to_string(), "n": i})))
                .collect(),
        );
        table
    }

    fn ids(table: &DataTable<JsonRecord>) -> Vec<String> {
        table.page_items().iter().map(|r| r.id().to_string()).collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn row(record: &JsonRecord) -> Row<'static> {
        Row::new(vec![
            Cell::from(record.field_text("year")),
            Cell::from(format!("#{}", record.id())),
        ])
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_initial_state() {
        let table = year_table();
        assert!(table.sort().is_none());
        assert_eq!(table.filter_text(), "");
        assert_eq!(table.current_page(), 1);
        assert_eq!(table.page_size(), PageSize::Five);
        assert_eq!(ids(&table), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_sort_toggle_cycle() {
        let mut table = year_table();

        assert!(table.request_sort("year"));
        assert_eq!(table.sort(), Some(&SortSpec::ascending("year")));
        assert_eq!(ids(&table), vec!["2", "3", "1"]);

        assert!(table.request_sort("year"));
        assert_eq!(table.sort(), Some(&SortSpec::descending("year")));
        assert_eq!(ids(&table), vec!["1", "2", "3"]);

        assert!(table.request_sort("year"));
        assert_eq!(table.sort(), Some(&SortSpec::ascending("year")));
    }

    #[test]
    fn test_sort_ignores_non_sortable_columns() {
        let mut table = year_table();
        table.request_sort("year");

        assert!(!table.request_sort("actions"));
        assert!(!table.request_sort("missing"));
        assert_eq!(table.sort(), Some(&SortSpec::ascending("year")));
    }

    #[test]
    fn test_aria_sort() {
        let mut table = year_table();
        assert_eq!(table.aria_sort("year"), Some(AriaSort::None));
        assert_eq!(table.aria_sort("actions"), None);

        table.request_sort("year");
        assert_eq!(table.aria_sort("year"), Some(AriaSort::Ascending));
        table.request_sort("year");
        assert_eq!(table.aria_sort("year"), Some(AriaSort::Descending));
        assert_eq!(table.aria_sort("year").unwrap().as_str(), "descending");
    }

    #[test]
    fn test_filter() {
        let mut table = year_table();
        table.set_filter_text("2020");
        assert_eq!(ids(&table), vec!["1"]);
        assert_eq!(table.total_pages(), 1);

        table.set_filter_text("1999");
        assert!(table.page_items().is_empty());
        assert_eq!(table.total_pages(), 0);
        assert_eq!(table.current_page(), 1);
        assert!(!table.can_next());
        assert!(!table.can_previous());
    }

    #[test]
    fn test_pagination() {
        let mut table = numbered(12);
        assert_eq!(table.total_pages(), 3);

        table.previous_page();
        assert_eq!(table.current_page(), 1);

        table.next_page();
        table.next_page();
        assert_eq!(table.current_page(), 3);
        assert_eq!(ids(&table), vec!["11", "12"]);

        table.next_page();
        assert_eq!(table.current_page(), 3);
        assert!(!table.can_next());
        assert!(table.can_previous());
    }

    #[test]
    fn test_set_page_size_resets_page() {
        let mut table = numbered(12);
        table.go_to_last_page();
        assert_eq!(table.current_page(), 3);

        table.set_page_size(PageSize::Ten);
        assert_eq!(table.current_page(), 1);
        assert_eq!(table.total_pages(), 2);
    }

    #[test]
    fn test_sort_keeps_page() {
        let mut table = numbered(12);
        table.next_page();
        table.request_sort("n");
        table.request_sort("n");
        assert_eq!(table.current_page(), 2);
        assert_eq!(ids(&table), vec!["7", "6", "5", "4", "3"]);
    }

    #[test]
    fn test_filter_clamps_stale_page() {
        let mut table = numbered(12);
        table.go_to_last_page();
        table.set_filter_text("1");
        // 1, 10, 11, 12
        assert_eq!(table.total_pages(), 1);
        assert_eq!(table.current_page(), 1);
        assert_eq!(ids(&table), vec!["1", "10", "11", "12"]);
    }

    #[test]
    fn test_set_records_clamps_page() {
        let mut table = numbered(12);
        table.go_to_last_page();
        table.set_records(years());
        assert_eq!(table.current_page(), 1);
        assert_eq!(table.total_pages(), 1);
    }

    #[test]
    fn test_selection_follows_record_across_sort() {
        let mut table = year_table();
        table.navigate_down();
        table.navigate_down();
        assert_eq!(table.selected_id().as_deref(), Some("3"));

        table.request_sort("year");
        // order is now 2, 3, 1
        assert_eq!(table.get_selected_index(), Some(1));
        assert_eq!(table.selected_id().as_deref(), Some("3"));
    }

    #[test]
    fn test_navigation_wraps_within_page() {
        let mut table = year_table();
        assert_eq!(table.get_selected_index(), Some(0));
        table.navigate_up();
        assert_eq!(table.get_selected_index(), Some(2));
        table.navigate_down();
        assert_eq!(table.get_selected_index(), Some(0));
    }

    #[test]
    fn test_first_and_last_row_keys() {
        let mut table = numbered(12);
        assert_eq!(table.handle_key(key(KeyCode::Char('G'))), Some(ScreenAction::None));
        assert_eq!(table.selected_id().as_deref(), Some("5"));

        table.go_to_last_page();
        table.handle_key(key(KeyCode::Char('G')));
        assert_eq!(table.selected_id().as_deref(), Some("12"));
        table.handle_key(key(KeyCode::Char('g')));
        assert_eq!(table.selected_id().as_deref(), Some("11"));
    }

    #[test]
    fn test_search_keys_update_filter_every_keystroke() {
        let mut table = year_table();
        assert_eq!(table.handle_key(key(KeyCode::Char('/'))), Some(ScreenAction::None));
        assert!(table.is_search_focused());

        table.handle_key(key(KeyCode::Char('2')));
        table.handle_key(key(KeyCode::Char('0')));
        table.handle_key(key(KeyCode::Char('2')));
        assert_eq!(table.filter_text(), "202");
        assert_eq!(table.filtered_count(), 1);

        table.handle_key(key(KeyCode::Backspace));
        assert_eq!(table.filter_text(), "20");
        assert_eq!(table.filtered_count(), 3);

        // 's' is text while the search box has focus
        table.handle_key(key(KeyCode::Char('s')));
        assert_eq!(table.filter_text(), "20s");
        assert_eq!(table.page_size(), PageSize::Five);

        table.handle_key(key(KeyCode::Esc));
        assert!(!table.is_search_focused());
    }

    #[test]
    fn test_table_keys() {
        let mut table = numbered(12);

        let action = table.handle_key(key(KeyCode::Char('1')));
        assert_eq!(action, Some(ScreenAction::SetStatus("Tri: N ▲".to_string())));
        assert_eq!(table.sort(), Some(&SortSpec::ascending("n")));

        // no second column
        assert_eq!(table.handle_key(key(KeyCode::Char('2'))), None);

        table.handle_key(key(KeyCode::Right));
        assert_eq!(table.current_page(), 2);
        table.handle_key(key(KeyCode::End));
        assert_eq!(table.current_page(), 3);
        table.handle_key(key(KeyCode::PageUp));
        assert_eq!(table.current_page(), 2);

        table.handle_key(key(KeyCode::Char('s')));
        assert_eq!(table.page_size(), PageSize::Ten);
        assert_eq!(table.current_page(), 1);

        assert_eq!(table.handle_key(key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_non_sortable_column_key() {
        let mut table = year_table();
        let action = table.handle_key(key(KeyCode::Char('2')));
        assert!(matches!(action, Some(ScreenAction::SetStatus(msg)) if msg.contains("n'est pas triable")));
        assert!(table.sort().is_none());
    }

    #[test]
    fn test_render_headers_rows_and_footer() {
        let mut table = year_table();
        table.request_sort("year");

        let mut terminal = Terminal::new(TestBackend::new(100, 14)).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                table.render(f, area, row);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Année ▲"));
        assert!(text.contains("Années (3)"));
        assert!(text.contains("#2"));
        assert!(text.contains("Page 1 sur 1"));
        assert!(text.contains("Lignes par page: 5"));
    }

    #[test]
    fn test_render_empty_states() {
        let mut table: DataTable<JsonRecord> = DataTable::new("Pays", vec![Column::new("name", "Nom")]);
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                table.render(f, area, row);
            })
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Aucune donnée"));
        assert!(text.contains("Page 1 sur 0"));

        let mut table = year_table();
        table.set_filter_text("nothing");
        terminal
            .draw(|f| {
                let area = f.size();
                table.render(f, area, row);
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("Aucun résultat"));
    }

    #[test]
    fn test_custom_labels() {
        let labels = TableLabels {
            page_format: "Page {current} of {total}".to_string(),
            ..TableLabels::default()
        };
        let table = numbered(12).with_labels(labels);
        assert_eq!(table.page_text(), "Page 1 of 3");
    }
}
