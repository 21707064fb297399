//! Core traits for the Perfect Research TUI
//!
//! Screens return a [`ScreenAction`] from key handling and the app applies
//! it. List-like widgets implement [`Navigable`] and [`Paginated`] so the
//! shared key handlers can drive them.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::api::{AdminResource, ResourcePayload};
use crate::research_tui::app::Screen;

/// Actions that can be returned from screen event handling
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenAction {
    /// Navigate to a different screen
    NavigateTo(Screen),
    /// Go back to previous screen
    NavigateBack,
    /// Quit the application
    Quit,
    /// Set status message
    SetStatus(String),
    /// Set error message
    SetError(String),
    /// Re-fetch the records of the active admin screen
    Reload(AdminResource),
    /// Delete one record by id
    Delete { resource: AdminResource, id: String },
    /// Run a document search
    Search(String),
    /// Key consumed, nothing else to do
    None,
}

/// Trait for widgets with a movable row highlight
pub trait Navigable {
    /// Move selection up
    fn navigate_up(&mut self);

    /// Move selection down
    fn navigate_down(&mut self);

    /// Get currently selected index
    fn get_selected_index(&self) -> Option<usize>;

    /// Set selected index
    fn set_selected_index(&mut self, index: Option<usize>);

    /// Get total number of items
    fn get_item_count(&self) -> usize;

    /// Navigate to first item
    fn navigate_to_first(&mut self) {
        if self.get_item_count() > 0 {
            self.set_selected_index(Some(0));
        }
    }

    /// Navigate to last item
    fn navigate_to_last(&mut self) {
        let count = self.get_item_count();
        if count > 0 {
            self.set_selected_index(Some(count - 1));
        }
    }
}

/// Trait for widgets with paginated content.
///
/// Pages are 1-based. `total_pages` may be 0 when there is nothing to show,
/// in which case the current page stays at 1.
pub trait Paginated {
    /// Current page number (1-based)
    fn current_page(&self) -> usize;

    /// Jump to a page; implementors clamp to the valid range
    fn go_to_page(&mut self, page: usize);

    /// Total number of pages
    fn total_pages(&self) -> usize;

    /// Whether a next page exists
    fn can_next(&self) -> bool {
        self.current_page() < self.total_pages()
    }

    /// Whether a previous page exists
    fn can_previous(&self) -> bool {
        self.current_page() > 1
    }

    /// Go to next page, no-op on the last page
    fn next_page(&mut self) {
        if self.can_next() {
            let current = self.current_page();
            self.go_to_page(current + 1);
        }
    }

    /// Go to previous page, no-op on the first page
    fn previous_page(&mut self) {
        if self.can_previous() {
            let current = self.current_page();
            self.go_to_page(current - 1);
        }
    }

    /// Go to first page
    fn go_to_first_page(&mut self) {
        self.go_to_page(1);
    }

    /// Go to last page
    fn go_to_last_page(&mut self) {
        let total = self.total_pages();
        if total > 0 {
            self.go_to_page(total);
        }
    }
}

/// Object-safe view over one admin resource screen, so the app can hold
/// screens of different record types side by side
pub trait AdminView {
    fn resource(&self) -> AdminResource;

    fn draw(&mut self, f: &mut Frame, area: Rect);

    fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenAction>;

    /// Replace the records with a freshly fetched payload. Returns false when
    /// the payload belongs to another resource.
    fn apply_payload(&mut self, payload: ResourcePayload) -> bool;

    fn set_loading(&mut self, loading: bool);

    fn is_loading(&self) -> bool;

    /// A text input has focus and wants every key
    fn is_editing(&self) -> bool;

    fn is_loaded(&self) -> bool;

    fn record_count(&self) -> usize;
}
