//! Common event handlers for the Perfect Research TUI
//!
//! Reusable key handling composed by the screens and the table component.

use crossterm::event::{KeyCode, KeyEvent};

use super::traits::{Navigable, Paginated, ScreenAction};

/// Common keyboard event handling utilities
pub struct CommonKeyHandler;

impl CommonKeyHandler {
    /// Handle Up/Down and g/G (first/last row) for list-based widgets
    pub fn handle_navigation_keys<T: Navigable>(
        navigable: &mut T,
        key: KeyEvent,
    ) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                navigable.navigate_up();
                Some(ScreenAction::None)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                navigable.navigate_down();
                Some(ScreenAction::None)
            }
            KeyCode::Char('g') => {
                navigable.navigate_to_first();
                Some(ScreenAction::None)
            }
            KeyCode::Char('G') => {
                navigable.navigate_to_last();
                Some(ScreenAction::None)
            }
            _ => None,
        }
    }

    /// Handle pagination keys
    pub fn handle_pagination_keys<T: Paginated>(
        paginated: &mut T,
        key: KeyEvent,
    ) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Left | KeyCode::PageUp => {
                paginated.previous_page();
                Some(ScreenAction::None)
            }
            KeyCode::Right | KeyCode::PageDown => {
                paginated.next_page();
                Some(ScreenAction::None)
            }
            KeyCode::Home => {
                paginated.go_to_first_page();
                Some(ScreenAction::None)
            }
            KeyCode::End => {
                paginated.go_to_last_page();
                Some(ScreenAction::None)
            }
            _ => None,
        }
    }

    /// Handle global application keys
    pub fn handle_global_keys(key: KeyEvent) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Char('q') => Some(ScreenAction::Quit),
            KeyCode::Esc => Some(ScreenAction::NavigateBack),
            _ => None,
        }
    }
}

/// Specialized handler for menu-style screens
pub struct MenuHandler;

impl MenuHandler {
    /// Handle menu selection with Enter key
    pub fn handle_menu_selection<T: Navigable>(
        navigable: &T,
        key: KeyEvent,
        menu_actions: &[ScreenAction],
    ) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Enter => navigable
                .get_selected_index()
                .and_then(|selected| menu_actions.get(selected).cloned()),
            _ => None,
        }
    }

    /// Handle menu shortcuts (character keys, case-insensitive)
    pub fn handle_menu_shortcuts(
        key: KeyEvent,
        shortcuts: &[(char, ScreenAction)],
    ) -> Option<ScreenAction> {
        if let KeyCode::Char(c) = key.code {
            for (shortcut_char, action) in shortcuts {
                if shortcut_char.to_ascii_uppercase() == c.to_ascii_uppercase() {
                    return Some(action.clone());
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    struct Pages {
        current: usize,
        total: usize,
    }

    impl Paginated for Pages {
        fn current_page(&self) -> usize {
            self.current
        }

        fn go_to_page(&mut self, page: usize) {
            self.current = page.clamp(1, self.total.max(1));
        }

        fn total_pages(&self) -> usize {
            self.total
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_pagination_keys_respect_bounds() {
        let mut pages = Pages { current: 1, total: 3 };

        CommonKeyHandler::handle_pagination_keys(&mut pages, key(KeyCode::Left));
        assert_eq!(pages.current, 1);

        CommonKeyHandler::handle_pagination_keys(&mut pages, key(KeyCode::Right));
        CommonKeyHandler::handle_pagination_keys(&mut pages, key(KeyCode::PageDown));
        CommonKeyHandler::handle_pagination_keys(&mut pages, key(KeyCode::Right));
        assert_eq!(pages.current, 3);

        CommonKeyHandler::handle_pagination_keys(&mut pages, key(KeyCode::Home));
        assert_eq!(pages.current, 1);
        CommonKeyHandler::handle_pagination_keys(&mut pages, key(KeyCode::End));
        assert_eq!(pages.current, 3);

        assert!(CommonKeyHandler::handle_pagination_keys(&mut pages, key(KeyCode::Char('x'))).is_none());
    }

    #[test]
    fn test_no_pages() {
        let mut pages = Pages { current: 1, total: 0 };
        assert!(!pages.can_next());
        assert!(!pages.can_previous());
        pages.next_page();
        pages.go_to_last_page();
        assert_eq!(pages.current, 1);
    }

    #[test]
    fn test_menu_shortcuts_ignore_case() {
        let shortcuts = [('d', ScreenAction::Quit)];
        assert_eq!(
            MenuHandler::handle_menu_shortcuts(key(KeyCode::Char('D')), &shortcuts),
            Some(ScreenAction::Quit)
        );
        assert_eq!(MenuHandler::handle_menu_shortcuts(key(KeyCode::Char('z')), &shortcuts), None);
    }
}
