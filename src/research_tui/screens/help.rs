//! Help screen for the Perfect Research TUI

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::research_tui::{traits::ScreenAction, ui::Styles};

/// Help sections
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HelpSection {
    Overview,
    Tables,
    Administration,
    Documents,
    Shortcuts,
}

impl HelpSection {
    pub const ALL: [HelpSection; 5] = [
        HelpSection::Overview,
        HelpSection::Tables,
        HelpSection::Administration,
        HelpSection::Documents,
        HelpSection::Shortcuts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HelpSection::Overview => "Présentation",
            HelpSection::Tables => "Tableaux",
            HelpSection::Administration => "Administration",
            HelpSection::Documents => "Documents",
            HelpSection::Shortcuts => "Raccourcis",
        }
    }

    fn content(&self) -> Vec<Line<'static>> {
        match self {
            HelpSection::Overview => vec![
                Line::from(Span::styled("Perfect Research - Administration", Styles::title())),
                Line::from(""),
                Line::from("Client terminal de la plateforme Perfect Research."),
                Line::from(""),
                Line::from(Span::styled("Avant de commencer:", Styles::info())),
                Line::from("1. Connectez-vous: perfect-research login --email ... --password ..."),
                Line::from("2. Lancez l'interface: perfect-research tui"),
                Line::from("3. Choisissez une ressource dans le menu principal"),
            ],
            HelpSection::Tables => vec![
                Line::from(Span::styled("Tableaux", Styles::title())),
                Line::from(""),
                Line::from("Chaque liste se trie, se filtre et se pagine de la même façon."),
                Line::from(""),
                Line::from(Span::styled("Tri:", Styles::info())),
                Line::from("• 1-9 trie sur la N-ième colonne (▲ croissant, ▼ décroissant)"),
                Line::from("• Rappuyer inverse le sens; une nouvelle colonne repart en croissant"),
                Line::from(""),
                Line::from(Span::styled("Filtre:", Styles::info())),
                Line::from("• / ouvre la recherche, le filtre s'applique à chaque frappe"),
                Line::from("• Insensible à la casse, sur toutes les colonnes"),
                Line::from("• Entrée ou Échap referme la saisie"),
                Line::from(""),
                Line::from(Span::styled("Pagination:", Styles::info())),
                Line::from("• ←/→ ou PgPréc/PgSuiv: page précédente / suivante"),
                Line::from("• Début/Fin: première / dernière page"),
                Line::from("• s: lignes par page 5, 10, 15, 20, 25"),
            ],
            HelpSection::Administration => vec![
                Line::from(Span::styled("Administration", Styles::title())),
                Line::from(""),
                Line::from("Années, universités, pays, disciplines et utilisateurs."),
                Line::from(""),
                Line::from(Span::styled("Actions:", Styles::info())),
                Line::from("• r recharge la liste depuis le serveur"),
                Line::from("• x ou Suppr supprime la ligne sélectionnée (confirmer avec o)"),
                Line::from("• ↑/↓ déplace la sélection dans la page"),
                Line::from("• g / G saute à la première / dernière ligne"),
            ],
            HelpSection::Documents => vec![
                Line::from(Span::styled("Recherche de documents", Styles::title())),
                Line::from(""),
                Line::from("Saisissez un terme puis Entrée pour interroger le serveur."),
                Line::from("Les résultats se trient et se filtrent comme les autres tableaux."),
                Line::from(""),
                Line::from(Span::styled("Actions:", Styles::info())),
                Line::from("• Tab ou n revient à la saisie de la requête"),
                Line::from("• Entrée affiche le détail du document sélectionné"),
            ],
            HelpSection::Shortcuts => vec![
                Line::from(Span::styled("Raccourcis clavier", Styles::title())),
                Line::from(""),
                Line::from(Span::styled("Global:", Styles::info())),
                Line::from("┌─────────────┬─────────────────────────────────┐"),
                Line::from("│ Échap       │ Retour                          │"),
                Line::from("│ q           │ Quitter                         │"),
                Line::from("│ F1 ou ?     │ Aide rapide                     │"),
                Line::from("└─────────────┴─────────────────────────────────┘"),
                Line::from(""),
                Line::from(Span::styled("Tableaux:", Styles::info())),
                Line::from("┌─────────────┬─────────────────────────────────┐"),
                Line::from("│ /           │ Filtrer                         │"),
                Line::from("│ 1-9         │ Trier                           │"),
                Line::from("│ s           │ Lignes par page                 │"),
                Line::from("│ ←/→         │ Page précédente / suivante      │"),
                Line::from("│ r           │ Recharger                       │"),
                Line::from("│ x           │ Supprimer                       │"),
                Line::from("└─────────────┴─────────────────────────────────┘"),
            ],
        }
    }
}

/// Help screen state
pub struct HelpScreen {
    pub current_section: usize,
    pub section_state: ListState,
    pub scroll_offset: usize,
}

impl Default for HelpScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpScreen {
    pub fn new() -> Self {
        let mut section_state = ListState::default();
        section_state.select(Some(0));

        Self {
            current_section: 0,
            section_state,
            scroll_offset: 0,
        }
    }

    pub fn section(&self) -> HelpSection {
        HelpSection::ALL[self.current_section]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Up if self.current_section > 0 => {
                self.current_section -= 1;
            }
            KeyCode::Down if self.current_section + 1 < HelpSection::ALL.len() => {
                self.current_section += 1;
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
                return Some(ScreenAction::None);
            }
            KeyCode::PageDown => {
                let max = self.section().content().len().saturating_sub(1);
                self.scroll_offset = (self.scroll_offset + 10).min(max);
                return Some(ScreenAction::None);
            }
            KeyCode::Up | KeyCode::Down => return Some(ScreenAction::None),
            _ => return None,
        }
        self.section_state.select(Some(self.current_section));
        self.scroll_offset = 0;
        Some(ScreenAction::None)
    }

    /// Draw the help screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
            .split(area);

        self.draw_section_list(f, chunks[0]);
        self.draw_content(f, chunks[1]);
    }

    fn draw_section_list(&mut self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = HelpSection::ALL
            .iter()
            .enumerate()
            .map(|(i, section)| {
                let style = if i == self.current_section {
                    Styles::selected()
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(Span::styled(section.as_str(), style)))
            })
            .collect();

        let section_list = List::new(items)
            .block(
                Block::default()
                    .title("Rubriques")
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            )
            .highlight_style(Styles::selected());

        f.render_stateful_widget(section_list, area, &mut self.section_state);
    }

    fn draw_content(&self, f: &mut Frame, area: Rect) {
        let visible_lines: Vec<Line> = self
            .section()
            .content()
            .into_iter()
            .skip(self.scroll_offset)
            .collect();

        let content_widget = Paragraph::new(visible_lines)
            .block(
                Block::default()
                    .title(format!("Aide - {}", self.section().as_str()))
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            )
            .wrap(Wrap { trim: true });

        f.render_widget(content_widget, area);
    }
}
