//! Screen modules for the Perfect Research TUI

pub mod documents;
pub mod help;
pub mod main_menu;
pub mod resource;

pub use documents::DocumentsScreen;
pub use help::HelpScreen;
pub use main_menu::MainMenuScreen;
pub use resource::ResourceScreen;
