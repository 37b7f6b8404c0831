pub mod footer;
pub mod hero_grid;
pub mod hero_modal;
pub mod search_bar;

use ratatui::style::Color;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use footer::{Footer, FooterProps};
pub use hero_grid::{HeroGrid, HeroGridProps, CARD_HEIGHT, CARD_WIDTH};
pub use hero_modal::{HeroModal, HeroModalProps};
pub use search_bar::{SearchBar, SearchBarProps};

pub const BG_BASE: Color = Color::Rgb(14, 14, 20);
pub const BG_PANEL: Color = Color::Rgb(24, 24, 34);
pub const BG_MODAL: Color = Color::Rgb(32, 30, 40);
pub const BG_HIGHLIGHT: Color = Color::Rgb(120, 32, 28);
pub const TEXT_MAIN: Color = Color::Rgb(234, 230, 222);
pub const TEXT_DIM: Color = Color::Rgb(150, 146, 140);
pub const ACCENT_RED: Color = Color::Rgb(214, 66, 48);
pub const ACCENT_GOLD: Color = Color::Rgb(255, 204, 0);

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn spinner(tick: u64) -> &'static str {
    SPINNER[(tick % SPINNER.len() as u64) as usize]
}
