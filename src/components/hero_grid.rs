use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::Alignment;
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tui_dispatch::{DataResource, EventKind};

use super::{
    spinner, Component, ACCENT_GOLD, ACCENT_RED, BG_BASE, BG_HIGHLIGHT, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::state::{AppState, Hero};

pub const CARD_WIDTH: u16 = 20;
pub const CARD_HEIGHT: u16 = 3;

pub struct HeroGridProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Hero cards laid out row by row in catalog order.
///
/// Column count follows the last rendered width so vertical movement
/// jumps a whole row.
pub struct HeroGrid {
    columns: usize,
    first_row: usize,
}

impl Default for HeroGrid {
    fn default() -> Self {
        Self {
            columns: 1,
            first_row: 0,
        }
    }
}

pub fn columns_for(width: u16) -> usize {
    usize::from((width / CARD_WIDTH).max(1))
}

impl HeroGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    fn row_step(&self) -> i16 {
        i16::try_from(self.columns).unwrap_or(i16::MAX)
    }

    /// Keep the selected row inside the visible window.
    fn scroll_to(&mut self, selected_row: usize, visible_rows: usize) {
        if selected_row < self.first_row {
            self.first_row = selected_row;
        } else if selected_row >= self.first_row + visible_rows {
            self.first_row = selected_row + 1 - visible_rows;
        }
    }

    fn render_cards(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let heroes = state.visible_heroes();
        self.columns = columns_for(area.width);
        let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
        let selected_row = state.selected_index / self.columns;
        let total_rows = heroes.len().div_ceil(self.columns);
        self.first_row = self.first_row.min(total_rows.saturating_sub(1));
        self.scroll_to(selected_row, visible_rows);

        let skip = self.first_row * self.columns;
        for (offset, hero) in heroes
            .iter()
            .enumerate()
            .skip(skip)
            .take(visible_rows * self.columns)
        {
            let slot = offset - skip;
            let row = (slot / self.columns) as u16;
            let col = (slot % self.columns) as u16;
            let card = Rect {
                x: area.x + col * CARD_WIDTH,
                y: area.y + row * CARD_HEIGHT,
                width: CARD_WIDTH.min(area.width),
                height: CARD_HEIGHT,
            };
            if card.bottom() > area.bottom() {
                break;
            }
            render_card(frame, card, hero, offset == state.selected_index);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, hero: &Hero, selected: bool) {
    let (border, text) = if selected {
        (
            Style::default().fg(ACCENT_GOLD),
            Style::default()
                .fg(TEXT_MAIN)
                .bg(BG_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (Style::default().fg(TEXT_DIM), Style::default().fg(TEXT_MAIN))
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .style(text);
    let name = Paragraph::new(hero.localized_name.as_str())
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(name, area);
}

fn render_message(frame: &mut Frame, area: Rect, line: Line<'_>) {
    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

impl Component<Action> for HeroGrid {
    type Props<'a> = HeroGridProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return None;
                }
                match key.code {
                    KeyCode::Left | KeyCode::Char('h') => Some(Action::SelectionMove(-1)),
                    KeyCode::Right | KeyCode::Char('l') => Some(Action::SelectionMove(1)),
                    KeyCode::Up | KeyCode::Char('k') => {
                        Some(Action::SelectionMove(-self.row_step()))
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        Some(Action::SelectionMove(self.row_step()))
                    }
                    KeyCode::Home | KeyCode::Char('g') => Some(Action::SelectionJumpTop),
                    KeyCode::End | KeyCode::Char('G') => Some(Action::SelectionJumpBottom),
                    KeyCode::Enter => {
                        if props.state.selected_hero().is_some() {
                            Some(Action::DetailOpen)
                        } else {
                            None
                        }
                    }
                    KeyCode::Char('/') => Some(Action::SearchStart),
                    KeyCode::Esc if !props.state.search.query.is_empty() => {
                        Some(Action::SearchCancel)
                    }
                    KeyCode::Char('r') | KeyCode::F(5) if props.state.heroes.is_failed() => {
                        Some(Action::HeroesFetch)
                    }
                    KeyCode::Char('q') => Some(Action::Quit),
                    _ => None,
                }
            }
            EventKind::Scroll { delta, .. } => {
                let rows = *delta as i16;
                Some(Action::SelectionMove(rows.saturating_mul(self.row_step())))
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let title = format!(
            " HEROES {}/{} ",
            state.filtered_indices.len(),
            state.all_heroes().len()
        );
        let border = if props.is_focused {
            Style::default().fg(ACCENT_RED)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border)
            .style(Style::default().bg(BG_BASE).fg(TEXT_MAIN));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match &state.heroes {
            DataResource::Empty | DataResource::Loading => {
                let line = Line::from(Span::styled(
                    format!("{} Loading heroes...", spinner(state.tick)),
                    Style::default().fg(ACCENT_GOLD),
                ));
                render_message(frame, inner, line);
            }
            DataResource::Failed(error) => {
                let line = Line::from(Span::styled(
                    format!("Error loading heroes: {error}"),
                    Style::default().fg(ACCENT_RED),
                ));
                render_message(frame, inner, line);
            }
            DataResource::Loaded(_) if state.filtered_indices.is_empty() => {
                let line = Line::from(Span::styled(
                    format!("No heroes match \"{}\"", state.search.query.trim()),
                    Style::default().fg(TEXT_DIM),
                ));
                render_message(frame, inner, line);
            }
            DataResource::Loaded(_) => self.render_cards(frame, inner, state),
        }
    }
}
