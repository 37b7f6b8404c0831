use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_dispatch::EventKind;

use super::{Component, ACCENT_GOLD, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub active: bool,
    pub is_focused: bool,
}

/// Single-line name filter. Every keystroke re-filters the full list.
#[derive(Default)]
pub struct SearchBar;

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || !props.active {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };

        match key.code {
            KeyCode::Esc => Some(Action::SearchCancel),
            KeyCode::Enter => Some(Action::SearchSubmit),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(Action::SearchInput(ch))
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let label = Span::styled(
            " Search: ",
            Style::default()
                .fg(ACCENT_GOLD)
                .add_modifier(Modifier::BOLD),
        );
        let line = if props.active {
            Line::from(vec![
                label,
                Span::styled(props.query, Style::default().fg(TEXT_MAIN)),
                Span::styled("_", Style::default().fg(ACCENT_GOLD)),
            ])
        } else if props.query.is_empty() {
            Line::from(vec![
                label,
                Span::styled("press / to filter heroes", Style::default().fg(TEXT_DIM)),
            ])
        } else {
            Line::from(vec![
                label,
                Span::styled(props.query, Style::default().fg(TEXT_MAIN)),
            ])
        };
        frame.render_widget(
            Paragraph::new(line).style(Style::default().bg(BG_PANEL)),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use tui_dispatch::testing::*;

    fn props(query: &str, active: bool) -> SearchBarProps<'_> {
        SearchBarProps {
            query,
            active,
            is_focused: true,
        }
    }

    #[test]
    fn typing_emits_input() {
        let mut bar = SearchBar;
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("q")), props("", true))
            .into_iter()
            .collect();
        actions.assert_first(Action::SearchInput('q'));
    }

    #[test]
    fn editing_keys() {
        let mut bar = SearchBar;
        let cases = [
            (KeyCode::Esc, Action::SearchCancel),
            (KeyCode::Enter, Action::SearchSubmit),
            (KeyCode::Backspace, Action::SearchBackspace),
        ];
        for (code, expected) in cases {
            let event = EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE));
            let actions: Vec<_> = bar
                .handle_event(&event, props("ax", true))
                .into_iter()
                .collect();
            actions.assert_first(expected);
        }
    }

    #[test]
    fn inactive_bar_ignores_keys() {
        let mut bar = SearchBar;
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("a")), props("", false))
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn render_shows_query_and_cursor() {
        let mut render = RenderHarness::new(40, 1);
        let mut bar = SearchBar;
        let output = render.render_to_string_plain(|frame| {
            bar.render(frame, frame.area(), props("lin", true));
        });
        assert!(output.contains("Search: lin_"));
    }
}
