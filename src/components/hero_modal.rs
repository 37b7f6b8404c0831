use crossterm::event::KeyCode;
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    centered_rect, BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding,
};

use super::{spinner, Component, ACCENT_GOLD, ACCENT_RED, BG_MODAL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::assets;
use crate::state::{DetailPanel, Hero, HeroDetail};

pub struct HeroModalProps<'a> {
    pub detail: &'a DetailPanel,
    pub tick: u64,
    pub is_focused: bool,
}

pub struct HeroModal {
    modal: Modal,
    /// Largest useful scroll offset from the last render.
    max_scroll: u16,
}

impl Default for HeroModal {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
            max_scroll: u16::MAX,
        }
    }
}

impl HeroModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll step that stays between the top and the end of the content.
    fn scroll_by(&self, current: u16, delta: i16) -> Option<Action> {
        let step = if delta >= 0 {
            let room = self.max_scroll.saturating_sub(current);
            i16::try_from(delta.unsigned_abs().min(room)).ok()?
        } else {
            -i16::try_from(delta.unsigned_abs().min(current)).ok()?
        };
        (step != 0).then_some(Action::DetailScroll(step))
    }
}

/// Rows `text` occupies when wrapped to `width` columns.
pub fn wrapped_height(text: &Text<'_>, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = text
        .lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn heading(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(ACCENT_GOLD)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}

fn dim(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(text.into(), Style::default().fg(TEXT_DIM)))
}

fn hero_header(hero: &Hero) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            hero.localized_name.clone(),
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
        )),
        Line::from(hero.roles_label()),
    ];
    let traits: Vec<&str> = [hero.primary_attr.as_deref(), hero.attack_type.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !traits.is_empty() {
        lines.push(dim(traits.join(" | ")));
    }
    lines.push(dim(assets::hero_image_url(&hero.name)));
    lines
}

fn ability_lines(detail: &HeroDetail) -> Vec<Line<'static>> {
    if detail.abilities.is_empty() {
        return vec![dim("No abilities data available")];
    }
    let mut lines = Vec::new();
    for ability in &detail.abilities {
        lines.push(Line::from(Span::styled(
            ability.display_name(),
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
        )));
        if !ability.description().is_empty() {
            lines.push(Line::from(ability.description().to_string()));
        }
        lines.push(dim(assets::ability_icon_url(&ability.key)));
        lines.push(Line::default());
    }
    lines
}

fn item_lines(detail: &HeroDetail) -> Vec<Line<'static>> {
    if detail.items.is_empty() {
        return vec![dim("No popular items data available")];
    }
    detail
        .items
        .iter()
        .flat_map(|item| {
            let mut spans = vec![Span::styled(
                item.display_name().to_string(),
                Style::default().fg(TEXT_MAIN),
            )];
            if let Some(cost) = item.info.cost {
                spans.push(Span::styled(
                    format!("  {cost}g"),
                    Style::default().fg(ACCENT_GOLD),
                ));
            }
            [Line::from(spans), dim(assets::item_icon_url(&item.key))]
        })
        .collect()
}

/// Body text for the modal in its current lifecycle state.
pub fn detail_text(detail: &DetailPanel, tick: u64) -> Text<'static> {
    let mut lines = Vec::new();
    if let Some(hero) = &detail.hero {
        lines.extend(hero_header(hero));
        lines.push(Line::default());
    }

    match &detail.view {
        DataResource::Empty | DataResource::Loading => {
            let spin = spinner(tick);
            lines.push(heading("Abilities"));
            lines.push(dim(format!("{spin} Loading abilities...")));
            lines.push(Line::default());
            lines.push(heading("Popular Items"));
            lines.push(dim(format!("{spin} Loading popular items...")));
        }
        DataResource::Failed(error) => {
            let failure = Line::from(Span::styled(
                format!("Error loading hero details: {error}"),
                Style::default().fg(ACCENT_RED),
            ));
            lines.push(heading("Abilities"));
            lines.push(failure.clone());
            lines.push(Line::default());
            lines.push(heading("Popular Items"));
            lines.push(failure);
        }
        DataResource::Loaded(resolved) => {
            lines.push(heading("Abilities"));
            lines.extend(ability_lines(resolved));
            lines.push(heading("Popular Items"));
            lines.extend(item_lines(resolved));
        }
    }
    Text::from(lines)
}

/// Width and height for the modal, bounded by the terminal.
fn modal_size(area: Rect) -> (u16, u16) {
    let width = (area.width.saturating_mul(3) / 4).clamp(40.min(area.width), 100);
    let height = area.height.saturating_sub(4).max(area.height.min(10));
    (width, height)
}

impl Component<Action> for HeroModal {
    type Props<'a> = HeroModalProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || !props.detail.open {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => {
                    Some(Action::DetailClose)
                }
                KeyCode::Down | KeyCode::Char('j') => self.scroll_by(props.detail.scroll, 1),
                KeyCode::Up | KeyCode::Char('k') => self.scroll_by(props.detail.scroll, -1),
                KeyCode::PageDown | KeyCode::Char(' ') => {
                    self.scroll_by(props.detail.scroll, 10)
                }
                KeyCode::PageUp => self.scroll_by(props.detail.scroll, -10),
                _ => None,
            },
            EventKind::Scroll { delta, .. } => self.scroll_by(props.detail.scroll, *delta as i16),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let detail = props.detail;
        if !detail.open || area.width < 20 || area.height < 6 {
            return;
        }

        let (width, height) = modal_size(area);
        let modal_area = centered_rect(width, height, area);
        let title = detail
            .hero
            .as_ref()
            .map(|hero| format!(" {} ", hero.localized_name))
            .unwrap_or_default();
        let text = detail_text(detail, props.tick);

        let mut max_scroll = 0;
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let block = Block::default()
                .borders(Borders::ALL)
                .title(title.as_str())
                .border_style(Style::default().fg(ACCENT_RED));
            let inner = block.inner(content_area);
            max_scroll = wrapped_height(&text, inner.width).saturating_sub(inner.height);
            let body = Paragraph::new(text.clone())
                .block(block)
                .style(Style::default().fg(TEXT_MAIN))
                .wrap(Wrap { trim: false })
                .scroll((detail.scroll.min(max_scroll), 0));
            frame.render_widget(body, content_area);
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(BG_MODAL),
                        padding: Padding::default(),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::DetailClose,
                render_content: &mut render_content,
            },
        );
        self.max_scroll = max_scroll;
    }
}
