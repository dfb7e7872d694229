//! Carousel widgets: the three visible cards and the page indicator.

use itertools::Itertools;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget, Wrap};

use certring_core::{Carousel, Certificate, Role, RoleStyle, Slot};

use super::{accent_color, truncate};
use crate::theme::Theme;

/// Roles drawn by the carousel, back to front.
const DRAW_ORDER: [Role; 3] = [Role::LeftNeighbor, Role::RightNeighbor, Role::Front];

/// The certificate ring: left neighbor, front card, right neighbor.
pub struct CarouselView<'a> {
    carousel: &'a Carousel,
    theme: &'a Theme,
    show_details: bool,
}

impl<'a> CarouselView<'a> {
    /// Create a new carousel view.
    pub fn new(carousel: &'a Carousel, theme: &'a Theme) -> Self {
        Self {
            carousel,
            theme,
            show_details: true,
        }
    }

    /// Show descriptions on the front card.
    pub fn show_details(mut self, show: bool) -> Self {
        self.show_details = show;
        self
    }
}

impl Widget for CarouselView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.carousel.is_loading() {
            return;
        }
        if self.carousel.is_empty() {
            Paragraph::new(Line::styled("No certificates", Style::new().fg(self.theme.muted)))
                .alignment(Alignment::Center)
                .render(centered_row(area), buf);
            return;
        }

        let [left, center, right] = Layout::horizontal([
            Constraint::Percentage(28),
            Constraint::Percentage(44),
            Constraint::Percentage(28),
        ])
        .areas(area);

        let mut cards = DRAW_ORDER
            .iter()
            .filter_map(|&role| self.carousel.item_in(role))
            .collect::<Vec<_>>();
        cards.sort_by_key(|(slot, _)| slot.role.style().z_index);

        let count = self.carousel.len();
        for (slot, cert) in cards {
            let column = match slot.role {
                Role::LeftNeighbor => left,
                Role::RightNeighbor => right,
                _ => center,
            };
            CardView::new(cert, slot, count, self.theme)
                .show_details(self.show_details)
                .render(scaled_area(column, slot.role.style()), buf);
        }
    }
}

/// Shrink a column to the card size implied by the role's scale.
fn scaled_area(column: Rect, style: &RoleStyle) -> Rect {
    let scale = style.relative_scale().clamp(0.0, 1.0);
    let height = ((column.height as f32 * scale).round() as u16).max(3.min(column.height));
    let margin = if style.interactive { 0 } else { 1 };
    let width = column.width.saturating_sub(margin * 2);
    Rect {
        x: column.x + margin,
        y: column.y + (column.height - height) / 2,
        width,
        height,
    }
}

fn centered_row(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height / 2,
        height: 1.min(area.height),
        ..area
    }
}

/// A single certificate card.
pub struct CardView<'a> {
    cert: &'a Certificate,
    slot: Slot,
    count: usize,
    theme: &'a Theme,
    show_details: bool,
}

impl<'a> CardView<'a> {
    /// Create a card for `cert` placed in `slot` of a ring of `count` items.
    pub fn new(cert: &'a Certificate, slot: Slot, count: usize, theme: &'a Theme) -> Self {
        Self {
            cert,
            slot,
            count,
            theme,
            show_details: true,
        }
    }

    /// Show the description (front card only).
    pub fn show_details(mut self, show: bool) -> Self {
        self.show_details = show;
        self
    }
}

impl Widget for CardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }

        let style = self.slot.role.style();
        let accent = accent_color(self.cert, self.theme);
        let faded = style.opacity < 1.0 || style.blur > 0;
        let fade = |s: Style| if faded { s.add_modifier(Modifier::DIM) } else { s };

        // Cards turned toward the center hug the side facing it.
        let alignment = match style.rotate_y.signum() {
            1 => Alignment::Right,
            -1 => Alignment::Left,
            _ => Alignment::Center,
        };

        let block = Block::bordered()
            .border_type(if style.interactive {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(fade(Style::new().fg(accent)))
            .title(Line::from(format!(" {}/{} ", self.slot.position + 1, self.count)))
            .title_alignment(alignment);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let width = inner.width as usize;
        let meta = [self.cert.issuer.as_deref(), self.cert.date.as_deref()]
            .into_iter()
            .flatten()
            .join("  •  ");

        let mut lines = vec![
            Line::styled(
                truncate(&self.cert.title.to_uppercase(), width),
                fade(self.theme.card_title),
            ),
            Line::from(Span::styled(
                truncate(&meta, width),
                fade(Style::new().fg(accent).add_modifier(Modifier::BOLD)),
            )),
        ];
        if style.interactive && self.show_details {
            if let Some(description) = &self.cert.description {
                lines.push(Line::default());
                lines.push(Line::styled(description.clone(), self.theme.card_body));
            }
        }

        let button_rows = if style.interactive && inner.height >= 4 { 1 } else { 0 };
        let text_area = Rect {
            height: inner.height - button_rows,
            ..inner
        };
        Paragraph::new(lines)
            .alignment(alignment)
            .wrap(Wrap { trim: true })
            .render(text_area, buf);

        if button_rows > 0 {
            let button_area = Rect {
                y: inner.y + inner.height - 1,
                height: 1,
                ..inner
            };
            Paragraph::new(Line::styled(" VIEW CREDENTIAL ⏎ ", self.theme.card_button))
                .alignment(Alignment::Center)
                .render(button_area, buf);
        }
    }
}

/// Page indicator: a wide bar for the focused position, dots for the rest.
pub struct PageDots<'a> {
    count: usize,
    focus: Option<usize>,
    accent: Color,
    theme: &'a Theme,
}

impl<'a> PageDots<'a> {
    /// Create an indicator for `count` positions.
    pub fn new(count: usize, focus: Option<usize>, accent: Color, theme: &'a Theme) -> Self {
        Self {
            count,
            focus,
            accent,
            theme,
        }
    }
}

impl Widget for PageDots<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(focus) = self.focus else {
            return;
        };
        if self.count == 0 || area.width == 0 {
            return;
        }

        // One 3-wide bar, count-1 dots, single-space separators.
        let needed = 3 + (self.count - 1) * 2;
        let line = if needed <= area.width as usize {
            let spans = (0..self.count).map(|i| {
                if i == focus {
                    Span::styled("━━━", Style::new().fg(self.accent))
                } else {
                    Span::styled("•", self.theme.border)
                }
            });
            Line::from(Itertools::intersperse(spans, Span::raw(" ")).collect::<Vec<_>>())
        } else {
            Line::styled(
                format!("{} / {}", focus + 1, self.count),
                Style::new().fg(self.accent),
            )
        };

        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
