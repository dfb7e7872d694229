//! UI components and widgets.

mod carousel;
mod detail;
mod help;

pub use carousel::{CarouselView, PageDots};
pub use detail::DetailModal;
pub use help::HelpOverlay;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Color;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use certring_core::Certificate;

use crate::theme::Theme;

/// Layout areas for the application.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub indicator: Rect,
    pub footer: Rect,
}

impl AppLayout {
    /// Compute layout from terminal area.
    pub fn new(area: Rect) -> Self {
        let [header, main, indicator, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        Self {
            header,
            main,
            indicator,
            footer,
        }
    }
}

/// Accent color of a certificate, falling back to the theme's info color.
pub fn accent_color(cert: &Certificate, theme: &Theme) -> Color {
    cert.accent_rgb()
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(theme.info)
}

/// Center a `width` x `height` popup inside `area`.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

/// Truncate a string to fit `max_width` terminal columns.
pub fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
