//! Application rendering.

use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use certring_core::{Carousel, Certificate};

use crate::theme::Theme;
use crate::ui::{
    AppLayout, CarouselView, DetailModal, HelpOverlay, PageDots, accent_color, truncate,
};

use super::state::AppMode;

/// Autoplay status shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayStatus {
    /// Ticking every `Duration`.
    Running(Duration),
    /// Paused by the user.
    Paused,
    /// Nothing to rotate to.
    Idle,
}

/// Render context containing all the state needed for rendering.
pub struct RenderContext<'a> {
    pub mode: AppMode,
    pub theme: &'a Theme,
    pub carousel: &'a Carousel,
    pub autoplay: AutoplayStatus,
    pub show_details: bool,
    pub detail: Option<&'a Certificate>,
    pub error: Option<&'a str>,
    pub source: &'a str,
}

/// Main render function for the application.
pub fn render_app(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let base_style = Style::default()
        .bg(ctx.theme.background)
        .fg(ctx.theme.foreground);
    buf.set_style(area, base_style);

    let layout = AppLayout::new(area);
    let accent = ctx
        .carousel
        .focused()
        .map(|cert| accent_color(cert, ctx.theme))
        .unwrap_or(ctx.theme.info);

    render_header(ctx, accent, layout.header, buf);

    CarouselView::new(ctx.carousel, ctx.theme)
        .show_details(ctx.show_details)
        .render(layout.main, buf);

    if !ctx.carousel.is_loading() {
        PageDots::new(ctx.carousel.len(), ctx.carousel.focus_index(), accent, ctx.theme)
            .render(layout.indicator, buf);
    }

    render_footer(ctx, layout.footer, buf);

    match ctx.mode {
        AppMode::Help => HelpOverlay::new(ctx.theme).render(area, buf),
        AppMode::Detail => {
            if let Some(cert) = ctx.detail {
                DetailModal::new(cert, ctx.theme).render(area, buf);
            }
        }
        AppMode::Normal | AppMode::Quit => {}
    }
}

fn render_header(ctx: &RenderContext, accent: ratatui::style::Color, area: Rect, buf: &mut Buffer) {
    buf.set_style(area, ctx.theme.header);

    let title = Line::from(vec![
        Span::styled(" CERTIFIED", Style::new().fg(accent).add_modifier(Modifier::BOLD)),
        Span::styled(" EXCELLENCE", Style::new().fg(ctx.theme.muted)),
    ]);
    buf.set_line(area.x, area.y, &title, area.width);

    let status = match ctx.autoplay {
        AutoplayStatus::Running(period) => Span::styled(
            format!("▶ autoplay {:.1}s ", period.as_secs_f64()),
            Style::new().fg(accent),
        ),
        AutoplayStatus::Paused => {
            Span::styled("⏸ paused ", Style::new().fg(ctx.theme.warning))
        }
        AutoplayStatus::Idle => Span::styled("■ idle ", Style::new().fg(ctx.theme.muted)),
    };
    Paragraph::new(Line::from(status))
        .alignment(Alignment::Right)
        .render(area, buf);
}

fn render_footer(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    buf.set_style(area, ctx.theme.footer);

    let left = match ctx.error {
        Some(error) => Line::styled(
            truncate(&format!(" {error}"), area.width as usize),
            Style::new().fg(ctx.theme.error),
        ),
        None if ctx.carousel.is_loading() => Line::styled(" Loading…", ctx.theme.footer),
        None => Line::styled(
            " h/l move  ⏎ open  space pause  ? help  q quit",
            ctx.theme.footer,
        ),
    };
    buf.set_line(area.x, area.y, &left, area.width);

    if ctx.error.is_none() {
        let position = match ctx.carousel.focus_index() {
            Some(i) => format!("{}/{}", i + 1, ctx.carousel.len()),
            None => "0/0".to_string(),
        };
        let right = format!("{} · {} ", truncate(ctx.source, 32), position);
        Paragraph::new(Line::styled(right, ctx.theme.footer))
            .alignment(Alignment::Right)
            .render(area, buf);
    }
}
