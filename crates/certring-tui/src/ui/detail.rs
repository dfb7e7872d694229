//! Detail overlay for an activated certificate.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Widget, Wrap};

use certring_core::Certificate;

use super::{accent_color, centered_rect};
use crate::theme::Theme;

/// Full view of one certificate, including passthrough fields.
pub struct DetailModal<'a> {
    cert: &'a Certificate,
    theme: &'a Theme,
}

impl<'a> DetailModal<'a> {
    /// Create a detail modal for `cert`.
    pub fn new(cert: &'a Certificate, theme: &'a Theme) -> Self {
        Self { cert, theme }
    }

    fn field(&self, label: &'static str, value: String) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{label:>12} "), self.theme.help_key),
            Span::styled(value, Style::new().fg(self.theme.foreground)),
        ])
    }
}

impl Widget for DetailModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let accent = accent_color(self.cert, self.theme);
        let popup_area = centered_rect(area, 72, 20);
        Clear.render(popup_area, buf);

        let block = Block::bordered()
            .border_type(BorderType::Thick)
            .border_style(Style::new().fg(accent))
            .title(Span::styled(
                format!(" {} ", self.cert.title),
                Style::new().fg(accent).add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::styled(" Esc close ", self.theme.help_desc).right_aligned());
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let cert = self.cert;
        let mut lines = Vec::new();
        let named = [
            ("Issuer", cert.issuer.as_ref()),
            ("Date", cert.date.as_ref()),
            ("Accent", cert.color.as_ref()),
            ("Image", cert.image_url.as_ref()),
        ];
        for (label, value) in named {
            if let Some(value) = value {
                lines.push(self.field(label, value.clone()));
            }
        }
        lines.push(self.field("Id", cert.id.to_string()));

        for (key, value) in &cert.extra {
            let value = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{key:>12} "), self.theme.help_desc),
                Span::styled(value, Style::new().fg(self.theme.foreground)),
            ]));
        }

        if let Some(description) = &cert.description {
            lines.push(Line::default());
            lines.push(Line::styled(description.clone(), self.theme.card_body));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
