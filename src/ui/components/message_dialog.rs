//! Modal dialog for errors and in-flight requests

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::dialog::{DialogFrame, InstructionBar};
use super::{Spinner, ACCENT_ERROR, ACCENT_PRIMARY, TEXT_PRIMARY};

const DIALOG_WIDTH: u16 = 60;

#[derive(Debug, Clone, Copy)]
pub enum MessageDialogKind<'a> {
    Error { title: &'a str, message: &'a str },
    Loading { message: &'a str },
}

pub struct MessageDialog<'a> {
    kind: MessageDialogKind<'a>,
    spinner: Option<&'a Spinner>,
}

impl<'a> MessageDialog<'a> {
    pub fn new(kind: MessageDialogKind<'a>) -> Self {
        Self {
            kind,
            spinner: None,
        }
    }

    pub fn spinner(mut self, spinner: &'a Spinner) -> Self {
        self.spinner = Some(spinner);
        self
    }

    /// Wrapped line count of `text` inside the dialog's padding
    fn message_lines(text: &str) -> u16 {
        let available_width = DIALOG_WIDTH.saturating_sub(6) as usize;
        let lines = text.chars().count().div_ceil(available_width).max(1);
        u16::try_from(lines).unwrap_or(u16::MAX)
    }
}

impl Widget for MessageDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.kind {
            MessageDialogKind::Error { title, message } => {
                let message_lines = Self::message_lines(message);
                // borders, padding, button and instructions
                let height = 8 + message_lines;
                let inner = DialogFrame::new(title, DIALOG_WIDTH, height)
                    .border_color(ACCENT_ERROR)
                    .render(area, buf);
                if inner.height < 5 {
                    return;
                }

                Paragraph::new(message)
                    .style(Style::default().fg(TEXT_PRIMARY))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .render(
                        Rect {
                            x: inner.x + 1,
                            y: inner.y + 1,
                            width: inner.width.saturating_sub(2),
                            height: message_lines.min(inner.height.saturating_sub(4)),
                        },
                        buf,
                    );

                let button_style = Style::default()
                    .fg(ratatui::style::Color::Black)
                    .bg(ACCENT_ERROR)
                    .add_modifier(Modifier::BOLD);
                Paragraph::new(Line::from(Span::styled("  OK  ", button_style)))
                    .alignment(Alignment::Center)
                    .render(
                        Rect {
                            x: inner.x,
                            y: inner.y + inner.height.saturating_sub(3),
                            width: inner.width,
                            height: 1,
                        },
                        buf,
                    );

                InstructionBar::new(vec![("Enter/Esc", "Dismiss")]).render(
                    Rect {
                        x: inner.x,
                        y: inner.y + inner.height.saturating_sub(1),
                        width: inner.width,
                        height: 1,
                    },
                    buf,
                );
            }
            MessageDialogKind::Loading { message } => {
                let inner = DialogFrame::new("", DIALOG_WIDTH, 5).render(area, buf);
                if inner.height == 0 {
                    return;
                }
                let mut spans = Vec::new();
                if let Some(spinner) = self.spinner {
                    spans.push(spinner.span(ACCENT_PRIMARY));
                    spans.push(Span::raw(" "));
                }
                spans.push(Span::styled(message, Style::default().fg(TEXT_PRIMARY)));
                Paragraph::new(Line::from(spans))
                    .alignment(Alignment::Center)
                    .render(
                        Rect {
                            x: inner.x,
                            y: inner.y + inner.height / 2,
                            width: inner.width,
                            height: 1,
                        },
                        buf,
                    );
            }
        }
    }
}
