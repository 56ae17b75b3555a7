//! TUI testing utilities using Ratatui's TestBackend

use ratatui::{backend::TestBackend, buffer::Buffer, widgets::Widget, Terminal};

/// Render `widget` into a fresh `width` x `height` test terminal
pub fn render_widget<W: Widget>(widget: W, width: u16, height: u16) -> Buffer {
    let mut terminal =
        Terminal::new(TestBackend::new(width, height)).expect("Failed to create test terminal");
    terminal
        .draw(|f| f.render_widget(widget, f.area()))
        .expect("Failed to draw");
    terminal.backend().buffer().clone()
}

/// Buffer contents, one line per row, trailing whitespace trimmed
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut lines = Vec::with_capacity(area.height as usize);
    for y in area.y..area.y + area.height {
        let mut line = String::new();
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                line.push_str(cell.symbol());
            }
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Assert that the buffer shows `text` somewhere
pub fn assert_buffer_contains(buffer: &Buffer, text: &str) {
    let actual = buffer_to_string(buffer);
    assert!(
        actual.contains(text),
        "Buffer does not contain expected text.\nExpected: {}\nActual:\n{}",
        text,
        actual
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_render_widget_trims_lines() {
        let buffer = render_widget(Paragraph::new("Hello\nWorld"), 10, 3);
        assert_eq!(buffer_to_string(&buffer), "Hello\nWorld\n");
    }

    #[test]
    fn test_assert_buffer_contains() {
        let buffer = render_widget(Paragraph::new("Test content here"), 20, 1);
        assert_buffer_contains(&buffer, "content");
        assert!(!buffer_to_string(&buffer).contains("missing"));
    }
}
