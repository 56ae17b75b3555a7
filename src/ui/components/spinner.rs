use ratatui::{
    style::{Color, Style},
    text::Span,
};

/// Animated spinner for loading states
#[derive(Debug, Clone)]
pub struct Spinner {
    frames: &'static [&'static str],
    tick: usize,
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            frames: &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
            tick: 0,
        }
    }

    /// Advance to the next frame
    pub fn tick(&mut self) {
        self.tick = (self.tick + 1) % self.frames.len();
    }

    pub fn frame(&self) -> &'static str {
        self.frames[self.tick % self.frames.len()]
    }

    pub fn span(&self, color: Color) -> Span<'static> {
        Span::styled(self.frame(), Style::default().fg(color))
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}
