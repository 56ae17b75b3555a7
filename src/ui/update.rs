//! Result of feeding an action to a screen's view model

/// Events are handled by the navigation host. Effects are side effects run
/// outside the view model (storage, network, results handed to other
/// screens), and may feed an internal action back in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update<E, F> {
    pub events: Vec<E>,
    pub effects: Vec<F>,
}

impl<E, F> Update<E, F> {
    pub fn none() -> Self {
        Self {
            events: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn event(event: E) -> Self {
        Self {
            events: vec![event],
            effects: Vec::new(),
        }
    }

    pub fn effect(effect: F) -> Self {
        Self {
            events: Vec::new(),
            effects: vec![effect],
        }
    }

    pub fn with_event(mut self, event: E) -> Self {
        self.events.push(event);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.effects.is_empty()
    }
}

impl<E, F> Default for Update<E, F> {
    fn default() -> Self {
        Self::none()
    }
}
