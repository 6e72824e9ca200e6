//! Mobile navigation open/closed state.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavState {
    open: bool,
}

impl NavState {
    /// State matching the menu's current markup.
    #[must_use]
    pub const fn from_open(open: bool) -> Self {
        Self { open }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        self.open
    }

    /// Flip the menu and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Value for the toggle's `aria-expanded` attribute.
    #[must_use]
    pub const fn aria_expanded(self) -> &'static str {
        if self.open { "true" } else { "false" }
    }
}
