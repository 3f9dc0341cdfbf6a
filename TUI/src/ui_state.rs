/// View-only state: nothing here feeds back into the gacha engine.
#[derive(Debug, Default)]
pub struct UIState {
    /// Terminal size in cells (columns, rows), refreshed on resize
    pub viewport: (u16, u16),

    /// Frame counter driving the loading spinner
    pub animation_frame: usize,

    pub status_message: Option<String>,
    // Frames left before the status message clears
    pub status_ticks: u64,
}

impl UIState {
    pub fn new(viewport: (u16, u16)) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>, ticks: u64) {
        self.status_message = Some(message.into());
        self.status_ticks = ticks;
    }

    /// Advances one frame, expiring the status message when its time is up.
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        if self.status_ticks > 0 {
            self.status_ticks -= 1;
            if self.status_ticks == 0 {
                self.status_message = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_expires() {
        let mut ui = UIState::new((80, 24));
        ui.set_status("No topics available", 2);

        ui.tick();
        assert!(ui.status_message.is_some());
        ui.tick();
        assert!(ui.status_message.is_none());
        assert_eq!(ui.animation_frame, 2);
    }
}
