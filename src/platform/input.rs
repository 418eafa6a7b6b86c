//! The single activate input
//!
//! Pointer presses, touch starts and keys all feed one latch. A tap on a
//! touch screen can arrive as both a touch and a synthesized pointer press,
//! so presses inside the debounce window count once.

use crate::sim::TickInput;

/// Where a press came from (logging only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressSource {
    Pointer,
    Touch,
    Key,
}

/// Debounced activate trigger, consumed once per tick
#[derive(Debug, Clone)]
pub struct ActivateLatch {
    debounce_ms: f64,
    last_accepted_ms: Option<f64>,
    pending: bool,
}

impl ActivateLatch {
    pub fn new(debounce_ms: f64) -> Self {
        Self {
            debounce_ms,
            last_accepted_ms: None,
            pending: false,
        }
    }

    /// Register a press; returns whether it was accepted
    pub fn press(&mut self, source: PressSource, now_ms: f64) -> bool {
        if let Some(last) = self.last_accepted_ms {
            if now_ms - last < self.debounce_ms {
                log::trace!("Ignored {:?} press {:.1}ms after the last", source, now_ms - last);
                return false;
            }
        }
        self.last_accepted_ms = Some(now_ms);
        self.pending = true;
        true
    }

    /// Consume the pending press, if any
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Move the pending press into a tick's input
    pub fn fill(&mut self, input: &mut TickInput) {
        input.activate = self.take();
    }
}

impl Default for ActivateLatch {
    fn default() -> Self {
        Self::new(crate::consts::INPUT_DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_and_synthesized_click_count_once() {
        let mut latch = ActivateLatch::new(60.0);
        assert!(latch.press(PressSource::Touch, 1000.0));
        assert!(!latch.press(PressSource::Pointer, 1010.0));
        assert!(latch.take());
        assert!(!latch.take());
    }

    #[test]
    fn test_presses_after_window_are_accepted() {
        let mut latch = ActivateLatch::new(60.0);
        assert!(latch.press(PressSource::Key, 0.0));
        assert!(latch.press(PressSource::Key, 60.0));
        assert!(latch.press(PressSource::Pointer, 500.0));
    }

    #[test]
    fn test_fill_clears_between_ticks() {
        let mut latch = ActivateLatch::default();
        let mut input = TickInput::default();
        latch.press(PressSource::Pointer, 0.0);

        latch.fill(&mut input);
        assert!(input.activate);
        latch.fill(&mut input);
        assert!(!input.activate);
    }
}
