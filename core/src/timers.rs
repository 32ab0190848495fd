/// # Timers
/// Two 8-bit countdowns decremented by the host at ~60Hz, independently of
/// how many instructions run in between.
///
/// - `delay` is read and written by programs for timing
/// - `sound` drives the buzzer; a tone should play while it is nonzero
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decrements both timers, stopping at 0.
    ///
    /// Returns true if the sound timer was running, i.e. the buzzer should sound.
    pub fn tick(&mut self) -> bool {
        self.delay = self.delay.saturating_sub(1);
        let beep = self.sound > 0;
        self.sound = self.sound.saturating_sub(1);
        beep
    }

    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_runs_down_to_zero() {
        let mut timers = Timers { delay: 60, sound: 0 };
        for _ in 0..60 {
            timers.tick();
        }
        assert_eq!(timers.delay, 0);
        timers.tick();
        assert_eq!(timers.delay, 0);
    }

    #[test]
    fn test_tick_signals_while_sound_was_running() {
        let mut timers = Timers { delay: 0, sound: 2 };
        assert!(timers.sound_active());
        assert!(timers.tick());
        assert!(timers.tick());
        assert!(!timers.sound_active());
        assert!(!timers.tick());
    }
}
