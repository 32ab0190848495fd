use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use log::{info, warn};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chipzz_core::constants::{FRAME_RATE, TIMER_INTERVAL};
use chipzz_core::Machine;
use chipzz_display::Display;

use crate::audio::Buzzer;
use crate::keymap;

/// Host settings gathered from the command line
#[derive(Debug)]
pub struct Config {
    pub rom: PathBuf,
    pub scale: u32,
    pub steps_per_frame: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Playing,
    Paused,
}

impl Mode {
    fn toggled(self) -> Self {
        match self {
            Mode::Playing => Mode::Paused,
            Mode::Paused => Mode::Playing,
        }
    }
}

/// Decides when the 60Hz timers are due, independently of the frame rate
struct TimerClock {
    interval: Duration,
    last: Instant,
}

impl TimerClock {
    fn new(interval: Duration, now: Instant) -> Self {
        TimerClock {
            interval,
            last: now,
        }
    }

    /// True once at least `interval` has passed since it last returned true
    fn tick(&mut self, now: Instant) -> bool {
        if now.duration_since(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}

pub fn run(config: Config) -> anyhow::Result<()> {
    let mut machine = Machine::from_rom_file(&config.rom).context("unable to load ROM")?;
    info!("loaded {}", config.rom.display());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut display = Display::new(&sdl, config.scale).context("unable to open display")?;
    let mut buzzer = match Buzzer::new(&sdl) {
        Ok(buzzer) => Some(buzzer),
        Err(e) => {
            warn!("audio unavailable, running silent: {}", e);
            None
        }
    };
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;

    info!("TAB: pause/resume, ESC: quit");
    info!("keys: 1-4, Q-R, A-F, Z-V");

    let frame_time = Duration::from_secs(1) / FRAME_RATE;
    let mut timers = TimerClock::new(TIMER_INTERVAL, Instant::now());
    let mut mode = Mode::Playing;

    'event: loop {
        let frame_start = Instant::now();

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(Keycode::Tab),
                    repeat: false,
                    ..
                } => {
                    mode = mode.toggled();
                    info!("{:?}", mode);
                    display.set_paused(mode == Mode::Paused)?;
                }
                _ => continue,
            };
        }

        // Update state
        if mode == Mode::Playing {
            let keyboard = events.keyboard_state();
            machine.set_keys(&keymap::snapshot(|scancode| {
                keyboard.is_scancode_pressed(scancode)
            }));

            if timers.tick(Instant::now()) && machine.advance_timers() {
                if let Some(buzzer) = buzzer.as_mut() {
                    buzzer.play();
                }
            }

            for _ in 0..config.steps_per_frame {
                machine.step();
            }
        }

        display.render(machine.frame_buffer())?;

        // Handle timing
        let elapsed = frame_start.elapsed();
        if frame_time > elapsed {
            thread::sleep(frame_time - elapsed);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_clock_waits_for_interval() {
        let start = Instant::now();
        let mut clock = TimerClock::new(Duration::from_millis(16), start);
        assert!(!clock.tick(start + Duration::from_millis(10)));
        assert!(clock.tick(start + Duration::from_millis(16)));
        assert!(!clock.tick(start + Duration::from_millis(20)));
        assert!(clock.tick(start + Duration::from_millis(40)));
    }

    #[test]
    fn test_mode_toggles() {
        assert_eq!(Mode::Playing.toggled(), Mode::Paused);
        assert_eq!(Mode::Paused.toggled(), Mode::Playing);
    }
}
