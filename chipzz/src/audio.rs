use std::time::Duration;

use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

const SAMPLE_RATE: i32 = 44_100;
const TONE_HZ: f32 = 440.0;
const VOLUME: f32 = 0.15;

/// How long one request to play keeps the tone going. A little over one timer
/// tick, so a running sound timer produces one continuous tone.
const TONE_LENGTH: Duration = Duration::from_millis(20);

/// Square wave that only sounds while it has samples `remaining`
struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
    remaining: usize,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            if self.remaining == 0 {
                *sample = 0.0;
                continue;
            }
            self.remaining -= 1;
            *sample = if self.phase < 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// # Buzzer
/// Plays the tone the sound timer asks for. The device stays open and
/// outputs silence between tones.
pub struct Buzzer {
    device: AudioDevice<SquareWave>,
    tone_samples: usize,
}

impl Buzzer {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let audio = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(SAMPLE_RATE),
            channels: Some(1),
            samples: None,
        };
        let device = audio.open_playback(None, &desired, |spec| SquareWave {
            phase_inc: TONE_HZ / spec.freq as f32,
            phase: 0.0,
            volume: VOLUME,
            remaining: 0,
        })?;
        let tone_samples = tone_samples(device.spec().freq);
        device.resume();
        Ok(Buzzer {
            device,
            tone_samples,
        })
    }

    /// (Re)starts the tone
    pub fn play(&mut self) {
        self.device.lock().remaining = self.tone_samples;
    }
}

fn tone_samples(freq: i32) -> usize {
    (freq.max(0) as u128 * TONE_LENGTH.as_millis() / 1000) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(remaining: usize) -> SquareWave {
        SquareWave {
            phase_inc: TONE_HZ / SAMPLE_RATE as f32,
            phase: 0.0,
            volume: VOLUME,
            remaining,
        }
    }

    #[test]
    fn test_silent_without_tone() {
        let mut wave = wave(0);
        let mut out = [1.0; 64];
        wave.callback(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_tone_stops_after_remaining_samples() {
        let mut wave = wave(10);
        let mut out = [0.0; 64];
        wave.callback(&mut out);
        assert!(out[..10].iter().all(|&s| s.abs() == VOLUME));
        assert!(out[10..].iter().all(|&s| s == 0.0));
        assert_eq!(wave.remaining, 0);
    }

    #[test]
    fn test_tone_samples() {
        assert_eq!(tone_samples(44_100), 882);
        assert_eq!(tone_samples(48_000), 960);
    }
}
