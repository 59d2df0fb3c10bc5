//! Acceleration sources feeding the tick loop.
//!
//! The chart and the integrator never talk to hardware; they consume
//! [`MotionFrame`]s from whatever source the app owner injected. Sources
//! report unavailability as a boolean from `start`; an unavailable source
//! simply never delivers frames, it does not error.

use std::collections::VecDeque;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{MotionFrame, Vec3};

/// Something that can deliver acceleration frames on demand.
pub trait MotionSource {
    /// Begins delivery. Returns false when no motion data is available, in
    /// which case the caller stays idle.
    fn start(&mut self) -> bool;

    /// Stops delivery; `poll` returns nothing until the next `start`.
    fn stop(&mut self);

    fn is_available(&self) -> bool;

    /// Requested delivery rate. Sources that carry their own timing (e.g.
    /// recorded scripts) may ignore this.
    fn set_rate_hz(&mut self, rate_hz: f64);

    /// Drains every frame that became due since the previous poll.
    fn poll(&mut self) -> Vec<MotionFrame>;
}

/// Per-axis sinusoid parameters for the simulated stream.
#[derive(Clone, Copy, Debug)]
struct AxisWave {
    freq_hz: f64,
    phase: f64,
    amplitude_g: f64,
    noise_g: f64,
}

impl AxisWave {
    fn sample(&self, t: f64, rng: &mut StdRng) -> f64 {
        let base = (2.0 * std::f64::consts::PI * self.freq_hz * t + self.phase).sin()
            * self.amplitude_g;
        let noise = if self.noise_g > 0.0 {
            rng.gen_range(-self.noise_g..self.noise_g)
        } else {
            0.0
        };
        base + noise
    }
}

/// Pseudo-random source paced against the wall clock.
///
/// Frames are generated at the configured rate: each poll emits however many
/// sample periods elapsed since the last one, so a slow UI frame yields a
/// burst rather than dropped data. The reported `dt` is the generation step.
pub struct SimulatedMotion {
    rate_hz: f64,
    axes: [AxisWave; 3],
    rng: StdRng,
    started_at: Option<Instant>,
    last_ts: f64,
}

impl SimulatedMotion {
    pub fn new(rate_hz: f64, amplitude_g: f64, noise_g: f64) -> Self {
        let axes = [
            AxisWave {
                freq_hz: 0.4,
                phase: 0.0,
                amplitude_g,
                noise_g,
            },
            AxisWave {
                freq_hz: 0.7,
                phase: 1.1,
                amplitude_g: amplitude_g * 0.6,
                noise_g,
            },
            AxisWave {
                freq_hz: 0.2,
                phase: 2.3,
                amplitude_g: amplitude_g * 0.3,
                noise_g,
            },
        ];
        Self {
            rate_hz,
            axes,
            rng: StdRng::from_entropy(),
            started_at: None,
            last_ts: 0.0,
        }
    }

    /// Frames due once `elapsed` seconds have passed since `start`. Split out
    /// from `poll` so pacing is testable without a wall clock.
    fn frames_due(&mut self, elapsed: f64) -> Vec<MotionFrame> {
        let dt = 1.0 / self.rate_hz;
        let mut frames = Vec::new();
        while self.last_ts + dt <= elapsed {
            let first = self.last_ts == 0.0;
            self.last_ts += dt;
            let t = self.last_ts;
            let accel = Vec3::new(
                self.axes[0].sample(t, &mut self.rng),
                self.axes[1].sample(t, &mut self.rng),
                self.axes[2].sample(t, &mut self.rng),
            );
            frames.push(MotionFrame {
                accel,
                dt: if first { 0.0 } else { dt },
            });
        }
        frames
    }
}

impl MotionSource for SimulatedMotion {
    fn start(&mut self) -> bool {
        self.started_at = Some(Instant::now());
        self.last_ts = 0.0;
        log::info!("simulated motion started at {} Hz", self.rate_hz);
        true
    }

    fn stop(&mut self) {
        self.started_at = None;
        log::info!("simulated motion stopped");
    }

    fn is_available(&self) -> bool {
        true
    }

    fn set_rate_hz(&mut self, rate_hz: f64) {
        if rate_hz > 0.0 {
            self.rate_hz = rate_hz;
        }
    }

    fn poll(&mut self) -> Vec<MotionFrame> {
        let Some(started_at) = self.started_at else {
            return Vec::new();
        };
        let elapsed = started_at.elapsed().as_secs_f64();
        self.frames_due(elapsed)
    }
}

/// Deterministic source draining a prepared queue, one frame per poll.
/// Useful for tests and reproducible replays; carries its own `dt`s and
/// therefore ignores the rate setting.
pub struct ScriptedMotion {
    queue: VecDeque<MotionFrame>,
    running: bool,
}

impl ScriptedMotion {
    pub fn new(frames: impl IntoIterator<Item = MotionFrame>) -> Self {
        Self {
            queue: frames.into_iter().collect(),
            running: false,
        }
    }
}

impl MotionSource for ScriptedMotion {
    fn start(&mut self) -> bool {
        self.running = self.is_available();
        self.running
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_available(&self) -> bool {
        !self.queue.is_empty()
    }

    fn set_rate_hz(&mut self, _rate_hz: f64) {}

    fn poll(&mut self) -> Vec<MotionFrame> {
        if !self.running {
            return Vec::new();
        }
        self.queue.pop_front().into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_pacing_matches_the_rate() {
        let mut source = SimulatedMotion::new(50.0, 0.5, 0.0);
        assert!(source.start());
        // A hair past the second so accumulated rounding in the 20 ms steps
        // cannot flip the last comparison.
        let frames = source.frames_due(1.001);
        assert_eq!(frames.len(), 50);
        assert_eq!(frames[0].dt, 0.0);
        for frame in &frames[1..] {
            assert_eq!(frame.dt, 1.0 / 50.0);
        }
        // Nothing new until more time passes.
        assert!(source.frames_due(1.001).is_empty());
        assert_eq!(source.frames_due(1.101).len(), 5);
    }

    #[test]
    fn simulated_stays_silent_before_start_and_after_stop() {
        let mut source = SimulatedMotion::new(50.0, 0.5, 0.0);
        assert!(source.poll().is_empty());
        source.start();
        source.stop();
        assert!(source.poll().is_empty());
    }

    #[test]
    fn noiseless_waves_stay_within_amplitude() {
        let mut source = SimulatedMotion::new(30.0, 0.5, 0.0);
        source.start();
        for frame in source.frames_due(2.0) {
            assert!(frame.accel.x.abs() <= 0.5 + 1e-9);
            assert!(frame.accel.y.abs() <= 0.3 + 1e-9);
            assert!(frame.accel.z.abs() <= 0.15 + 1e-9);
        }
    }

    #[test]
    fn scripted_drains_one_frame_per_poll() {
        let frames = (0..3).map(|i| MotionFrame {
            accel: Vec3::new(i as f64, 0.0, 0.0),
            dt: 0.05,
        });
        let mut source = ScriptedMotion::new(frames);
        assert!(source.is_available());
        assert!(source.start());
        for i in 0..3 {
            let polled = source.poll();
            assert_eq!(polled.len(), 1);
            assert_eq!(polled[0].accel.x, i as f64);
        }
        assert!(source.poll().is_empty());
        assert!(!source.is_available());
    }

    #[test]
    fn exhausted_script_reports_unavailable_on_start() {
        let mut source = ScriptedMotion::new([]);
        assert!(!source.start());
        assert!(source.poll().is_empty());
    }
}
