//! Decorative celebration burst: an isolated, restartable, finite-lifetime
//! particle simulation.
//!
//! The server seeds a burst and ships the initial particle states plus the
//! decay constants to the client, which animates it. `step` exists so the
//! lifetime is a checked property rather than a promise; nothing in the
//! application state depends on this module.

use rand::Rng;
use serde::Serialize;

pub const MISSION_BURST: usize = 150;
pub const PRACTICE_BURST: usize = 200;

pub const GRAVITY: f32 = 0.2;
pub const ALPHA_DECAY: f32 = 0.01;

#[derive(Clone, Debug, Serialize)]
pub struct Particle {
  pub x: f32,
  pub y: f32,
  pub vx: f32,
  pub vy: f32,
  pub size: f32,
  pub hue: u16,
  pub alpha: f32,
}

#[derive(Clone, Debug, Serialize)]
pub struct ParticleBurst {
  pub particles: Vec<Particle>,
  pub gravity: f32,
  pub alpha_decay: f32,
  /// Nominal frames until the burst has fully faded; shipped so the client
  /// can time the effect without simulating it.
  pub lifetime_frames: u32,
}

impl ParticleBurst {
  /// Seed a burst at the origin: velocities in (-10, 10) per axis, sizes in
  /// [2, 6), full opacity.
  pub fn seeded(count: usize) -> Self {
    let mut rng = rand::thread_rng();
    let particles = (0..count)
      .map(|_| Particle {
        x: 0.0,
        y: 0.0,
        vx: (rng.gen::<f32>() - 0.5) * 20.0,
        vy: (rng.gen::<f32>() - 0.5) * 20.0,
        size: rng.gen::<f32>() * 4.0 + 2.0,
        hue: rng.gen_range(0..360),
        alpha: 1.0,
      })
      .collect();
    Self {
      particles,
      gravity: GRAVITY,
      alpha_decay: ALPHA_DECAY,
      lifetime_frames: (1.0 / ALPHA_DECAY).ceil() as u32,
    }
  }

  /// Advance one frame: move, fall, fade, drop dead particles. Returns true
  /// while any particle is still visible. The client runs the animation;
  /// this reference implementation keeps the lifetime a checked property.
  #[allow(dead_code)]
  pub fn step(&mut self) -> bool {
    for p in self.particles.iter_mut() {
      p.x += p.vx;
      p.y += p.vy;
      p.vy += self.gravity;
      p.alpha -= self.alpha_decay;
    }
    self.particles.retain(|p| p.alpha > 0.0);
    !self.particles.is_empty()
  }

}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn burst_fades_out_at_its_nominal_lifetime() {
    let mut burst = ParticleBurst::seeded(MISSION_BURST);
    let nominal = burst.lifetime_frames;
    let mut frames = 0u32;
    while burst.step() {
      frames += 1;
      assert!(frames <= 1000, "burst must terminate");
    }
    // Accumulated f32 rounding may keep particles alive for one extra frame.
    assert!((nominal..=nominal + 1).contains(&frames), "faded after {frames} frames");
  }

  #[test]
  fn burst_is_restartable_and_independent() {
    let mut first = ParticleBurst::seeded(10);
    while first.step() {}
    assert!(first.particles.is_empty());

    let second = ParticleBurst::seeded(10);
    assert_eq!(second.particles.len(), 10);
    assert!(second.particles.iter().all(|p| (p.alpha - 1.0).abs() < f32::EPSILON));
  }

  #[test]
  fn seeded_velocities_and_sizes_stay_in_band() {
    let burst = ParticleBurst::seeded(PRACTICE_BURST);
    for p in &burst.particles {
      assert!(p.vx.abs() <= 10.0 && p.vy.abs() <= 10.0);
      assert!(p.size >= 2.0 && p.size < 6.0);
      assert!(p.hue < 360);
    }
  }
}
