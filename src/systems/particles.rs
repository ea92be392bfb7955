//! A fixed-capacity particle pool for visual effects.
//!
//! All storage is allocated once, when the pool is created. Spawning takes slots off a
//! free list and expiring particles put them back, so steady-state updates never touch
//! the allocator. Requests beyond the free capacity are truncated, never queued.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use strum_macros::{AsRefStr, EnumIter};
use tracing::{debug, trace};

use crate::constants::effects::{BASE_DECAY, SMOKE_GROWTH};

/// An RGB colour for effect particles and entity tinting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const PINK: Color = Color::rgb(255, 184, 255);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const ORANGE: Color = Color::rgb(255, 184, 82);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(33, 33, 255);
}

/// Visual behaviour of a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
pub enum EffectKind {
    Plain,
    /// Small, bright and twinkling.
    Spark,
    /// Slow, rising and growing.
    Smoke,
    /// Fast radial spray that falls off quickly.
    Burst,
    /// Large soft halo.
    Glow,
}

/// Ranges the spawn parameters of a kind are drawn from.
struct Profile {
    speed: (f32, f32),
    size: (f32, f32),
    life: (f32, f32),
    decay: (f32, f32),
    gravity: f32,
    friction: f32,
    glow: f32,
}

impl EffectKind {
    fn profile(self) -> Profile {
        match self {
            EffectKind::Plain => Profile {
                speed: (0.5, 2.0),
                size: (2.0, 4.0),
                life: (0.6, 1.0),
                decay: (0.0, 0.01),
                gravity: 0.05,
                friction: 0.98,
                glow: 0.0,
            },
            EffectKind::Spark => Profile {
                speed: (0.3, 1.2),
                size: (1.0, 2.5),
                life: (0.5, 0.9),
                decay: (0.005, 0.015),
                gravity: -0.02,
                friction: 0.96,
                glow: 0.6,
            },
            EffectKind::Smoke => Profile {
                speed: (0.1, 0.4),
                size: (3.0, 5.0),
                life: (0.8, 1.0),
                decay: (0.0, 0.005),
                gravity: -0.03,
                friction: 0.99,
                glow: 0.0,
            },
            EffectKind::Burst => Profile {
                speed: (2.0, 4.5),
                size: (2.0, 4.0),
                life: (0.4, 0.7),
                decay: (0.02, 0.04),
                gravity: 0.15,
                friction: 0.94,
                glow: 0.3,
            },
            EffectKind::Glow => Profile {
                speed: (0.1, 0.6),
                size: (4.0, 7.0),
                life: (0.6, 1.0),
                decay: (0.005, 0.01),
                gravity: 0.0,
                friction: 0.97,
                glow: 1.0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Color,
    pub kind: EffectKind,
    pub size: f32,
    /// Remaining life; the particle expires when this reaches zero.
    pub life: f32,
    pub max_life: f32,
    /// Extra life lost per tick on top of the shared base decay.
    pub decay: f32,
    pub gravity: f32,
    pub friction: f32,
    glow: f32,
    phase: f32,
}

impl Particle {
    const DORMANT: Particle = Particle {
        position: Vec2::ZERO,
        velocity: Vec2::ZERO,
        color: Color::WHITE,
        kind: EffectKind::Plain,
        size: 0.0,
        life: 0.0,
        max_life: 1.0,
        decay: 0.0,
        gravity: 0.0,
        friction: 1.0,
        glow: 0.0,
        phase: 0.0,
    };

    fn integrate(&mut self) {
        self.velocity.y += self.gravity;
        self.velocity *= self.friction;
        self.position += self.velocity;
        self.life -= BASE_DECAY + self.decay;
    }

    /// Fraction of life remaining, in `[0, 1]`.
    pub fn alpha(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }

    /// Size to draw at; smoke grows as it fades.
    pub fn draw_size(&self) -> f32 {
        match self.kind {
            EffectKind::Smoke => self.size * (1.0 + (1.0 - self.alpha()) * (SMOKE_GROWTH - 1.0)),
            _ => self.size,
        }
    }

    /// Brightness multiplier for sparks at the given pool time; 1.0 for other kinds.
    pub fn twinkle(&self, time: f32) -> f32 {
        match self.kind {
            EffectKind::Spark => 0.75 + 0.25 * (time * 0.5 + self.phase).sin(),
            _ => 1.0,
        }
    }

    /// Halo strength, fading with the particle.
    pub fn glow(&self) -> f32 {
        self.glow * self.alpha()
    }
}

pub struct ParticlePool {
    slots: Box<[Particle]>,
    free: Vec<usize>,
    active: Vec<usize>,
    rng: SmallRng,
    /// Ticks elapsed since creation; drives twinkling.
    time: f32,
}

impl ParticlePool {
    pub fn new(capacity: usize, seed: u64) -> Self {
        Self {
            slots: vec![Particle::DORMANT; capacity].into_boxed_slice(),
            // Popped from the back, so slot 0 is handed out first.
            free: (0..capacity).rev().collect(),
            active: Vec::with_capacity(capacity),
            rng: SmallRng::seed_from_u64(seed),
            time: 0.0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn available(&self) -> usize {
        self.free.len()
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Spawns up to `count` particles of `kind` at `position`.
    ///
    /// Returns how many were actually spawned, which is `count` clamped to the free
    /// capacity.
    pub fn request_effect(&mut self, position: Vec2, kind: EffectKind, color: Color, count: usize) -> usize {
        let spawned = count.min(self.free.len());
        if spawned < count {
            debug!(kind = kind.as_ref(), requested = count, spawned, "Particle pool exhausted");
        }

        let profile = kind.profile();
        for _ in 0..spawned {
            let Some(slot) = self.free.pop() else { break };
            let particle = self.spawn(position, kind, color, &profile);
            self.slots[slot] = particle;
            self.active.push(slot);
        }

        trace!(kind = kind.as_ref(), spawned, active = self.active.len(), "Effect requested");
        spawned
    }

    fn spawn(&mut self, position: Vec2, kind: EffectKind, color: Color, profile: &Profile) -> Particle {
        let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
        let speed = self.rng.random_range(profile.speed.0..=profile.speed.1);
        let mut velocity = Vec2::from_angle(angle) * speed;
        if kind == EffectKind::Smoke {
            velocity.y = -velocity.y.abs();
        }

        let life = self.rng.random_range(profile.life.0..=profile.life.1);
        Particle {
            position,
            velocity,
            color,
            kind,
            size: self.rng.random_range(profile.size.0..=profile.size.1),
            life,
            max_life: life,
            decay: self.rng.random_range(profile.decay.0..=profile.decay.1),
            gravity: profile.gravity,
            friction: profile.friction,
            glow: profile.glow,
            phase: self.rng.random_range(0.0..std::f32::consts::TAU),
        }
    }

    /// Integrates every live particle by one tick and releases the expired ones.
    pub fn update(&mut self) {
        self.time += 1.0;

        let mut index = 0;
        while index < self.active.len() {
            let slot = self.active[index];
            let particle = &mut self.slots[slot];
            particle.integrate();

            if particle.life <= 0.0 {
                self.active.swap_remove(index);
                self.free.push(slot);
            } else {
                index += 1;
            }
        }

        debug_assert_eq!(self.active.len() + self.free.len(), self.slots.len());
    }

    /// Releases every particle at once.
    pub fn clear(&mut self) {
        self.free.extend(self.active.drain(..));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.active.iter().map(|&slot| &self.slots[slot])
    }
}
