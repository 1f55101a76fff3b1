//! The simulation context: every component and all shared state in one place.
//!
//! [`Simulation`] owns the configuration, the noise field, the palettes, the
//! particle population, the phase clock and the viewport. A host mutates the
//! configuration through `&mut Simulation` and calls [`Simulation::tick`]
//! once per frame; because both go through the same exclusive borrow, a
//! restart can never overlap a tick.

use glam::DVec2;
use serde_json::Value;
use tracing::{debug, info, trace, warn};

use crate::clock::SimulationClock;
use crate::color_map::ColorMapper;
use crate::config::SimulationConfig;
use crate::engine::Engine;
use crate::error::EngineError;
use crate::field_source::FlowField;
use crate::noise_field::NoiseField;
use crate::particles::{Painter, ParticleSystem};
use crate::prng::Xorshift64;
use crate::seed::Seed;
use crate::surface::{Frame, Viewport};

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickStats {
    /// Ticks since the last restart, including this one.
    pub tick: u64,
    /// Particles that left the square and were respawned this tick.
    pub respawned: usize,
}

/// Noise-field particle simulation.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    viewport: Viewport,
    noise: NoiseField,
    mapper: ColorMapper,
    particles: ParticleSystem,
    clock: SimulationClock,
    seeds: Xorshift64,
    ticks: u64,
}

impl Simulation {
    /// Validates `config` and builds the first population.
    ///
    /// `seed` starts the stream every noise table and particle RNG is drawn
    /// from, so the same seed, viewport and config replay identically.
    pub fn new(viewport: Viewport, seed: u64, config: SimulationConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut seeds = Xorshift64::new(seed);
        let mapper = ColorMapper::new();
        let (noise, particles) = populate(&mut seeds, &mapper, &config);
        info!(
            seed,
            noise_seed = noise.seed(),
            particles = particles.len(),
            width = viewport.width(),
            height = viewport.height(),
            "created simulation"
        );
        Ok(Self {
            config,
            viewport,
            noise,
            mapper,
            particles,
            clock: SimulationClock::new(),
            seeds,
            ticks: 0,
        })
    }

    /// Builds the simulation a [`Seed`] record describes (without running it).
    pub fn from_seed(seed: &Seed) -> Result<Self, EngineError> {
        seed.validate()?;
        Self::new(seed.viewport()?, seed.seed, seed.config)
    }

    /// Full restart: fresh noise seed, fresh particle RNG, clock back to
    /// zero, population reallocated at the configured count.
    pub fn restart(&mut self) -> Result<(), EngineError> {
        self.config.validate()?;
        let (noise, particles) = populate(&mut self.seeds, &self.mapper, &self.config);
        self.noise = noise;
        self.particles = particles;
        self.clock.reset();
        self.ticks = 0;
        info!(
            noise_seed = self.noise.seed(),
            particles = self.particles.len(),
            "restarted simulation"
        );
        Ok(())
    }

    /// Advances the phases, then advects every particle once.
    pub fn tick(&mut self) -> TickStats {
        self.clock
            .tick(self.config.noise.speed, self.config.color.speed);

        let field = FlowField::new(&self.noise, &self.config.noise, &self.config.field);
        let painter = Painter {
            mapper: &self.mapper,
            noise: &self.noise,
            config: &self.config.color,
            phase: self.clock.color_offset(),
        };
        let speed = self.config.motion.speed;
        let step = DVec2::new(
            speed / f64::from(self.viewport.width()),
            speed / f64::from(self.viewport.height()),
        );
        let respawned = self
            .particles
            .step(&field, self.clock.noise_offset(), step, &painter);

        self.ticks += 1;
        trace!(tick = self.ticks, respawned, "tick");
        TickStats {
            tick: self.ticks,
            respawned,
        }
    }

    /// Viewport boundary. Takes effect from the next tick.
    pub fn resize(&mut self, viewport: Viewport) {
        debug!(
            width = viewport.width(),
            height = viewport.height(),
            "resized viewport"
        );
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Direct access for a configuration surface. Values are read on the
    /// next tick; `motion.particle_count` is read on the next restart.
    pub fn config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.config
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    pub fn color_mapper(&self) -> &ColorMapper {
        &self.mapper
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Draws a noise seed and a particle seed from `seeds` and builds both.
///
/// The colour phase is zero here: populations are only built at (re)start.
fn populate(
    seeds: &mut Xorshift64,
    mapper: &ColorMapper,
    config: &SimulationConfig,
) -> (NoiseField, ParticleSystem) {
    let noise = NoiseField::new(seeds.next_u32());
    let rng = Xorshift64::new(seeds.next_u64());
    let painter = Painter {
        mapper,
        noise: &noise,
        config: &config.color,
        phase: 0.0,
    };
    let particles = ParticleSystem::create(config.motion.particle_count, rng, &painter);
    (noise, particles)
}

impl Engine for Simulation {
    fn step(&mut self) -> Result<(), EngineError> {
        self.tick();
        Ok(())
    }

    fn frame(&self) -> Frame<'_> {
        Frame::new(
            self.particles.positions(),
            self.particles.colors(),
            &self.config.render,
        )
    }

    fn params(&self) -> Value {
        serde_json::to_value(self.config).unwrap_or_default()
    }

    fn param_schema(&self) -> Value {
        SimulationConfig::schema()
    }

    fn apply_params(&mut self, params: &Value) -> Result<(), EngineError> {
        let next = self.config.apply_json(params)?;
        if next.motion.particle_count != self.particles.len() {
            warn!(
                current = self.particles.len(),
                requested = next.motion.particle_count,
                "particle count change takes effect on restart"
            );
        }
        debug!(%params, "applied parameters");
        self.config = next;
        Ok(())
    }

    fn restart(&mut self) -> Result<(), EngineError> {
        Simulation::restart(self)
    }
}
