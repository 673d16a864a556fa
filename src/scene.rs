use glam::Vec2;
use log::warn;

use crate::collision::Manifold;
use crate::config::{DEFAULT_GRAVITY, DEFAULT_MAX_STEPS_PER_UPDATE, DEFAULT_TIME_STEP};
use crate::core::rigidbody::RigidBody;
use crate::dynamics::{integrator, ContactSolver};
use crate::error::PhysicsError;
use crate::utils::allocator::{Arena, BodyHandle};
use crate::utils::logging::ScopedTimer;

/// Central simulation container: owns the bodies and advances them on a
/// fixed timestep.
///
/// Callers feed wall-clock time into [`PhysicsScene::update`]; the scene
/// accumulates it and runs as many fixed ticks as fit. [`PhysicsScene::step`]
/// runs exactly one tick and is public for tests and lockstep callers.
pub struct PhysicsScene {
    pub bodies: Arena<RigidBody>,
    pub gravity: Vec2,
    pub time_step: f32,
    /// Tick cap per `update` call; surplus accumulated time past the cap is
    /// discarded so a slow frame cannot spiral.
    pub max_steps_per_update: u32,

    solver: ContactSolver,
    manifolds: Vec<Manifold>,
    time_accumulated: f32,
}

impl Default for PhysicsScene {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_STEP, Vec2::from_slice(&DEFAULT_GRAVITY))
    }
}

impl PhysicsScene {
    pub fn new(time_step: f32, gravity: Vec2) -> Self {
        let time_step = if time_step <= 0.0 {
            DEFAULT_TIME_STEP
        } else {
            time_step
        };

        Self {
            bodies: Arena::new(),
            gravity,
            time_step,
            max_steps_per_update: DEFAULT_MAX_STEPS_PER_UPDATE,
            solver: ContactSolver::new(gravity),
            manifolds: Vec::new(),
            time_accumulated: 0.0,
        }
    }

    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        let handle = self.bodies.insert(body);
        if let Some(stored) = self.bodies.get_mut(handle) {
            stored.id = handle;
        }
        handle
    }

    /// Removes a body, invalidating its handle. Stale or reused handles are
    /// reported rather than removing the wrong body.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<RigidBody, PhysicsError> {
        self.bodies
            .remove(handle)
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn bodies(&self) -> impl Iterator<Item = &RigidBody> {
        self.bodies.iter()
    }

    pub fn handles(&self) -> Vec<BodyHandle> {
        self.bodies.handles().collect()
    }

    /// Manifolds from the most recent tick, for debugging and tests.
    pub fn manifolds(&self) -> &[Manifold] {
        &self.manifolds
    }

    /// Accumulates `dt` of wall-clock time and runs every whole fixed tick
    /// that fits, up to `max_steps_per_update`.
    pub fn update(&mut self, dt: f32) {
        self.time_accumulated += dt;

        let mut steps = 0;
        while self.time_accumulated >= self.time_step {
            if steps >= self.max_steps_per_update {
                warn!(
                    "step cap hit ({} ticks), discarding {:.4}s of accumulated time",
                    self.max_steps_per_update, self.time_accumulated
                );
                self.time_accumulated = 0.0;
                break;
            }

            self.step();
            self.time_accumulated -= self.time_step;
            steps += 1;
        }
    }

    /// One fixed tick: detect contacts, integrate forces, resolve impulses,
    /// integrate velocities, correct positions, clear force accumulators.
    pub fn step(&mut self) {
        let gravity = self.gravity;
        let dt = self.time_step;
        // Gravity is a public knob; keep the solver's resting-contact
        // threshold in sync with it.
        self.solver.gravity = gravity;

        {
            let _timer = ScopedTimer::new("scene::detect");
            self.detect_contacts();
        }

        integrator::integrate_forces(&mut self.bodies, gravity, dt);

        {
            let _timer = ScopedTimer::new("scene::solve");
            for i in 0..self.manifolds.len() {
                let manifold = &mut self.manifolds[i];
                if let Some((a, b)) = self.bodies.get2_mut(manifold.a, manifold.b) {
                    self.solver.initialise(manifold, a, b, dt);
                }
            }

            for manifold in &self.manifolds {
                if let Some((a, b)) = self.bodies.get2_mut(manifold.a, manifold.b) {
                    self.solver.apply_impulse(manifold, a, b);
                }
            }
        }

        integrator::integrate_velocities(&mut self.bodies, gravity, dt);

        {
            let _timer = ScopedTimer::new("scene::correct");
            for manifold in &self.manifolds {
                if let Some((a, b)) = self.bodies.get2_mut(manifold.a, manifold.b) {
                    self.solver.positional_correction(manifold, a, b);
                }
            }
        }

        integrator::reset_forces(&mut self.bodies);
    }

    /// Narrow phase over every unordered body pair, skipping pairs with no
    /// dynamic member.
    fn detect_contacts(&mut self) {
        self.manifolds.clear();

        let handles: Vec<BodyHandle> = self.bodies.handles().collect();
        for (i, &handle_a) in handles.iter().enumerate() {
            for &handle_b in &handles[i + 1..] {
                let (Some(a), Some(b)) = (self.bodies.get(handle_a), self.bodies.get(handle_b))
                else {
                    continue;
                };

                if a.mass_data.inverse_mass == 0.0 && b.mass_data.inverse_mass == 0.0 {
                    continue;
                }

                if let Some(manifold) = Manifold::solve(a, b) {
                    self.manifolds.push(manifold);
                }
            }
        }
    }
}
