//! A headless scene: level, player stand-in and one stalker.

use glam::Vec3;
use stalker_core::{
    AgentConfig, ConfigError, Env, Pose, RngOracle, StalkerAgent, TargetOracle, TickReport,
};
use tracing::debug;

use crate::arena::Arena;
use crate::avatar::{Avatar, Waypoint};
use crate::geometry::Aabb;
use crate::microphone::{Microphone, NoiseBurst, NoiseScript};
use crate::navigation::{PathFollower, RectNavMesh};
use crate::recorders::{AudioLog, PresentationLog};
use crate::rng::SeededRng;

/// Radius of the avatar's sphere collider.
pub const AVATAR_RADIUS: f32 = 0.4;

/// Everything needed to build a [`Scene`].
#[derive(Clone, Debug)]
pub struct SceneLayout {
    pub floor: (Vec3, Vec3),
    pub agent: Pose,
    pub avatar: Vec3,
    pub route: Vec<Waypoint>,
    pub walls: Vec<Aabb>,
    /// Door slabs and whether each starts open.
    pub doors: Vec<(Aabb, bool)>,
    pub noise: NoiseScript,
    pub microphone: bool,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            floor: (Vec3::new(-20.0, 0.0, -20.0), Vec3::new(20.0, 0.0, 20.0)),
            agent: Pose::IDENTITY,
            avatar: Vec3::new(0.0, 0.0, 30.0),
            route: Vec::new(),
            walls: Vec::new(),
            doors: Vec::new(),
            noise: NoiseScript::silent(),
            microphone: true,
        }
    }
}

impl SceneLayout {
    /// A corridor with a closed side door. The avatar wanders into view,
    /// flees behind the wall and makes noise near the door.
    pub fn demo() -> Self {
        let waypoint = |time: f32, x: f32, z: f32| Waypoint {
            time,
            position: Vec3::new(x, 0.0, z),
        };
        Self {
            avatar: Vec3::new(-12.0, 0.0, 12.0),
            route: vec![
                waypoint(0.0, -12.0, 12.0),
                waypoint(8.0, 0.0, 10.0),
                waypoint(14.0, 1.0, 3.0),
                waypoint(20.0, 1.0, 3.0),
                waypoint(26.0, 12.0, -4.0),
                waypoint(60.0, 14.0, -14.0),
            ],
            walls: vec![
                Aabb::new(Vec3::new(4.0, 0.0, -12.0), Vec3::new(5.0, 3.0, 6.0)),
                Aabb::new(Vec3::new(-10.0, 0.0, -8.0), Vec3::new(-2.0, 3.0, -7.0)),
            ],
            doors: vec![(
                Aabb::new(Vec3::new(4.0, 0.0, 6.0), Vec3::new(5.0, 3.0, 8.0)),
                false,
            )],
            noise: NoiseScript::new(vec![NoiseBurst {
                start: 40.0,
                end: 41.0,
                amplitude: 0.15,
            }]),
            ..Self::default()
        }
    }
}

/// Collaborators owned by the scene, borrowed into an [`Env`] each tick.
#[derive(Debug)]
pub struct Stage {
    pub arena: Arena,
    pub navmesh: RectNavMesh,
    pub body: PathFollower,
    pub avatar: Avatar,
    pub microphone: Option<Microphone>,
    pub noise: NoiseScript,
    pub audio: AudioLog,
    pub presentation: PresentationLog,
}

impl Stage {
    pub fn from_layout(layout: &SceneLayout) -> Self {
        let mut arena = Arena::new();
        for wall in &layout.walls {
            arena.add_wall(*wall);
        }
        for (bounds, open) in &layout.doors {
            arena.add_door(*bounds, *open);
        }
        let collider = arena.add_avatar(layout.avatar, AVATAR_RADIUS);
        let avatar = Avatar::new(collider, layout.avatar).with_route(layout.route.clone());

        Self {
            arena,
            navmesh: RectNavMesh::new(layout.floor.0, layout.floor.1),
            body: PathFollower::new(layout.agent.position),
            avatar,
            microphone: layout.microphone.then(Microphone::default),
            noise: layout.noise.clone(),
            audio: AudioLog::default(),
            presentation: PresentationLog::default(),
        }
    }

    pub fn env(&mut self) -> Env<'_> {
        let env = Env::empty()
            .with_target(&mut self.avatar)
            .with_world(&mut self.arena)
            .with_navmesh(&self.navmesh)
            .with_locomotion(&mut self.body)
            .with_audio(&mut self.audio)
            .with_presentation(&mut self.presentation);
        match self.microphone.as_mut() {
            Some(microphone) => env.with_loudness(microphone),
            None => env,
        }
    }

    /// Moves the avatar along its route and records ambient noise for `time`.
    fn prepare(&mut self, time: f32) {
        self.avatar.advance_to(time);
        self.arena.sync_avatar(self.avatar.position());
        let amplitude = self.noise.amplitude_at(time);
        if let Some(microphone) = self.microphone.as_mut() {
            microphone.push_level(amplitude);
        }
    }
}

/// Fixed-step simulation of one agent.
#[derive(Debug)]
pub struct Scene {
    pub stage: Stage,
    agent: StalkerAgent,
    time: f32,
}

impl Scene {
    /// # Errors
    ///
    /// Returns the first invalid tuning field.
    pub fn new(
        layout: &SceneLayout,
        config: AgentConfig,
        rng: Box<dyn RngOracle>,
    ) -> Result<Self, ConfigError> {
        let agent = StalkerAgent::new(config, layout.agent, rng)?;
        Ok(Self {
            stage: Stage::from_layout(layout),
            agent,
            time: 0.0,
        })
    }

    /// # Errors
    ///
    /// Returns the first invalid tuning field.
    pub fn seeded(layout: &SceneLayout, config: AgentConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(layout, config, Box::new(SeededRng::new(seed)))
    }

    pub fn agent(&self) -> &StalkerAgent {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut StalkerAgent {
        &mut self.agent
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advances the scene by `dt` seconds and returns the agent's report.
    pub fn step(&mut self, dt: f32) -> TickReport {
        self.stage.prepare(self.time);
        let report = self.agent.tick(&mut self.stage.env(), dt);
        self.stage.body.advance(dt);
        self.time += dt;
        debug!(time = self.time, state = %report.state, "scene step");
        report
    }

    /// Steps `count` times, collecting every report.
    pub fn run(&mut self, dt: f32, count: usize) -> Vec<TickReport> {
        (0..count).map(|_| self.step(dt)).collect()
    }
}
