//! # TestSession: headless integration test harness
//!
//! Wraps `bevy::app::App` + `SimulationPlugin` so the whole request → tick →
//! notice loop can be driven from tests without a window or renderer.

use bevy::app::App;
use bevy::prelude::*;

use crate::config::NavigationConfig;
use crate::motion::{DriveInput, TransportMode};
use crate::notifications::{Arrived, StatusBoard};
use crate::session::{SessionOrchestrator, SessionPhase, SessionRequest};
use crate::sim_rng::SimRng;
use crate::venues::DestinationId;
use crate::{DriveInputWriters, NavigationSet, SimulationPlugin};

/// Simulated frame length.
pub const FRAME: std::time::Duration = std::time::Duration::from_millis(16);

const TEST_SEED: u64 = 1;

/// Input held down by the test until released.
#[derive(Resource, Default)]
struct HeldInput(DriveInput);

/// Every `Arrived` event seen so far.
#[derive(Resource, Default)]
pub struct ArrivalLog(pub Vec<DestinationId>);

fn apply_held_input(held: Res<HeldInput>, mut input: ResMut<DriveInput>) {
    input.merge(held.0);
}

fn record_arrivals(mut events: EventReader<Arrived>, mut log: ResMut<ArrivalLog>) {
    for event in events.read() {
        log.0.push(event.destination);
    }
}

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
pub struct TestSession {
    app: App,
}

impl Default for TestSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSession {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Default configuration, fixed RNG seed.
    pub fn new() -> Self {
        Self::with_config(NavigationConfig::default())
    }

    /// Start from a custom configuration. It is inserted before the plugin so
    /// the orchestrator is built from it.
    pub fn with_config(config: NavigationConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(config);
        app.insert_resource(SimRng::from_seed_u64(TEST_SEED));
        app.add_plugins(SimulationPlugin);

        app.init_resource::<HeldInput>()
            .init_resource::<ArrivalLog>()
            .add_systems(
                Update,
                apply_held_input
                    .in_set(NavigationSet::Input)
                    .in_set(DriveInputWriters),
            )
            .add_systems(Update, record_arrivals.in_set(NavigationSet::Present));

        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Builders (consume and return Self)
    // -----------------------------------------------------------------------

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.app.insert_resource(SimRng::from_seed_u64(seed));
        self
    }

    pub fn with_destination(mut self, destination: DestinationId) -> Self {
        self.request(SessionRequest::SelectDestination(destination));
        self.tick(1);
        self
    }

    pub fn with_transport_mode(mut self, mode: TransportMode) -> Self {
        self.request(SessionRequest::SelectTransportMode(mode));
        self.tick(1);
        self
    }

    // -----------------------------------------------------------------------
    // Driving the app
    // -----------------------------------------------------------------------

    /// Queue a request; it is applied on the next tick.
    pub fn request(&mut self, request: SessionRequest) {
        self.app.world_mut().send_event(request);
    }

    /// Advance `n` frames of `FRAME` each.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app
                .world_mut()
                .resource_mut::<Time<Virtual>>()
                .advance_by(FRAME);
            self.app.update();
        }
    }

    /// Tick until `done` holds. Returns the number of frames it took; panics
    /// after `max_frames`.
    pub fn tick_until(&mut self, max_frames: u32, done: impl Fn(&Self) -> bool) -> u32 {
        for frame in 0..max_frames {
            if done(self) {
                return frame;
            }
            self.tick(1);
        }
        assert!(
            done(self),
            "condition not met after {max_frames} frames (phase {:?})",
            self.phase()
        );
        max_frames
    }

    pub fn tick_until_phase(&mut self, phase: SessionPhase, max_frames: u32) -> u32 {
        self.tick_until(max_frames, |s| s.phase() == phase)
    }

    /// Hold `input` down on every following frame until released.
    pub fn hold_input(&mut self, input: DriveInput) {
        self.app.world_mut().resource_mut::<HeldInput>().0 = input;
    }

    pub fn release_input(&mut self) {
        self.hold_input(DriveInput::default());
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn orchestrator(&self) -> &SessionOrchestrator {
        self.resource::<SessionOrchestrator>()
    }

    pub fn phase(&self) -> SessionPhase {
        self.orchestrator().phase()
    }

    pub fn status_board(&self) -> &StatusBoard {
        self.resource::<StatusBoard>()
    }

    pub fn arrivals(&self) -> &[DestinationId] {
        &self.resource::<ArrivalLog>().0
    }
}
