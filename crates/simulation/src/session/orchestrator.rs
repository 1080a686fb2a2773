use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use crate::camera_choreo::{CameraChoreographer, CameraPose, TransitionId};
use crate::config::{NavigationConfig, VEHICLE_PARKING_SPOT};
use crate::geometry::GridPoint;
use crate::motion::{DriveInput, MotionStrategy, TransportMode, VehicleMotion, VehiclePose};
use crate::notifications::StatusUpdate;
use crate::ribbon::RouteRibbon;
use crate::route_planner::plan;
use crate::route_tracker::RouteProgress;
use crate::sim_rng::SimRng;
use crate::venues::{DestinationId, VenueRegistry};

use super::types::{NavigationSession, RouteSummary, SessionError, SessionPhase};

/// Minimum offset before the vehicle is turned toward a waypoint.
const MIN_ORIENT_OFFSET: f32 = 0.1;

/// Something the session wants the outside world to hear about.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionNotice {
    Status(StatusUpdate),
    Arrived(DestinationId),
}

/// Owns the navigation session and everything it drives: vehicle pose,
/// camera and ribbon. All mutation goes through the request methods and
/// the per-frame [`SessionOrchestrator::tick`].
#[derive(Resource, Debug)]
pub struct SessionOrchestrator {
    phase: SessionPhase,
    selected_destination: Option<DestinationId>,
    transport_mode: TransportMode,
    session: Option<NavigationSession>,
    vehicle: VehiclePose,
    vehicle_visible: bool,
    camera: CameraChoreographer,
    ribbon: RouteRibbon,
    /// Survey move of the current session; only it may start the preview.
    survey: Option<TransitionId>,
    outbox: Vec<SessionNotice>,
}

impl FromWorld for SessionOrchestrator {
    fn from_world(world: &mut World) -> Self {
        let config = world
            .get_resource::<NavigationConfig>()
            .cloned()
            .unwrap_or_default();
        Self::new(&config)
    }
}

impl SessionOrchestrator {
    pub fn new(config: &NavigationConfig) -> Self {
        let camera = CameraChoreographer::new(CameraPose::new(
            config.camera.initial_position(),
            config.camera.initial_look_at(),
        ));
        Self {
            phase: SessionPhase::Idle,
            selected_destination: None,
            transport_mode: TransportMode::default(),
            session: None,
            vehicle: VehiclePose::new(GridPoint::from(VEHICLE_PARKING_SPOT), 0.0),
            vehicle_visible: false,
            camera,
            ribbon: RouteRibbon::default(),
            survey: None,
            outbox: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Read access for renderers and UI
    // -----------------------------------------------------------------------

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn selected_destination(&self) -> Option<DestinationId> {
        self.selected_destination
    }

    pub fn transport_mode(&self) -> TransportMode {
        self.transport_mode
    }

    pub fn session(&self) -> Option<&NavigationSession> {
        self.session.as_ref()
    }

    pub fn vehicle_pose(&self) -> VehiclePose {
        self.vehicle
    }

    pub fn vehicle_visible(&self) -> bool {
        self.vehicle_visible
    }

    pub fn camera(&self) -> &CameraChoreographer {
        &self.camera
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.camera.pose()
    }

    pub fn ribbon(&self) -> &RouteRibbon {
        &self.ribbon
    }

    /// Destination of the journey in progress, for indicator highlighting.
    pub fn journey_destination(&self) -> Option<DestinationId> {
        match self.phase {
            SessionPhase::Navigating | SessionPhase::Arrived => {
                self.session.as_ref().map(|s| s.destination)
            }
            _ => None,
        }
    }

    pub fn drain_notices(&mut self) -> Vec<SessionNotice> {
        std::mem::take(&mut self.outbox)
    }

    fn notify(&mut self, update: StatusUpdate) {
        self.outbox.push(SessionNotice::Status(update));
    }

    // -----------------------------------------------------------------------
    // Requests
    // -----------------------------------------------------------------------

    pub fn select_destination(&mut self, destination: DestinationId) {
        self.selected_destination = Some(destination);
        debug!("Destination selected: {:?}", destination);
        self.notify(StatusUpdate::info(format!(
            "Destination selected: {}",
            destination.label()
        )));
    }

    pub fn select_transport_mode(&mut self, mode: TransportMode) -> Result<(), SessionError> {
        if self.phase.is_journey_active() {
            return Err(SessionError::ModeLocked);
        }
        self.transport_mode = mode;
        if let Some(session) = &mut self.session {
            session.transport_mode = mode;
            session.summary = RouteSummary::new(session.summary.distance_km, mode);
        }
        self.notify(StatusUpdate::info(format!("Switched to {}", mode.label())));
        Ok(())
    }

    /// Plan a route to the selected destination and start the survey shot.
    ///
    /// From `Generated` / `Previewing` this replaces the current session.
    pub fn generate_route(
        &mut self,
        venues: &VenueRegistry,
        rng: &mut SimRng,
        config: &NavigationConfig,
        now: Duration,
    ) -> Result<RouteSummary, SessionError> {
        if self.phase.is_journey_active() {
            return Err(SessionError::JourneyInProgress);
        }
        let destination = self
            .selected_destination
            .ok_or(SessionError::NoDestination)?;
        let (start, end) = venues
            .route_endpoints(destination)
            .ok_or(SessionError::NoDestination)?;

        let route = plan(start, end);
        let mut heading = self.vehicle.heading;
        if let Some(first) = route.first_distinct_after_start() {
            if (first.x - start.x).abs() > MIN_ORIENT_OFFSET
                || (first.z - start.z).abs() > MIN_ORIENT_OFFSET
            {
                heading = start.heading_toward(first);
            }
        }
        self.vehicle = VehiclePose::new(start, heading);
        self.vehicle_visible = true;

        let distance_km = (rng.0.gen_range(5.0_f32..20.0) * 10.0).round() / 10.0;
        let summary = RouteSummary::new(distance_km, self.transport_mode);
        info!(
            "Route to {:?}: {} waypoints, {:.1} km, ~{} min",
            destination,
            route.len(),
            summary.distance_km,
            summary.minutes
        );

        self.session = Some(NavigationSession {
            destination,
            transport_mode: self.transport_mode,
            progress: RouteProgress::new(route, config.arrival_radius),
            motion: None,
            summary,
        });
        self.ribbon.clear();
        self.survey = Some(self.camera.transition_to(
            config.camera.survey_position(),
            config.camera.survey_look_at(),
            config.camera.survey_duration(),
            now,
        ));
        self.phase = SessionPhase::Generated;
        self.notify(StatusUpdate::success(format!(
            "Route generated\nDistance: {:.1} km\nEstimated time: {} min",
            summary.distance_km, summary.minutes
        )));
        Ok(summary)
    }

    /// Put the vehicle on the road: chase camera on, motion strategy built.
    pub fn start_journey(&mut self, config: &NavigationConfig) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Generated | SessionPhase::Previewing => {}
            SessionPhase::Idle => return Err(SessionError::NoRoute),
            SessionPhase::Navigating | SessionPhase::Arrived => {
                return Err(SessionError::JourneyInProgress)
            }
        }
        let Some(session) = &mut self.session else {
            return Err(SessionError::NoRoute);
        };

        let route = session.progress.waypoints();
        if let Some(next) = route.get(1) {
            let start = route.start();
            if (next.x - start.x).abs() > MIN_ORIENT_OFFSET
                || (next.z - start.z).abs() > MIN_ORIENT_OFFSET
            {
                self.vehicle.heading = start.heading_toward(next);
            }
        }

        session.motion = Some(VehicleMotion::for_mode(session.transport_mode, config));
        let mode = session.transport_mode;
        let destination = session.destination;

        self.survey = None;
        self.camera.follow(&self.vehicle, &config.camera);
        self.ribbon.freeze();
        self.phase = SessionPhase::Navigating;
        info!("Journey to {:?} started ({:?})", destination, mode);

        let message = match mode {
            TransportMode::Autonomous => "Taxi: driving to the destination automatically...",
            TransportMode::Manual => "Self-drive: steer with the arrow keys or the pad",
        };
        self.notify(StatusUpdate::info(message));
        Ok(())
    }

    /// Close the arrival card and discard the finished session.
    pub fn dismiss_arrival(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Arrived {
            return Err(SessionError::NotArrived);
        }
        self.session = None;
        self.phase = SessionPhase::Idle;
        self.notify(StatusUpdate::info("Pick a destination and generate a route"));
        Ok(())
    }

    pub fn orbit_camera(&mut self, delta_yaw: f32, delta_pitch: f32, zoom_factor: f32, config: &NavigationConfig) {
        self.camera
            .orbit_by(delta_yaw, delta_pitch, zoom_factor, &config.camera);
    }

    // -----------------------------------------------------------------------
    // Per-frame update
    // -----------------------------------------------------------------------

    /// Advance the session by one frame. `now` is the elapsed host time.
    pub fn tick(&mut self, now: Duration, input: &DriveInput, config: &NavigationConfig) {
        match self.phase {
            SessionPhase::Generated => {
                let completed = self.camera.update(now);
                if completed.is_some() && completed == self.survey {
                    self.survey = None;
                    self.ribbon.start_reveal(now, &config.ribbon);
                    self.phase = SessionPhase::Previewing;
                    debug!("Survey finished; revealing route");
                }
            }
            SessionPhase::Previewing => {
                self.camera.update(now);
                if let Some(session) = &self.session {
                    self.ribbon
                        .reveal(session.progress.waypoints(), now, &config.ribbon);
                }
            }
            SessionPhase::Navigating => self.drive(input, config),
            SessionPhase::Idle | SessionPhase::Arrived => {
                self.camera.update(now);
            }
        }
    }

    fn drive(&mut self, input: &DriveInput, config: &NavigationConfig) {
        let Some(session) = &mut self.session else {
            return;
        };
        let Some(motion) = &mut session.motion else {
            return;
        };

        let outcome = motion.step(&mut self.vehicle, &mut session.progress, input, config);
        if outcome.moved {
            self.camera.track(&self.vehicle, &config.camera);
            self.ribbon.fade(self.vehicle.position, &config.ribbon);
        }

        let degenerate = session.progress.waypoints().len() < 2;
        if outcome.arrived || degenerate {
            let destination = session.destination;
            self.arrive(destination);
        }
    }

    fn arrive(&mut self, destination: DestinationId) {
        self.ribbon.clear();
        self.camera.orbit();
        self.phase = SessionPhase::Arrived;
        info!("Arrived at {:?}", destination);
        self.notify(StatusUpdate::success("Arrived at the destination!"));
        self.outbox.push(SessionNotice::Arrived(destination));
    }
}
