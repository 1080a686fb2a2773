use std::fmt;

use bevy::prelude::*;

use crate::motion::{TransportMode, VehicleMotion};
use crate::route_planner::WaypointSequence;
use crate::route_tracker::RouteProgress;
use crate::venues::DestinationId;

/// Lifecycle of one navigation session. Advances forward only; `Arrived`
/// returns to `Idle` when the arrival card is dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Generated,
    Previewing,
    Navigating,
    Arrived,
}

impl SessionPhase {
    pub fn label(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "Idle",
            SessionPhase::Generated => "Route generated",
            SessionPhase::Previewing => "Previewing",
            SessionPhase::Navigating => "Navigating",
            SessionPhase::Arrived => "Arrived",
        }
    }

    /// A journey is running or waiting for its arrival card to be dismissed.
    pub fn is_journey_active(&self) -> bool {
        matches!(self, SessionPhase::Navigating | SessionPhase::Arrived)
    }
}

/// Distance and travel-time estimate shown when a route is generated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    pub distance_km: f32,
    pub minutes: u32,
}

impl RouteSummary {
    pub fn new(distance_km: f32, mode: TransportMode) -> Self {
        Self {
            distance_km,
            minutes: (distance_km * mode.minutes_per_km()).ceil() as u32,
        }
    }
}

/// Requests from the UI into the session.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRequest {
    SelectDestination(DestinationId),
    SelectTransportMode(TransportMode),
    GenerateRoute,
    StartJourney,
    DismissArrival,
}

/// Why a session request was refused. Refusals never change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// Route generation without a selected destination.
    NoDestination,
    /// Journey start before any route was generated.
    NoRoute,
    /// Route generation while a journey is running or awaiting dismissal.
    JourneyInProgress,
    /// Dismissal while no arrival is being shown.
    NotArrived,
    /// Transport mode change after the journey started.
    ModeLocked,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NoDestination => write!(f, "Please select a destination first"),
            SessionError::NoRoute => write!(f, "Please generate a route first"),
            SessionError::JourneyInProgress => {
                write!(f, "A journey is already under way")
            }
            SessionError::NotArrived => write!(f, "Nothing to dismiss yet"),
            SessionError::ModeLocked => {
                write!(f, "Transport mode cannot change during a journey")
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// The route and motion state for the current trip.
#[derive(Debug, Clone)]
pub struct NavigationSession {
    pub(crate) destination: DestinationId,
    pub(crate) transport_mode: TransportMode,
    pub(crate) progress: RouteProgress,
    /// Built when the journey starts.
    pub(crate) motion: Option<VehicleMotion>,
    pub(crate) summary: RouteSummary,
}

impl NavigationSession {
    pub fn destination(&self) -> DestinationId {
        self.destination
    }

    pub fn transport_mode(&self) -> TransportMode {
        self.transport_mode
    }

    pub fn waypoints(&self) -> &WaypointSequence {
        self.progress.waypoints()
    }

    pub fn progress(&self) -> &RouteProgress {
        &self.progress
    }

    pub fn progress_index(&self) -> usize {
        self.progress.index()
    }

    pub fn motion(&self) -> Option<&VehicleMotion> {
        self.motion.as_ref()
    }

    pub fn actual_speed(&self) -> f32 {
        self.motion.as_ref().map_or(0.0, VehicleMotion::actual_speed)
    }

    pub fn target_speed(&self) -> f32 {
        self.motion.as_ref().map_or(0.0, VehicleMotion::target_speed)
    }

    pub fn summary(&self) -> RouteSummary {
        self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_minutes_round_up() {
        assert_eq!(RouteSummary::new(10.0, TransportMode::Autonomous).minutes, 15);
        assert_eq!(RouteSummary::new(10.1, TransportMode::Autonomous).minutes, 16);
        assert_eq!(RouteSummary::new(7.9, TransportMode::Manual).minutes, 10);
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        assert_eq!(
            SessionError::NoDestination.to_string(),
            "Please select a destination first"
        );
        assert!(!SessionError::ModeLocked.to_string().is_empty());
    }

    #[test]
    fn test_phase_order() {
        assert!(SessionPhase::Idle < SessionPhase::Generated);
        assert!(SessionPhase::Previewing < SessionPhase::Navigating);
        assert!(SessionPhase::Arrived.is_journey_active());
        assert!(!SessionPhase::Previewing.is_journey_active());
    }
}
