mod orchestrator;
pub mod types;

pub use orchestrator::{SessionNotice, SessionOrchestrator};
pub use types::{NavigationSession, RouteSummary, SessionError, SessionPhase, SessionRequest};

use bevy::prelude::*;

use crate::config::NavigationConfig;
use crate::motion::DriveInput;
use crate::notifications::{Arrived, StatusUpdate};
use crate::sim_rng::SimRng;
use crate::venues::VenueRegistry;
use crate::NavigationSet;

/// Apply queued UI requests. Rejected requests become warning status lines.
///
/// Notices are published after each request so status lines keep the order
/// the requests arrived in.
#[allow(clippy::too_many_arguments)]
pub fn handle_session_requests(
    mut requests: EventReader<SessionRequest>,
    mut orchestrator: ResMut<SessionOrchestrator>,
    venues: Res<VenueRegistry>,
    mut rng: ResMut<SimRng>,
    config: Res<NavigationConfig>,
    time: Res<Time>,
    mut status: EventWriter<StatusUpdate>,
    mut arrived: EventWriter<Arrived>,
) {
    for request in requests.read() {
        let result = match *request {
            SessionRequest::SelectDestination(id) => {
                orchestrator.select_destination(id);
                Ok(())
            }
            SessionRequest::SelectTransportMode(mode) => orchestrator.select_transport_mode(mode),
            SessionRequest::GenerateRoute => orchestrator
                .generate_route(&venues, &mut rng, &config, time.elapsed())
                .map(|_| ()),
            SessionRequest::StartJourney => orchestrator.start_journey(&config),
            SessionRequest::DismissArrival => orchestrator.dismiss_arrival(),
        };

        publish(orchestrator.drain_notices(), &mut status, &mut arrived);
        if let Err(err) = result {
            warn!("Session request {:?} rejected: {}", request, err);
            status.send(StatusUpdate::warning(err.to_string()));
        }
    }
}

pub fn tick_session(
    mut orchestrator: ResMut<SessionOrchestrator>,
    input: Res<DriveInput>,
    config: Res<NavigationConfig>,
    time: Res<Time>,
) {
    orchestrator.tick(time.elapsed(), &input, &config);
}

fn publish_session_notices(
    mut orchestrator: ResMut<SessionOrchestrator>,
    mut status: EventWriter<StatusUpdate>,
    mut arrived: EventWriter<Arrived>,
) {
    publish(orchestrator.drain_notices(), &mut status, &mut arrived);
}

fn publish(
    notices: Vec<SessionNotice>,
    status: &mut EventWriter<StatusUpdate>,
    arrived: &mut EventWriter<Arrived>,
) {
    for notice in notices {
        match notice {
            SessionNotice::Status(update) => {
                status.send(update);
            }
            SessionNotice::Arrived(destination) => {
                arrived.send(Arrived { destination });
            }
        }
    }
}

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionOrchestrator>()
            .add_event::<SessionRequest>()
            .add_systems(
                Update,
                handle_session_requests.in_set(NavigationSet::Requests),
            )
            .add_systems(
                Update,
                (tick_session, publish_session_notices)
                    .chain()
                    .in_set(NavigationSet::Tick),
            );
    }
}
