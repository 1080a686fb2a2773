//! Frame ordering via `SystemSet` phases.
//!
//! Everything the navigation scene does per frame runs in the `Update`
//! schedule, in this order:
//!
//! ```text
//! Input  →  Requests  →  Tick  →  Present
//! ```
//!
//! * **Input** – Keyboard and on-screen pad write the frame's `DriveInput`.
//! * **Requests** – Queued `SessionRequest`s from the UI are applied to the
//!   session. Rejections turn into warning status lines.
//! * **Tick** – The session advances: camera transitions, ribbon reveal and
//!   fade, vehicle motion, arrival. Notices are published as events.
//! * **Present** – Readers only. Status collection, scene entities copying
//!   poses and meshes out of the session.

use bevy::prelude::*;

/// Ordered phases for systems running in the `Update` schedule.
///
/// Configured as a chain by `SimulationPlugin`. Rendering and UI plugins put
/// their systems into `Input` or `Present` so they never observe a half
/// applied request.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum NavigationSet {
    /// Per-frame input polling.
    Input,
    /// UI requests into the session.
    Requests,
    /// Session advance.
    Tick,
    /// Read-only consumers of the session state.
    Present,
}

/// Systems that write `DriveInput` during `Input`. The flags are cleared at
/// the start of every frame, before this set runs.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct DriveInputWriters;
