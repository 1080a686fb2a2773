//! Egui input guard: keeps pointer input on the control panel from also
//! orbiting or zooming the scene camera underneath it.

use bevy_egui::EguiContexts;

/// Returns `true` when egui wants the pointer, i.e. the cursor is over an
/// egui window or egui is handling a drag. Camera input systems early-return
/// when this is `true`.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}
