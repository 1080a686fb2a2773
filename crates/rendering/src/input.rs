use bevy::prelude::*;

use simulation::motion::DriveInput;

/// Arrow keys drive the vehicle in self-drive mode.
///
/// Runs every frame; the session ignores the flags unless a manual journey
/// is under way.
pub fn keyboard_drive_input(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<DriveInput>) {
    input.merge(drive_input_from_keys(&keys));
}

pub fn drive_input_from_keys(keys: &ButtonInput<KeyCode>) -> DriveInput {
    DriveInput {
        forward: keys.pressed(KeyCode::ArrowUp),
        back: keys.pressed(KeyCode::ArrowDown),
        left: keys.pressed(KeyCode::ArrowLeft),
        right: keys.pressed(KeyCode::ArrowRight),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_map_to_directions() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::ArrowUp);
        keys.press(KeyCode::ArrowLeft);
        let input = drive_input_from_keys(&keys);
        assert!(input.forward && input.left);
        assert!(!input.back && !input.right);
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyW);
        assert!(!drive_input_from_keys(&keys).any());
    }
}
