use winit::keyboard::KeyCode;

use crate::game::block::BlockKind;
use crate::game::camera::Camera;
use crate::game::player::MoveIntent;

// The 10..100 sensitivity setting maps linearly to radians per pixel of
// mouse travel; the default of 50 gives 0.005.
const SENSITIVITY_TO_RADIANS: f32 = 1.0e-4;

/// Tracks which named actions the keyboard currently asks for, which block
/// kind is selected, and how mouse travel converts to look angles.
pub struct InputController {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    jump: bool,
    sprint: bool,
    crouch: bool,

    selected_kind: BlockKind,
    sensitivity: f32,
}

impl InputController {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            jump: false,
            sprint: false,
            crouch: false,
            selected_kind: BlockKind::Sand,
            sensitivity,
        }
    }

    /// Returns whether the key is one of ours.
    pub fn handle_key(&mut self, code: KeyCode, is_pressed: bool) -> bool {
        match code {
            KeyCode::KeyW => {
                self.forward = is_pressed;
                true
            }
            KeyCode::KeyS => {
                self.backward = is_pressed;
                true
            }
            KeyCode::KeyA => {
                self.left = is_pressed;
                true
            }
            KeyCode::KeyD => {
                self.right = is_pressed;
                true
            }
            KeyCode::Space => {
                self.jump = is_pressed;
                true
            }
            KeyCode::ControlLeft | KeyCode::ControlRight => {
                self.sprint = is_pressed;
                true
            }
            KeyCode::ShiftLeft | KeyCode::ShiftRight => {
                self.crouch = is_pressed;
                true
            }
            KeyCode::Digit1 => {
                if is_pressed {
                    self.selected_kind = BlockKind::Dirt;
                }
                true
            }
            KeyCode::Digit2 => {
                if is_pressed {
                    self.selected_kind = BlockKind::Sand;
                }
                true
            }
            KeyCode::Digit3 => {
                if is_pressed {
                    self.selected_kind = BlockKind::Stone;
                }
                true
            }
            _ => false,
        }
    }

    pub fn handle_mouse(&mut self, delta_x: f64, delta_y: f64, camera: &mut Camera) {
        camera.apply_look(delta_x as f32, delta_y as f32, self.radians_per_pixel());
    }

    pub fn move_intent(&self) -> MoveIntent {
        MoveIntent {
            forward: self.forward,
            backward: self.backward,
            left: self.left,
            right: self.right,
            jump: self.jump,
            sprint: self.sprint,
            crouch: self.crouch,
        }
    }

    pub fn selected_kind(&self) -> BlockKind {
        self.selected_kind
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
    }

    fn radians_per_pixel(&self) -> f32 {
        self.sensitivity * SENSITIVITY_TO_RADIANS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;

    #[test]
    fn test_movement_bindings() {
        let mut controller = InputController::new(50.0);

        assert!(controller.handle_key(KeyCode::KeyW, true));
        assert!(controller.handle_key(KeyCode::KeyD, true));
        assert!(controller.handle_key(KeyCode::Space, true));
        assert!(controller.handle_key(KeyCode::ControlLeft, true));
        assert!(controller.handle_key(KeyCode::ShiftLeft, true));

        let intent = controller.move_intent();
        assert!(intent.forward && intent.right && intent.jump);
        assert!(intent.sprint && intent.crouch);
        assert!(!intent.backward && !intent.left);

        assert!(controller.handle_key(KeyCode::KeyW, false));
        assert!(!controller.move_intent().forward);
    }

    #[test]
    fn test_unbound_key_falls_through() {
        let mut controller = InputController::new(50.0);
        assert!(!controller.handle_key(KeyCode::KeyQ, true));
    }

    #[test]
    fn test_block_selection() {
        let mut controller = InputController::new(50.0);
        assert_eq!(controller.selected_kind(), BlockKind::Sand);

        controller.handle_key(KeyCode::Digit3, true);
        assert_eq!(controller.selected_kind(), BlockKind::Stone);

        // Key release does not change the selection.
        controller.handle_key(KeyCode::Digit1, false);
        assert_eq!(controller.selected_kind(), BlockKind::Stone);

        controller.handle_key(KeyCode::Digit1, true);
        assert_eq!(controller.selected_kind(), BlockKind::Dirt);
    }

    #[test]
    fn test_sensitivity_mapping() {
        let mut controller = InputController::new(50.0);
        assert!((controller.radians_per_pixel() - 0.005).abs() < 1e-7);

        controller.set_sensitivity(100.0);
        assert!((controller.radians_per_pixel() - 0.01).abs() < 1e-7);
    }

    #[test]
    fn test_mouse_turns_camera() {
        let mut controller = InputController::new(50.0);
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), 0.0, 0.0);

        controller.handle_mouse(100.0, 0.0, &mut camera);
        assert!((camera.yaw - 0.5).abs() < 1e-5);
        assert_eq!(camera.pitch, 0.0);
    }
}
