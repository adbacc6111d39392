pub mod orbit {
    use std::f32::consts::{FRAC_PI_2, TAU};

    use bevy::{
        input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel},
        prelude::*,
    };

    /// Keeps the camera from flipping over the poles.
    const MAX_PITCH: f32 = FRAC_PI_2 - 0.05;
    const ZOOM_STEP: f32 = 1.2;
    /// One full orbit every 30 seconds.
    const DEFAULT_AUTO_ROTATE_SPEED: f32 = TAU / 30.0;

    pub struct OrbitCameraPlugin;

    impl Plugin for OrbitCameraPlugin {
        fn build(&self, app: &mut App) {
            app.add_systems(Update, (orbit_input, orbit_update).chain());
        }
    }

    /// Orbit-style controls around a fixed target. Panning is not supported.
    #[derive(Component, Debug, Clone)]
    pub struct OrbitCamera {
        pub target: Vec3,
        pub radius: f32,
        pub min_radius: f32,
        pub max_radius: f32,
        pub yaw: f32,
        pub pitch: f32,
        pub auto_rotate: bool,
        /// Radians per second.
        pub auto_rotate_speed: f32,
        /// Radians per pixel dragged.
        pub rotate_speed: f32,
        /// Fraction of the angular velocity lost per frame.
        pub damping: f32,
        yaw_velocity: f32,
        pitch_velocity: f32,
    }

    impl OrbitCamera {
        pub fn new(target: Vec3, radius: f32) -> Self {
            Self {
                target,
                radius,
                min_radius: radius * 0.05,
                max_radius: radius * 4.0,
                yaw: 0.0,
                pitch: 0.0,
                auto_rotate: false,
                auto_rotate_speed: DEFAULT_AUTO_ROTATE_SPEED,
                rotate_speed: 0.005,
                damping: 0.05,
                yaw_velocity: 0.0,
                pitch_velocity: 0.0,
            }
        }

        pub fn rotate(&mut self, drag: Vec2) {
            self.yaw_velocity -= drag.x * self.rotate_speed;
            self.pitch_velocity -= drag.y * self.rotate_speed;
        }

        /// Positive `scroll` zooms in.
        pub fn zoom(&mut self, scroll: f32) {
            let scale = ZOOM_STEP.powf(-scroll);
            self.radius = (self.radius * scale).clamp(self.min_radius, self.max_radius);
        }

        pub fn step(&mut self, dt: f32) {
            if self.auto_rotate {
                self.yaw += self.auto_rotate_speed * dt;
            }
            self.yaw = (self.yaw + self.yaw_velocity).rem_euclid(TAU);
            self.pitch = (self.pitch + self.pitch_velocity).clamp(-MAX_PITCH, MAX_PITCH);

            let keep = (1.0 - self.damping).clamp(0.0, 1.0);
            self.yaw_velocity *= keep;
            self.pitch_velocity *= keep;
        }

        pub fn orbit_transform(&self) -> Transform {
            let rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0);
            let offset = rotation * Vec3::new(0.0, 0.0, self.radius);
            Transform::from_translation(self.target + offset).looking_at(self.target, Vec3::Y)
        }
    }

    fn orbit_input(
        mouse_buttons: Res<ButtonInput<MouseButton>>,
        mut mouse_motion: EventReader<MouseMotion>,
        mut mouse_wheel: EventReader<MouseWheel>,
        mut cameras: Query<&mut OrbitCamera>,
    ) {
        let drag: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
        let scroll: f32 = mouse_wheel
            .read()
            .map(|wheel| match wheel.unit {
                MouseScrollUnit::Line => wheel.y,
                MouseScrollUnit::Pixel => wheel.y / 120.0,
            })
            .sum();

        let dragging = mouse_buttons.pressed(MouseButton::Left);
        for mut camera in cameras.iter_mut() {
            if dragging {
                camera.rotate(drag);
            }
            if scroll != 0.0 {
                camera.zoom(scroll);
            }
        }
    }

    fn orbit_update(time: Res<Time>, mut cameras: Query<(&mut Transform, &mut OrbitCamera)>) {
        for (mut transform, mut camera) in cameras.iter_mut() {
            camera.step(time.delta_secs());
            *transform = camera.orbit_transform();
        }
    }

}
