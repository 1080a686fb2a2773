//! Celebration props: drifting balloons and the venue indicators (bobbing
//! arrow, pulsing orb, coloured light).
//!
//! Every moving prop carries an [`Animated`] component; one system samples
//! them all from elapsed time.

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;
use rand::Rng;

use simulation::session::SessionOrchestrator;
use simulation::sim_rng::SimRng;
use simulation::venues::{DestinationId, VenueRegistry};

use crate::scene::hex_color;

const BALLOON_COUNT: usize = 8;
const BALLOON_COLORS: [u32; 4] = [0xff69b4, 0xff1493, 0xffc0cb, 0xffe4e1];
const BALLOON_RADIUS: f32 = 3.0;
const BALLOON_SPREAD: f32 = 200.0;
/// Balloons rise through this band above their spawn height, then wrap.
const BALLOON_RISE_BAND: f32 = 120.0;
const BALLOON_WOBBLE: f32 = 6.0;
const BALLOON_TUMBLE_RATE: f32 = 0.6;

const ARROW_LIFT: f32 = 15.0;
const ORB_LIFT: f32 = 5.0;
const LIGHT_LIFT: f32 = 10.0;
const ARROW_CONE_ALPHA: f32 = 0.8;
const ARROW_SHAFT_ALPHA: f32 = 0.7;
const DIMMED_ARROW_ALPHA: f32 = 0.2;
const TARGET_ARROW_SCALE: f32 = 1.2;

/// How a decoration moves over time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationDescriptor {
    /// Vertical sine bob.
    Bob { amplitude: f32, frequency: f32 },
    /// Bob plus a steady spin about Y.
    BobSpin {
        amplitude: f32,
        frequency: f32,
        spin_rate: f32,
    },
    /// Slow rise with a circular wobble and a tumble about X.
    Drift { rise_speed: f32, phase: f32 },
    /// Bob with emissive intensity pulsing in step, between 0 and 1.
    Pulse { amplitude: f32, frequency: f32 },
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Animated {
    /// Rest position the animation offsets from.
    pub base: Vec3,
    pub descriptor: AnimationDescriptor,
}

/// One sampled animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSample {
    pub translation: Vec3,
    pub rotation: Quat,
    pub emissive: Option<f32>,
}

impl Animated {
    pub fn new(base: Vec3, descriptor: AnimationDescriptor) -> Self {
        Self { base, descriptor }
    }

    pub fn sample(&self, t: f32) -> AnimationSample {
        let mut sample = AnimationSample {
            translation: self.base,
            rotation: Quat::IDENTITY,
            emissive: None,
        };
        match self.descriptor {
            AnimationDescriptor::Bob {
                amplitude,
                frequency,
            } => {
                sample.translation.y += (t * frequency).sin() * amplitude;
            }
            AnimationDescriptor::BobSpin {
                amplitude,
                frequency,
                spin_rate,
            } => {
                sample.translation.y += (t * frequency).sin() * amplitude;
                sample.rotation = Quat::from_rotation_y(t * spin_rate);
            }
            AnimationDescriptor::Drift { rise_speed, phase } => {
                let angle = t + phase;
                sample.translation.x -= BALLOON_WOBBLE * (angle.cos() - phase.cos());
                sample.translation.z += BALLOON_WOBBLE * (angle.sin() - phase.sin());
                sample.translation.y += (rise_speed * t).rem_euclid(BALLOON_RISE_BAND);
                sample.rotation = Quat::from_rotation_x(t * BALLOON_TUMBLE_RATE);
            }
            AnimationDescriptor::Pulse {
                amplitude,
                frequency,
            } => {
                let wave = (t * frequency).sin();
                sample.translation.y += wave * amplitude;
                sample.emissive = Some(0.5 + wave * 0.5);
            }
        }
        sample
    }
}

/// Indicator arrow above a venue, with its own materials so it can be dimmed.
#[derive(Component, Debug, Clone)]
pub struct VenueArrow {
    pub destination: DestinationId,
    cone_material: Handle<StandardMaterial>,
    shaft_material: Handle<StandardMaterial>,
}

/// Scale and opacities of one arrow given the journey in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowStyle {
    pub scale: f32,
    pub cone_alpha: f32,
    pub shaft_alpha: f32,
}

pub fn arrow_style(arrow: DestinationId, journey: Option<DestinationId>) -> ArrowStyle {
    match journey {
        None => ArrowStyle {
            scale: 1.0,
            cone_alpha: ARROW_CONE_ALPHA,
            shaft_alpha: ARROW_SHAFT_ALPHA,
        },
        Some(target) if target == arrow => ArrowStyle {
            scale: TARGET_ARROW_SCALE,
            cone_alpha: 1.0,
            shaft_alpha: 1.0,
        },
        Some(_) => ArrowStyle {
            scale: 1.0,
            cone_alpha: DIMMED_ARROW_ALPHA,
            shaft_alpha: DIMMED_ARROW_ALPHA,
        },
    }
}

/// Placement of one balloon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalloonSpec {
    pub position: Vec3,
    pub color: u32,
    pub rise_speed: f32,
    pub phase: f32,
}

pub fn balloon_layout(rng: &mut impl Rng) -> Vec<BalloonSpec> {
    (0..BALLOON_COUNT)
        .map(|i| BalloonSpec {
            position: Vec3::new(
                (rng.gen::<f32>() - 0.5) * BALLOON_SPREAD,
                50.0 + rng.gen::<f32>() * 80.0,
                (rng.gen::<f32>() - 0.5) * BALLOON_SPREAD,
            ),
            color: BALLOON_COLORS[i % BALLOON_COLORS.len()],
            rise_speed: 0.18 + rng.gen::<f32>() * 0.18,
            phase: rng.gen::<f32>() * TAU,
        })
        .collect()
}

pub fn spawn_balloons(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rng: ResMut<SimRng>,
) {
    let mesh = meshes.add(Sphere::new(BALLOON_RADIUS).mesh().uv(16, 16));
    for spec in balloon_layout(&mut rng.0) {
        commands.spawn((
            Name::new("Balloon"),
            Mesh3d(mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: hex_color(spec.color),
                ..default()
            })),
            Transform::from_translation(spec.position),
            Animated::new(
                spec.position,
                AnimationDescriptor::Drift {
                    rise_speed: spec.rise_speed,
                    phase: spec.phase,
                },
            ),
        ));
    }
}

pub fn spawn_venue_indicators(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    venues: Res<VenueRegistry>,
) {
    let orb_mesh = meshes.add(Sphere::new(2.0).mesh().uv(8, 8));
    let cone_mesh = meshes.add(Cone::new(3.0, 6.0).mesh().resolution(4));
    let shaft_mesh = meshes.add(Cylinder::new(0.8, 8.0));

    for venue in venues.iter() {
        let color = hex_color(venue.color);
        let top = Vec3::new(venue.position.x, venue.height, venue.position.z);

        // Coloured glow over the roof, moving with the orb
        let light_base = top + Vec3::Y * LIGHT_LIFT;
        commands.spawn((
            PointLight {
                color,
                intensity: 100_000.0,
                range: 100.0,
                ..default()
            },
            Transform::from_translation(light_base),
            Animated::new(
                light_base,
                AnimationDescriptor::Bob {
                    amplitude: 1.0,
                    frequency: 5.0,
                },
            ),
        ));

        let orb_base = top + Vec3::Y * ORB_LIFT;
        commands.spawn((
            Mesh3d(orb_mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                emissive: color.to_linear(),
                ..default()
            })),
            Transform::from_translation(orb_base),
            Animated::new(
                orb_base,
                AnimationDescriptor::Pulse {
                    amplitude: 1.0,
                    frequency: 5.0,
                },
            ),
        ));

        let style = arrow_style(venue.id, None);
        let cone_material = materials.add(StandardMaterial {
            base_color: color.with_alpha(style.cone_alpha),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        });
        let shaft_material = materials.add(StandardMaterial {
            base_color: color.with_alpha(style.shaft_alpha),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        });
        let arrow_base = top + Vec3::Y * ARROW_LIFT;
        commands
            .spawn((
                Name::new(format!("{} arrow", venue.id.label())),
                VenueArrow {
                    destination: venue.id,
                    cone_material: cone_material.clone(),
                    shaft_material: shaft_material.clone(),
                },
                Transform::from_translation(arrow_base),
                Visibility::default(),
                Animated::new(
                    arrow_base,
                    AnimationDescriptor::BobSpin {
                        amplitude: 3.0,
                        frequency: 2.0,
                        spin_rate: 1.0,
                    },
                ),
            ))
            .with_children(|arrow| {
                // Tip points down at the building
                arrow.spawn((
                    Mesh3d(cone_mesh.clone()),
                    MeshMaterial3d(cone_material),
                    Transform::from_rotation(Quat::from_rotation_x(PI)),
                ));
                arrow.spawn((
                    Mesh3d(shaft_mesh.clone()),
                    MeshMaterial3d(shaft_material),
                    Transform::from_xyz(0.0, 7.0, 0.0),
                ));
            });
    }
}

/// System: sample every `Animated` entity at the current time.
pub fn animate_decorations(
    time: Res<Time>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut query: Query<(
        &Animated,
        &mut Transform,
        Option<&MeshMaterial3d<StandardMaterial>>,
    )>,
) {
    let t = time.elapsed_secs();
    for (animated, mut transform, material) in &mut query {
        let sample = animated.sample(t);
        transform.translation = sample.translation;
        transform.rotation = sample.rotation;

        let (Some(intensity), Some(material)) = (sample.emissive, material) else {
            continue;
        };
        if let Some(mat) = materials.get_mut(&material.0) {
            mat.emissive = mat.base_color.to_linear() * intensity;
        }
    }
}

/// System: enlarge the journey's destination arrow and dim the others.
pub fn highlight_target_arrow(
    orchestrator: Res<SessionOrchestrator>,
    mut applied: Local<Option<Option<DestinationId>>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut arrows: Query<(&VenueArrow, &mut Transform)>,
) {
    let journey = orchestrator.journey_destination();
    if *applied == Some(journey) {
        return;
    }
    *applied = Some(journey);

    for (arrow, mut transform) in &mut arrows {
        let style = arrow_style(arrow.destination, journey);
        transform.scale = Vec3::splat(style.scale);
        for (handle, alpha) in [
            (&arrow.cone_material, style.cone_alpha),
            (&arrow.shaft_material, style.shaft_alpha),
        ] {
            if let Some(mat) = materials.get_mut(handle) {
                mat.base_color.set_alpha(alpha);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_style_highlights_only_target() {
        let target = arrow_style(DestinationId::Groom, Some(DestinationId::Groom));
        assert_eq!(target.scale, TARGET_ARROW_SCALE);
        assert_eq!(target.cone_alpha, 1.0);

        let other = arrow_style(DestinationId::Bride, Some(DestinationId::Groom));
        assert_eq!(other.scale, 1.0);
        assert_eq!(other.cone_alpha, DIMMED_ARROW_ALPHA);
        assert_eq!(other.shaft_alpha, DIMMED_ARROW_ALPHA);

        let idle = arrow_style(DestinationId::Bride, None);
        assert_eq!(idle.cone_alpha, ARROW_CONE_ALPHA);
        assert_eq!(idle.shaft_alpha, ARROW_SHAFT_ALPHA);
    }

    #[test]
    fn test_balloon_layout_is_seeded() {
        let a = balloon_layout(&mut SimRng::from_seed_u64(3).0);
        let b = balloon_layout(&mut SimRng::from_seed_u64(3).0);
        assert_eq!(a, b);
        assert_eq!(a.len(), BALLOON_COUNT);
        for spec in &a {
            assert!(spec.position.x.abs() <= BALLOON_SPREAD / 2.0);
            assert!((50.0..=130.0).contains(&spec.position.y));
        }
        assert_eq!(a[4].color, BALLOON_COLORS[0]);
    }

    #[test]
    fn test_bob_spin_sample() {
        let animated = Animated::new(
            Vec3::new(0.0, 10.0, 0.0),
            AnimationDescriptor::BobSpin {
                amplitude: 3.0,
                frequency: 2.0,
                spin_rate: 1.0,
            },
        );
        let at_rest = animated.sample(0.0);
        assert_eq!(at_rest.translation, Vec3::new(0.0, 10.0, 0.0));
        let peak = animated.sample(PI / 4.0);
        assert!((peak.translation.y - 13.0).abs() < 1e-4);
        assert!(peak.emissive.is_none());
    }

    #[test]
    fn test_pulse_emissive_range() {
        let animated = Animated::new(
            Vec3::ZERO,
            AnimationDescriptor::Pulse {
                amplitude: 1.0,
                frequency: 5.0,
            },
        );
        for i in 0..100 {
            let e = animated.sample(i as f32 * 0.05).emissive.unwrap();
            assert!((0.0..=1.0).contains(&e));
        }
    }

    #[test]
    fn test_drift_starts_at_base_and_stays_in_band() {
        let base = Vec3::new(10.0, 60.0, -20.0);
        let animated = Animated::new(
            base,
            AnimationDescriptor::Drift {
                rise_speed: 0.3,
                phase: 1.0,
            },
        );
        assert!(animated.sample(0.0).translation.abs_diff_eq(base, 1e-4));
        for i in 0..200 {
            let y = animated.sample(i as f32 * 10.0).translation.y;
            assert!(y >= base.y && y < base.y + BALLOON_RISE_BAND);
        }
    }
}
