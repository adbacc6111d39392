use bevy::prelude::*;
use bevy_inspector_egui::{bevy_egui::EguiPlugin, quick::WorldInspectorPlugin};
use rand::Rng;

use crate::{
    algo::mst::{self, Edge},
    utils::orbit::{OrbitCamera, OrbitCameraPlugin},
};

pub mod config;
pub mod points;
pub mod reveal;
pub mod scene;

use config::CloudConfig;
use points::{generate_points, Point};
use reveal::RevealScheduler;
use scene::{materialize_edge, populate_scene, BevyScene};

pub fn run(config: CloudConfig, inspect: bool) -> AppExit {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "kruskal cloud".into(),
            ..default()
        }),
        ..default()
    }))
    .add_plugins(OrbitCameraPlugin)
    .add_plugins(CloudPlugin { config });

    if inspect {
        app.add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: true,
        })
        .add_plugins(WorldInspectorPlugin::new());
    }

    app.run()
}

pub struct CloudPlugin {
    pub config: CloudConfig,
}

impl Plugin for CloudPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .add_plugins(RevealPlugin)
            .add_systems(Startup, setup_cloud);
    }
}

/// Draws scheduled edges each frame once an [`EdgeReveal`] exists and
/// starts the camera orbit when the last one is in.
pub struct RevealPlugin;

impl Plugin for RevealPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<RevealFinished>().add_systems(
            Update,
            (
                advance_reveal.run_if(resource_exists::<EdgeReveal>),
                start_auto_rotate,
            )
                .chain(),
        );
    }
}

/// A generated point set and its spanning tree, edges in acceptance order.
pub struct Cloud {
    pub points: Vec<Point>,
    pub edges: Vec<Edge>,
}

impl Cloud {
    pub fn generate<R: Rng + ?Sized>(config: &CloudConfig, rng: &mut R) -> Self {
        let points = generate_points(config.point_count, config.spread_bound, rng);
        let positions: Vec<Vec3> = points.iter().map(|point| point.position).collect();
        let edges = mst::build_mst(&positions);
        Self { points, edges }
    }

    pub fn total_weight(&self) -> f32 {
        mst::total_weight(&self.edges)
    }

    /// Endpoint pairs in reveal order.
    pub fn edge_endpoints(&self) -> Vec<(Point, Point)> {
        self.edges
            .iter()
            .map(|edge| (self.points[edge.a], self.points[edge.b]))
            .collect()
    }
}

#[derive(Resource)]
pub struct EdgeReveal {
    pub scheduler: RevealScheduler<(Point, Point)>,
}

/// Sent once, after the last tree edge has been drawn.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealFinished {
    pub edges: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    Corona,
    RedEclipse,
}

impl Backdrop {
    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Backdrop::Corona
        } else {
            Backdrop::RedEclipse
        }
    }

    pub fn color(self) -> Color {
        match self {
            Backdrop::Corona => Color::srgb(0.02, 0.03, 0.08),
            Backdrop::RedEclipse => Color::srgb(0.08, 0.01, 0.02),
        }
    }
}

fn setup_cloud(mut scene: BevyScene, config: Res<CloudConfig>) {
    let mut rng = config.rng();
    let cloud = Cloud::generate(&config, &mut rng);
    info!(
        "generated {} points, {} tree edges, total weight {:.2} (seed {:?})",
        cloud.points.len(),
        cloud.edges.len(),
        cloud.total_weight(),
        config.seed
    );

    populate_scene(&mut scene, &cloud.points);

    let backdrop = Backdrop::pick(&mut rng);
    info!("backdrop: {:?}", backdrop);

    let orbit = OrbitCamera::new(Vec3::ZERO, config.camera_distance());
    let transform = orbit.orbit_transform();
    let commands = scene.commands();
    commands.insert_resource(ClearColor(backdrop.color()));
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 90f32.to_radians(),
            far: config.camera_distance() * 8.0,
            ..default()
        }),
        orbit,
        transform,
    ));
    commands.insert_resource(EdgeReveal {
        scheduler: RevealScheduler::schedule(cloud.edge_endpoints(), config.edge_delay),
    });
}

fn advance_reveal(
    time: Res<Time>,
    mut reveal: ResMut<EdgeReveal>,
    mut scene: BevyScene,
    mut finished: EventWriter<RevealFinished>,
) {
    if reveal.scheduler.is_finished() {
        return;
    }

    let tick = reveal
        .scheduler
        .advance(time.delta(), |_, (a, b)| materialize_edge(&mut scene, a, b));

    if tick.revealed > 0 {
        debug!(
            "{}/{} edges revealed at {:?}, next due {:?}",
            reveal.scheduler.revealed(),
            reveal.scheduler.total(),
            reveal.scheduler.elapsed(),
            reveal.scheduler.next_due()
        );
    }
    if tick.finished {
        info!(
            "revealed {} edges after {:?}",
            reveal.scheduler.total(),
            reveal.scheduler.finished_at().unwrap_or_default()
        );
        finished.write(RevealFinished {
            edges: reveal.scheduler.total(),
        });
    }
}

fn start_auto_rotate(
    mut finished: EventReader<RevealFinished>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    if finished.read().last().is_none() {
        return;
    }
    for mut camera in cameras.iter_mut() {
        camera.auto_rotate = true;
    }
}
