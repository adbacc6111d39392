use bevy::{
    ecs::system::SystemParam,
    prelude::*,
    render::{mesh::PrimitiveTopology, render_asset::RenderAssetUsages},
};

use super::points::Point;

const POINT_RADIUS: f32 = 1.0;
const POINT_SECTORS: u32 = 32;
const POINT_STACKS: u32 = 32;

/// The pieces of a renderer the cloud needs: point and line primitives that
/// stay hidden until they are added to the scene.
pub trait SceneSink {
    type Handle;

    fn create_point(&mut self, position: Vec3, color: Color) -> Self::Handle;
    /// Line whose color is interpolated from `color_a` to `color_b`.
    fn create_edge_line(
        &mut self,
        pos_a: Vec3,
        color_a: Color,
        pos_b: Vec3,
        color_b: Color,
    ) -> Self::Handle;
    fn add_to_scene(&mut self, handle: Self::Handle);
}

pub fn populate_scene<S: SceneSink>(sink: &mut S, points: &[Point]) {
    let handles: Vec<_> = points
        .iter()
        .map(|point| sink.create_point(point.position, point.color))
        .collect();
    for handle in handles {
        sink.add_to_scene(handle);
    }
}

pub fn materialize_edge<S: SceneSink>(sink: &mut S, a: &Point, b: &Point) {
    let line = sink.create_edge_line(a.position, a.color, b.position, b.color);
    sink.add_to_scene(line);
}

/// Every point shares one sphere mesh and every line one white material.
#[derive(SystemParam)]
pub struct BevyScene<'w, 's> {
    commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    point_mesh: Local<'s, Option<Handle<Mesh>>>,
    line_material: Local<'s, Option<Handle<StandardMaterial>>>,
}

impl<'w, 's> BevyScene<'w, 's> {
    pub fn commands(&mut self) -> &mut Commands<'w, 's> {
        &mut self.commands
    }
}

impl SceneSink for BevyScene<'_, '_> {
    type Handle = Entity;

    fn create_point(&mut self, position: Vec3, color: Color) -> Entity {
        let meshes = &mut self.meshes;
        let mesh = self
            .point_mesh
            .get_or_insert_with(|| {
                meshes.add(Sphere::new(POINT_RADIUS).mesh().uv(POINT_SECTORS, POINT_STACKS))
            })
            .clone();
        let material = self.materials.add(StandardMaterial {
            base_color: color,
            unlit: true,
            ..default()
        });
        self.commands
            .spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_translation(position),
                Visibility::Hidden,
            ))
            .id()
    }

    fn create_edge_line(
        &mut self,
        pos_a: Vec3,
        color_a: Color,
        pos_b: Vec3,
        color_b: Color,
    ) -> Entity {
        let mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default())
            .with_inserted_attribute(
                Mesh::ATTRIBUTE_POSITION,
                vec![pos_a.to_array(), pos_b.to_array()],
            )
            .with_inserted_attribute(
                Mesh::ATTRIBUTE_COLOR,
                vec![
                    color_a.to_linear().to_f32_array(),
                    color_b.to_linear().to_f32_array(),
                ],
            );
        // Vertex colors are multiplied with a white base.
        let materials = &mut self.materials;
        let material = self
            .line_material
            .get_or_insert_with(|| {
                materials.add(StandardMaterial {
                    base_color: Color::WHITE,
                    unlit: true,
                    ..default()
                })
            })
            .clone();
        self.commands
            .spawn((
                Mesh3d(self.meshes.add(mesh)),
                MeshMaterial3d(material),
                Transform::IDENTITY,
                Visibility::Hidden,
            ))
            .id()
    }

    fn add_to_scene(&mut self, handle: Entity) {
        self.commands.entity(handle).insert(Visibility::Inherited);
    }
}
