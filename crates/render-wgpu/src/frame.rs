use aviator_render::PerspectiveCamera;
use aviator_scene::{Light, NodeKind, SceneGraph};
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
    /// x: receives shadow (0 or 1), y: unused
    pub shading: [f32; 2],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    pub light_view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    pub ambient: [f32; 4],
    pub hemi_sky: [f32; 4],
    pub hemi_ground: [f32; 4],
    pub sun_dir: [f32; 4],
    pub sun_color: [f32; 4],
    pub fog_color: [f32; 4],
    pub fog_range: [f32; 4],
}

/// Everything the GPU needs for one frame, assembled on the CPU.
///
/// Vertices are in world space with flat per-triangle normals. Opaque
/// triangles come first, translucent ones after `opaque_vertex_count`.
#[derive(Debug, Clone)]
pub struct FrameData {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) shadow_vertices: Vec<Vertex>,
    pub(crate) opaque_vertex_count: u32,
    pub(crate) uniforms: Uniforms,
    /// Requested shadow map resolution, if a directional light casts shadows.
    pub shadow_map_size: Option<u32>,
    /// Linear fog color, also used as the opaque clear color.
    pub fog_color: Option<[f32; 3]>,
}

fn vec4(v: Vec3, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

fn push_mesh_triangles(
    out: &mut Vec<Vertex>,
    world: Mat4,
    triangles: impl Iterator<Item = [Vec3; 3]>,
    color: [f32; 4],
    receive_shadow: bool,
) {
    let shading = [if receive_shadow { 1.0 } else { 0.0 }, 0.0];
    for tri in triangles {
        let [a, b, c] = tri.map(|p| world.transform_point3(p));
        let normal = (b - a).cross(c - a).normalize_or_zero().to_array();
        for p in [a, b, c] {
            out.push(Vertex {
                position: p.to_array(),
                normal,
                color,
                shading,
            });
        }
    }
}

impl FrameData {
    /// Flatten the scene graph for one frame.
    pub fn build(scene: &SceneGraph, camera: &PerspectiveCamera, shadows_enabled: bool) -> Self {
        let mut opaque = Vec::new();
        let mut translucent = Vec::new();
        let mut shadow_vertices = Vec::new();

        let mut ambient = Vec3::ZERO;
        let mut hemi_sky = Vec3::ZERO;
        let mut hemi_ground = Vec3::ZERO;
        let mut sun_dir = Vec3::Y;
        let mut sun_color = Vec3::ZERO;
        let mut light_view_proj = Mat4::IDENTITY;
        let mut shadow_map_size = None;
        let mut have_sun = false;

        for visit in scene.traverse() {
            match &visit.node.kind {
                NodeKind::Group => {}
                NodeKind::Mesh(mesh) => {
                    let [r, g, b] = mesh.material.color.to_linear_rgb();
                    let alpha = if mesh.material.transparent {
                        mesh.material.opacity
                    } else {
                        1.0
                    };
                    let target = if mesh.material.transparent {
                        &mut translucent
                    } else {
                        &mut opaque
                    };
                    push_mesh_triangles(
                        target,
                        visit.world,
                        mesh.geometry.triangles(),
                        [r, g, b, alpha],
                        mesh.receive_shadow,
                    );
                    if mesh.cast_shadow {
                        push_mesh_triangles(
                            &mut shadow_vertices,
                            visit.world,
                            mesh.geometry.triangles(),
                            [0.0; 4],
                            false,
                        );
                    }
                }
                NodeKind::Light(Light::Ambient(l)) => {
                    ambient += l.color.to_linear_vec3() * l.intensity;
                }
                NodeKind::Light(Light::Hemisphere(l)) => {
                    hemi_sky += l.sky_color.to_linear_vec3() * l.intensity;
                    hemi_ground += l.ground_color.to_linear_vec3() * l.intensity;
                }
                NodeKind::Light(Light::Directional(l)) => {
                    // One sun is supported; extra directional lights are ignored.
                    if have_sun {
                        continue;
                    }
                    have_sun = true;
                    let position = visit.world.transform_point3(Vec3::ZERO);
                    sun_dir = l.direction_from(position);
                    sun_color = l.color.to_linear_vec3() * l.intensity;
                    if shadows_enabled {
                        if let (Some(vp), Some(shadow)) =
                            (l.shadow_view_projection(position), l.shadow)
                        {
                            light_view_proj = vp;
                            shadow_map_size = Some(shadow.map_size.max(1));
                        }
                    }
                }
            }
        }

        let fog = scene.fog();
        let fog_color = fog.map(|f| f.color.to_linear_rgb());
        let uniforms = Uniforms {
            view_proj: camera.view_projection().to_cols_array_2d(),
            light_view_proj: light_view_proj.to_cols_array_2d(),
            camera_pos: vec4(camera.position, 1.0),
            ambient: vec4(ambient, 0.0),
            hemi_sky: vec4(hemi_sky, 0.0),
            hemi_ground: vec4(hemi_ground, 0.0),
            sun_dir: vec4(sun_dir, if shadow_map_size.is_some() { 1.0 } else { 0.0 }),
            sun_color: vec4(sun_color, 0.0),
            fog_color: fog.map_or([0.0; 4], |f| vec4(f.color.to_linear_vec3(), 1.0)),
            fog_range: fog.map_or([0.0; 4], |f| [f.near, f.far, 1.0, 0.0]),
        };

        let opaque_vertex_count = opaque.len() as u32;
        let mut vertices = opaque;
        vertices.append(&mut translucent);

        Self {
            vertices,
            shadow_vertices,
            opaque_vertex_count,
            uniforms,
            shadow_map_size,
            fog_color,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn opaque_vertex_count(&self) -> u32 {
        self.opaque_vertex_count
    }

    pub fn shadow_vertex_count(&self) -> u32 {
        self.shadow_vertices.len() as u32
    }

    pub fn has_shadow_pass(&self) -> bool {
        self.shadow_map_size.is_some() && !self.shadow_vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use aviator_common::{Color, Transform};
    use aviator_scene::{
        AmbientLight, DirectionalLight, DirectionalShadow, Fog, Geometry, HemisphereLight,
        Material, Mesh, Node, OrthoFrustum,
    };

    fn triangle(material: Material) -> Mesh {
        Mesh::new(
            Geometry::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2]),
            material,
        )
    }

    fn sun(shadow: bool) -> Light {
        Light::Directional(DirectionalLight {
            color: Color::WHITE,
            intensity: 0.9,
            target: Vec3::ZERO,
            shadow: shadow.then_some(DirectionalShadow {
                frustum: OrthoFrustum::symmetric(400.0, 1.0, 1000.0),
                map_size: 2048,
            }),
        })
    }

    #[test]
    fn opaque_vertices_precede_translucent() {
        let mut scene = SceneGraph::new();
        scene.add(Node::mesh("glass", triangle(Material::translucent(Color::WHITE, 0.3))));
        scene.add(Node::mesh("wall", triangle(Material::opaque(Color::BLACK))));
        let frame = FrameData::build(&scene, &PerspectiveCamera::default(), true);

        assert_eq!(frame.vertex_count(), 6);
        assert_eq!(frame.opaque_vertex_count(), 3);
        assert_eq!(frame.vertices[0].color[3], 1.0);
        assert_relative_eq!(frame.vertices[3].color[3], 0.3);
    }

    #[test]
    fn vertices_are_world_space_with_face_normals() {
        let mut scene = SceneGraph::new();
        scene.add(
            Node::mesh("t", triangle(Material::default()))
                .with_transform(Transform::from_position(Vec3::new(0.0, 10.0, 0.0))),
        );
        let frame = FrameData::build(&scene, &PerspectiveCamera::default(), false);
        assert_eq!(frame.vertices[0].position, [0.0, 10.0, 0.0]);
        assert_eq!(frame.vertices[0].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn lights_accumulate_into_uniforms() {
        let mut scene = SceneGraph::new();
        scene.add(Node::light(
            "ambient",
            Light::Ambient(AmbientLight {
                color: Color::WHITE,
                intensity: 0.5,
            }),
        ));
        scene.add(Node::light(
            "hemisphere",
            Light::Hemisphere(HemisphereLight {
                sky_color: Color::WHITE,
                ground_color: Color::BLACK,
                intensity: 0.9,
            }),
        ));
        scene.add(
            Node::light("sun", sun(false))
                .with_transform(Transform::from_position(Vec3::new(0.0, 10.0, 0.0))),
        );
        let frame = FrameData::build(&scene, &PerspectiveCamera::default(), true);

        assert_relative_eq!(frame.uniforms.ambient[0], 0.5);
        assert_relative_eq!(frame.uniforms.hemi_sky[1], 0.9);
        assert_eq!(frame.uniforms.hemi_ground[2], 0.0);
        assert_relative_eq!(frame.uniforms.sun_dir[1], 1.0);
        assert_eq!(frame.uniforms.sun_dir[3], 0.0);
        assert!(frame.shadow_map_size.is_none());
    }

    #[test]
    fn shadow_casters_feed_the_shadow_pass() {
        let mut scene = SceneGraph::new();
        scene.add(
            Node::light("sun", sun(true))
                .with_transform(Transform::from_position(Vec3::new(150.0, 350.0, 350.0))),
        );
        scene.add(Node::mesh("caster", triangle(Material::default()).casting_shadow()));
        scene.add(Node::mesh("receiver", triangle(Material::default()).receiving_shadow()));

        let frame = FrameData::build(&scene, &PerspectiveCamera::default(), true);
        assert_eq!(frame.shadow_map_size, Some(2048));
        assert_eq!(frame.shadow_vertex_count(), 3);
        assert!(frame.has_shadow_pass());
        assert_eq!(frame.uniforms.sun_dir[3], 1.0);
        assert_eq!(frame.vertices[3].shading[0], 1.0);

        let disabled = FrameData::build(&scene, &PerspectiveCamera::default(), false);
        assert!(!disabled.has_shadow_pass());
    }

    #[test]
    fn fog_is_forwarded() {
        let mut scene = SceneGraph::new();
        scene.set_fog(Some(Fog {
            color: Color::from_hex(0xf7d9aa),
            near: 100.0,
            far: 950.0,
        }));
        let frame = FrameData::build(&scene, &PerspectiveCamera::default(), true);
        assert_eq!(frame.uniforms.fog_range, [100.0, 950.0, 1.0, 0.0]);
        assert!(frame.fog_color.is_some());
    }

    #[test]
    fn colors_are_linearized_for_srgb_targets() {
        let sea = Color::from_hex(0x68c3c0);
        let fog = Color::from_hex(0xf7d9aa);
        let mut scene = SceneGraph::new();
        scene.add(Node::mesh("sea", triangle(Material::translucent(sea, 0.6))));
        scene.set_fog(Some(Fog {
            color: fog,
            near: 100.0,
            far: 950.0,
        }));
        let frame = FrameData::build(&scene, &PerspectiveCamera::default(), false);

        let [r, g, b] = sea.to_linear_rgb();
        assert_eq!(frame.vertices[0].color, [r, g, b, 0.6]);
        assert!(frame.vertices[0].color[0] < sea.to_rgb()[0]);
        assert_eq!(frame.fog_color, Some(fog.to_linear_rgb()));
        assert_eq!(frame.uniforms.fog_color[..3], fog.to_linear_rgb());
    }

    #[test]
    fn uniform_block_is_256_bytes() {
        assert_eq!(std::mem::size_of::<Uniforms>(), 256);
        assert_eq!(std::mem::size_of::<Vertex>(), 48);
    }
}
