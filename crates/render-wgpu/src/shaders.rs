/// Uniform block shared by the lit and shadow pipelines.
const UNIFORMS: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    light_view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    ambient: vec4<f32>,
    hemi_sky: vec4<f32>,
    hemi_ground: vec4<f32>,
    // xyz: direction toward the light, w: 1 when the shadow map is valid
    sun_dir: vec4<f32>,
    sun_color: vec4<f32>,
    fog_color: vec4<f32>,
    // x: near, y: far, z: 1 when fog is enabled
    fog_range: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;
"#;

/// WGSL for flat-shaded meshes lit by ambient, hemisphere and directional light.
const WORLD_BODY: &str = r#"
@group(1) @binding(0)
var shadow_map: texture_depth_2d;
@group(1) @binding(1)
var shadow_sampler: sampler_comparison;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) shading: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) light_pos: vec4<f32>,
    @location(4) receive_shadow: f32,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world = vec4<f32>(vertex.position, 1.0);
    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world;
    out.world_pos = vertex.position;
    out.normal = vertex.normal;
    out.color = vertex.color;
    out.light_pos = uniforms.light_view_proj * world;
    out.receive_shadow = vertex.shading.x;
    return out;
}

fn shadow_factor(light_pos: vec4<f32>) -> f32 {
    let ndc = light_pos.xyz / light_pos.w;
    let uv = vec2<f32>(ndc.x * 0.5 + 0.5, -ndc.y * 0.5 + 0.5);
    let lit = textureSampleCompareLevel(shadow_map, shadow_sampler, uv, ndc.z);
    let inside = uv.x >= 0.0 && uv.x <= 1.0 && uv.y >= 0.0 && uv.y <= 1.0 && ndc.z <= 1.0;
    return select(1.0, lit, inside);
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let hemi_mix = n.y * 0.5 + 0.5;
    let hemi = mix(uniforms.hemi_ground.rgb, uniforms.hemi_sky.rgb, hemi_mix);

    var shadow = 1.0;
    if (uniforms.sun_dir.w > 0.5 && in.receive_shadow > 0.5) {
        shadow = shadow_factor(in.light_pos);
    }
    let diffuse = max(dot(n, uniforms.sun_dir.xyz), 0.0) * shadow;
    let light = uniforms.ambient.rgb + hemi + uniforms.sun_color.rgb * diffuse;

    var rgb = in.color.rgb * light;
    if (uniforms.fog_range.z > 0.5) {
        let dist = length(in.world_pos - uniforms.camera_pos.xyz);
        let span = max(uniforms.fog_range.y - uniforms.fog_range.x, 0.0001);
        let f = clamp((dist - uniforms.fog_range.x) / span, 0.0, 1.0);
        rgb = mix(rgb, uniforms.fog_color.rgb, f);
    }

    // Premultiplied output so the surface composites over the host background.
    let a = in.color.a;
    return vec4<f32>(rgb * a, a);
}
"#;

/// WGSL for the depth-only shadow pass.
const SHADOW_BODY: &str = r#"
@vertex
fn vs_shadow(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return uniforms.light_view_proj * vec4<f32>(position, 1.0);
}
"#;

pub fn world_shader() -> String {
    format!("{UNIFORMS}{WORLD_BODY}")
}

pub fn shadow_shader() -> String {
    format!("{UNIFORMS}{SHADOW_BODY}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shaders_share_the_uniform_block() {
        assert!(world_shader().contains("struct Uniforms"));
        assert!(shadow_shader().contains("struct Uniforms"));
        assert!(world_shader().contains("fn fs_main"));
        assert!(shadow_shader().contains("fn vs_shadow"));
    }
}
