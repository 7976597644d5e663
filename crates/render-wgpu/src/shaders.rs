/// WGSL shader for the plume: noise-driven vertex displacement and a fire ramp.
///
/// `params` packs `(time, time_scale, plume_height, color_gain)`.
pub const PLUME_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec4<f32>,
    @location(1) normal: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) heat: f32,
};

fn hash3(p: vec3<f32>) -> f32 {
    return fract(sin(dot(p, vec3<f32>(127.1, 311.7, 74.7))) * 43758.5453);
}

fn value_noise(p: vec3<f32>) -> f32 {
    let i = floor(p);
    let f = fract(p);
    let u = f * f * (3.0 - 2.0 * f);

    let n000 = hash3(i);
    let n100 = hash3(i + vec3<f32>(1.0, 0.0, 0.0));
    let n010 = hash3(i + vec3<f32>(0.0, 1.0, 0.0));
    let n110 = hash3(i + vec3<f32>(1.0, 1.0, 0.0));
    let n001 = hash3(i + vec3<f32>(0.0, 0.0, 1.0));
    let n101 = hash3(i + vec3<f32>(1.0, 0.0, 1.0));
    let n011 = hash3(i + vec3<f32>(0.0, 1.0, 1.0));
    let n111 = hash3(i + vec3<f32>(1.0, 1.0, 1.0));

    let x00 = mix(n000, n100, u.x);
    let x10 = mix(n010, n110, u.x);
    let x01 = mix(n001, n101, u.x);
    let x11 = mix(n011, n111, u.x);
    return mix(mix(x00, x10, u.y), mix(x01, x11, u.y), u.z);
}

fn fbm(p: vec3<f32>) -> f32 {
    var sum = 0.0;
    var amp = 0.5;
    var q = p;
    for (var i = 0; i < 4; i++) {
        sum += amp * value_noise(q);
        q = q * 2.02;
        amp *= 0.5;
    }
    return sum;
}

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let t = uniforms.params.x * uniforms.params.y;
    let plume_height = uniforms.params.z;

    let n = normalize(vertex.normal.xyz);
    let rise = max(n.y, 0.0);
    let flicker = fbm(vertex.position.xyz * 2.0 + vec3<f32>(0.0, -1.5 * t, 0.0));
    let heat = flicker * (0.35 + rise);

    // Push out along the normal, then stretch the upper hemisphere upward.
    let offset = n * heat * plume_height
        + vec3<f32>(0.0, rise * rise * flicker * plume_height, 0.0);

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position.xyz + offset, 1.0);
    out.normal = n;
    out.heat = heat;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let gain = uniforms.params.w;
    let h = clamp(in.heat, 0.0, 1.0);

    let ember = vec3<f32>(0.55, 0.05, 0.02);
    let flame = vec3<f32>(1.0, 0.45, 0.05);
    let core = vec3<f32>(1.0, 0.95, 0.6);
    let ramp = select(
        mix(flame, core, (h - 0.5) * 2.0),
        mix(ember, flame, h * 2.0),
        h < 0.5
    );

    let light_dir = normalize(vec3<f32>(0.3, 1.0, 0.5));
    let lambert = 0.45 + 0.55 * max(dot(normalize(in.normal), light_dir), 0.0);
    return vec4<f32>(ramp * lambert * gain * 1.5, 1.0);
}
"#;
