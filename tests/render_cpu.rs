use wavy_circle::{
    CpuRenderer, FrameRGBA, RenderSettings, WaveOptions, WaveRenderer, render_frames,
};

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn digest_u64(bytes: &[u8]) -> u64 {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    for chunk in bytes.chunks(8) {
        let mut v = 0u64;
        for (i, &b) in chunk.iter().enumerate() {
            v |= (b as u64) << (i * 8);
        }
        state = mix64(state ^ v);
    }
    state
}

fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let idx = ((y * frame.width + x) * 4) as usize;
    frame.data[idx..idx + 4].try_into().unwrap()
}

fn opaque_black_backend() -> CpuRenderer {
    CpuRenderer::new(RenderSettings {
        clear_rgba: Some([0, 0, 0, 255]),
    })
}

#[test]
fn cpu_render_is_deterministic_and_nonempty() {
    let mut backend = opaque_black_backend();

    let mut r1 = WaveRenderer::new(64, 64);
    r1.set_progress(50.0);
    let mut r2 = r1.clone();

    let a = backend.render_scene(&r1.render_frame()).unwrap();
    let b = backend.render_scene(&r2.render_frame()).unwrap();

    assert_eq!(a.width, 64);
    assert_eq!(a.height, 64);
    assert!(a.premultiplied);
    assert_eq!(digest_u64(&a.data), digest_u64(&b.data));
    assert!(a.data.iter().any(|&x| x != 0));
}

#[test]
fn pixels_outside_the_circle_keep_the_clear_color() {
    let mut backend = opaque_black_backend();
    let mut renderer = WaveRenderer::new(200, 200);
    renderer.set_progress(100.0);

    let frame = backend.render_scene(&renderer.render_frame()).unwrap();
    // Canvas corners lie outside the inscribed circle.
    for (x, y) in [(1, 1), (198, 1), (1, 198), (198, 198)] {
        assert_eq!(pixel(&frame, x, y), [0, 0, 0, 255], "corner ({x},{y})");
    }
}

#[test]
fn full_progress_fills_the_circle_center_with_flowing_color() {
    let mut backend = opaque_black_backend();
    let mut renderer = WaveRenderer::new(200, 200);
    renderer.set_progress(100.0);

    let frame = backend.render_scene(&renderer.render_frame()).unwrap();
    // display_progress == 200 puts the wave origin above the circle's top
    // edge, so the whole interior is flooded with the default #6d2dcc.
    assert_eq!(pixel(&frame, 100, 100), [0x6d, 0x2d, 0xcc, 255]);
    assert_eq!(pixel(&frame, 60, 140), [0x6d, 0x2d, 0xcc, 255]);
}

#[test]
fn zero_progress_leaves_the_circle_center_empty() {
    let mut backend = opaque_black_backend();
    let mut renderer = WaveRenderer::new(200, 200);

    let frame = backend.render_scene(&renderer.render_frame()).unwrap();
    assert_eq!(pixel(&frame, 100, 100), [0, 0, 0, 255]);
}

#[test]
fn circle_outline_is_stroked_with_line_color() {
    let mut backend = opaque_black_backend();
    let renderer = WaveRenderer::new(200, 200);

    let frame = backend.render_scene(&renderer.scene()).unwrap();
    // Top of the circle: the 10-unit stroke straddles y == 0, and the clip
    // keeps its inner half visible.
    assert_eq!(pixel(&frame, 100, 2), [0x29, 0x29, 0x29, 255]);
}

#[test]
fn options_from_json_change_the_rendered_fill() {
    let opts = WaveOptions::from_json_str(
        r##"{"flowing_color": "#ff0000", "progress": 100.0}"##,
    )
    .unwrap();
    let mut renderer = WaveRenderer::with_options(200, 200, &opts);
    let mut backend = opaque_black_backend();

    let frame = backend.render_scene(&renderer.render_frame()).unwrap();
    assert_eq!(pixel(&frame, 100, 100), [0xff, 0, 0, 255]);
}

#[test]
fn scrolling_changes_the_frame_while_state_stays_in_range() {
    let mut backend = opaque_black_backend();
    let mut renderer = WaveRenderer::new(128, 128);
    renderer.set_progress(50.0);
    renderer.set_speed(16);

    let frames = render_frames(&mut renderer, &mut backend, 4).unwrap();
    assert_eq!(frames.len(), 4);

    let digests: Vec<u64> = frames.iter().map(|f| digest_u64(&f.data)).collect();
    assert!(
        digests.windows(2).any(|w| w[0] != w[1]),
        "scrolling wave should alter pixels between frames"
    );
    assert!((-128..=0).contains(&renderer.state().phase_x));
}
