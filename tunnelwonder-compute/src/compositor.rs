//! Depth layer compositing.
//!
//! A pixel's ray crosses a stack of evenly spaced planes ahead of the camera.
//! Each plane carries its own folded, rotated copy of the Truchet pattern. The
//! planes are visited from near to far and every new layer is blended *under*
//! what has already been accumulated, which is the same as compositing far to
//! near with the nearer layer on top.
//!
//! All geometry is local to the frame's base layer. Plane `i` sits
//! `i * spacing` past the base layer and the camera sits `layer_offset` past
//! it, so intersection distances never depend on how far the tunnel has run.

use crate::hash::LayerHashes;
use crate::math::{mix, mix3, rotate, smoothstep, tanh_approx};
use crate::path::{CameraFrame, PathGenerator};
use crate::pattern::{self, PatternSample};
use crate::ray::Ray;
use crate::symmetry::{fold, smoothing_for};
use glam::{Vec2, Vec3, Vec4, Vec4Swizzles};
use std::f32::consts::TAU;
use tunnelwonder_core::{FramePhases, KernelConfig, ParameterSnapshot, KERNEL_CONFIG};

/// Blend `front` over `back`, both with straight (non-premultiplied) alpha.
///
/// Not commutative: swapping the arguments changes the result whenever the
/// front layer is partially transparent.
pub fn alpha_blend(back: Vec4, front: Vec4) -> Vec4 {
    let alpha = front.w + back.w * (1.0 - front.w);
    if alpha <= 0.0 {
        return Vec4::ZERO;
    }
    let rgb = (front.xyz() * front.w + back.xyz() * back.w * (1.0 - front.w)) / alpha;
    rgb.extend(alpha)
}

/// Everything computed for one (pixel, layer) pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerSample {
    /// Absolute index of the layer along the tunnel.
    pub layer: f64,
    /// Distance from the camera to the plane along the tunnel axis.
    pub depth: f32,
    /// Plane coordinates relative to the path, before any rotation.
    pub plane: Vec2,
    /// Plane coordinates after the kaleidoscope fold.
    pub folded: Vec2,
    /// Mirror cell the fold mapped the point out of.
    pub segment: i32,
    pub pattern: PatternSample,
    pub color: Vec3,
    pub alpha: f32,
}

/// Per-frame compositing context. Borrowed by every pixel of the frame.
#[derive(Clone, Copy, Debug)]
pub struct LayerCompositor<'a> {
    snapshot: &'a ParameterSnapshot,
    phases: FramePhases,
    path: PathGenerator,
    camera: CameraFrame,
    config: &'static KernelConfig,
    zoom: f32,
    smoothing: f32,
}

impl<'a> LayerCompositor<'a> {
    pub fn new(snapshot: &'a ParameterSnapshot, phases: FramePhases) -> Self {
        let path = PathGenerator::from_snapshot(snapshot).with_origin(phases.origin());
        let camera = path.camera_frame(phases.layer_offset);
        Self::with_camera(snapshot, phases, path, camera)
    }

    /// Use an explicit camera. `path` and `camera` must be local to
    /// `phases.origin()`.
    pub fn with_camera(
        snapshot: &'a ParameterSnapshot,
        phases: FramePhases,
        path: PathGenerator,
        camera: CameraFrame,
    ) -> Self {
        let config = &KERNEL_CONFIG;
        Self {
            snapshot,
            phases,
            path,
            camera,
            config,
            zoom: guard_zoom(snapshot.zoom_level, config.min_zoom),
            smoothing: smoothing_for(snapshot.kaleidoscope_segments),
        }
    }

    pub fn camera(&self) -> &CameraFrame {
        &self.camera
    }

    /// Background seen where no layer is opaque: a bright spot straight ahead.
    pub fn sky(&self, direction: Vec3) -> Vec3 {
        Vec3::splat(
            direction
                .dot(self.camera.forward)
                .max(0.0)
                .powf(self.config.sky_exponent),
        )
    }

    /// Intersect `ray` with the plane `ahead` layers past the base layer and
    /// shade it.
    ///
    /// Returns `None` when the plane is behind the camera or the ray runs
    /// parallel to it.
    pub fn sample_layer(&self, ray: &Ray, ahead: i32) -> Option<LayerSample> {
        let spacing = self.config.layer_spacing;
        if ray.direction.z.abs() < f32::EPSILON {
            return None;
        }
        let plane_z = spacing * ahead as f32;
        let t = (plane_z - ray.origin.z) / ray.direction.z;
        if t <= 0.0 || !t.is_finite() {
            return None;
        }

        let hit = ray.at(t);
        let neighbor_hit = ray.neighbor_at(t);
        let aa = 3.0 * (hit - neighbor_hit).length();
        let distance = (hit - ray.origin).length();

        let layer = self.phases.base_layer + ahead as f64;
        let hashes = LayerHashes::for_layer(layer);
        let plane = (hit - self.path.position(hit.z)).truncate();

        let spun = rotate(plane, self.phases.plane_rotation * hashes.spin);
        let (folded, segment) = fold(spun, self.snapshot.kaleidoscope_segments, self.smoothing);
        let turned = rotate(folded, TAU * hashes.angle + self.phases.rotation);
        let pattern_point = turned / self.zoom + 0.5 + (hashes.cell_offset * 1000.0).floor();
        let pattern = pattern::evaluate(self.snapshot.truchet_radius, pattern_point);

        let (color, alpha) = self.shade(&pattern, plane, distance, aa);

        Some(LayerSample {
            layer,
            depth: hit.z - ray.origin.z,
            plane,
            folded,
            segment,
            pattern,
            color,
            alpha,
        })
    }

    /// Turn pattern distances into a layer color and alpha.
    fn shade(&self, pattern: &PatternSample, plane: Vec2, distance: f32, aa: f32) -> (Vec3, f32) {
        let scale = self.zoom.abs();
        let lw = self.config.line_width * scale;
        let d = pattern.distance * scale - lw;
        let circle = pattern.circle_distance * scale;

        let stroke = smoothstep(aa, -aa, d);
        let mut color = mix3(Vec3::ONE, Vec3::ZERO, stroke);

        // Fine lines fade in with distance so nearby layers stay clean
        let attenuation = tanh_approx(0.33 * distance);
        let ripple = (self.config.fine_line_frequency * d).sin();
        let lines = smoothstep(mix(1.0, -0.5, attenuation), 1.0, ripple);
        color = mix3(color, Vec3::ZERO, (lines * self.snapshot.contrast).clamp(0.0, 1.0));

        let mut alpha = smoothstep(aa, -aa, -circle - 3.0 * lw)
            * mix(0.5, 1.0, smoothstep(aa, -aa, -circle - lw));

        let fill_radius = self.snapshot.center_fill_radius;
        if fill_radius > 0.0 {
            let fill = smoothstep(aa, -aa, plane.length() - fill_radius);
            color = mix3(color, Vec3::ZERO, fill);
            alpha = mix(alpha, self.config.center_fill_alpha, fill);
        }

        (color, alpha)
    }

    /// Composite every layer in front of the camera for one ray, then
    /// blend the result over the sky.
    pub fn render_pixel(&self, ray: &Ray) -> Vec3 {
        let layer_count = i32::try_from(self.snapshot.layer_count).unwrap_or(i32::MAX);
        let samples = (1..=layer_count).filter_map(|i| self.sample_layer(ray, i));
        self.composite(self.sky(ray.direction), samples)
    }

    /// Blend `samples`, ordered near to far, under each other and over `sky`.
    ///
    /// Stops pulling samples once the accumulated alpha passes the cutoff.
    pub fn composite<I>(&self, sky: Vec3, samples: I) -> Vec3
    where
        I: IntoIterator<Item = LayerSample>,
    {
        let mut accumulated = Vec4::ZERO;
        for sample in samples {
            accumulated = alpha_blend(self.faded(&sample, sky), accumulated);
            if accumulated.w > self.config.alpha_cutoff {
                break;
            }
        }
        mix3(sky, accumulated.xyz(), accumulated.w)
    }

    /// Straight-alpha RGBA of one sample after the depth fades: color sinks
    /// into the sky toward the far end and alpha drops to zero at the camera.
    pub fn faded(&self, sample: &LayerSample, sky: Vec3) -> Vec4 {
        let config = self.config;
        let layer_count = self.snapshot.layer_count;
        let fade_in = smoothstep(
            config.far_fade_end(layer_count),
            config.far_fade_start(layer_count),
            sample.depth,
        );
        let fade_out = smoothstep(0.0, config.near_fade_distance(), sample.depth);
        mix3(sky, sample.color, fade_in)
            .extend(sample.alpha * fade_out)
            .clamp(Vec4::ZERO, Vec4::ONE)
    }
}

/// Keep `|zoom|` away from zero without flipping its sign.
fn guard_zoom(zoom: f32, min_zoom: f32) -> f32 {
    if !zoom.is_finite() {
        return 1.0;
    }
    if zoom.abs() < min_zoom {
        if zoom < 0.0 {
            -min_zoom
        } else {
            min_zoom
        }
    } else {
        zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ray::pixel_step;

    const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    const BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    fn straight_snapshot() -> ParameterSnapshot {
        ParameterSnapshot {
            zoom_level: 0.3,
            kaleidoscope_segments: 10.0,
            truchet_radius: 0.35,
            path_stability: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn alpha_blend_is_order_sensitive() {
        let red = RED.extend(0.5);
        let blue = BLUE.extend(1.0);

        let red_over_blue = alpha_blend(blue, red);
        let blue_over_red = alpha_blend(red, blue);

        assert!((red_over_blue - Vec4::new(0.5, 0.0, 0.5, 1.0)).length() < 1e-6);
        assert!((blue_over_red - Vec4::new(0.0, 0.0, 1.0, 1.0)).length() < 1e-6);
        assert_ne!(red_over_blue, blue_over_red);
    }

    fn base_sample(compositor: &LayerCompositor<'_>) -> LayerSample {
        let ray = Ray::new(compositor.camera(), Vec2::new(0.2, 0.1), pixel_step((64, 64)));
        compositor.sample_layer(&ray, 2).expect("layer ahead")
    }

    #[test]
    fn nearer_layer_is_composited_over_farther_layer() {
        let snapshot = straight_snapshot();
        let compositor = LayerCompositor::new(&snapshot, FramePhases::default());
        let base = base_sample(&compositor);
        let near = LayerSample {
            depth: 0.5,
            color: RED,
            alpha: 0.75,
            ..base
        };
        let far = LayerSample {
            depth: 1.0,
            color: BLUE,
            alpha: 1.0,
            ..base
        };

        let color = compositor.composite(Vec3::splat(0.2), [near, far]);
        assert!((color - Vec3::new(0.75, 0.0, 0.25)).length() < 1e-5, "{color:?}");
    }

    #[test]
    fn render_pixel_composites_sampled_layers_near_to_far() {
        let snapshot = ParameterSnapshot::default();
        let compositor = LayerCompositor::new(&snapshot, FramePhases::at_depth(7.3));
        let ray = Ray::new(compositor.camera(), Vec2::new(-0.4, 0.25), pixel_step((64, 64)));

        let samples: Vec<LayerSample> = (1..=snapshot.layer_count as i32)
            .filter_map(|i| compositor.sample_layer(&ray, i))
            .collect();
        assert_eq!(samples.len(), snapshot.layer_count as usize);
        assert!(samples.windows(2).all(|w| w[0].depth < w[1].depth));

        let expected = compositor.composite(compositor.sky(ray.direction), samples);
        assert_eq!(compositor.render_pixel(&ray), expected);
    }

    #[test]
    fn layer_at_far_fade_end_shows_sky() {
        let snapshot = straight_snapshot();
        let compositor = LayerCompositor::new(&snapshot, FramePhases::default());
        let sky = Vec3::new(0.1, 0.3, 0.6);
        let last = LayerSample {
            depth: KERNEL_CONFIG.far_fade_end(snapshot.layer_count),
            color: RED,
            alpha: 1.0,
            ..base_sample(&compositor)
        };
        assert!((compositor.composite(sky, [last]) - sky).length() < 1e-6);

        let unfaded = LayerSample {
            depth: KERNEL_CONFIG.far_fade_start(snapshot.layer_count),
            ..last
        };
        assert!((compositor.composite(sky, [unfaded]) - RED).length() < 1e-6);
    }

    #[test]
    fn layer_touching_the_camera_is_transparent() {
        let snapshot = straight_snapshot();
        let compositor = LayerCompositor::new(&snapshot, FramePhases::default());
        let sky = Vec3::splat(0.5);
        let near_fade = KERNEL_CONFIG.near_fade_distance();
        let touching = LayerSample {
            depth: near_fade * 0.01,
            color: RED,
            alpha: 1.0,
            ..base_sample(&compositor)
        };
        assert!(compositor.faded(&touching, sky).w < 1e-3);
        assert!((compositor.composite(sky, [touching]) - sky).length() < 1e-2);

        let clear = LayerSample {
            depth: near_fade * 2.0,
            ..touching
        };
        assert_eq!(compositor.faded(&clear, sky).w, 1.0);
    }

    #[test]
    fn opaque_layer_hides_everything_behind_it() {
        let snapshot = straight_snapshot();
        let compositor = LayerCompositor::new(&snapshot, FramePhases::default());
        let base = base_sample(&compositor);
        let front = LayerSample {
            depth: 0.4,
            color: BLUE,
            alpha: 1.0,
            ..base
        };
        let hidden = LayerSample {
            depth: 0.6,
            color: RED,
            alpha: 1.0,
            ..base
        };
        let color = compositor.composite(Vec3::ONE, [front, hidden]);
        assert!((color - BLUE).length() < 1e-6);
    }

    #[test]
    fn layer_depths_do_not_drift_deep_in_the_tunnel() {
        let snapshot = straight_snapshot();
        let spacing = KERNEL_CONFIG.layer_spacing;
        let depths_at = |depth: f64| -> Vec<f32> {
            let phases = FramePhases::at_depth(depth);
            let compositor = LayerCompositor::new(&snapshot, phases);
            let ray = Ray::new(compositor.camera(), Vec2::new(0.3, -0.2), pixel_step((64, 64)));
            (2..=9)
                .map(|i| {
                    let sample = compositor.sample_layer(&ray, i).expect("layer ahead");
                    sample.depth + phases.layer_offset
                })
                .collect()
        };

        let shallow = depths_at(2.0);
        for depth in [1e5, 1e6, 3e6, 1e7] {
            let deep = depths_at(depth);
            for (i, (a, b)) in shallow.iter().zip(&deep).enumerate() {
                let expected = spacing * (i + 2) as f32;
                assert!((a - b).abs() < 1e-5, "depth {depth}, plane {i}: {a} vs {b}");
                assert!((b - expected).abs() < 1e-5, "depth {depth}: {b} vs {expected}");
            }
        }
    }

    #[test]
    fn deep_layers_get_their_own_hashes() {
        let snapshot = straight_snapshot();
        let phases = FramePhases::at_depth(1e7);
        let compositor = LayerCompositor::new(&snapshot, phases);
        let ray = Ray::new(compositor.camera(), Vec2::new(0.3, -0.2), pixel_step((64, 64)));
        let a = compositor.sample_layer(&ray, 2).expect("layer ahead");
        let b = compositor.sample_layer(&ray, 3).expect("layer ahead");
        assert_eq!(a.layer, phases.base_layer + 2.0);
        assert_eq!(b.layer - a.layer, 1.0);
    }

    #[test]
    fn alpha_blend_of_transparent_layers_is_transparent() {
        assert_eq!(alpha_blend(Vec4::ZERO, Vec4::ZERO), Vec4::ZERO);
        let front = RED.extend(0.25);
        assert_eq!(alpha_blend(Vec4::ZERO, front), front);
    }

    #[test]
    fn guard_zoom_keeps_sign() {
        assert_eq!(guard_zoom(0.0, 1e-4), 1e-4);
        assert_eq!(guard_zoom(-1e-6, 1e-4), -1e-4);
        assert_eq!(guard_zoom(-0.5, 1e-4), -0.5);
        assert_eq!(guard_zoom(f32::NAN, 1e-4), 1.0);
    }

    #[test]
    fn screen_center_folds_to_zero_angle() {
        let snapshot = straight_snapshot();
        let compositor = LayerCompositor::new(&snapshot, FramePhases::at_depth(3.7));
        let ray = Ray::new(compositor.camera(), Vec2::ZERO, pixel_step((101, 101)));

        for i in 1..=4 {
            let sample = compositor
                .sample_layer(&ray, i)
                .expect("layer ahead of camera");
            assert_eq!(sample.plane, Vec2::ZERO);
            assert_eq!(sample.folded, Vec2::ZERO);
            assert_eq!(sample.folded.y.atan2(sample.folded.x), 0.0);
            assert_eq!(sample.segment, 0);
        }
    }

    #[test]
    fn layers_behind_camera_are_skipped() {
        let snapshot = straight_snapshot();
        let compositor = LayerCompositor::new(&snapshot, FramePhases::at_depth(5.0));
        let ray = Ray::new(compositor.camera(), Vec2::new(0.3, -0.2), pixel_step((64, 64)));

        assert!(compositor.sample_layer(&ray, -3).is_none());
        assert!(compositor.sample_layer(&ray, 0).is_none());
        assert!(compositor.sample_layer(&ray, 3).is_some());
    }

    #[test]
    fn ray_parallel_to_layers_hits_nothing() {
        let snapshot = straight_snapshot();
        let compositor = LayerCompositor::new(&snapshot, FramePhases::default());
        let ray = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::X,
            neighbor: Vec3::X,
        };
        assert!(compositor.sample_layer(&ray, 3).is_none());
        let color = compositor.render_pixel(&ray);
        assert!(color.is_finite());
    }

    #[test]
    fn layer_alpha_and_color_stay_in_range() {
        let snapshot = ParameterSnapshot {
            center_fill_radius: 0.2,
            contrast: 3.0,
            ..Default::default()
        };
        let compositor = LayerCompositor::new(&snapshot, FramePhases::default());
        for i in 0..40 {
            let screen = Vec2::new(i as f32 * 0.07 - 1.4, 0.9 - i as f32 * 0.05);
            let ray = Ray::new(compositor.camera(), screen, pixel_step((320, 200)));
            for layer in 1..8 {
                if let Some(sample) = compositor.sample_layer(&ray, layer) {
                    assert!((0.0..=1.0).contains(&sample.alpha));
                    assert!(sample.color.cmpge(Vec3::ZERO).all());
                    assert!(sample.color.cmple(Vec3::ONE).all());
                }
            }
        }
    }

    #[test]
    fn center_fill_covers_the_tunnel_axis() {
        let snapshot = ParameterSnapshot {
            center_fill_radius: 0.5,
            ..straight_snapshot()
        };
        let compositor = LayerCompositor::new(&snapshot, FramePhases::default());
        let ray = Ray::new(compositor.camera(), Vec2::ZERO, pixel_step((101, 101)));
        let sample = compositor.sample_layer(&ray, 2).expect("layer ahead");
        assert_eq!(sample.color, Vec3::ZERO);
        assert!((sample.alpha - KERNEL_CONFIG.center_fill_alpha).abs() < 1e-6);
    }

    #[test]
    fn sky_is_brightest_straight_ahead() {
        let snapshot = straight_snapshot();
        let compositor = LayerCompositor::new(&snapshot, FramePhases::default());
        let ahead = compositor.sky(compositor.camera().forward);
        let aside = compositor.sky(compositor.camera().right);
        assert!((ahead - Vec3::ONE).length() < 1e-5);
        assert_eq!(aside, Vec3::ZERO);
    }

    #[test]
    fn render_pixel_is_finite_for_degenerate_zoom() {
        for zoom in [0.0, -0.0, 1e-9, -0.3, 50.0] {
            let snapshot = ParameterSnapshot {
                zoom_level: zoom,
                ..Default::default()
            };
            let compositor = LayerCompositor::new(&snapshot, FramePhases::default());
            let ray = Ray::new(compositor.camera(), Vec2::new(0.4, 0.1), pixel_step((64, 64)));
            let color = compositor.render_pixel(&ray);
            assert!(color.is_finite(), "zoom {zoom} produced {color:?}");
        }
    }
}
