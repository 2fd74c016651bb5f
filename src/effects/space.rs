//! # Space
//!
//! A twinkling starfield with the occasional meteor.
//!
//! Stars live on a jittered grid: each cell holds at most one star, present
//! when the cell's hash falls under `density`. A fragment looks at its own
//! cell and the eight around it, so a star's glow crosses cell borders
//! without seams.
//!
//! Time is split into epochs of `meteor_interval` seconds. Each epoch hashes
//! to one meteor: a start time, a duration and a chord across the circle
//! that circumscribes the screen. The chord is clipped to the screen and the
//! meteor head travels along the clipped part, trailing a fading tail. The
//! head carries its own round glow, wider than the tail.
//!
//! ## Formula
//!
//! ```text
//! star    = (core(d) + glow·halo(d)) · (0.65 + 0.35·sin(t·twinkle·s + φ))
//! core(d) = smoothstep(size, 0, d),  halo(d) = (size/(d + size))²·smoothstep(1, 0.5, d)
//! tail    = smoothstep(3w, 0, dist(p, tail..head)) · h
//! meteor  = max(tail, smoothstep(8w, 0, |p − head|)) · sin(π·progress)
//! ```

use std::f32::consts::{PI, TAU};
use std::fmt;

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::shader::{
    HashKey, NEIGHBOURS, Rect, Rgba, clip_segment, dist_to_segment, grid_cell, hash11, hash2d,
    mix, smoothstep,
};
use crate::uniforms::Uniforms;

use super::{Effect, ParamSpec, format_vec3, parse_f32, parse_vec3};

/// Parameters for the space effect.
#[derive(Debug, Clone)]
pub struct Params {
    /// Time multiplier. Default: 1.0
    pub speed: f32,
    /// Fraction of grid cells holding a star. Default: 0.12
    pub density: f32,
    /// Grid cell size in screen heights. Default: 0.05
    pub cell_size: f32,
    /// Star core radius, in cells. Default: 0.08
    pub star_size: f32,
    /// Halo strength around each star. Default: 0.35
    pub glow: f32,
    /// Twinkle rate. Default: 2.0
    pub twinkle_speed: f32,
    /// Seconds per meteor epoch. Default: 8.0
    pub meteor_interval: f32,
    /// Meteor tail length in screen heights. Default: 0.25
    pub meteor_length: f32,
    /// Meteor half width in screen heights. Default: 0.003
    pub meteor_width: f32,
    /// Meteor brightness, 0 disables meteors. Default: 1.0
    pub meteor_brightness: f32,
    /// Sky at the top. Default: (0.01, 0.01, 0.04)
    pub sky_top: Vec3,
    /// Sky at the bottom. Default: (0.03, 0.02, 0.08)
    pub sky_bottom: Vec3,
    /// Star colors, picked per star.
    pub star_colors: [Vec3; 3],
}

impl Default for Params {
    fn default() -> Self {
        Self {
            speed: 1.0,
            density: 0.12,
            cell_size: 0.05,
            star_size: 0.08,
            glow: 0.35,
            twinkle_speed: 2.0,
            meteor_interval: 8.0,
            meteor_length: 0.25,
            meteor_width: 0.003,
            meteor_brightness: 1.0,
            sky_top: Vec3::new(0.01, 0.01, 0.04),
            sky_bottom: Vec3::new(0.03, 0.02, 0.08),
            star_colors: [
                Vec3::new(1.0, 0.95, 0.85),
                Vec3::new(0.75, 0.85, 1.0),
                Vec3::new(1.0, 0.8, 0.65),
            ],
        }
    }
}

impl Params {
    /// Generate randomized parameters.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self {
            speed: rng.random_range(0.6..1.4),
            density: rng.random_range(0.06..0.2),
            cell_size: rng.random_range(0.035..0.07),
            glow: rng.random_range(0.2..0.5),
            twinkle_speed: rng.random_range(1.0..3.5),
            meteor_interval: rng.random_range(5.0..12.0),
            ..Self::default()
        }
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "speed={:.2} density={:.2} cell={:.3} twinkle={:.2} meteor_interval={:.1}",
            self.speed, self.density, self.cell_size, self.twinkle_speed, self.meteor_interval
        )
    }
}

/// A star in one grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Star {
    /// Position in screen heights.
    center: Vec2,
    phase: f32,
    rate: f32,
    color: usize,
}

/// The star in `cell`, if the cell has one.
fn star_in(cell: Vec2, params: &Params) -> Option<Star> {
    if hash11(cell.x * 12.9898 + cell.y * 78.233) >= params.density {
        return None;
    }
    let h = hash2d(cell, HashKey::STARS) * 0.5 + Vec2::splat(0.5);
    let jitter = (h - Vec2::splat(0.5)) * 0.7;
    Some(Star {
        center: (cell + Vec2::splat(0.5) + jitter) * params.cell_size,
        phase: h.x * TAU,
        rate: 0.5 + h.y,
        color: ((h.y * 3.0) as usize).min(2),
    })
}

fn starfield(p: Vec2, t: f32, params: &Params) -> Vec3 {
    let cell = grid_cell(p, params.cell_size);
    let mut color = Vec3::ZERO;

    for offset in NEIGHBOURS {
        let Some(star) = star_in(cell + offset, params) else {
            continue;
        };
        let d = p.distance(star.center) / params.cell_size;
        let core = smoothstep(params.star_size, 0.0, d);
        let halo = (params.star_size / (d + params.star_size)).powi(2) * smoothstep(1.0, 0.5, d);
        let twinkle = 0.65 + 0.35 * (t * params.twinkle_speed * star.rate + star.phase).sin();
        color += params.star_colors[star.color] * ((core + params.glow * halo) * twinkle);
    }

    color
}

/// One epoch's meteor, in screen-height units.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Meteor {
    /// Entry point on screen.
    from: Vec2,
    /// Exit point on screen.
    to: Vec2,
    /// Seconds into the epoch when the meteor appears.
    start: f32,
    duration: f32,
}

/// The meteor of `epoch`, or `None` when its chord misses the screen.
fn meteor_for_epoch(epoch: f32, aspect: f32, interval: f32) -> Option<Meteor> {
    let start = hash11(epoch * 7.31 + 1.7) * interval * 0.5;
    let duration = (0.6 + 0.8 * hash11(epoch * 3.17 + 4.1)).min(interval * 0.5);

    let center = Vec2::new(0.5 * aspect, 0.5);
    let radius = 0.5 * (aspect * aspect + 1.0).sqrt();
    let a1 = hash11(epoch * 5.1 + 2.3) * TAU;
    let a2 = a1 + PI * (0.5 + 0.5 * hash11(epoch * 9.7 + 0.7));
    let a = center + radius * Vec2::new(a1.cos(), a1.sin());
    let b = center + radius * Vec2::new(a2.cos(), a2.sin());

    let screen = Rect::new(Vec2::ZERO, Vec2::new(aspect, 1.0));
    let (t0, t1) = clip_segment(a, b, &screen)?;
    if t1 - t0 <= 1e-4 {
        return None;
    }

    Some(Meteor {
        from: a + (b - a) * t0,
        to: a + (b - a) * t1,
        start,
        duration,
    })
}

fn meteor(p: Vec2, t: f32, aspect: f32, params: &Params) -> f32 {
    if params.meteor_brightness <= 0.0 || params.meteor_interval <= 0.0 {
        return 0.0;
    }
    let epoch = (t / params.meteor_interval).floor();
    let local = t - epoch * params.meteor_interval;

    let Some(m) = meteor_for_epoch(epoch, aspect, params.meteor_interval) else {
        return 0.0;
    };
    if local < m.start || local > m.start + m.duration {
        return 0.0;
    }

    let progress = (local - m.start) / m.duration;
    let path = m.to - m.from;
    let head = m.from + path * progress;
    // Tail never reaches back past the entry point
    let tail_len = params.meteor_length.min(path.length() * progress);
    let tail = head - path.normalize_or_zero() * tail_len;

    let (dist, h) = dist_to_segment(p, tail, head);
    let width = params.meteor_width.max(1e-4);
    let trail = smoothstep(width * 3.0, 0.0, dist) * h;
    let spark = smoothstep(width * 8.0, 0.0, p.distance(head));
    let envelope = (PI * progress).sin();

    trail.max(spark) * envelope * params.meteor_brightness
}

/// Compute the space color at a fragment.
pub fn shade(uniforms: &Uniforms, frag: Vec2, params: &Params) -> Rgba {
    let t = uniforms.time * params.speed;
    let res = uniforms.resolution.as_vec2();
    let p = frag / res.y;
    let aspect = uniforms.resolution.aspect();

    let mut color = mix(params.sky_bottom, params.sky_top, (frag.y / res.y).clamp(0.0, 1.0));
    if params.density > 0.0 && params.cell_size > 0.0 {
        color += starfield(p, t, params);
    }
    color += Vec3::splat(meteor(p, t, aspect, params));

    Rgba::from_vec3(color)
}

/// Space effect.
#[derive(Debug, Clone)]
pub struct Space {
    params: Params,
}

impl Default for Space {
    fn default() -> Self {
        Self::golden()
    }
}

impl Space {
    pub fn golden() -> Self {
        Self { params: Params::default() }
    }

    pub fn random() -> Self {
        Self { params: Params::random() }
    }
}

impl Effect for Space {
    fn name(&self) -> &'static str {
        "space"
    }

    fn evaluate(&self, uniforms: &Uniforms, frag: Vec2) -> Rgba {
        shade(uniforms, frag, &self.params)
    }

    fn params_description(&self) -> String {
        self.params.to_string()
    }

    fn set_param(&mut self, name: &str, value: &str) -> Result<(), String> {
        match name {
            "speed" => self.params.speed = parse_f32(value)?,
            "density" => self.params.density = parse_f32(value)?.clamp(0.0, 1.0),
            "cell_size" => self.params.cell_size = parse_f32(value)?.max(0.005),
            "star_size" => self.params.star_size = parse_f32(value)?.clamp(0.01, 0.5),
            "glow" => self.params.glow = parse_f32(value)?.max(0.0),
            "twinkle_speed" => self.params.twinkle_speed = parse_f32(value)?,
            "meteor_interval" => self.params.meteor_interval = parse_f32(value)?.max(1.0),
            "meteor_length" => self.params.meteor_length = parse_f32(value)?.max(0.0),
            "meteor_width" => self.params.meteor_width = parse_f32(value)?.max(1e-4),
            "meteor_brightness" => self.params.meteor_brightness = parse_f32(value)?.max(0.0),
            "sky_top" => self.params.sky_top = parse_vec3(value)?,
            "sky_bottom" => self.params.sky_bottom = parse_vec3(value)?,
            _ => return Err(format!("Unknown param '{}' for space", name)),
        }
        Ok(())
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("speed", format!("{:.2}", self.params.speed)),
            ("density", format!("{:.3}", self.params.density)),
            ("cell_size", format!("{:.3}", self.params.cell_size)),
            ("star_size", format!("{:.3}", self.params.star_size)),
            ("glow", format!("{:.2}", self.params.glow)),
            ("twinkle_speed", format!("{:.2}", self.params.twinkle_speed)),
            ("meteor_interval", format!("{:.1}", self.params.meteor_interval)),
            ("meteor_length", format!("{:.3}", self.params.meteor_length)),
            ("meteor_width", format!("{:.4}", self.params.meteor_width)),
            ("meteor_brightness", format!("{:.2}", self.params.meteor_brightness)),
            ("sky_top", format_vec3(self.params.sky_top)),
            ("sky_bottom", format_vec3(self.params.sky_bottom)),
        ]
    }

    fn param_specs(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::slider("speed", "Speed", 0.1, 2.0, 0.05)
                .with_description("Animation speed"),
            ParamSpec::slider("density", "Star Density", 0.0, 0.5, 0.01)
                .with_description("Fraction of grid cells with a star"),
            ParamSpec::slider("cell_size", "Star Spacing", 0.02, 0.15, 0.005),
            ParamSpec::slider("star_size", "Star Size", 0.01, 0.5, 0.01),
            ParamSpec::slider("glow", "Glow", 0.0, 1.0, 0.05),
            ParamSpec::slider("twinkle_speed", "Twinkle", 0.0, 6.0, 0.1),
            ParamSpec::slider("meteor_interval", "Meteor Interval", 1.0, 30.0, 0.5)
                .with_description("Seconds between meteors"),
            ParamSpec::slider("meteor_length", "Meteor Length", 0.0, 0.6, 0.01),
            ParamSpec::slider("meteor_width", "Meteor Width", 0.0005, 0.01, 0.0005),
            ParamSpec::slider("meteor_brightness", "Meteor Brightness", 0.0, 2.0, 0.05)
                .with_description("0 disables meteors"),
            ParamSpec::color("sky_top", "Sky Top"),
            ParamSpec::color("sky_bottom", "Sky Bottom"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uniforms::Resolution;

    #[test]
    fn test_empty_sky_is_gradient() {
        let params = Params {
            density: 0.0,
            meteor_brightness: 0.0,
            ..Params::default()
        };
        let u = Uniforms::new(3.0, Resolution::new(300.0, 200.0));
        let top = shade(&u, Vec2::new(150.0, 200.0), &params);
        let bottom = shade(&u, Vec2::new(150.0, 0.0), &params);
        assert!((top.rgb() - params.sky_top).length() < 1e-6);
        assert!((bottom.rgb() - params.sky_bottom).length() < 1e-6);
    }

    #[test]
    fn test_star_center_is_bright() {
        let params = Params {
            density: 1.0,
            meteor_brightness: 0.0,
            ..Params::default()
        };
        let star = star_in(Vec2::new(6.0, 8.0), &params).unwrap();
        let res = Resolution::new(400.0, 400.0);
        let frag = star.center * res.height;
        let c = shade(&Uniforms::new(0.0, res), frag, &params);
        assert!(c.rgb().max_element() > 0.25, "{:?}", c);
    }

    #[test]
    fn test_density_zero_has_no_stars() {
        let params = Params {
            density: 0.0,
            ..Params::default()
        };
        for i in 0..20 {
            assert!(star_in(Vec2::new(i as f32, 3.0), &params).is_none());
        }
    }

    #[test]
    fn test_meteor_stays_on_screen() {
        let aspect = 16.0 / 9.0;
        let mut seen = 0;
        for epoch in 0..50 {
            if let Some(m) = meteor_for_epoch(epoch as f32, aspect, 8.0) {
                seen += 1;
                let screen = Rect::new(Vec2::splat(-1e-3), Vec2::new(aspect, 1.0) + 1e-3);
                assert!(screen.contains(m.from), "epoch {} from {:?}", epoch, m.from);
                assert!(screen.contains(m.to), "epoch {} to {:?}", epoch, m.to);
                assert!(m.start >= 0.0 && m.start + m.duration <= 8.0);
            }
        }
        assert!(seen > 0);
    }

    #[test]
    fn test_meteor_is_deterministic() {
        assert_eq!(meteor_for_epoch(3.0, 1.5, 8.0), meteor_for_epoch(3.0, 1.5, 8.0));
    }

    #[test]
    fn test_meteor_head_is_lit() {
        let params = Params::default();
        let aspect = 1.5;
        let epoch = (0..50)
            .map(|e| e as f32)
            .find(|&e| meteor_for_epoch(e, aspect, params.meteor_interval).is_some())
            .unwrap();
        let m = meteor_for_epoch(epoch, aspect, params.meteor_interval).unwrap();
        // Halfway through: envelope is 1 and the head sits mid-path
        let t = epoch * params.meteor_interval + m.start + 0.5 * m.duration;
        let head = m.from + (m.to - m.from) * 0.5;
        assert!(meteor(head, t, aspect, &params) > 0.9);
    }

    #[test]
    fn test_meteor_head_glows_wider_than_tail() {
        let params = Params::default();
        let aspect = 1.5;
        let (epoch, m) = (0..50)
            .filter_map(|e| {
                let e = e as f32;
                meteor_for_epoch(e, aspect, params.meteor_interval).map(|m| (e, m))
            })
            .find(|(_, m)| (m.to - m.from).length() > 0.5)
            .unwrap();
        let t = epoch * params.meteor_interval + m.start + 0.5 * m.duration;
        let dir = (m.to - m.from).normalize();
        let side = Vec2::new(-dir.y, dir.x) * (5.0 * params.meteor_width);
        let head = m.from + (m.to - m.from) * 0.5;

        // Outside the tail's 3w band, but inside the head's 8w glow
        assert!(meteor(head + side, t, aspect, &params) > 0.2);
        // Same offset beside the middle of the tail stays dark
        let mid_tail = head - dir * (0.5 * params.meteor_length);
        assert_eq!(meteor(mid_tail + side, t, aspect, &params), 0.0);
    }
}
