//! Intensity and tone adjustment functions.

use glam::Vec3;

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Fractional part with GLSL semantics: `x - floor(x)`.
///
/// Unlike [`f32::fract`], the result is always in [0, 1), also for negative input.
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Component-wise [`fract`].
#[inline]
pub fn fract_vec3(v: Vec3) -> Vec3 {
    v - v.floor()
}

/// Gamma applied per channel.
///
/// - gamma < 1: Lightens midtones
/// - gamma > 1: Darkens midtones
///
/// Negative channels are clamped to 0 first so the power never produces NaN.
#[inline]
pub fn gamma_vec3(color: Vec3, gamma: f32) -> Vec3 {
    color.max(Vec3::ZERO).powf(gamma)
}

/// Exponential tonemap: `1 - exp(-x)`.
///
/// Maps [0, inf) into [0, 1) with a soft shoulder.
#[inline]
pub fn tonemap_exp(x: f32) -> f32 {
    1.0 - (-x).exp()
}

/// Component-wise [`tonemap_exp`].
#[inline]
pub fn tonemap_exp_vec3(v: Vec3) -> Vec3 {
    Vec3::new(tonemap_exp(v.x), tonemap_exp(v.y), tonemap_exp(v.z))
}

/// Rational approximation of `tanh`, exact at 0 and saturating at ±1.
///
/// `x(27 + x²) / (27 + 9x²)`, clamped to [-1, 1]. The curve reaches 1 at
/// `x = 3` and is held there.
#[inline]
pub fn tanh_approx(x: f32) -> f32 {
    let x2 = x * x;
    (x * (27.0 + x2) / (27.0 + 9.0 * x2)).clamp(-1.0, 1.0)
}

/// Component-wise [`tanh_approx`].
#[inline]
pub fn tanh_approx_vec3(v: Vec3) -> Vec3 {
    Vec3::new(tanh_approx(v.x), tanh_approx(v.y), tanh_approx(v.z))
}
