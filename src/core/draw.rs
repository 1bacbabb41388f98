//! Minimal 2D drawing surface used by the effect renderers.

/// 8-bit sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS color string, e.g. `rgb(255,200,40)`.
    pub fn css(self) -> String {
        format!("rgb({},{},{})", self.0, self.1, self.2)
    }
}

/// The subset of Canvas 2D the effects need.
///
/// Implementations are not expected to validate arguments; a surface that
/// cannot draw simply drops the call.
pub trait Surface2d {
    fn save(&mut self);
    fn restore(&mut self);
    fn set_global_alpha(&mut self, alpha: f32);
    fn set_fill_color(&mut self, color: Rgb);
    fn set_stroke_color(&mut self, color: Rgb);
    fn set_line_width(&mut self, width: f32);
    fn set_glow(&mut self, blur: f32, color: Rgb);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32);
    fn stroke_circle(&mut self, x: f32, y: f32, radius: f32);
}
