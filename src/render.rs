use crate::core::{Rgb, Surface2d};
use std::f64::consts::TAU;
use web_sys as web;

impl Surface2d for web::CanvasRenderingContext2d {
    fn save(&mut self) {
        web::CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        web::CanvasRenderingContext2d::restore(self);
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        web::CanvasRenderingContext2d::set_global_alpha(self, alpha as f64);
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.set_fill_style_str(&color.css());
    }

    fn set_stroke_color(&mut self, color: Rgb) {
        self.set_stroke_style_str(&color.css());
    }

    fn set_line_width(&mut self, width: f32) {
        web::CanvasRenderingContext2d::set_line_width(self, width as f64);
    }

    fn set_glow(&mut self, blur: f32, color: Rgb) {
        self.set_shadow_blur(blur as f64);
        self.set_shadow_color(&color.css());
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32) {
        self.begin_path();
        if self
            .arc(x as f64, y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_ok()
        {
            self.fill();
        }
    }

    fn stroke_circle(&mut self, x: f32, y: f32, radius: f32) {
        self.begin_path();
        if self
            .arc(x as f64, y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_ok()
        {
            self.stroke();
        }
    }
}
