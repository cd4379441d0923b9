//! Drawable target abstraction.
//!
//! The platform owns the real pixels; the engine only sees a [`Surface`] that
//! may hand out a [`Canvas`] for one frame at a time. A surface is allowed to
//! be transiently unavailable (window hidden, being resized), in which case
//! [`Surface::lock_canvas`] returns `None` and the frame worker skips the tick.
//!
//! [`HeadlessSurface`] is a platform-free implementation that records draw
//! calls. It backs the demo binary and the integration tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::components::rect::Rect;
use crate::error::EngineError;
use crate::resources::imagestore::Image;

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parse `#rrggbb`, `rrggbb` or `#aarrggbb`.
    pub fn parse_hex(text: &str) -> Result<Self, EngineError> {
        let digits = text.trim().trim_start_matches('#');
        let value = u32::from_str_radix(digits, 16)
            .map_err(|e| EngineError::Config(format!("invalid color '{text}': {e}")))?;
        match digits.len() {
            6 => Ok(Self::rgb(
                (value >> 16) as u8,
                (value >> 8) as u8,
                value as u8,
            )),
            8 => Ok(Self {
                a: (value >> 24) as u8,
                r: (value >> 16) as u8,
                g: (value >> 8) as u8,
                b: value as u8,
            }),
            _ => Err(EngineError::Config(format!(
                "invalid color '{text}': expected 6 or 8 hex digits"
            ))),
        }
    }
}

/// Drawing operations available while a frame is locked.
///
/// Coordinates are in canvas pixels; the registry scales world units before
/// calling in.
pub trait Canvas {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    /// Fill the whole canvas.
    fn fill(&mut self, color: Color);
    /// Draw `image` stretched into `dest`.
    fn draw_image(&mut self, image: &Image, dest: Rect);
    /// Draw `text` with its baseline-left corner at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);
}

/// A presentation surface owned by the platform layer.
pub trait Surface: Send {
    /// Lock the canvas for drawing; `None` when the surface is unavailable this tick.
    fn lock_canvas(&mut self) -> Option<&mut dyn Canvas>;
    /// Present the frame drawn since the last successful lock.
    fn unlock_and_post(&mut self);
}

/// A draw call captured by [`HeadlessCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill(Color),
    Image { key: Arc<str>, dest: Rect },
    Text { text: String, x: f32, y: f32 },
}

/// Canvas that records draw calls instead of rasterizing them.
#[derive(Debug, Clone)]
pub struct HeadlessCanvas {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

impl HeadlessCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Keys of every image drawn, in draw order.
    pub fn drawn_images(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Image { key, .. } => Some(key.as_ref()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for HeadlessCanvas {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn draw_image(&mut self, image: &Image, dest: Rect) {
        self.commands.push(DrawCommand::Image {
            key: image.key.clone(),
            dest,
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, _size: f32, _color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
        });
    }
}

/// Frames presented by a [`HeadlessSurface`], shared with the thread that created it.
pub type PresentedFrames = Arc<Mutex<Vec<Vec<DrawCommand>>>>;

/// Surface backed by a [`HeadlessCanvas`].
///
/// Every presented frame's draw commands are appended to a shared list so a
/// test (or the demo) can inspect them after the worker has stopped. The
/// surface can be toggled unavailable to exercise the skipped-tick path.
pub struct HeadlessSurface {
    canvas: HeadlessCanvas,
    available: Arc<AtomicBool>,
    presented: PresentedFrames,
    keep_frames: usize,
}

impl HeadlessSurface {
    /// `keep_frames` bounds how many presented frames are retained (oldest dropped).
    pub fn new(width: f32, height: f32, keep_frames: usize) -> Self {
        Self {
            canvas: HeadlessCanvas::new(width, height),
            available: Arc::new(AtomicBool::new(true)),
            presented: Arc::new(Mutex::new(Vec::new())),
            keep_frames,
        }
    }

    pub fn presented(&self) -> PresentedFrames {
        self.presented.clone()
    }

    /// Handle that toggles availability from another thread.
    pub fn availability(&self) -> Arc<AtomicBool> {
        self.available.clone()
    }
}

impl Surface for HeadlessSurface {
    fn lock_canvas(&mut self) -> Option<&mut dyn Canvas> {
        if !self.available.load(Ordering::Acquire) {
            return None;
        }
        self.canvas.commands.clear();
        Some(&mut self.canvas)
    }

    fn unlock_and_post(&mut self) {
        let frame = std::mem::take(&mut self.canvas.commands);
        // A poisoned lock only means a reader panicked; the frame list is still usable.
        let mut frames = self
            .presented
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        frames.push(frame);
        if frames.len() > self.keep_frames {
            let excess = frames.len() - self.keep_frames;
            frames.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_rgb() {
        assert_eq!(Color::parse_hex("#20c0ff").unwrap(), Color::rgb(0x20, 0xc0, 0xff));
        assert_eq!(Color::parse_hex("5588aa").unwrap(), Color::rgb(0x55, 0x88, 0xaa));
    }

    #[test]
    fn test_parse_hex_argb() {
        let c = Color::parse_hex("#80ff0000").unwrap();
        assert_eq!(c, Color::rgb(255, 0, 0).with_alpha(0x80));
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(Color::parse_hex("#12345").is_err());
        assert!(Color::parse_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_headless_surface_unavailable() {
        let mut surface = HeadlessSurface::new(100.0, 100.0, 4);
        surface
            .availability()
            .store(false, Ordering::Release);
        assert!(surface.lock_canvas().is_none());
    }

    #[test]
    fn test_headless_surface_keeps_bounded_frames() {
        let mut surface = HeadlessSurface::new(100.0, 100.0, 2);
        for shade in 0..3u8 {
            let canvas = surface.lock_canvas().unwrap();
            canvas.fill(Color::rgb(shade, 0, 0));
            surface.unlock_and_post();
        }
        let frames = surface.presented();
        let frames = frames.lock().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], vec![DrawCommand::Fill(Color::rgb(1, 0, 0))]);
        assert_eq!(frames[1], vec![DrawCommand::Fill(Color::rgb(2, 0, 0))]);
    }
}
