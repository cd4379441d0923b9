use bevy_ecs::prelude::Component;

use crate::error::EngineError;
use crate::resources::rendertarget::Color;

const DEFAULT_TEXT_SIZE: f32 = 100.0;

#[derive(Component, Clone, Debug, PartialEq)]
/// Text drawn with its baseline on the bottom-left corner of the entity's bounds.
pub struct Label {
    pub content: String,
    /// Text size in world units.
    pub size: f32,
    pub color: Color,
}

impl Default for Label {
    fn default() -> Self {
        Self::new("")
    }
}

impl Label {
    /// Black text at the default size.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            size: DEFAULT_TEXT_SIZE,
            color: Color::BLACK,
        }
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Change the color from a hex string, keeping the current transparency.
    pub fn set_hex_color(&mut self, hex: &str) -> Result<(), EngineError> {
        let parsed = Color::parse_hex(hex)?;
        self.color = parsed.with_alpha(self.color.a);
        Ok(())
    }

    /// 0 is invisible, 255 is opaque.
    pub fn set_transparency(&mut self, alpha: u8) {
        self.color.a = alpha;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_keeps_alpha() {
        let mut label = Label::new("score");
        label.set_transparency(40);
        label.set_hex_color("FF2100").unwrap();
        assert_eq!(label.color, Color::rgb(0xff, 0x21, 0x00).with_alpha(40));
    }

    #[test]
    fn test_bad_hex_leaves_color() {
        let mut label = Label::new("score");
        assert!(label.set_hex_color("nope").is_err());
        assert_eq!(label.color, Color::BLACK);
    }
}
