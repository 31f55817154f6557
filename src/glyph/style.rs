use crate::{foundation::core::Rgba8, scene::StrokeStyle};

/// Colors and stroke used when painting a rune.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlyphStyle {
    pub background: Rgba8,
    pub on_fill: Rgba8,
    pub off_fill: Rgba8,
    /// Outline drawn around every segment, on or off.
    pub stroke: StrokeStyle,
    pub spine_fill: Rgba8,
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self {
            background: Rgba8::WHITE,
            on_fill: Rgba8::BLACK,
            off_fill: Rgba8::WHITE.with_opacity(0.5),
            stroke: StrokeStyle {
                color: Rgba8::BLACK,
                width: 0.5,
            },
            spine_fill: Rgba8::BLACK,
        }
    }
}
