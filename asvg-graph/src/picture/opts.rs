use super::style::Style;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options to use when creating a picture.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PictureOptions {
    /// The width of the canvas, in pixels.
    ///
    /// The default value is `300`.
    pub width: f64,

    /// The height of the canvas, in pixels.
    ///
    /// The default value is `200`.
    pub height: f64,

    /// The fill color of the rectangle covering the canvas, added when the picture is
    /// initialized. [`None`] adds no background.
    ///
    /// The default value is `Some("white")`.
    pub background: Option<String>,

    /// The style restored when the picture is initialized.
    ///
    /// The default value is [`Style::default()`].
    pub style: Style,
}

impl Default for PictureOptions {
    fn default() -> PictureOptions {
        PictureOptions {
            width: 300.0,
            height: 200.0,
            background: Some("white".to_string()),
            style: Style::default(),
        }
    }
}

impl PictureOptions {
    /// Set the canvas size. Returns an updated [`PictureOptions`] for chaining.
    pub fn canvas_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the background color. Returns an updated [`PictureOptions`] for chaining.
    pub fn background(mut self, background: Option<&str>) -> Self {
        self.background = background.map(str::to_string);
        self
    }

    /// Set the initial style. Returns an updated [`PictureOptions`] for chaining.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}
