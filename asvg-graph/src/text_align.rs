use ::cairo::{Context, Error};
use crate::picture::element::TextAnchor;

/// A trait to add the `show_text_anchored` method to the [`Context`] type.
pub trait ShowTextAnchored {
    /// Shows the given text with its baseline at the given `(x, y)` position, aligned
    /// horizontally the way an SVG `text-anchor` would align it.
    ///
    /// With [`TextAnchor::Start`] the text begins at `x`, with [`TextAnchor::Middle`] it is
    /// centered on `x`, and with [`TextAnchor::End`] it ends at `x`.
    fn show_text_anchored(
        &self,
        text: &str,
        point: (f64, f64),
        anchor: TextAnchor,
    ) -> Result<(), Error>;
}

impl ShowTextAnchored for Context {
    fn show_text_anchored(
        &self,
        text: &str,
        (x, y): (f64, f64),
        anchor: TextAnchor,
    ) -> Result<(), Error> {
        let align = match anchor {
            TextAnchor::Start => 0.0,
            TextAnchor::Middle => 0.5,
            TextAnchor::End => 1.0,
        };
        let extents = self.text_extents(text)?;
        self.move_to(x - extents.x_advance() * align, y);
        self.show_text(text)?;
        Ok(())
    }
}
