//! The render session.
//!
//! A [`Picture`] owns everything a drawing script reads and writes: the [`Viewport`] mapping unit
//! coordinates to pixels, the current [`Style`], and the [`Scene`] of drawn elements. Drawing
//! operations are methods on the picture; they take points in unit coordinates and add or update
//! elements in device coordinates.
//!
//! # Example
//!
//! ```
//! use asvg_graph::{Picture, PictureOptions, UnitPoint};
//!
//! let mut picture = Picture::new(PictureOptions::default()).unwrap();
//! picture.init(Some(-2.0), Some(2.0), None, None).unwrap();
//! picture.line(UnitPoint(-1.0, 0.0), UnitPoint(1.0, 1.0), Some("l"));
//! assert_eq!(picture.scene().len(), 2); // the background, then the line
//! ```

pub mod axes;
pub mod element;
pub mod opts;
pub mod plot;
pub mod point;
mod primitives;
pub mod scene;
pub mod slope_field;
pub mod style;
pub mod viewport;

use asvg_error::Error;
use element::{Element, Paint, Shape};
use log::debug;
use opts::PictureOptions;
use point::DevicePoint;
use scene::{Batch, Scene};
use style::{Marker, Style};
use viewport::Viewport;

pub use primitives::{DotKind, PathKind, TextPosition};

/// A picture being drawn.
///
/// See the [module-level documentation](self) for more information.
#[derive(Clone, Debug)]
pub struct Picture {
    /// The options the picture was created with.
    options: PictureOptions,

    /// The active mapping from unit coordinates to the canvas.
    viewport: Viewport,

    /// The current style.
    style: Style,

    /// The drawn elements.
    scene: Scene,

    /// Whether the picture was initialized during the current render pass.
    initialized: bool,
}

impl Picture {
    /// Creates a new, empty picture. The viewport shows `-5 <= x <= 5` until the picture is
    /// initialized.
    pub fn new(options: PictureOptions) -> Result<Picture, Error> {
        let viewport = Viewport::new(options.width, options.height, -5.0, 5.0, None, None)?;
        Ok(Picture {
            style: options.style.clone(),
            options,
            viewport,
            scene: Scene::new(),
            initialized: false,
        })
    }

    /// Reconstructs a previously rendered picture from its persisted viewport and elements, so
    /// that drawing can continue without re-initializing it.
    ///
    /// The canvas size is taken from the viewport.
    pub fn resume(options: PictureOptions, viewport: Viewport, scene: Scene) -> Picture {
        let options = options.canvas_size(viewport.width, viewport.height);
        Picture {
            style: options.style.clone(),
            options,
            viewport,
            scene,
            initialized: false,
        }
    }

    /// Initializes the picture to show `xmin <= x <= xmax`, discarding every drawn element.
    ///
    /// The x bounds default to `-5` and `5`. See [`Viewport::new`] for how the vertical range is
    /// derived. The style is restored to [`PictureOptions::style`], and a rectangle covering the
    /// canvas is added if the options have a background.
    pub fn init(
        &mut self,
        xmin: Option<f64>,
        xmax: Option<f64>,
        ymin: Option<f64>,
        ymax: Option<f64>,
    ) -> Result<(), Error> {
        let viewport = Viewport::new(
            self.options.width,
            self.options.height,
            xmin.unwrap_or(-5.0),
            xmax.unwrap_or(5.0),
            ymin,
            ymax,
        )?;
        debug!(
            "initializing {}x{} picture: x in [{}, {}], y in [{}, {}]",
            viewport.width, viewport.height, viewport.xmin, viewport.xmax, viewport.ymin, viewport.ymax,
        );

        self.viewport = viewport;
        self.style = self.options.style.clone();
        self.scene.clear();
        self.initialized = true;

        if let Some(background) = &self.options.background {
            self.scene.upsert(Element::new(
                Shape::Rect {
                    corner: DevicePoint(0.0, 0.0),
                    width: viewport.width,
                    height: viewport.height,
                    rx: None,
                    ry: None,
                },
                Paint {
                    stroke: None,
                    fill: Some(background.clone()),
                    stroke_width: Some(1.0),
                    dash: None,
                },
            ));
        }

        Ok(())
    }

    /// Initializes the picture with default bounds if it was not initialized during the current
    /// render pass.
    pub fn ensure_init(&mut self) -> Result<(), Error> {
        if !self.initialized {
            self.init(None, None, None, None)?;
        }
        Ok(())
    }

    /// Starts a new render pass over the existing picture.
    ///
    /// The stroke, fill, stroke width and marker return to their defaults, and the picture is
    /// considered uninitialized until [`Picture::init`] is called again. The viewport and the
    /// drawn elements are kept.
    pub fn begin_pass(&mut self) {
        let defaults = &self.options.style;
        self.style.stroke = defaults.stroke.clone();
        self.style.fill = defaults.fill.clone();
        self.style.stroke_width = defaults.stroke_width;
        self.style.marker = defaults.marker;
        self.initialized = false;
    }

    /// Returns true if the picture was initialized during the current render pass.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn options(&self) -> &PictureOptions {
        &self.options
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Sets the canvas size used from the next call to [`Picture::init`] on.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.options.width = width;
        self.options.height = height;
    }

    /// Replaces the current style.
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// Sets the current marker.
    pub fn set_marker(&mut self, marker: Marker) {
        self.style.marker = marker;
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Consumes the picture, returning its viewport and scene for persisting.
    pub fn into_parts(self) -> (Viewport, Scene) {
        (self.viewport, self.scene)
    }

    /// Starts collecting line segments to be emitted as a single path element.
    pub fn begin_batch(&self) -> Batch {
        Batch::new(self.viewport)
    }

    /// Emits the collected segments as one path element, stroked with the current style. Empty
    /// batches emit nothing.
    pub fn end_batch(&mut self, batch: Batch, id: Option<&str>) {
        if batch.is_empty() {
            return;
        }
        let paint = Paint::new(&self.style.stroke, &self.style.fill, self.style.stroke_width)
            .with_dash(self.style.dash.as_deref());
        self.scene.upsert(batch.into_element(paint).with_id(id));
    }
}
