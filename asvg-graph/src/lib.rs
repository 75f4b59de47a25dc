//! Coordinate-mapped drawing for asvg pictures.
//!
//! A [`Picture`] maps a rectangular region of the plane, in **unit** coordinates, onto a canvas
//! of a fixed size in pixels (**device** coordinates). Drawing operations take unit coordinates,
//! read the current [`Style`], and add elements to the picture's [`Scene`](picture::scene::Scene)
//! in device coordinates. Besides the basic shapes, a picture can plot functions, draw slope
//! fields, and draw axes with tick marks, grids and labels.
//!
//! The finished scene can be written as an SVG document with the [`svg`] module, or, with the
//! `cairo` feature, replayed onto a [`cairo`](::cairo) context.
//!
//! # Example
//!
//! ```
//! use asvg_compute::ctxt::Ctxt;
//! use asvg_graph::{picture::plot::{Function, PlotOptions}, Picture, PictureOptions};
//! use asvg_parser::rewrite::ExponentPolicy;
//!
//! let mut picture = Picture::new(PictureOptions::default()).unwrap();
//! picture.init(Some(-3.0), Some(3.0), None, None).unwrap();
//! picture.grid(None, None).unwrap();
//!
//! let parabola = Function::explicit("x^2 - 1", &Ctxt::default(), ExponentPolicy::default()).unwrap();
//! picture.plot(&parabola, &PlotOptions::default().id(Some("parabola")));
//!
//! let document = asvg_graph::svg::to_document(&picture);
//! assert!(document.to_string().contains("id=\"parabola\""));
//! ```

#[cfg(feature = "cairo")]
pub mod cairo;
pub mod error;
pub mod picture;
pub mod svg;
#[cfg(feature = "cairo")]
mod text_align;

pub use picture::{
    element::{Element, Paint, Shape},
    opts::PictureOptions,
    point::{DevicePoint, UnitPoint},
    style::{Marker, Style},
    viewport::Viewport,
    DotKind,
    PathKind,
    Picture,
    TextPosition,
};
