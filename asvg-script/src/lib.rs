//! Interpreter for asvg drawing scripts.
//!
//! A script is a list of command calls and assignments:
//!
//! ```text
//! initPicture(-3, 3)
//! axes(1, 1, "labels", 1)
//! stroke = "blue"
//! plot(x^2 - 1, -3, 3, 100, "parabola")
//! ```
//!
//! Command arguments are evaluated only when a command reads them, with the type it expects, so
//! `plot` can take the unquoted source of a function. Assignments to style attributes such as
//! `stroke` change the current style of the picture; assignments to `xmin`, `xmax`, `ymin`,
//! `ymax`, `width` and `height` configure the next `initPicture`; anything else defines a
//! variable.
//!
//! ```
//! use asvg_graph::{Picture, PictureOptions};
//! use asvg_script::Interpreter;
//!
//! let mut picture = Picture::new(PictureOptions::default()).unwrap();
//! Interpreter::new()
//!     .run("initPicture(-3, 3)\nplot(x^2 - 1, -3, 3, 100, \"parabola\")", &mut picture)
//!     .unwrap();
//! assert!(picture.scene().get("parabola").is_some());
//! ```

pub mod args;
pub mod commands;
pub mod error;
pub mod interpreter;
pub mod style;
pub mod value;

pub use interpreter::{Bounds, Interpreter};
pub use value::Value;
