//! A tiny line-drawing machine driven by characters.
//!
//! The interpreter walks a turtle over a 2-D plane. It has 24 discrete
//! headings, a stack of saved states and a digit-based repeat prefix. It hands
//! the resulting line segments to a [`Canvas`].
//!
//! Supported characters:
//! - `d` move forward drawing a line, `u` move forward without drawing
//! - `<` / `>` turn 15 degrees counter-clockwise / clockwise
//! - `[` / `]` push / pop position and heading
//! - `o` go to the origin, `r` go to the origin and face up again
//! - a digit multiplies the repeat count of the next command (`23d` is `6d`)
//!
//! Everything else is ignored.
//!
//! Quick start:
//!
//! ```no_run
//! use letdraw::{CanvasConfig, Interpreter, RasterCanvas, Render};
//! use std::path::Path;
//!
//! // A square
//! let mut canvas = RasterCanvas::init(&CanvasConfig::default()).expect("canvas");
//! Interpreter::new(&mut canvas)
//!     .run_str("50d6<50d6<50d6<50d")
//!     .expect("program should run");
//! canvas.finish(Path::new("square.png")).expect("image should be written");
//! ```

pub mod canvas;
pub mod cli_util;
pub mod commands;
pub mod config;
pub mod interpreter;
pub mod repeat;
pub mod stack;
pub mod turtle;

pub use canvas::{
    Canvas, CanvasConfig, LineCap, LineJoin, PenCall, RasterCanvas, RecordingCanvas, Render,
    RenderError, SvgCanvas,
};
pub use interpreter::{Command, DrawError, Interpreter};
pub use repeat::RepeatCount;
pub use stack::{StackError, StateStack};
pub use turtle::{Heading, Position, State, Turtle};
