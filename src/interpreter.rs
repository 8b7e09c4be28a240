//! The character-driven drawing machine.
//!
//! Features and behaviors:
//! - Eight command characters (`d u r o [ ] < >`); every other byte except
//!   digits is skipped.
//! - Digits multiply a repeat count applied to the next command: `23d` is `6d`.
//! - Consecutive `d` commands are merged into one line segment that is only
//!   drawn when some other command runs or the input ends.
//! - `]` on an empty stack is fatal; the pending segment is still drawn.
//!
//! Quick start:
//!
//! ```
//! use letdraw::{Interpreter, RecordingCanvas};
//!
//! let mut canvas = RecordingCanvas::new();
//! let mut interp = Interpreter::new(&mut canvas);
//! interp.run_str("3d2d").expect("program should run");
//! assert_eq!(canvas.lines().count(), 1);
//! ```

use std::fmt;
use std::io::{self, BufReader, Read};

use crate::canvas::Canvas;
use crate::repeat::RepeatCount;
use crate::stack::{StackError, StateStack};
use crate::turtle::{Position, State, Turtle};

/// Fatal conditions that stop a run. `ip` is the byte offset of the
/// character being processed.
#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    /// `]` with nothing left on the state stack.
    #[error("State stack underflow at offset {ip}")]
    StackUnderflow { ip: usize },

    /// The state stack could not grow to hold another snapshot.
    #[error("State stack cannot grow to {requested} entries at offset {ip}")]
    AllocationFailure { ip: usize, requested: usize },

    /// Reading the instruction stream failed.
    #[error("I/O error at offset {ip}: {source}")]
    Io {
        ip: usize,
        #[source]
        source: io::Error,
    },
}

impl DrawError {
    pub fn ip(&self) -> usize {
        match self {
            DrawError::StackUnderflow { ip }
            | DrawError::AllocationFailure { ip, .. }
            | DrawError::Io { ip, .. } => *ip,
        }
    }

    fn from_stack(ip: usize, err: StackError) -> Self {
        match err {
            StackError::Underflow => DrawError::StackUnderflow { ip },
            StackError::AllocationFailure { requested } => {
                DrawError::AllocationFailure { ip, requested }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `d`: move forward drawing a line
    Draw,
    /// `u`: move forward without drawing
    Move,
    /// `r`: back to the origin, heading reset to 0
    Reset,
    /// `o`: back to the origin, heading kept
    Home,
    /// `[`
    Push,
    /// `]`
    Pop,
    /// `<`: 15 degrees counter-clockwise
    TurnLeft,
    /// `>`: 15 degrees clockwise
    TurnRight,
}

impl Command {
    pub fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            b'd' => Command::Draw,
            b'u' => Command::Move,
            b'r' => Command::Reset,
            b'o' => Command::Home,
            b'[' => Command::Push,
            b']' => Command::Pop,
            b'<' => Command::TurnLeft,
            b'>' => Command::TurnRight,
            _ => return None,
        })
    }

    pub fn symbol(self) -> char {
        match self {
            Command::Draw => 'd',
            Command::Move => 'u',
            Command::Reset => 'r',
            Command::Home => 'o',
            Command::Push => '[',
            Command::Pop => ']',
            Command::TurnLeft => '<',
            Command::TurnRight => '>',
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.symbol())
    }
}

/// Interpreter state for one run over one canvas.
///
/// The canvas is borrowed for the lifetime of the interpreter; creating and
/// finishing it is the caller's business.
pub struct Interpreter<'c, C: Canvas> {
    canvas: &'c mut C,
    turtle: Turtle,
    stack: StateStack,
    repeat: RepeatCount,
    // Forward distance queued by `d` and not drawn yet.
    pending: f64,
    // Where the canvas pen is, in turtle units. `None` once unknown.
    pen: Option<Position>,
    scale: f64,
    ip: usize,
    step: usize,
    segments: usize,
    debug: bool,
}

impl<'c, C: Canvas> Interpreter<'c, C> {
    /// Starts at the origin facing up, with an empty stack.
    pub fn new(canvas: &'c mut C) -> Self {
        Self::new_with_stack(canvas, StateStack::new())
    }

    /// Same as [`Interpreter::new`] but the state stack holds at most `max_depth` entries.
    pub fn new_with_stack_limit(canvas: &'c mut C, max_depth: usize) -> Self {
        Self::new_with_stack(canvas, StateStack::with_max_depth(max_depth))
    }

    fn new_with_stack(canvas: &'c mut C, stack: StateStack) -> Self {
        Self {
            canvas,
            turtle: Turtle::new(),
            stack,
            repeat: RepeatCount::new(),
            pending: 0.0,
            pen: Some(Position::ORIGIN),
            scale: 1.0,
            ip: 0,
            step: 0,
            segments: 0,
            debug: false,
        }
    }

    /// Multiply every coordinate handed to the canvas by `scale`.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    /// Print a step-by-step table of executed commands to stdout.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn state(&self) -> State {
        self.turtle.state()
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn pending_distance(&self) -> f64 {
        self.pending
    }

    pub fn repeat_count(&self) -> u32 {
        self.repeat.get()
    }

    /// Line segments handed to the canvas so far.
    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Read `input` to the end, one byte at a time.
    ///
    /// Stops at the first fatal error. Either way the pending segment is
    /// drawn before returning.
    pub fn run<R: Read>(&mut self, input: R) -> Result<(), DrawError> {
        let result = self.consume(input);
        self.flush();
        result
    }

    pub fn run_str(&mut self, program: &str) -> Result<(), DrawError> {
        self.run(program.as_bytes())
    }

    fn consume<R: Read>(&mut self, input: R) -> Result<(), DrawError> {
        for byte in BufReader::new(input).bytes() {
            let byte = byte.map_err(|source| DrawError::Io {
                ip: self.ip,
                source,
            })?;
            self.feed(byte)?;
        }
        Ok(())
    }

    /// Process a single character.
    ///
    /// On error the pending segment has already been drawn; the caller
    /// should stop feeding.
    pub fn feed(&mut self, byte: u8) -> Result<(), DrawError> {
        let ip = self.ip;
        self.ip += 1;

        if self.repeat.push_digit(byte) {
            return Ok(());
        }
        let Some(cmd) = Command::from_byte(byte) else {
            return Ok(());
        };
        let count = self.repeat.take();

        if self.debug && self.step == 0 {
            println!("STEP | IP   | CMD | REP  | X          | Y          | HDG  | ACTION");
            println!("-----+------+-----+------+------------+------------+------+------------------------------------");
        }
        let mut action: Option<String> = if self.debug { Some(String::new()) } else { None };

        if cmd != Command::Draw {
            if let Some(end) = self.flush() {
                if let Some(a) = action.as_mut() {
                    *a = format!("Drew segment to ({:.3}, {:.3}); ", end.x, end.y);
                }
            }
        }

        let result = match cmd {
            Command::Draw => {
                self.pending += f64::from(count);
                if let Some(a) = action.as_mut() {
                    a.push_str(&format!("Queued {count} units (pending {})", self.pending));
                }
                Ok(())
            }
            Command::Move => {
                let end = self.turtle.advance(f64::from(count));
                self.pen = None;
                if let Some(a) = action.as_mut() {
                    a.push_str(&format!("Moved {count} units to ({:.3}, {:.3})", end.x, end.y));
                }
                Ok(())
            }
            Command::Reset => {
                self.turtle.reset();
                if let Some(a) = action.as_mut() {
                    a.push_str("Reset to origin facing 0°");
                }
                Ok(())
            }
            Command::Home => {
                self.turtle.home();
                if let Some(a) = action.as_mut() {
                    a.push_str("Moved to origin");
                }
                Ok(())
            }
            Command::Push => {
                let pushed = self.stack.push_repeated(self.turtle.state(), count);
                if let Some(a) = action.as_mut() {
                    a.push_str(&format!("Pushed {count} states (depth {})", self.stack.len()));
                }
                pushed
            }
            Command::Pop => {
                let popped = self.pop_repeated(count);
                if let Some(a) = action.as_mut() {
                    a.push_str(&format!("Popped {count} states (depth {})", self.stack.len()));
                }
                popped
            }
            Command::TurnLeft => {
                self.turtle.rotate_ccw(count);
                if let Some(a) = action.as_mut() {
                    a.push_str(&format!("Turned to {}", self.turtle.heading()));
                }
                Ok(())
            }
            Command::TurnRight => {
                self.turtle.rotate_cw(count);
                if let Some(a) = action.as_mut() {
                    a.push_str(&format!("Turned to {}", self.turtle.heading()));
                }
                Ok(())
            }
        };

        if let Some(action) = action {
            let pos = self.turtle.position();
            println!(
                "{:<4} | {:<4} |  {}  | {:<4} | {:<10.3} | {:<10.3} | {:<4} | {}",
                self.step,
                ip,
                cmd.symbol(),
                count,
                pos.x,
                pos.y,
                self.turtle.heading().index(),
                if result.is_ok() { action } else { format!("{action} -> error") },
            );
        }
        self.step += 1;

        result.map_err(|e| DrawError::from_stack(ip, e))
    }

    fn pop_repeated(&mut self, count: u32) -> Result<(), StackError> {
        for _ in 0..count {
            let state = self.stack.pop()?;
            self.turtle.restore(state);
            self.pen = None;
        }
        Ok(())
    }

    /// Draw the pending segment, if any, and return where it ended.
    pub fn flush(&mut self) -> Option<Position> {
        if self.pending <= 0.0 {
            return None;
        }
        let start = self.turtle.position();
        let end = self.turtle.advance(self.pending);
        self.pending = 0.0;

        if self.pen != Some(start) {
            self.canvas.move_to(start.x * self.scale, start.y * self.scale);
        }
        self.canvas.line_to(end.x * self.scale, end.y * self.scale);
        self.pen = Some(end);
        self.segments += 1;
        Some(end)
    }
}
