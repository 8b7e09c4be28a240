//! Position, heading and the quantized movement math.
//!
//! Headings are stored as an index in `0..24`, one unit per 15 degrees.
//! Index 0 points up (negative y on the canvas) and increasing the index
//! turns counter-clockwise.

use std::fmt;

/// Number of discrete headings in a full turn.
pub const HEADINGS: u8 = 24;

/// `sin(15° * i)` for `i` in `0..=6`; `cos(15° * i)` is `TRIG15[6 - i]`.
pub const TRIG15: [f64; 7] = [0.0, 0.25882, 0.5, 0.70711, 0.86603, 0.96593, 1.0];

/// A discrete direction, always in `0..24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Heading(u8);

impl Heading {
    pub const UP: Heading = Heading(0);

    /// Builds a heading from any integer, wrapping it into range.
    pub fn new(index: u32) -> Self {
        Self((index % u32::from(HEADINGS)) as u8)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn degrees(self) -> u32 {
        u32::from(self.0) * 15
    }

    #[must_use]
    pub fn rotate_ccw(self, steps: u32) -> Self {
        Self::new(u32::from(self.0) + steps % u32::from(HEADINGS))
    }

    #[must_use]
    pub fn rotate_cw(self, steps: u32) -> Self {
        let steps = (steps % u32::from(HEADINGS)) as u8;
        if self.0 >= steps {
            Self(self.0 - steps)
        } else {
            Self(HEADINGS - (steps - self.0))
        }
    }

    /// Offset produced by moving `dist` units along this heading.
    pub fn displacement(self, dist: f64) -> (f64, f64) {
        let h = usize::from(self.0);
        match h {
            0..=6 => (-dist * TRIG15[h], -dist * TRIG15[6 - h]),
            7..=12 => (-dist * TRIG15[12 - h], dist * TRIG15[h - 6]),
            13..=18 => (dist * TRIG15[h - 12], dist * TRIG15[18 - h]),
            _ => (dist * TRIG15[24 - h], -dist * TRIG15[h - 18]),
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A snapshot of everything the stack saves and restores.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct State {
    pub position: Position,
    pub heading: Heading,
}

/// The turtle itself: a current state plus the operations that change it.
#[derive(Debug, Default)]
pub struct Turtle {
    state: State,
}

impl Turtle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn position(&self) -> Position {
        self.state.position
    }

    pub fn heading(&self) -> Heading {
        self.state.heading
    }

    pub fn restore(&mut self, state: State) {
        self.state = state;
    }

    /// Move `dist` units along the current heading and return the new position.
    pub fn advance(&mut self, dist: f64) -> Position {
        let (dx, dy) = self.state.heading.displacement(dist);
        self.state.position.x += dx;
        self.state.position.y += dy;
        self.state.position
    }

    pub fn reset(&mut self) {
        self.state = State::default();
    }

    /// Back to the origin, keeping the heading.
    pub fn home(&mut self) {
        self.state.position = Position::ORIGIN;
    }

    pub fn rotate_ccw(&mut self, steps: u32) {
        self.state.heading = self.state.heading.rotate_ccw(steps);
    }

    pub fn rotate_cw(&mut self, steps: u32) {
        self.state.heading = self.state.heading.rotate_cw(steps);
    }
}
