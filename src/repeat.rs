/// Pending multiplier for the next command.
///
/// Digits compose by multiplication: `2` then `3` gives 6, not 23.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatCount(u32);

impl RepeatCount {
    pub fn new() -> Self {
        Self(1)
    }

    /// Fold an ASCII digit into the count. Returns `false` for anything else.
    pub fn push_digit(&mut self, byte: u8) -> bool {
        if !byte.is_ascii_digit() {
            return false;
        }
        self.0 = self.0.saturating_mul(u32::from(byte - b'0'));
        true
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Hand the count to a command and start over at 1.
    pub fn take(&mut self) -> u32 {
        std::mem::replace(&mut self.0, 1)
    }
}

impl Default for RepeatCount {
    fn default() -> Self {
        Self::new()
    }
}
