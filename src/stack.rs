use crate::turtle::State;

/// Slots reserved before the first push.
pub const INITIAL_CAPACITY: usize = 20;

/// Upper bound on saved states unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 1 << 24;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StackError {
    /// `]` with nothing saved.
    #[error("pop on an empty state stack")]
    Underflow,

    /// The stack could not grow to hold `requested` entries.
    #[error("state stack cannot grow to {requested} entries")]
    AllocationFailure { requested: usize },
}

/// LIFO of saved turtle states. Storage doubles whenever it fills up.
#[derive(Debug)]
pub struct StateStack {
    states: Vec<State>,
    max_depth: usize,
}

impl StateStack {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            states: Vec::with_capacity(INITIAL_CAPACITY.min(max_depth)),
            max_depth,
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.states.capacity()
    }

    pub fn push(&mut self, state: State) -> Result<(), StackError> {
        self.push_repeated(state, 1)
    }

    /// Push the same snapshot `count` times.
    pub fn push_repeated(&mut self, state: State, count: u32) -> Result<(), StackError> {
        let count = count as usize;
        let requested = self
            .states
            .len()
            .checked_add(count)
            .ok_or(StackError::AllocationFailure { requested: usize::MAX })?;
        if requested > self.max_depth {
            return Err(StackError::AllocationFailure { requested });
        }
        self.grow_to(requested)?;
        self.states.extend(std::iter::repeat_n(state, count));
        Ok(())
    }

    pub fn pop(&mut self) -> Result<State, StackError> {
        self.states.pop().ok_or(StackError::Underflow)
    }

    fn grow_to(&mut self, requested: usize) -> Result<(), StackError> {
        let mut target = self.states.capacity().max(1);
        while target < requested {
            target = target.saturating_mul(2);
        }
        let target = target.min(self.max_depth);
        if target > self.states.capacity() {
            self.states
                .try_reserve_exact(target - self.states.len())
                .map_err(|_| StackError::AllocationFailure { requested })?;
        }
        Ok(())
    }
}

impl Default for StateStack {
    fn default() -> Self {
        Self::new()
    }
}
