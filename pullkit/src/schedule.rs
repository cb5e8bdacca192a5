/// Identifies one scheduled continuation.
///
/// Tokens are handed out by [`Schedule::start`]. Once the schedule is restarted or cancelled,
/// older tokens are stale and completing them has no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token(u64);

/// A single-slot holder for a pending continuation (an animation or a delayed check).
///
/// Starting a new continuation replaces the previous one, and every start or cancel bumps the
/// generation so continuations captured before the change can be recognized as stale.
#[derive(Clone, Debug)]
pub struct Schedule<T> {
    generation: u64,
    pending: Option<(Token, T)>,
}

impl<T> Default for Schedule<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            pending: None,
        }
    }
}

impl<T> Schedule<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any pending continuation with `value`.
    pub fn start(&mut self, value: T) -> Token {
        self.generation = self.generation.wrapping_add(1);
        let token = Token(self.generation);
        self.pending = Some((token, value));
        token
    }

    /// Drops the pending continuation, if any. Returns `true` if something was pending.
    pub fn cancel(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn token(&self) -> Option<Token> {
        self.pending.as_ref().map(|(token, _)| *token)
    }

    pub fn current(&self) -> Option<&T> {
        self.pending.as_ref().map(|(_, value)| value)
    }

    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.pending.as_mut().map(|(_, value)| value)
    }

    pub fn is_current(&self, token: Token) -> bool {
        self.token() == Some(token)
    }

    /// Removes and returns the pending value if `token` still identifies it.
    pub fn take_if_current(&mut self, token: Token) -> Option<T> {
        if !self.is_current(token) {
            return None;
        }
        self.pending.take().map(|(_, value)| value)
    }
}
