use serde::{Deserialize, Serialize};

use crate::error::{CommonError, CommonResult};

/// One pagination phase: the offset reached for a given resource kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// Stored offset; empty means "first page"
    #[serde(default)]
    pub token: String,
    /// Resource kind this state belongs to
    #[serde(default)]
    pub resource_type_id: String,
    /// Optional parent resource the phase is scoped to
    #[serde(default)]
    pub resource_id: String,
}

impl PageState {
    /// Fresh state for a resource kind, starting at the first page
    #[must_use]
    pub fn for_kind(resource_type_id: impl Into<String>) -> Self {
        Self { resource_type_id: resource_type_id.into(), ..Self::default() }
    }
}

/// Stack of [`PageState`]s serialized into a single continuation token.
///
/// The top of the stack is held separately as `current_state`; everything
/// below it lives in `states` in push order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bag {
    #[serde(default)]
    states: Vec<PageState>,
    #[serde(default)]
    current_state: Option<PageState>,
}

impl Bag {
    /// Empty bag with no current state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a state onto the stack, making it current
    pub fn push(&mut self, state: PageState) {
        if let Some(previous) = self.current_state.take() {
            self.states.push(previous);
        }
        self.current_state = Some(state);
    }

    /// Pop the current state; the one beneath it becomes current
    pub fn pop(&mut self) -> Option<PageState> {
        let popped = self.current_state.take();
        self.current_state = self.states.pop();
        popped
    }

    /// Current (top) state, if any
    #[must_use]
    pub fn current(&self) -> Option<&PageState> {
        self.current_state.as_ref()
    }

    /// Number of states on the stack, including the current one
    #[must_use]
    pub fn depth(&self) -> usize {
        self.states.len() + usize::from(self.current_state.is_some())
    }

    /// Advance the current phase to `next_token`.
    ///
    /// The current state is replaced by one carrying `next_token` and the same
    /// resource kind. An empty `next_token` ends the phase and leaves the
    /// previous state (if any) current.
    ///
    /// # Errors
    /// Returns `CommonError::Internal` when there is no current state.
    pub fn next(&mut self, next_token: &str) -> CommonResult<()> {
        let finished = self.pop().ok_or_else(|| {
            CommonError::internal("no current state to advance", "pagination")
        })?;

        if !next_token.is_empty() {
            self.push(PageState { token: next_token.to_string(), ..finished });
        }
        Ok(())
    }

    /// Encode the bag as an opaque token. An exhausted bag encodes to `""`.
    ///
    /// # Errors
    /// Returns `CommonError::Serialization` if JSON encoding fails.
    pub fn marshal(&self) -> CommonResult<String> {
        if self.current_state.is_none() {
            return Ok(String::new());
        }
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a token produced by [`Bag::marshal`]. `""` decodes to an empty bag.
    ///
    /// # Errors
    /// Returns `CommonError::Serialization` when the token is not a valid bag.
    pub fn unmarshal(token: &str) -> CommonResult<Self> {
        if token.is_empty() {
            return Ok(Self::new());
        }
        Ok(serde_json::from_str(token)?)
    }
}
