//! Finite state machines for dashboard navigation and story progression.
//!
//! Each machine is a pure transition function over a `(state, context)` pair.
//! [`Machine`] owns one pair and applies events to it one at a time.

pub mod explorer;
pub mod story;

use std::fmt;

pub use explorer::{Explorer, ExplorerEvent, ExplorerState, NavigationContext, View};
pub use story::{ChapterId, ChapterStatus, Story, StoryContext, StoryEvent, StoryState};

/// Declarative state machine contract.
///
/// `transition` must be total: an event with no transition defined for the
/// current state returns the `(state, context)` pair unchanged.
pub trait StateMachine {
    /// Discrete machine state.
    type State: Copy + PartialEq + fmt::Debug;
    /// Extended state carried alongside the discrete state.
    type Context: Clone + PartialEq + fmt::Debug;
    /// Inbound intent.
    type Event;

    /// Returns the initial state and context.
    fn initial() -> (Self::State, Self::Context);

    /// Applies one event and returns the resulting pair.
    fn transition(
        state: Self::State,
        context: Self::Context,
        event: Self::Event,
    ) -> (Self::State, Self::Context);
}

/// A running instance of a [`StateMachine`].
///
/// # Examples
///
/// ```
/// use energy_explorer::concepts::ConceptId;
/// use energy_explorer::machine::{Explorer, ExplorerEvent, ExplorerState, Machine};
///
/// let mut explorer = Machine::<Explorer>::new();
/// assert!(explorer.send(ExplorerEvent::OpenConcept(ConceptId::Mpan)));
/// assert_eq!(explorer.state(), ExplorerState::ViewingConcept);
/// assert!(explorer.send(ExplorerEvent::ClosePanel));
/// // No transition for `ClosePanel` on the dashboard: ignored.
/// assert!(!explorer.send(ExplorerEvent::ClosePanel));
/// ```
pub struct Machine<M: StateMachine> {
    state: M::State,
    context: M::Context,
}

impl<M: StateMachine> Machine<M> {
    /// Starts a machine at its initial state.
    pub fn new() -> Self {
        let (state, context) = M::initial();
        Self { state, context }
    }

    /// Dispatches one event.
    ///
    /// Returns `true` when the state or the context changed, `false` when the
    /// event was ignored or had no observable effect.
    pub fn send(&mut self, event: M::Event) -> bool {
        let before_state = self.state;
        let before_context = self.context.clone();
        let (state, context) = M::transition(self.state, before_context.clone(), event);
        self.state = state;
        self.context = context;
        self.state != before_state || self.context != before_context
    }

    /// Current discrete state.
    pub fn state(&self) -> M::State {
        self.state
    }

    /// Read-only context snapshot.
    pub fn context(&self) -> &M::Context {
        &self.context
    }

    /// Returns `true` if the machine is in `state`.
    pub fn matches(&self, state: M::State) -> bool {
        self.state == state
    }
}

impl<M: StateMachine> Default for Machine<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: StateMachine> fmt::Debug for Machine<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("state", &self.state)
            .field("context", &self.context)
            .finish()
    }
}
