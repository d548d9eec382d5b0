use super::RedoPolicy;
use crate::socket::Socket;
use crate::Invoker;
use alloc::collections::VecDeque;
use core::marker::PhantomData;
use core::num::NonZeroUsize;

/// Builder for an [`Invoker`].
///
/// # Examples
/// ```
/// # use spellcast::{Invoker, LogSlot, RedoPolicy, Spell, Target, Targets};
/// # let mut targets = Targets::new();
/// # let goblin = targets.insert(Target::goblin());
/// let mut wizard = Invoker::builder()
///     .actor("Wizard")
///     .limit(100)
///     .capacity(100)
///     .redo_policy(RedoPolicy::Clear)
///     .connect(LogSlot::new())
///     .build();
/// # wizard.apply(&mut targets, goblin, Spell::shrink());
/// ```
#[derive(Debug)]
pub struct Builder<C, S = ()> {
    actor: String,
    capacity: usize,
    limit: NonZeroUsize,
    policy: RedoPolicy,
    socket: Socket<S>,
    pd: PhantomData<C>,
}

impl<C, S> Builder<C, S> {
    /// Sets the name the invoker uses in signals.
    pub fn actor(mut self, actor: impl Into<String>) -> Builder<C, S> {
        self.actor = actor.into();
        self
    }

    /// Sets the initial capacity of the undo stack.
    pub fn capacity(mut self, capacity: usize) -> Builder<C, S> {
        self.capacity = capacity;
        self
    }

    /// Sets the maximum number of commands kept on the undo stack.
    ///
    /// # Panics
    /// Panics if `limit` is `0`.
    pub fn limit(mut self, limit: usize) -> Builder<C, S> {
        self.limit = NonZeroUsize::new(limit).expect("limit can not be `0`");
        self
    }

    /// Sets what happens to undone commands when a new one is applied.
    /// By default they are kept.
    pub fn redo_policy(mut self, policy: RedoPolicy) -> Builder<C, S> {
        self.policy = policy;
        self
    }

    /// Connects the slot.
    pub fn connect<T>(self, slot: T) -> Builder<C, T> {
        Builder {
            actor: self.actor,
            capacity: self.capacity,
            limit: self.limit,
            policy: self.policy,
            socket: Socket::new(slot),
            pd: PhantomData,
        }
    }

    /// Builds the invoker.
    pub fn build(self) -> Invoker<C, S> {
        Invoker {
            actor: self.actor,
            undo: VecDeque::with_capacity(self.capacity),
            redo: Vec::new(),
            limit: self.limit,
            policy: self.policy,
            socket: self.socket,
        }
    }
}

impl<C, S> Default for Builder<C, S> {
    fn default() -> Self {
        Builder {
            actor: String::from("Invoker"),
            capacity: 0,
            limit: NonZeroUsize::MAX,
            policy: RedoPolicy::default(),
            socket: Socket::default(),
            pd: PhantomData,
        }
    }
}
