//! The invoker and its two history stacks.

mod builder;
mod display;

pub use builder::Builder;
pub use display::Display;

use crate::socket::Socket;
use crate::{Command, Entry, Signal, Slot, Spell, TargetId, Targets};
use alloc::collections::VecDeque;
use core::fmt;
use core::num::NonZeroUsize;

/// Decides what happens to the redo stack when a new command is applied.
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq)]
pub enum RedoPolicy {
    /// Undone commands stay redoable after a new command is applied,
    /// even though the target has since moved on.
    #[default]
    Keep,
    /// Applying a command discards every undone command.
    Clear,
}

/// Applies commands to targets and owns the undo and redo stacks.
///
/// The invoker is the only thing that moves commands between the stacks.
/// [`apply`](Invoker::apply) pushes onto the undo stack,
/// [`undo_last`](Invoker::undo_last) moves the top of the undo stack to the
/// redo stack and [`redo_last`](Invoker::redo_last) moves it back.
///
/// The invoker is not synchronized. A host that shares it between threads
/// must guard it and the [`Targets`] it operates on with one lock.
///
/// # Examples
/// ```
/// # use spellcast::{Invoker, Size, Spell, Target, Targets, Visibility};
/// let mut targets = Targets::new();
/// let goblin = targets.insert(Target::goblin());
/// let mut wizard = Invoker::new();
///
/// wizard.apply(&mut targets, goblin, Spell::shrink());
/// wizard.apply(&mut targets, goblin, Spell::invisibility());
/// assert_eq!(targets.get(goblin).unwrap().size(), Size::Small);
/// assert_eq!(targets.get(goblin).unwrap().visibility(), Visibility::Invisible);
///
/// wizard.undo_last(&mut targets);
/// wizard.undo_last(&mut targets);
/// assert_eq!(targets.get(goblin), Some(&Target::goblin()));
///
/// wizard.redo_last(&mut targets);
/// wizard.redo_last(&mut targets);
/// assert_eq!(targets.get(goblin).unwrap().size(), Size::Small);
/// assert_eq!(targets.get(goblin).unwrap().visibility(), Visibility::Invisible);
/// ```
#[derive(Clone)]
pub struct Invoker<C = Spell, S = ()> {
    actor: String,
    undo: VecDeque<Entry<C>>,
    redo: Vec<Entry<C>>,
    limit: NonZeroUsize,
    policy: RedoPolicy,
    socket: Socket<S>,
}

impl<C> Invoker<C> {
    /// Returns a new invoker.
    pub fn new() -> Invoker<C> {
        Builder::default().build()
    }

    /// Returns a builder for an invoker.
    pub fn builder() -> Builder<C, ()> {
        Builder::default()
    }
}

impl<C, S> Invoker<C, S> {
    /// Returns the name used for the invoker in signals.
    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Returns the maximum number of commands kept on the undo stack.
    pub fn limit(&self) -> usize {
        self.limit.get()
    }

    /// Returns the redo policy.
    pub fn redo_policy(&self) -> RedoPolicy {
        self.policy
    }

    /// Returns the number of commands that can be undone.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Returns the number of commands that can be redone.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Returns `true` if both stacks are empty.
    pub fn is_empty(&self) -> bool {
        self.undo.is_empty() && self.redo.is_empty()
    }

    /// Returns `true` if the invoker can undo.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Returns `true` if the invoker can redo.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Returns an iterator over the undo stack, from the next command to undo
    /// down to the oldest one.
    pub fn undo_entries(&self) -> impl Iterator<Item = &Entry<C>> {
        self.undo.iter().rev()
    }

    /// Returns an iterator over the redo stack, from the next command to redo
    /// down to the first one undone.
    pub fn redo_entries(&self) -> impl Iterator<Item = &Entry<C>> {
        self.redo.iter().rev()
    }

    /// Sets how the signal should be handled when the state changes.
    ///
    /// The previous slot is returned if it exists.
    pub fn connect(&mut self, slot: S) -> Option<S> {
        self.socket.connect(Some(slot))
    }

    /// Removes and returns the slot if it exists.
    pub fn disconnect(&mut self) -> Option<S> {
        self.socket.disconnect()
    }

    /// Returns a structure for configurable formatting of the invoker.
    pub fn display(&self) -> Display<'_, C, S> {
        Display::from(self)
    }
}

impl<C: Command, S: Slot> Invoker<C, S> {
    /// Executes `command` against the target behind `id` and pushes it on
    /// the undo stack.
    ///
    /// The redo stack is only touched if the policy is [`RedoPolicy::Clear`].
    /// If the undo stack is full, the oldest command is dropped.
    ///
    /// Returns `false` without doing anything if `id` does not resolve to a
    /// target, so the command is neither recorded nor signalled.
    pub fn apply(&mut self, targets: &mut Targets, id: TargetId, mut command: C) -> bool {
        let Some(target) = targets.get(id) else {
            return false;
        };
        let could_undo = self.can_undo();
        let could_redo = self.can_redo();
        let actor = &self.actor;
        self.socket.emit(|| Signal::Cast {
            actor: actor.clone(),
            command: command.to_string(),
            target: target.name().to_string(),
        });
        command.execute(targets, id);
        if self.policy == RedoPolicy::Clear {
            self.redo.clear();
        }
        // If limit is reached, pop off the first command.
        if self.undo.len() == self.limit() {
            self.undo.pop_front();
        }
        self.undo.push_back(Entry::from(command));
        self.socket
            .emit_if(could_redo && !self.can_redo(), || Signal::Redo(false));
        self.socket.emit_if(!could_undo, || Signal::Undo(true));
        true
    }

    /// Undoes the most recently applied command that has not been undone yet
    /// and moves it to the redo stack.
    ///
    /// Returns `false` without doing anything if the undo stack is empty.
    pub fn undo_last(&mut self, targets: &mut Targets) -> bool {
        let Some(mut entry) = self.undo.pop_back() else {
            return false;
        };
        let could_redo = self.can_redo();
        let actor = &self.actor;
        self.socket.emit(|| Signal::Undone {
            actor: actor.clone(),
            command: entry.to_string(),
        });
        entry.get_mut().undo(targets);
        self.redo.push(entry);
        self.socket.emit_if(!self.can_undo(), || Signal::Undo(false));
        self.socket.emit_if(!could_redo, || Signal::Redo(true));
        true
    }

    /// Redoes the most recently undone command and moves it back to the
    /// undo stack.
    ///
    /// Returns `false` without doing anything if the redo stack is empty.
    pub fn redo_last(&mut self, targets: &mut Targets) -> bool {
        let Some(mut entry) = self.redo.pop() else {
            return false;
        };
        let could_undo = self.can_undo();
        let actor = &self.actor;
        self.socket.emit(|| Signal::Redone {
            actor: actor.clone(),
            command: entry.to_string(),
        });
        entry.get_mut().redo(targets);
        if self.undo.len() == self.limit() {
            self.undo.pop_front();
        }
        self.undo.push_back(entry);
        self.socket.emit_if(!self.can_redo(), || Signal::Redo(false));
        self.socket.emit_if(!could_undo, || Signal::Undo(true));
        true
    }

    /// Removes all commands from both stacks without undoing them.
    ///
    /// The removed commands are returned, undo stack first.
    pub fn clear(&mut self) -> Vec<C> {
        let could_undo = self.can_undo();
        let could_redo = self.can_redo();
        let removed = self
            .undo
            .drain(..)
            .chain(self.redo.drain(..))
            .map(Entry::into_command)
            .collect();
        self.socket.emit_if(could_undo, || Signal::Undo(false));
        self.socket.emit_if(could_redo, || Signal::Redo(false));
        removed
    }
}

impl<C: ToString, S> Invoker<C, S> {
    /// Returns the label of the command which will be undone
    /// in the next call to [`undo_last`](Invoker::undo_last).
    pub fn undo_text(&self) -> Option<String> {
        self.undo.back().map(|e| e.get().to_string())
    }

    /// Returns the label of the command which will be redone
    /// in the next call to [`redo_last`](Invoker::redo_last).
    pub fn redo_text(&self) -> Option<String> {
        self.redo.last().map(|e| e.get().to_string())
    }
}

impl<C> Default for Invoker<C> {
    fn default() -> Invoker<C> {
        Invoker::new()
    }
}

impl<C: fmt::Debug, S> fmt::Debug for Invoker<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Invoker")
            .field("actor", &self.actor)
            .field("undo", &self.undo)
            .field("redo", &self.redo)
            .field("limit", &self.limit)
            .field("policy", &self.policy)
            .finish()
    }
}
