//! Module used to report what the invoker does.

use core::fmt::{self, Display, Formatter};
use core::mem;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{Sender, SyncSender};

/// Slot wrapper that adds some additional functionality.
#[derive(Clone, Debug)]
pub(crate) struct Socket<S>(Option<S>);

impl<S> Socket<S> {
    pub const fn new(slot: S) -> Socket<S> {
        Socket(Some(slot))
    }

    pub fn connect(&mut self, slot: Option<S>) -> Option<S> {
        mem::replace(&mut self.0, slot)
    }

    pub fn disconnect(&mut self) -> Option<S> {
        self.0.take()
    }
}

impl<S> Default for Socket<S> {
    fn default() -> Self {
        Socket(None)
    }
}

impl<S: Slot> Socket<S> {
    pub fn emit(&mut self, signal: impl FnOnce() -> Signal) {
        if let Some(slot) = &mut self.0 {
            slot.on_emit(signal());
        }
    }

    pub fn emit_if(&mut self, cond: bool, signal: impl FnOnce() -> Signal) {
        if cond {
            self.emit(signal);
        }
    }
}

/// The `Signal` describes what the invoker just did.
///
/// See [`Slot`] for more information.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Signal {
    /// Emitted when a command has been executed against a target.
    Cast {
        /// Name of the invoker.
        actor: String,
        /// Label of the command.
        command: String,
        /// Name of the target.
        target: String,
    },
    /// Emitted when a command has been undone.
    Undone {
        /// Name of the invoker.
        actor: String,
        /// Label of the command.
        command: String,
    },
    /// Emitted when a command has been redone.
    Redone {
        /// Name of the invoker.
        actor: String,
        /// Label of the command.
        command: String,
    },
    /// Emitted when the invokers ability to undo has changed.
    Undo(bool),
    /// Emitted when the invokers ability to redo has changed.
    Redo(bool),
}

impl Display for Signal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Signal::Cast {
                actor,
                command,
                target,
            } => write!(f, "{actor} casts {command} at {target}"),
            Signal::Undone { actor, command } => write!(f, "{actor} undoes {command}"),
            Signal::Redone { actor, command } => write!(f, "{actor} redoes {command}"),
            Signal::Undo(can) => write!(f, "can undo: {can}"),
            Signal::Redo(can) => write!(f, "can redo: {can}"),
        }
    }
}

/// Use this to handle signals emitted.
///
/// This allows you to observe the invoker without any process-wide state.
///
/// # Examples
/// ```
/// # use std::sync::mpsc;
/// # use spellcast::{Invoker, Signal, Spell, Target, Targets};
/// let (sender, receiver) = mpsc::channel::<Signal>();
/// let mut iter = receiver.try_iter();
///
/// let mut targets = Targets::new();
/// let goblin = targets.insert(Target::goblin());
/// let mut wizard = Invoker::builder().actor("Wizard").connect(sender).build();
///
/// wizard.apply(&mut targets, goblin, Spell::shrink());
/// assert_eq!(
///     iter.next().map(|s| s.to_string()),
///     Some("Wizard casts Shrink spell at Goblin".to_string())
/// );
/// assert_eq!(iter.next(), Some(Signal::Undo(true)));
/// assert_eq!(iter.next(), None);
///
/// wizard.undo_last(&mut targets);
/// assert_eq!(
///     iter.next().map(|s| s.to_string()),
///     Some("Wizard undoes Shrink spell".to_string())
/// );
/// assert_eq!(iter.next(), Some(Signal::Undo(false)));
/// assert_eq!(iter.next(), Some(Signal::Redo(true)));
/// assert_eq!(iter.next(), None);
/// ```
pub trait Slot {
    /// Receives a signal that describes what the invoker did.
    fn on_emit(&mut self, signal: Signal);
}

impl Slot for () {
    fn on_emit(&mut self, _: Signal) {}
}

impl<F: FnMut(Signal)> Slot for F {
    fn on_emit(&mut self, signal: Signal) {
        self(signal)
    }
}

impl Slot for Sender<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        self.send(signal).ok();
    }
}

impl Slot for SyncSender<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        self.send(signal).ok();
    }
}

/// Slot that forwards signals to the [`log`] facade.
///
/// Casts, undos, and redos are logged at `info`. Changes to the ability
/// to undo or redo are logged at `debug`.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogSlot {
    target: Option<&'static str>,
}

impl LogSlot {
    /// Returns a slot logging under the `spellcast` log target.
    pub const fn new() -> LogSlot {
        LogSlot { target: None }
    }

    /// Returns a slot logging under a custom log target.
    pub const fn with_target(target: &'static str) -> LogSlot {
        LogSlot {
            target: Some(target),
        }
    }
}

impl Slot for LogSlot {
    fn on_emit(&mut self, signal: Signal) {
        let target = self.target.unwrap_or(env!("CARGO_PKG_NAME"));
        match signal {
            Signal::Undo(_) | Signal::Redo(_) => log::debug!(target: target, "{signal}"),
            _ => log::info!(target: target, "{signal}"),
        }
    }
}
