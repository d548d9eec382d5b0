//! Reversible command execution with a two-stack undo-redo history.
//!
//! It is an implementation of the command pattern, where all modifications
//! of a [`Target`] are done by commands that know how to invert the changes
//! they apply. An [`Invoker`] executes commands and keeps them on two stacks:
//! the undo stack holds the commands that can be undone, and the redo stack
//! holds the commands that have been undone and can be reapplied.
//!
//! # Features
//!
//! * [`Command`] provides the base functionality for all commands.
//! * [`Spell`] is the closed set of built-in commands, made of a
//!   [`Replace`] command that exchanges a property with a captured value,
//!   and a [`Toggle`] command for the binary visibility flag.
//! * [`Invoker`] owns the history and is the only thing that mutates it.
//!   Whether a new command discards the undone ones is decided by its [`RedoPolicy`].
//! * Targets live in a [`Targets`] registry. Commands only remember a
//!   [`TargetId`], so they never keep a target alive.
//! * What the invoker does is reported through an injected [`Slot`].
//!   [`LogSlot`] forwards it to the [`log`] facade.
//! * Configurable display formatting of the history, with colors when the
//!   `colored` feature is enabled and timestamps when the `chrono` feature is enabled.
//!
//! # Examples
//!
//! ```
//! use spellcast::{Invoker, Size, Spell, Target, Targets, Visibility};
//!
//! let mut targets = Targets::new();
//! let goblin = targets.insert(Target::goblin());
//! let mut wizard = Invoker::builder().actor("Wizard").build();
//!
//! wizard.apply(&mut targets, goblin, Spell::shrink());
//! wizard.apply(&mut targets, goblin, Spell::invisibility());
//! assert_eq!(
//!     targets.get(goblin).unwrap().describe().to_string(),
//!     "Goblin, [size=small] [visibility=invisible]"
//! );
//!
//! wizard.undo_last(&mut targets);
//! wizard.undo_last(&mut targets);
//! assert_eq!(targets.get(goblin).unwrap().size(), Size::Normal);
//!
//! wizard.redo_last(&mut targets);
//! wizard.redo_last(&mut targets);
//! assert_eq!(targets.get(goblin).unwrap().visibility(), Visibility::Invisible);
//! ```

#![deny(missing_docs)]

extern crate alloc;

mod command;
mod entry;
mod format;
pub mod invoker;
mod socket;
mod target;

pub use self::{
    command::{Command, Replace, Spell, Toggle},
    entry::Entry,
    invoker::{Invoker, RedoPolicy},
    socket::{LogSlot, Signal, Slot},
    target::{Description, Property, Size, Target, TargetId, Targets, Value, Visibility},
};

/// The error type for values given by name.
///
/// Typed values can always be assigned, so this is only returned by the
/// string-facing parts of the API.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The name does not match any property.
    #[error("unknown property `{0}`")]
    UnknownProperty(String),
    /// The value is not one of the legal values of the property.
    #[error("invalid value `{value}` for property `{property}`")]
    InvalidPropertyValue {
        /// The property the value was meant for.
        property: Property,
        /// The rejected value.
        value: String,
    },
}

/// A specialized Result type for operations that can fail.
pub type Result<T, E = Error> = core::result::Result<T, E>;
