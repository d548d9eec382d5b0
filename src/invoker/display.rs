use crate::format::Format;
use crate::{Entry, Invoker};
use core::fmt::{self, Write};

/// Configurable display formatting for the [`Invoker`].
///
/// The history is listed as a timeline, newest position first. Applied
/// commands are numbered from `1` upwards, undone commands continue the
/// numbering in the order they would be redone, and position `0` is the
/// state before anything was applied.
///
/// # Examples
/// ```
/// # use spellcast::{Invoker, Spell, Target, Targets};
/// let mut targets = Targets::new();
/// let goblin = targets.insert(Target::goblin());
/// let mut wizard = Invoker::new();
/// wizard.apply(&mut targets, goblin, Spell::shrink());
/// wizard.apply(&mut targets, goblin, Spell::invisibility());
/// wizard.undo_last(&mut targets);
///
/// let mut display = wizard.display();
/// display.detailed(false);
/// # #[cfg(feature = "colored")]
/// # display.colored(false);
/// assert_eq!(
///     display.to_string(),
///     "2 Invisibility spell\n1 [HEAD] Shrink spell\n0"
/// );
/// ```
pub struct Display<'a, C, S> {
    invoker: &'a Invoker<C, S>,
    format: Format,
}

impl<C, S> Display<'_, C, S> {
    /// Show colored output (on by default).
    ///
    /// Requires the `colored` feature to be enabled.
    #[cfg(feature = "colored")]
    pub fn colored(&mut self, on: bool) -> &mut Self {
        self.format.colored = on;
        self
    }

    /// Show detailed output (on by default).
    pub fn detailed(&mut self, on: bool) -> &mut Self {
        self.format.detailed = on;
        self
    }

    /// Show the current position in the output (on by default).
    pub fn head(&mut self, on: bool) -> &mut Self {
        self.format.head = on;
        self
    }
}

impl<C: fmt::Display, S> Display<'_, C, S> {
    fn fmt_list(&self, f: &mut fmt::Formatter, at: usize, entry: Option<&Entry<C>>) -> fmt::Result {
        let head = self.invoker.undo_len();
        self.format.position(f, at, at > head)?;

        #[cfg(feature = "chrono")]
        if let Some(entry) = entry {
            if self.format.detailed {
                self.format.timestamp(f, &entry.timestamp())?;
            }
        }

        self.format.labels(f, at, head)?;

        if let Some(entry) = entry {
            if self.format.detailed {
                writeln!(f)?;
                self.format.message(f, entry)?;
            } else {
                self.format.separator(f)?;
                self.format.message(f, entry)?;
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}

impl<'a, C, S> From<&'a Invoker<C, S>> for Display<'a, C, S> {
    fn from(invoker: &'a Invoker<C, S>) -> Self {
        Display {
            invoker,
            format: Format::default(),
        }
    }
}

impl<C: fmt::Display, S> fmt::Display for Display<'_, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let head = self.invoker.undo_len();
        // The bottom of the redo stack is the furthest ahead of the head.
        let redo = self.invoker.redo_entries().collect::<Vec<_>>();
        for (i, &entry) in redo.iter().enumerate().rev() {
            self.fmt_list(f, head + i + 1, Some(entry))?;
        }
        for (i, entry) in self.invoker.undo_entries().enumerate() {
            self.fmt_list(f, head - i, Some(entry))?;
        }
        self.fmt_list(f, 0, None)
    }
}
