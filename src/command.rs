//! Commands and the closed set of built-in spells.

use crate::{Size, TargetId, Targets, Value, Visibility};
use alloc::borrow::Cow;
use core::fmt::{self, Display, Formatter};

/// Base functionality for all commands.
///
/// A command binds to one target when it is executed and remembers its
/// handle, so [`undo`](Command::undo) and [`redo`](Command::redo) only need
/// the registry. Calling either on a command that was never executed, or
/// whose target has been removed, does nothing.
pub trait Command: Display {
    /// Binds the command to `id`, stores whatever is needed to invert the
    /// mutation, and performs it.
    ///
    /// Should be called at most once per command.
    fn execute(&mut self, targets: &mut Targets, id: TargetId);

    /// Inverts the most recent mutation done by [`execute`](Command::execute)
    /// or [`redo`](Command::redo).
    fn undo(&mut self, targets: &mut Targets);

    /// Reapplies the mutation.
    fn redo(&mut self, targets: &mut Targets);

    /// Returns the handle of the target the command was executed against.
    fn target(&self) -> Option<TargetId>;
}

impl<C: Command + ?Sized> Command for Box<C> {
    fn execute(&mut self, targets: &mut Targets, id: TargetId) {
        (**self).execute(targets, id)
    }

    fn undo(&mut self, targets: &mut Targets) {
        (**self).undo(targets)
    }

    fn redo(&mut self, targets: &mut Targets) {
        (**self).redo(targets)
    }

    fn target(&self) -> Option<TargetId> {
        (**self).target()
    }
}

/// Overwrites a property with a literal value.
///
/// Undo exchanges the captured value with whatever the target currently
/// holds, and redo performs the very same exchange. Undoing twice in a row
/// therefore puts the property back where [`execute`](Command::execute) left it.
///
/// # Examples
/// ```
/// # use spellcast::{Command, Replace, Size, Target, Targets};
/// let mut targets = Targets::new();
/// let goblin = targets.insert(Target::goblin());
/// let mut shrink = Replace::new("Shrink spell", Size::Small);
/// shrink.execute(&mut targets, goblin);
/// assert_eq!(targets.get(goblin).unwrap().size(), Size::Small);
/// shrink.undo(&mut targets);
/// assert_eq!(targets.get(goblin).unwrap().size(), Size::Normal);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Replace {
    label: Cow<'static, str>,
    value: Value,
    previous: Option<Value>,
    target: Option<TargetId>,
}

impl Replace {
    /// Returns an unexecuted command that sets the property of `value` to `value`.
    pub fn new(label: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Replace {
        Replace {
            label: label.into(),
            value: value.into(),
            previous: None,
            target: None,
        }
    }

    /// Returns the value written on execute.
    pub fn value(&self) -> Value {
        self.value
    }

    /// Returns the value the next exchange will write back, if executed.
    pub fn previous(&self) -> Option<Value> {
        self.previous
    }

    fn exchange(&mut self, targets: &mut Targets) {
        let (Some(previous), Some(id)) = (self.previous, self.target) else {
            return;
        };
        if let Some(target) = targets.get_mut(id) {
            let current = target.get(previous.property());
            target.set(previous);
            self.previous = Some(current);
        }
    }
}

impl Command for Replace {
    fn execute(&mut self, targets: &mut Targets, id: TargetId) {
        if let Some(target) = targets.get_mut(id) {
            self.previous = Some(target.get(self.value.property()));
            target.set(self.value);
            self.target = Some(id);
        }
    }

    fn undo(&mut self, targets: &mut Targets) {
        self.exchange(targets);
    }

    fn redo(&mut self, targets: &mut Targets) {
        self.exchange(targets);
    }

    fn target(&self) -> Option<TargetId> {
        self.target
    }
}

impl Display for Replace {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Sets the binary visibility flag to a fixed value.
///
/// Since the flag only has two values, the command does not capture the
/// prior state: undo writes the opposite of the fixed value and redo
/// writes the fixed value again.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Toggle {
    label: Cow<'static, str>,
    on: Visibility,
    target: Option<TargetId>,
}

impl Toggle {
    /// Returns an unexecuted command that sets the visibility to `on`.
    pub fn new(label: impl Into<Cow<'static, str>>, on: Visibility) -> Toggle {
        Toggle {
            label: label.into(),
            on,
            target: None,
        }
    }

    /// Returns the value written on execute and redo.
    pub fn on(&self) -> Visibility {
        self.on
    }

    fn write(&self, targets: &mut Targets, visibility: Visibility) {
        let Some(id) = self.target else {
            return;
        };
        if let Some(target) = targets.get_mut(id) {
            target.set(visibility);
        }
    }
}

impl Command for Toggle {
    fn execute(&mut self, targets: &mut Targets, id: TargetId) {
        if let Some(target) = targets.get_mut(id) {
            target.set(self.on);
            self.target = Some(id);
        }
    }

    fn undo(&mut self, targets: &mut Targets) {
        self.write(targets, self.on.opposite());
    }

    fn redo(&mut self, targets: &mut Targets) {
        self.write(targets, self.on);
    }

    fn target(&self) -> Option<TargetId> {
        self.target
    }
}

impl Display for Toggle {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// The closed set of built-in commands.
///
/// This is the command type an [`Invoker`](crate::Invoker) uses by default.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Spell {
    /// See [`Replace`].
    Replace(Replace),
    /// See [`Toggle`].
    Toggle(Toggle),
}

impl Spell {
    /// Sets the size to [`Size::Small`].
    pub fn shrink() -> Spell {
        Spell::Replace(Replace::new("Shrink spell", Size::Small))
    }

    /// Sets the size to [`Size::Large`].
    pub fn enlarge() -> Spell {
        Spell::Replace(Replace::new("Enlarge spell", Size::Large))
    }

    /// Sets the visibility to [`Visibility::Invisible`].
    pub fn invisibility() -> Spell {
        Spell::Toggle(Toggle::new("Invisibility spell", Visibility::Invisible))
    }
}

impl Command for Spell {
    fn execute(&mut self, targets: &mut Targets, id: TargetId) {
        match self {
            Spell::Replace(replace) => replace.execute(targets, id),
            Spell::Toggle(toggle) => toggle.execute(targets, id),
        }
    }

    fn undo(&mut self, targets: &mut Targets) {
        match self {
            Spell::Replace(replace) => replace.undo(targets),
            Spell::Toggle(toggle) => toggle.undo(targets),
        }
    }

    fn redo(&mut self, targets: &mut Targets) {
        match self {
            Spell::Replace(replace) => replace.redo(targets),
            Spell::Toggle(toggle) => toggle.redo(targets),
        }
    }

    fn target(&self) -> Option<TargetId> {
        match self {
            Spell::Replace(replace) => replace.target(),
            Spell::Toggle(toggle) => toggle.target(),
        }
    }
}

impl From<Replace> for Spell {
    fn from(replace: Replace) -> Self {
        Spell::Replace(replace)
    }
}

impl From<Toggle> for Spell {
    fn from(toggle: Toggle) -> Self {
        Spell::Toggle(toggle)
    }
}

impl Display for Spell {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Spell::Replace(replace) => Display::fmt(replace, f),
            Spell::Toggle(toggle) => Display::fmt(toggle, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Property, Target};

    fn setup() -> (Targets, TargetId) {
        let mut targets = Targets::new();
        let goblin = targets.insert(Target::goblin());
        (targets, goblin)
    }

    fn size(targets: &Targets, id: TargetId) -> Size {
        targets.get(id).unwrap().size()
    }

    #[test]
    fn replace_exchange() {
        let (mut targets, goblin) = setup();
        let mut shrink = Spell::shrink();
        shrink.execute(&mut targets, goblin);
        assert_eq!(size(&targets, goblin), Size::Small);
        shrink.undo(&mut targets);
        assert_eq!(size(&targets, goblin), Size::Normal);
        shrink.undo(&mut targets);
        assert_eq!(size(&targets, goblin), Size::Small);
        shrink.redo(&mut targets);
        assert_eq!(size(&targets, goblin), Size::Normal);
    }

    #[test]
    fn replace_sees_later_changes() {
        let (mut targets, goblin) = setup();
        let mut shrink = Replace::new("shrink", Size::Small);
        shrink.execute(&mut targets, goblin);
        targets.get_mut(goblin).unwrap().set(Size::Large);
        shrink.undo(&mut targets);
        assert_eq!(size(&targets, goblin), Size::Normal);
        assert_eq!(shrink.previous(), Some(Value::Size(Size::Large)));
        shrink.redo(&mut targets);
        assert_eq!(size(&targets, goblin), Size::Large);
    }

    #[test]
    fn toggle() {
        let (mut targets, goblin) = setup();
        let mut invisibility = Spell::invisibility();
        invisibility.execute(&mut targets, goblin);
        let after_execute = targets.get(goblin).unwrap().describe();
        assert_eq!(
            after_execute.get(Property::Visibility),
            Some(Value::Visibility(Visibility::Invisible))
        );
        invisibility.undo(&mut targets);
        assert_eq!(
            targets.get(goblin).unwrap().visibility(),
            Visibility::Visible
        );
        invisibility.redo(&mut targets);
        assert_eq!(targets.get(goblin).unwrap().describe(), after_execute);
    }

    #[test]
    fn unexecuted_is_inert() {
        let (mut targets, goblin) = setup();
        let before = targets.get(goblin).unwrap().clone();
        for mut spell in [Spell::shrink(), Spell::enlarge(), Spell::invisibility()] {
            spell.undo(&mut targets);
            spell.redo(&mut targets);
            assert_eq!(spell.target(), None);
        }
        assert_eq!(targets.get(goblin), Some(&before));
    }

    #[test]
    fn removed_target_is_inert() {
        let (mut targets, goblin) = setup();
        let mut enlarge = Spell::enlarge();
        enlarge.execute(&mut targets, goblin);
        assert_eq!(enlarge.target(), Some(goblin));
        let removed = targets.remove(goblin).unwrap();
        enlarge.undo(&mut targets);
        enlarge.redo(&mut targets);
        assert_eq!(removed.size(), Size::Large);
        assert!(targets.is_empty());
    }

    #[test]
    fn boxed() {
        let (mut targets, goblin) = setup();
        let mut command: Box<dyn Command> = Box::new(Spell::shrink());
        command.execute(&mut targets, goblin);
        assert_eq!(command.to_string(), "Shrink spell");
        command.undo(&mut targets);
        assert_eq!(size(&targets, goblin), Size::Normal);
    }
}
