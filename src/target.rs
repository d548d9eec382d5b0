//! The mutable entities commands operate on.

use crate::{Error, Result};
use arrayvec::ArrayVec;
use core::fmt::{self, Display, Formatter};
use core::str::FromStr;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The size category of a target.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq)]
pub enum Size {
    /// Smaller than usual.
    Small,
    /// The size every target starts with.
    #[default]
    Normal,
    /// Larger than usual.
    Large,
}

/// The visibility flag of a target.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq)]
pub enum Visibility {
    /// The visibility every target starts with.
    #[default]
    Visible,
    /// Hidden from view.
    Invisible,
}

impl Visibility {
    /// Returns the other value of the flag.
    pub fn opposite(self) -> Visibility {
        match self {
            Visibility::Visible => Visibility::Invisible,
            Visibility::Invisible => Visibility::Visible,
        }
    }
}

/// Names one of the independently settable properties of a [`Target`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum Property {
    /// See [`Size`].
    Size,
    /// See [`Visibility`].
    Visibility,
}

impl Property {
    /// Number of tracked properties.
    pub const COUNT: usize = 2;

    /// Every property in the order [`Target::describe`] reports them.
    pub const ALL: [Property; Property::COUNT] = [Property::Size, Property::Visibility];

    /// Returns the name of the property.
    pub fn name(self) -> &'static str {
        match self {
            Property::Size => "size",
            Property::Visibility => "visibility",
        }
    }

    /// Parses `value` as one of the legal values of this property.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPropertyValue`] if `value` is outside the closed set.
    pub fn parse_value(self, value: &str) -> Result<Value> {
        let parsed = match (self, value.trim().to_ascii_lowercase().as_str()) {
            (Property::Size, "small") => Value::Size(Size::Small),
            (Property::Size, "normal") => Value::Size(Size::Normal),
            (Property::Size, "large") => Value::Size(Size::Large),
            (Property::Visibility, "visible") => Value::Visibility(Visibility::Visible),
            (Property::Visibility, "invisible") => Value::Visibility(Visibility::Invisible),
            _ => {
                return Err(Error::InvalidPropertyValue {
                    property: self,
                    value: value.to_string(),
                })
            }
        };
        Ok(parsed)
    }
}

impl FromStr for Property {
    type Err = Error;

    fn from_str(s: &str) -> Result<Property> {
        match s.trim().to_ascii_lowercase().as_str() {
            "size" => Ok(Property::Size),
            "visibility" => Ok(Property::Visibility),
            _ => Err(Error::UnknownProperty(s.to_string())),
        }
    }
}

impl Display for Property {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A legal value of some property.
///
/// The variant decides which property the value belongs to, so a `Value`
/// can never be assigned to the wrong property.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum Value {
    /// A value of [`Property::Size`].
    Size(Size),
    /// A value of [`Property::Visibility`].
    Visibility(Visibility),
}

impl Value {
    /// Returns the property this value belongs to.
    pub fn property(self) -> Property {
        match self {
            Value::Size(_) => Property::Size,
            Value::Visibility(_) => Property::Visibility,
        }
    }
}

impl From<Size> for Value {
    fn from(size: Size) -> Self {
        Value::Size(size)
    }
}

impl From<Visibility> for Value {
    fn from(visibility: Visibility) -> Self {
        Value::Visibility(visibility)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let s = match self {
            Value::Size(Size::Small) => "small",
            Value::Size(Size::Normal) => "normal",
            Value::Size(Size::Large) => "large",
            Value::Visibility(Visibility::Visible) => "visible",
            Value::Visibility(Visibility::Invisible) => "invisible",
        };
        f.write_str(s)
    }
}

/// A mutable entity with a fixed set of named properties.
///
/// Every property always holds exactly one legal value.
///
/// # Examples
/// ```
/// # use spellcast::{Property, Size, Target, Value};
/// let mut goblin = Target::goblin();
/// assert_eq!(goblin.get(Property::Size), Value::Size(Size::Normal));
/// goblin.set(Size::Small);
/// assert_eq!(goblin.describe().to_string(), "Goblin, [size=small] [visibility=visible]");
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Target {
    name: String,
    size: Size,
    visibility: Visibility,
}

impl Target {
    /// Returns a new target with the default property values.
    pub fn new(name: impl Into<String>) -> Target {
        Target {
            name: name.into(),
            size: Size::default(),
            visibility: Visibility::default(),
        }
    }

    /// Returns a target named `Goblin`.
    pub fn goblin() -> Target {
        Target::new("Goblin")
    }

    /// Returns the name of the target.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the current visibility.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns the current value of `property`.
    pub fn get(&self, property: Property) -> Value {
        match property {
            Property::Size => Value::Size(self.size),
            Property::Visibility => Value::Visibility(self.visibility),
        }
    }

    /// Assigns `value` to the property it belongs to.
    ///
    /// Setting the value already held is a no-op.
    pub fn set(&mut self, value: impl Into<Value>) {
        match value.into() {
            Value::Size(size) => self.size = size,
            Value::Visibility(visibility) => self.visibility = visibility,
        }
    }

    /// Parses and assigns a value given by name.
    ///
    /// # Errors
    /// Returns [`Error::UnknownProperty`] or [`Error::InvalidPropertyValue`]
    /// and leaves the target untouched if either name is outside the closed sets.
    pub fn set_str(&mut self, property: &str, value: &str) -> Result<()> {
        let value = property.parse::<Property>()?.parse_value(value)?;
        self.set(value);
        Ok(())
    }

    /// Returns the current value of every tracked property.
    pub fn describe(&self) -> Description {
        Description {
            name: self.name.clone(),
            properties: Property::ALL.iter().map(|&p| (p, self.get(p))).collect(),
        }
    }
}

/// A snapshot of every property of a [`Target`].
///
/// Created by [`Target::describe`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Description {
    name: String,
    properties: ArrayVec<(Property, Value), { Property::COUNT }>,
}

impl Description {
    /// Returns the name of the described target.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value `property` held when the snapshot was taken.
    pub fn get(&self, property: Property) -> Option<Value> {
        self.properties
            .iter()
            .find(|(p, _)| *p == property)
            .map(|&(_, value)| value)
    }

    /// Returns an iterator over the described properties.
    pub fn iter(&self) -> impl Iterator<Item = (Property, Value)> + '_ {
        self.properties.iter().copied()
    }
}

impl Display for Description {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.name)?;
        for (i, (property, value)) in self.properties.iter().enumerate() {
            let sep = if i == 0 { ", " } else { " " };
            write!(f, "{sep}[{property}={value}]")?;
        }
        Ok(())
    }
}

/// A handle to a target stored in [`Targets`].
///
/// Commands remember the handle of the target they were executed against.
/// Holding a handle does not keep the target alive.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub struct TargetId(usize);

impl Display for TargetId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Registry owning the targets an invoker operates on.
///
/// Ids are never reused, so a stale handle can never resolve to a
/// target inserted after the one it was created for. The slot of a removed
/// target is not reclaimed either; the registry grows with every insert.
#[derive(Clone, Debug, Default)]
pub struct Targets {
    slots: Vec<Option<Target>>,
    len: usize,
}

impl Targets {
    /// Returns an empty registry.
    pub fn new() -> Targets {
        Targets::default()
    }

    /// Stores `target` and returns its handle.
    pub fn insert(&mut self, target: Target) -> TargetId {
        self.slots.push(Some(target));
        self.len += 1;
        TargetId(self.slots.len() - 1)
    }

    /// Removes and returns the target behind `id`.
    pub fn remove(&mut self, id: TargetId) -> Option<Target> {
        let target = self.slots.get_mut(id.0).and_then(Option::take)?;
        self.len -= 1;
        Some(target)
    }

    /// Returns a reference to the target behind `id`.
    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Returns a mutable reference to the target behind `id`.
    pub fn get_mut(&mut self, id: TargetId) -> Option<&mut Target> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Returns `true` if `id` resolves to a stored target.
    pub fn contains(&self, id: TargetId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the number of stored targets.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no targets are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the stored targets and their handles.
    pub fn iter(&self) -> impl Iterator<Item = (TargetId, &Target)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|t| (TargetId(i), t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let goblin = Target::goblin();
        assert_eq!(goblin.size(), Size::Normal);
        assert_eq!(goblin.visibility(), Visibility::Visible);
        assert_eq!(
            goblin.describe().to_string(),
            "Goblin, [size=normal] [visibility=visible]"
        );
    }

    #[test]
    fn set_same_value() {
        let mut goblin = Target::goblin();
        let before = goblin.clone();
        goblin.set(Size::Normal);
        assert_eq!(goblin, before);
    }

    #[test]
    fn set_str() {
        let mut goblin = Target::goblin();
        goblin.set_str("Size", " LARGE ").unwrap();
        assert_eq!(goblin.size(), Size::Large);

        let err = goblin.set_str("size", "invisible").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidPropertyValue {
                property: Property::Size,
                value: "invisible".to_string(),
            }
        );
        assert_eq!(err.to_string(), "invalid value `invisible` for property `size`");

        let err = goblin.set_str("colour", "red").unwrap_err();
        assert_eq!(err, Error::UnknownProperty("colour".to_string()));
        assert_eq!(goblin.size(), Size::Large);
    }

    #[test]
    fn description() {
        let mut goblin = Target::goblin();
        goblin.set(Visibility::Invisible);
        let description = goblin.describe();
        assert_eq!(description.name(), "Goblin");
        assert_eq!(
            description.get(Property::Visibility),
            Some(Value::Visibility(Visibility::Invisible))
        );
        assert_eq!(description.iter().count(), Property::COUNT);
    }

    #[test]
    fn stale_handles() {
        let mut targets = Targets::new();
        let a = targets.insert(Target::new("a"));
        assert_eq!(targets.remove(a).map(|t| t.name().to_string()), Some("a".into()));
        let b = targets.insert(Target::new("b"));
        assert_ne!(a, b);
        assert!(targets.get(a).is_none());
        assert_eq!(targets.get(b).map(Target::name), Some("b"));
        assert_eq!(targets.len(), 1);
    }

    #[test]
    fn len_counts_live_targets() {
        let mut targets = Targets::new();
        for _ in 0..3 {
            let id = targets.insert(Target::goblin());
            assert_eq!(targets.len(), 1);
            assert!(targets.remove(id).is_some());
            assert!(targets.remove(id).is_none());
            assert!(targets.is_empty());
        }
        let id = targets.insert(Target::goblin());
        targets.insert(Target::new("Troll"));
        assert_eq!(targets.len(), 2);
        assert!(targets.remove(TargetId(42)).is_none());
        assert_eq!(targets.len(), 2);
        assert_eq!(targets.iter().map(|(i, _)| i).next(), Some(id));
    }
}
