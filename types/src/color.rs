//! Colors, color values and color targets.
//!
//! A color tags one fungible colored-coin asset. Values are fixed-point
//! integers in the asset's smallest unit; the color they belong to travels
//! with them so that amounts of different assets can never be summed by
//! accident.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Add;

/// Opaque color identifier. `ColorId::UNCOLORED` is the base currency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColorId(pub u32);

impl ColorId {
    pub const UNCOLORED: Self = Self(0);

    pub fn is_uncolored(&self) -> bool {
        *self == Self::UNCOLORED
    }
}

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A color definition: the registry-assigned id plus its descriptor string
/// (e.g. `epobc:<txid>:<outindex>:<height>`; empty for uncolored).
///
/// Two definitions are equal when their ids are equal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColorDefinition {
    id: ColorId,
    desc: String,
}

impl ColorDefinition {
    pub fn new(id: ColorId, desc: impl Into<String>) -> Self {
        Self {
            id,
            desc: desc.into(),
        }
    }

    pub fn uncolored() -> Self {
        Self::new(ColorId::UNCOLORED, "")
    }

    pub fn id(&self) -> ColorId {
        self.id
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    pub fn is_uncolored(&self) -> bool {
        self.id.is_uncolored()
    }
}

impl PartialEq for ColorDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ColorDefinition {}

impl Hash for ColorDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// An amount of one color, in the asset's smallest unit.
///
/// Change computations may compare values below zero, hence the signed
/// representation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorValue {
    colordef: ColorDefinition,
    value: i64,
}

impl ColorValue {
    pub fn new(colordef: ColorDefinition, value: i64) -> Self {
        Self { colordef, value }
    }

    pub fn zero(colordef: ColorDefinition) -> Self {
        Self::new(colordef, 0)
    }

    pub fn uncolored(value: i64) -> Self {
        Self::new(ColorDefinition::uncolored(), value)
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn color_id(&self) -> ColorId {
        self.colordef.id()
    }

    pub fn color_definition(&self) -> &ColorDefinition {
        &self.colordef
    }

    pub fn is_uncolored(&self) -> bool {
        self.colordef.is_uncolored()
    }

    /// Sum of two values of the same color. `None` when the colors differ
    /// or the sum overflows.
    pub fn checked_add(&self, other: &ColorValue) -> Option<ColorValue> {
        if self.color_id() != other.color_id() {
            return None;
        }
        self.value
            .checked_add(other.value)
            .map(|value| ColorValue::new(self.colordef.clone(), value))
    }
}

impl Add for ColorValue {
    type Output = Self;

    /// # Panics
    /// Panics when the two values carry different colors.
    fn add(self, rhs: Self) -> Self {
        assert_eq!(
            self.color_id(),
            rhs.color_id(),
            "cannot add color values of different colors"
        );
        Self::new(self.colordef, self.value + rhs.value)
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (color {})", self.value, self.color_id())
    }
}

/// A payment destination: output script plus the color value it must carry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTarget {
    script: Vec<u8>,
    value: ColorValue,
}

impl ColorTarget {
    pub fn new(script: Vec<u8>, value: ColorValue) -> Self {
        Self { script, value }
    }

    pub fn script(&self) -> &[u8] {
        &self.script
    }

    pub fn color_value(&self) -> &ColorValue {
        &self.value
    }

    pub fn value(&self) -> i64 {
        self.value.value()
    }

    pub fn color_id(&self) -> ColorId {
        self.value.color_id()
    }

    pub fn color_definition(&self) -> &ColorDefinition {
        self.value.color_definition()
    }
}
