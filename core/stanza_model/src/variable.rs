//! Named, typed, multi-value variables.

use thiserror::Error;

use crate::value::{Value, ValueType};

/// Error raised by data-model mutations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ModelError {
    /// A value's type does not match the variable's fixed type.
    #[error("value type {found} does not match variable type {expected}")]
    TypeMismatch {
        expected: ValueType,
        found: ValueType,
    },
}

/// A named slot holding zero or more values of one type.
///
/// The type is fixed by the first pushed value. Removing values never resets
/// it: a variable may legitimately be typed but empty (a cleared array).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Variable {
    name: String,
    value_type: ValueType,
    values: Vec<Value>,
}

impl Variable {
    /// Create an unassigned variable with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Variable {
            name: name.into(),
            value_type: ValueType::Invalid,
            values: Vec::new(),
        }
    }

    /// The variable's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the variable's name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The type fixed on first assignment, or `Invalid` if never assigned.
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Append a value at the tail of the value list.
    ///
    /// The first value fixes the variable's type; later values must match it.
    pub fn push_value(&mut self, value: Value) -> Result<(), ModelError> {
        let incoming = value.value_type();
        if self.value_type == ValueType::Invalid {
            self.value_type = incoming;
        } else if incoming != self.value_type {
            return Err(ModelError::TypeMismatch {
                expected: self.value_type,
                found: incoming,
            });
        }
        self.values.push(value);
        Ok(())
    }

    /// Remove and return the value at `index`, releasing its owned bytes.
    ///
    /// The variable stays typed even when its last value is removed.
    pub fn remove_value(&mut self, index: usize) -> Option<Value> {
        if index < self.values.len() {
            Some(self.values.remove(index))
        } else {
            None
        }
    }

    /// Drop every value. The type tag is retained.
    pub fn clear_values(&mut self) {
        self.values.clear();
    }

    /// Values in insertion order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// First value, if any.
    pub fn first_value(&self) -> Option<&Value> {
        self.values.first()
    }

    /// Last value, if any.
    pub fn last_value(&self) -> Option<&Value> {
        self.values.last()
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the value list is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
