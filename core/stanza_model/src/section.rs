//! Sections: named containers of variables.
//!
//! The global section has an empty name. A context may hold several sections
//! sharing one name; the evaluator disambiguates by position (first/last) or
//! by a key variable, so sections themselves impose no uniqueness.

use crate::variable::Variable;

/// A named (or unnamed, for the global section) container of variables.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Section {
    name: String,
    variables: Vec<Variable>,
}

impl Section {
    /// Create a named section.
    pub fn new(name: impl Into<String>) -> Self {
        Section {
            name: name.into(),
            variables: Vec::new(),
        }
    }

    /// Create the global (unnamed) section.
    pub fn global() -> Self {
        Section::default()
    }

    /// Returns `true` for the global section.
    pub fn is_global(&self) -> bool {
        self.name.is_empty()
    }

    /// The section's name; empty for the global section.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the section's name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Create a variable at the tail of the variable list and return it.
    pub fn add_variable(&mut self, name: impl Into<String>) -> &mut Variable {
        self.variables.push(Variable::new(name));
        // Just pushed, so the list is non-empty.
        let last = self.variables.len() - 1;
        &mut self.variables[last]
    }

    /// Remove the variable at `index`, freeing all of its values.
    pub fn remove_variable(&mut self, index: usize) -> Option<Variable> {
        if index < self.variables.len() {
            Some(self.variables.remove(index))
        } else {
            None
        }
    }

    /// Remove the first variable with the given name.
    pub fn remove_variable_named(&mut self, name: &str) -> Option<Variable> {
        let index = self.variables.iter().position(|v| v.name() == name)?;
        Some(self.variables.remove(index))
    }

    /// First variable with the given name.
    pub fn find_variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name() == name)
    }

    /// Mutable lookup of the first variable with the given name.
    pub fn find_variable_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.iter_mut().find(|v| v.name() == name)
    }

    /// Variables in creation order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Mutable access to the variable list.
    pub fn variables_mut(&mut self) -> &mut [Variable] {
        &mut self.variables
    }

    /// First variable, if any.
    pub fn first_variable(&self) -> Option<&Variable> {
        self.variables.first()
    }

    /// Last variable, if any.
    pub fn last_variable(&self) -> Option<&Variable> {
        self.variables.last()
    }
}
