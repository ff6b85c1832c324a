use crate::error::RuntimeError;

#[derive(Debug, Clone, PartialEq)]
/// A user-defined variable: a case-sensitive name bound to a numeric value.
pub struct UserVar {
    name:  String,
    value: f64,
}

impl UserVar {
    /// The variable's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The variable's current value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }
}

#[derive(Debug, Default)]
/// The mutable mapping from variable name to value for one session.
///
/// Lookups are by exact, case-sensitive match and search the backing vector
/// linearly. The store is owned by the session loop and handed by reference
/// into the token stream and evaluator; all effects are visible to subsequent
/// lookups within the same statement.
///
/// # Example
/// ```
/// use reckon::interpreter::vars::VarStore;
///
/// let mut vars = VarStore::new();
/// vars.declare_zero("x", 1).unwrap();
/// assert_eq!(vars.get("x", 1).unwrap(), 0.0);
///
/// // redeclaring the same name is the one declaration error
/// assert!(vars.declare_zero("x", 1).is_err());
///
/// // assignment overwrites and reports the previous value
/// assert_eq!(vars.assign("x", 5.0), Some(0.0));
/// assert_eq!(vars.assign("y", 2.0), None);
/// ```
pub struct VarStore {
    vars: Vec<UserVar>,
}

impl VarStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when a variable with exactly this name exists.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns the variable's current value.
    ///
    /// # Errors
    /// `RuntimeError::VariableNotFound` if no such variable exists.
    pub fn get(&self, name: &str, line: usize) -> Result<f64, RuntimeError> {
        match self.position(name) {
            Some(index) => Ok(self.vars[index].value),
            None => Err(RuntimeError::VariableNotFound { name: name.to_string(),
                                                         line }),
        }
    }

    /// Creates the variable with value 0.
    ///
    /// # Errors
    /// `RuntimeError::DuplicateDeclaration` if the name is already present.
    pub fn declare_zero(&mut self, name: &str, line: usize) -> Result<(), RuntimeError> {
        if self.exists(name) {
            return Err(RuntimeError::DuplicateDeclaration { name: name.to_string(),
                                                            line });
        }
        self.vars.push(UserVar { name:  name.to_string(),
                                 value: 0.0, });
        Ok(())
    }

    /// Creates the variable or overwrites its value in place.
    ///
    /// Returns the previous value when the variable already existed, for
    /// reporting.
    pub fn assign(&mut self, name: &str, value: f64) -> Option<f64> {
        match self.position(name) {
            Some(index) => {
                let previous = self.vars[index].value;
                self.vars[index].value = value;
                Some(previous)
            },
            None => {
                self.vars.push(UserVar { name: name.to_string(),
                                         value, });
                None
            },
        }
    }

    /// Removes one variable.
    ///
    /// # Errors
    /// `RuntimeError::VariableNotFound` if no such variable exists.
    pub fn delete(&mut self, name: &str, line: usize) -> Result<(), RuntimeError> {
        match self.position(name) {
            Some(index) => {
                self.vars.remove(index);
                Ok(())
            },
            None => Err(RuntimeError::VariableNotFound { name: name.to_string(),
                                                         line }),
        }
    }

    /// Removes every variable.
    pub fn delete_all(&mut self) {
        self.vars.clear();
    }

    /// The number of variables currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// True when no variables are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterates the variables in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &UserVar> {
        self.vars.iter()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.vars.iter().position(|var| var.name == name)
    }
}
