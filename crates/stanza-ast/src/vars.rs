//! Per-program variable table.
//!
//! One flat, insertion-ordered table per program. The declared type of each
//! name is fixed when its assignment statement is parsed (redefinition
//! overwrites it); the runtime slot is written by assignment execution and
//! read by variable-read nodes, and persists for the whole program lifetime,
//! including across repeated runs.

use indexmap::IndexMap;

use crate::types::ValueType;
use crate::value::Value;

/// One variable: parse-time declared type and runtime slot.
#[derive(Debug, Clone)]
pub struct VarSlot {
    declared: Option<ValueType>,
    value: Option<Value>,
}

impl VarSlot {
    /// Declared type; `None` when the variable was assigned a void
    /// expression.
    pub fn declared(&self) -> Option<&ValueType> {
        self.declared.as_ref()
    }

    /// Current runtime value; `None` until the assignment has executed.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

/// Mapping from variable name (including the `$`) to its slot.
#[derive(Debug, Clone, Default)]
pub struct VarTable {
    slots: IndexMap<String, VarSlot>,
}

impl VarTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `name` with the given type, overwriting any previous
    /// declaration of the same name.
    pub fn declare(&mut self, name: impl Into<String>, declared: Option<ValueType>) {
        self.slots.insert(
            name.into(),
            VarSlot {
                declared,
                value: None,
            },
        );
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    pub fn slot(&self, name: &str) -> Option<&VarSlot> {
        self.slots.get(name)
    }

    /// Write the runtime value of a declared variable.
    pub fn store(&mut self, name: &str, value: Option<Value>) {
        self.slots
            .get_mut(name)
            .expect("BUG: assignment to a variable missing from the table")
            .value = value;
    }

    /// Read the runtime value of a declared variable.
    ///
    /// Static scoping guarantees the assignment statement precedes every
    /// read in source order, so by evaluation time the slot is filled.
    pub fn load(&self, name: &str) -> Value {
        self.slots
            .get(name)
            .and_then(|slot| slot.value.clone())
            .expect("BUG: variable read before its assignment executed")
    }

    /// Variable names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Copy of the table with all runtime slots cleared; declared types are
    /// kept.
    pub fn cleared(&self) -> VarTable {
        VarTable {
            slots: self
                .slots
                .iter()
                .map(|(name, slot)| {
                    (
                        name.clone(),
                        VarSlot {
                            declared: slot.declared.clone(),
                            value: None,
                        },
                    )
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ScriptType;

    #[test]
    fn declare_store_load() {
        let mut vars = VarTable::new();
        vars.declare("$a", Some(<i64 as ScriptType>::value_type()));
        assert!(vars.is_declared("$a"));
        assert!(!vars.is_declared("$b"));

        vars.store("$a", Some(Value::atom(5_i64)));
        assert_eq!(vars.load("$a").downcast::<i64>(), Some(5));
    }

    #[test]
    fn redefinition_overwrites_declared_type_and_clears_the_slot() {
        let mut vars = VarTable::new();
        vars.declare("$a", Some(<i64 as ScriptType>::value_type()));
        vars.store("$a", Some(Value::atom(5_i64)));

        vars.declare("$a", Some(<String as ScriptType>::value_type()));
        let slot = vars.slot("$a").unwrap();
        assert_eq!(
            slot.declared().map(ToString::to_string),
            Some("string".to_string())
        );
        assert!(slot.value().is_none());
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn names_keep_declaration_order() {
        let mut vars = VarTable::new();
        vars.declare("$b", None);
        vars.declare("$a", None);
        assert_eq!(vars.names().collect::<Vec<_>>(), vec!["$b", "$a"]);
    }

    #[test]
    fn cleared_keeps_types_and_drops_values() {
        let mut vars = VarTable::new();
        vars.declare("$a", Some(<i64 as ScriptType>::value_type()));
        vars.store("$a", Some(Value::atom(5_i64)));

        let fresh = vars.cleared();
        assert!(fresh.is_declared("$a"));
        assert!(fresh.slot("$a").unwrap().value().is_none());
        assert!(fresh.slot("$a").unwrap().declared().is_some());
    }

    #[test]
    #[should_panic(expected = "BUG")]
    fn load_before_store_is_a_bug() {
        let mut vars = VarTable::new();
        vars.declare("$a", Some(<i64 as ScriptType>::value_type()));
        let _ = vars.load("$a");
    }
}
