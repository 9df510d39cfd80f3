//! The built, runnable program.

use std::fmt;

use crate::node::Node;
use crate::vars::VarTable;

/// A successfully parsed program: the root node and its variable table.
///
/// Structurally immutable after parsing. Running mutates only the variable
/// table's runtime slots and whatever the host context exposes, so a program
/// may run any number of times, against the same context or different ones.
/// Runtime variable values persist across runs: a second run overwrites them
/// as its assignment statements execute, it does not start from a cleared
/// table. Use [`Program::fresh`] when run isolation is wanted.
pub struct Program<C> {
    root: Node<C>,
    variables: VarTable,
}

impl<C> Program<C> {
    pub fn new(root: Node<C>, variables: VarTable) -> Self {
        Program { root, variables }
    }

    /// Execute the whole program against `context`, statements in source
    /// order.
    pub fn run(&mut self, context: &mut C) {
        let Program { root, variables } = self;
        root.evaluate(variables, context);
    }

    /// The variable table, for host inspection after a run.
    pub fn variables(&self) -> &VarTable {
        &self.variables
    }

    /// A new program sharing this one's AST but with every runtime variable
    /// slot cleared. Declared types are kept.
    pub fn fresh(&self) -> Program<C> {
        Program {
            root: self.root.clone(),
            variables: self.variables.cleared(),
        }
    }
}

impl<C> fmt::Debug for Program<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("root", &self.root)
            .field("variables", &self.variables)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::types::ValueType;
    use crate::value::{ScriptType, Value};

    #[derive(Default)]
    struct Counter {
        seen: Vec<i64>,
    }

    fn int_ty() -> ValueType {
        <i64 as ScriptType>::value_type()
    }

    /// `$a tick` where tick increments off the context, then `use $a`.
    fn counting_program() -> Program<Counter> {
        let tick = Node::apply(
            "tick",
            Some(int_ty()),
            Arc::new(|context: &mut Counter, _values| {
                let next = context.seen.len() as i64;
                Some(Value::atom(next))
            }),
            vec![],
        );
        let observe = Node::apply(
            "use",
            None,
            Arc::new(|context: &mut Counter, values: Vec<Value>| {
                let value = values[0].downcast_ref::<i64>().copied().unwrap();
                context.seen.push(value);
                None
            }),
            vec![Node::read_var("$a", Some(int_ty()))],
        );

        let mut variables = VarTable::new();
        variables.declare("$a", Some(int_ty()));
        Program::new(
            Node::root(vec![Node::assign("$a", tick), observe]),
            variables,
        )
    }

    #[test]
    fn values_persist_across_runs_and_are_recomputed() {
        let mut program = counting_program();
        let mut context = Counter::default();

        program.run(&mut context);
        assert_eq!(context.seen, vec![0]);
        assert_eq!(program.variables().load("$a").downcast::<i64>(), Some(0));

        program.run(&mut context);
        assert_eq!(context.seen, vec![0, 1]);
        assert_eq!(program.variables().load("$a").downcast::<i64>(), Some(1));
    }

    #[test]
    fn programs_move_across_threads() {
        fn assert_send<T: Send>() {}
        assert_send::<Program<Counter>>();
    }

    #[test]
    fn fresh_clears_runtime_slots_but_keeps_declarations() {
        let mut program = counting_program();
        let mut context = Counter::default();
        program.run(&mut context);

        let fresh = program.fresh();
        assert!(fresh.variables().is_declared("$a"));
        assert!(fresh.variables().slot("$a").unwrap().value().is_none());
        // the original keeps its slot
        assert!(program.variables().slot("$a").unwrap().value().is_some());
    }
}
