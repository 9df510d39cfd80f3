//! AST nodes and their evaluation.
//!
//! The parser builds nodes bottom-up; each node carries the result type
//! declared for it at parse time (`None` for statements) and is referenced
//! exactly once, by its parent. Evaluation is synchronous and ordered:
//! statements run in source order, operands and list elements strictly left
//! to right.

use std::fmt;
use std::sync::Arc;

use crate::types::ValueType;
use crate::value::Value;
use crate::vars::VarTable;

/// Adapted operator implementation: context plus already-evaluated operands
/// in, optional result out. Built by the registry at bind time.
pub type OpFn<C> = Arc<dyn Fn(&mut C, Vec<Value>) -> Option<Value> + Send + Sync>;

/// An AST node: declared result type plus the computation it defers.
pub struct Node<C> {
    ty: Option<ValueType>,
    kind: NodeKind<C>,
}

/// The node variants.
pub enum NodeKind<C> {
    /// A constant produced by a literal evaluator.
    Const(Value),
    /// A homogeneous list literal; empty for the untyped-empty marker.
    List(Vec<Node<C>>),
    /// Read of a declared variable's current runtime value.
    ReadVar(String),
    /// An operator application over fully parsed operands.
    Apply {
        symbol: String,
        invoke: OpFn<C>,
        operands: Vec<Node<C>>,
    },
    /// An assignment statement: evaluate the expression, write the slot.
    Assign { name: String, expr: Box<Node<C>> },
    /// The program root: an ordered statement sequence.
    Root(Vec<Node<C>>),
}

impl<C> Node<C> {
    pub fn constant(ty: ValueType, value: Value) -> Self {
        Node {
            ty: Some(ty),
            kind: NodeKind::Const(value),
        }
    }

    /// A list node. `element` is the unified element type, or `None` for the
    /// untyped-empty marker.
    pub fn list(element: Option<ValueType>, items: Vec<Node<C>>) -> Self {
        let ty = match element {
            Some(element) => ValueType::Seq(Box::new(element)),
            None => ValueType::EmptySeq,
        };
        Node {
            ty: Some(ty),
            kind: NodeKind::List(items),
        }
    }

    pub fn read_var(name: impl Into<String>, ty: Option<ValueType>) -> Self {
        Node {
            ty,
            kind: NodeKind::ReadVar(name.into()),
        }
    }

    pub fn apply(
        symbol: impl Into<String>,
        ty: Option<ValueType>,
        invoke: OpFn<C>,
        operands: Vec<Node<C>>,
    ) -> Self {
        Node {
            ty,
            kind: NodeKind::Apply {
                symbol: symbol.into(),
                invoke,
                operands,
            },
        }
    }

    pub fn assign(name: impl Into<String>, expr: Node<C>) -> Self {
        Node {
            ty: None,
            kind: NodeKind::Assign {
                name: name.into(),
                expr: Box::new(expr),
            },
        }
    }

    pub fn root(statements: Vec<Node<C>>) -> Self {
        Node {
            ty: None,
            kind: NodeKind::Root(statements),
        }
    }

    /// Declared result type; `None` for statements.
    pub fn ty(&self) -> Option<&ValueType> {
        self.ty.as_ref()
    }

    pub fn kind(&self) -> &NodeKind<C> {
        &self.kind
    }

    /// Evaluate the node against the variable table and host context.
    pub fn evaluate(&self, variables: &mut VarTable, context: &mut C) -> Option<Value> {
        match &self.kind {
            NodeKind::Const(value) => Some(value.clone()),
            NodeKind::List(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(
                        item.evaluate(variables, context)
                            .expect("BUG: list element produced no value"),
                    );
                }
                Some(Value::Seq(values))
            }
            NodeKind::ReadVar(name) => Some(variables.load(name)),
            NodeKind::Apply {
                invoke, operands, ..
            } => {
                let mut values = Vec::with_capacity(operands.len());
                for operand in operands {
                    values.push(
                        operand
                            .evaluate(variables, context)
                            .expect("BUG: operand produced no value"),
                    );
                }
                invoke(context, values)
            }
            NodeKind::Assign { name, expr } => {
                let value = expr.evaluate(variables, context);
                variables.store(name, value);
                None
            }
            NodeKind::Root(statements) => {
                for statement in statements {
                    statement.evaluate(variables, context);
                }
                None
            }
        }
    }
}

impl<C> Clone for Node<C> {
    fn clone(&self) -> Self {
        Node {
            ty: self.ty.clone(),
            kind: self.kind.clone(),
        }
    }
}

impl<C> Clone for NodeKind<C> {
    fn clone(&self) -> Self {
        match self {
            NodeKind::Const(value) => NodeKind::Const(value.clone()),
            NodeKind::List(items) => NodeKind::List(items.clone()),
            NodeKind::ReadVar(name) => NodeKind::ReadVar(name.clone()),
            NodeKind::Apply {
                symbol,
                invoke,
                operands,
            } => NodeKind::Apply {
                symbol: symbol.clone(),
                invoke: Arc::clone(invoke),
                operands: operands.clone(),
            },
            NodeKind::Assign { name, expr } => NodeKind::Assign {
                name: name.clone(),
                expr: expr.clone(),
            },
            NodeKind::Root(statements) => NodeKind::Root(statements.clone()),
        }
    }
}

impl<C> fmt::Debug for Node<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Const(value) => write!(f, "Const({value:?})"),
            NodeKind::List(items) => f.debug_list().entries(items).finish(),
            NodeKind::ReadVar(name) => write!(f, "ReadVar({name})"),
            NodeKind::Apply {
                symbol, operands, ..
            } => f
                .debug_struct("Apply")
                .field("symbol", symbol)
                .field("operands", operands)
                .finish(),
            NodeKind::Assign { name, expr } => f
                .debug_struct("Assign")
                .field("name", name)
                .field("expr", expr)
                .finish(),
            NodeKind::Root(statements) => {
                f.debug_list().entries(statements).finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ScriptType;

    #[derive(Default)]
    struct Trace {
        calls: Vec<String>,
    }

    fn int_ty() -> ValueType {
        <i64 as ScriptType>::value_type()
    }

    fn int_node(n: i64) -> Node<Trace> {
        Node::constant(int_ty(), Value::atom(n))
    }

    /// An operator that records its invocation and returns the first operand.
    fn tracing_op(label: &'static str) -> OpFn<Trace> {
        Arc::new(move |context: &mut Trace, mut values: Vec<Value>| {
            context.calls.push(format!(
                "{label}({})",
                values
                    .iter()
                    .map(|v| format!("{v:?}"))
                    .collect::<Vec<_>>()
                    .join(",")
            ));
            if values.is_empty() {
                None
            } else {
                Some(values.remove(0))
            }
        })
    }

    #[test]
    fn constants_evaluate_to_clones() {
        let node = int_node(42);
        let mut vars = VarTable::new();
        let mut ctx = Trace::default();
        let first = node.evaluate(&mut vars, &mut ctx).unwrap();
        let second = node.evaluate(&mut vars, &mut ctx).unwrap();
        assert_eq!(first.downcast::<i64>(), Some(42));
        assert_eq!(second.downcast::<i64>(), Some(42));
    }

    #[test]
    fn operands_evaluate_left_to_right_before_the_invoke() {
        let inner_a = Node::apply(
            "a",
            Some(int_ty()),
            tracing_op("a"),
            vec![int_node(1)],
        );
        let inner_b = Node::apply(
            "b",
            Some(int_ty()),
            tracing_op("b"),
            vec![int_node(2)],
        );
        let outer = Node::apply(
            "outer",
            Some(int_ty()),
            tracing_op("outer"),
            vec![inner_a, inner_b],
        );

        let mut vars = VarTable::new();
        let mut ctx = Trace::default();
        outer.evaluate(&mut vars, &mut ctx);
        assert_eq!(ctx.calls, vec!["a(1)", "b(2)", "outer(1,2)"]);
    }

    #[test]
    fn lists_assemble_sequences_in_order() {
        let list = Node::list(Some(int_ty()), vec![int_node(1), int_node(2)]);
        assert_eq!(list.ty().map(ToString::to_string), Some("[int]".into()));

        let mut vars = VarTable::new();
        let mut ctx = Trace::default();
        let value = list.evaluate(&mut vars, &mut ctx).unwrap();
        assert_eq!(format!("{value:?}"), "[1, 2]");
    }

    #[test]
    fn empty_list_is_the_untyped_empty_marker() {
        let list: Node<Trace> = Node::list(None, Vec::new());
        assert_eq!(list.ty(), Some(&ValueType::EmptySeq));

        let mut vars = VarTable::new();
        let mut ctx = Trace::default();
        let value = list.evaluate(&mut vars, &mut ctx).unwrap();
        assert_eq!(value.as_seq().map(<[Value]>::len), Some(0));
    }

    #[test]
    fn assignment_writes_the_slot_and_reads_see_it() {
        let mut vars = VarTable::new();
        vars.declare("$a", Some(int_ty()));

        let root = Node::root(vec![
            Node::assign("$a", int_node(7)),
            Node::apply(
                "use",
                None,
                tracing_op("use"),
                vec![Node::read_var("$a", Some(int_ty()))],
            ),
        ]);

        let mut ctx = Trace::default();
        root.evaluate(&mut vars, &mut ctx);
        assert_eq!(ctx.calls, vec!["use(7)"]);
        assert_eq!(vars.load("$a").downcast::<i64>(), Some(7));
    }

    #[test]
    fn statements_run_in_source_order() {
        let root = Node::root(vec![
            Node::apply("first", None, tracing_op("first"), vec![]),
            Node::apply("second", None, tracing_op("second"), vec![]),
        ]);
        let mut vars = VarTable::new();
        let mut ctx = Trace::default();
        root.evaluate(&mut vars, &mut ctx);
        assert_eq!(ctx.calls, vec!["first()", "second()"]);
    }
}
