//! Runtime values and the [`ScriptType`] trait.
//!
//! Host value types enter the registry by implementing [`ScriptType`]; the
//! trait's hidden plumbing derives the declared type, the parameter shape and
//! the [`Value`] conversions, so a host only ever names its type and its
//! capabilities. Two wrappers adjust the parameter shape: [`Seq`] declares a
//! sequence parameter (which also accepts the untyped-empty marker), and
//! [`Val`] declares a capability-typed parameter carrying the raw value.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use crate::types::{AnyValue, Capability, ParamSig, TypeKey, ValueType};

/// Type-erased storage behind [`Value::Atom`].
///
/// Blanket-implemented for every `Any + Debug + Clone + Send` type; hosts
/// never implement it directly.
pub trait AtomValue: Any + fmt::Debug + Send {
    fn clone_boxed(&self) -> Box<dyn AtomValue>;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T> AtomValue for T
where
    T: Any + fmt::Debug + Clone + Send,
{
    fn clone_boxed(&self) -> Box<dyn AtomValue> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A runtime value: a single typed atom or a sequence of values.
pub enum Value {
    Atom(Box<dyn AtomValue>),
    Seq(Vec<Value>),
}

impl Value {
    pub fn atom<T: ScriptType>(value: T) -> Self {
        Value::Atom(Box::new(value))
    }

    pub fn downcast_ref<T: ScriptType>(&self) -> Option<&T> {
        match self {
            Value::Atom(atom) => atom.as_any().downcast_ref(),
            Value::Seq(_) => None,
        }
    }

    pub fn downcast<T: ScriptType>(self) -> Option<T> {
        match self {
            Value::Atom(atom) => atom.into_any().downcast().ok().map(|boxed| *boxed),
            Value::Seq(_) => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            Value::Atom(_) => None,
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Atom(atom) => Value::Atom(atom.clone_boxed()),
            Value::Seq(items) => Value::Seq(items.clone()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Atom(atom) => atom.fmt(f),
            Value::Seq(items) => f.debug_list().entries(items).finish(),
        }
    }
}

/// Trait a host value type implements to be scriptable.
///
/// Only [`type_name`](ScriptType::type_name) is required;
/// [`capabilities`](ScriptType::capabilities) opts the type into
/// capability-typed parameters. The remaining methods are plumbing with
/// correct defaults for atom types and are overridden by the [`Seq`] and
/// [`Val`] wrappers only.
pub trait ScriptType: Any + fmt::Debug + Clone + Send {
    /// Host-facing name, used in diagnostics.
    fn type_name() -> &'static str;

    /// Capability names this type satisfies.
    fn capabilities() -> &'static [&'static str] {
        &[]
    }

    #[doc(hidden)]
    fn value_type() -> ValueType {
        ValueType::Atom(TypeKey::of::<Self>())
    }

    #[doc(hidden)]
    fn param_sig() -> ParamSig {
        ParamSig::Exact(Self::value_type())
    }

    #[doc(hidden)]
    fn into_value(self) -> Value {
        Value::Atom(Box::new(self))
    }

    #[doc(hidden)]
    fn from_value(value: Value) -> Self {
        match value {
            Value::Atom(atom) => *atom
                .into_any()
                .downcast::<Self>()
                .expect("BUG: operand type mismatch escaped resolve-time checking"),
            Value::Seq(_) => panic!("BUG: sequence value supplied for atom operand"),
        }
    }
}

impl ScriptType for i64 {
    fn type_name() -> &'static str {
        "int"
    }
}

impl ScriptType for f64 {
    fn type_name() -> &'static str {
        "float"
    }
}

impl ScriptType for bool {
    fn type_name() -> &'static str {
        "bool"
    }
}

impl ScriptType for String {
    fn type_name() -> &'static str {
        "string"
    }
}

/// Sequence parameter/result wrapper.
///
/// As a parameter it declares a sequence of `T` and additionally accepts the
/// untyped-empty marker (`[]`), which then evaluates to an empty sequence.
/// Nesting (`Seq<Seq<T>>`) declares sequences of sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seq<T>(pub Vec<T>);

impl<T> Seq<T> {
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> From<Vec<T>> for Seq<T> {
    fn from(items: Vec<T>) -> Self {
        Seq(items)
    }
}

impl<T> IntoIterator for Seq<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Seq<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: ScriptType> ScriptType for Seq<T> {
    fn type_name() -> &'static str {
        "seq"
    }

    fn value_type() -> ValueType {
        ValueType::Seq(Box::new(T::value_type()))
    }

    fn into_value(self) -> Value {
        Value::Seq(self.0.into_iter().map(T::into_value).collect())
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::Seq(items) => Seq(items.into_iter().map(T::from_value).collect()),
            Value::Atom(_) => panic!("BUG: atom value supplied for sequence operand"),
        }
    }
}

/// Capability-typed parameter wrapper.
///
/// Accepts any operand whose declared type satisfies the capability `M`
/// (by default [`AnyValue`], satisfied by every typed value) and hands the
/// host function the raw [`Value`]. A capability placeholder carries no
/// concrete result type, so using `Val` in result position aborts the
/// binding.
pub struct Val<M: Capability = AnyValue> {
    value: Value,
    _capability: PhantomData<M>,
}

impl<M: Capability> Val<M> {
    pub fn get(&self) -> &Value {
        &self.value
    }

    pub fn into_inner(self) -> Value {
        self.value
    }
}

impl<M: Capability> Clone for Val<M> {
    fn clone(&self) -> Self {
        Val {
            value: self.value.clone(),
            _capability: PhantomData,
        }
    }
}

impl<M: Capability> fmt::Debug for Val<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<M: Capability> ScriptType for Val<M> {
    fn type_name() -> &'static str {
        M::NAME
    }

    fn value_type() -> ValueType {
        panic!(
            "operator results cannot be capability-typed: '{}' names a constraint, not a type",
            M::NAME
        )
    }

    fn param_sig() -> ParamSig {
        ParamSig::Cap(M::NAME)
    }

    fn into_value(self) -> Value {
        self.value
    }

    fn from_value(value: Value) -> Self {
        Val {
            value,
            _capability: PhantomData,
        }
    }
}
