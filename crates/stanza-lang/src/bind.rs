//! Typed operator binding.
//!
//! Host functions of concrete, statically-known signature are adapted into
//! one uniform shape ([`OperatorDef`]) at registration time: the expected
//! parameter list and the declared result type are captured from the
//! signature's [`ScriptType`] impls, and the call itself is wrapped in a
//! type-erased invoke fn. No runtime introspection is involved; an operand
//! that reaches the invoke fn has already passed resolve-time matching.
//!
//! The [`IntoOperator`] impls cover four shapes per arity (0 through 8):
//! with or without a leading `&mut C` context parameter, with or without a
//! result. The `Marker` parameter keeps the impl families apart; it is
//! inferred and never named by hosts.

use std::marker::PhantomData;
use std::sync::Arc;

use stanza_ast::{OpFn, ParamSig, ScriptType, Value, ValueType};

/// A registered operator: expected operand shapes, declared result type and
/// the adapted implementation.
pub struct OperatorDef<C> {
    pub(crate) params: Vec<ParamSig>,
    pub(crate) result: Option<ValueType>,
    pub(crate) invoke: OpFn<C>,
}

impl<C> OperatorDef<C> {
    /// Number of operands the operator expects (context excluded).
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn params(&self) -> &[ParamSig] {
        &self.params
    }

    /// Declared result type; `None` for a void/side-effect-only operator.
    pub fn result(&self) -> Option<&ValueType> {
        self.result.as_ref()
    }
}

/// Conversion from a host function into an [`OperatorDef`].
pub trait IntoOperator<C, Marker> {
    fn into_operator(self) -> OperatorDef<C>;
}

/// Marker: `Fn(&mut C, operands...) -> R`.
pub struct ContextOp<Args, Ret>(PhantomData<(Args, Ret)>);
/// Marker: `Fn(&mut C, operands...)`, void.
pub struct ContextStmt<Args>(PhantomData<Args>);
/// Marker: `Fn(operands...) -> R`.
pub struct PlainOp<Args, Ret>(PhantomData<(Args, Ret)>);
/// Marker: `Fn(operands...)`, void.
pub struct PlainStmt<Args>(PhantomData<Args>);

macro_rules! impl_into_operator {
    ($($ty:ident $val:ident),*) => {
        impl<C, F, R $(, $ty)*> IntoOperator<C, ContextOp<($($ty,)*), R>> for F
        where
            C: 'static,
            F: Fn(&mut C $(, $ty)*) -> R + Send + Sync + 'static,
            R: ScriptType,
            $($ty: ScriptType,)*
        {
            fn into_operator(self) -> OperatorDef<C> {
                OperatorDef {
                    params: vec![$($ty::param_sig()),*],
                    result: Some(R::value_type()),
                    invoke: Arc::new(move |context: &mut C, operands: Vec<Value>| {
                        #[allow(unused_mut, unused_variables)]
                        let mut operands = operands.into_iter();
                        $(
                            let $val = $ty::from_value(
                                operands.next().expect("BUG: operand count checked at resolve time"),
                            );
                        )*
                        Some(R::into_value(self(context $(, $val)*)))
                    }),
                }
            }
        }

        impl<C, F $(, $ty)*> IntoOperator<C, ContextStmt<($($ty,)*)>> for F
        where
            C: 'static,
            F: Fn(&mut C $(, $ty)*) + Send + Sync + 'static,
            $($ty: ScriptType,)*
        {
            fn into_operator(self) -> OperatorDef<C> {
                OperatorDef {
                    params: vec![$($ty::param_sig()),*],
                    result: None,
                    invoke: Arc::new(move |context: &mut C, operands: Vec<Value>| {
                        #[allow(unused_mut, unused_variables)]
                        let mut operands = operands.into_iter();
                        $(
                            let $val = $ty::from_value(
                                operands.next().expect("BUG: operand count checked at resolve time"),
                            );
                        )*
                        self(context $(, $val)*);
                        None
                    }),
                }
            }
        }

        impl<C, F, R $(, $ty)*> IntoOperator<C, PlainOp<($($ty,)*), R>> for F
        where
            C: 'static,
            F: Fn($($ty),*) -> R + Send + Sync + 'static,
            R: ScriptType,
            $($ty: ScriptType,)*
        {
            fn into_operator(self) -> OperatorDef<C> {
                OperatorDef {
                    params: vec![$($ty::param_sig()),*],
                    result: Some(R::value_type()),
                    invoke: Arc::new(move |_context: &mut C, operands: Vec<Value>| {
                        #[allow(unused_mut, unused_variables)]
                        let mut operands = operands.into_iter();
                        $(
                            let $val = $ty::from_value(
                                operands.next().expect("BUG: operand count checked at resolve time"),
                            );
                        )*
                        Some(R::into_value(self($($val),*)))
                    }),
                }
            }
        }

        impl<C, F $(, $ty)*> IntoOperator<C, PlainStmt<($($ty,)*)>> for F
        where
            C: 'static,
            F: Fn($($ty),*) + Send + Sync + 'static,
            $($ty: ScriptType,)*
        {
            fn into_operator(self) -> OperatorDef<C> {
                OperatorDef {
                    params: vec![$($ty::param_sig()),*],
                    result: None,
                    invoke: Arc::new(move |_context: &mut C, operands: Vec<Value>| {
                        #[allow(unused_mut, unused_variables)]
                        let mut operands = operands.into_iter();
                        $(
                            let $val = $ty::from_value(
                                operands.next().expect("BUG: operand count checked at resolve time"),
                            );
                        )*
                        self($($val),*);
                        None
                    }),
                }
            }
        }
    };
}

impl_into_operator!();
impl_into_operator!(A0 a0);
impl_into_operator!(A0 a0, A1 a1);
impl_into_operator!(A0 a0, A1 a1, A2 a2);
impl_into_operator!(A0 a0, A1 a1, A2 a2, A3 a3);
impl_into_operator!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4);
impl_into_operator!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
impl_into_operator!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6);
impl_into_operator!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7);
