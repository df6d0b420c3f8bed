//! # Value-handle contract
//!
//! The core never defines its own object model (spec.md §1 Non-goals: "No
//! object model beyond a tagged-value handle type"). Instead it specifies
//! the exact two-method contract an external `PyVar`-shaped value type must
//! satisfy so that [`crate::code::CodeObject`] can render its constant pool
//! for diagnostics and recurse into nested function constants:
//!
//! - a type-name query, for disassembly's `co_consts` summary line
//! - a down-cast to "is this a function value, and if so what's its code
//!   object", for disassembly's recursive dump of nested functions
//!
//! `examples/original_source/src/codeobject.h`'s `toString()` performs
//! exactly this down-cast with `std::get_if<_Func>(&co_consts[i]->_native)`;
//! [`ValueHandle::as_function_code`] is the same operation expressed as a
//! trait method instead of a variant check against a concrete enum.
//!
//! `CodeObject<V>` and `Frame<V>` are generic over `V: ValueHandle` rather
//! than hard-coding a value enum, so this core never commits to how values
//! are represented, boxed, or collected — that remains entirely the
//! embedder's object system.

use crate::code::CodeObject;

/// The contract a tagged value-handle type must provide for this core to
/// build constant pools and disassemble code objects.
pub trait ValueHandle: Clone {
    /// A short, human-readable type name (e.g. `"int"`, `"str"`, `"function"`),
    /// used in `CodeObject::disassemble`'s `co_consts` summary line.
    fn type_name(&self) -> &str;

    /// If this value wraps a compiled function, its code object; `None`
    /// otherwise. Used to recursively disassemble nested functions that
    /// appear as entries in an outer code object's constant pool.
    fn as_function_code(&self) -> Option<&CodeObject<Self>>
    where
        Self: Sized;
}

#[cfg(test)]
pub(crate) mod demo {
    //! A minimal `ValueHandle` impl used only by this crate's own tests and
    //! doctests, standing in for a real embedder's object system — the way
    //! `runtime/src/vm/tests.rs` builds ad hoc instruction vectors without a
    //! real compiler in front of them.
    use super::*;
    use std::rc::Rc;

    #[derive(Clone)]
    pub enum DemoValue {
        Int(i64),
        Str(String),
        Function(Rc<CodeObject<DemoValue>>),
    }

    impl ValueHandle for DemoValue {
        fn type_name(&self) -> &str {
            match self {
                DemoValue::Int(_) => "int",
                DemoValue::Str(_) => "str",
                DemoValue::Function(_) => "function",
            }
        }

        fn as_function_code(&self) -> Option<&CodeObject<DemoValue>> {
            match self {
                DemoValue::Function(code) => Some(code),
                _ => None,
            }
        }
    }
}
