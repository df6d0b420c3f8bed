//! # Opcode mnemonic table contract
//!
//! spec.md §6 treats the opcode set as something the dispatcher supplies:
//! "a list of mnemonics; the core assigns a dense `u8` to each in source
//! order and exposes a parallel name table for diagnostics." This mirrors
//! `examples/original_source/src/codeobject.h`'s x-macro
//! (`#define OPCODE(name) OP_##name,` expanded once for the enum and once
//! for the name table) using Rust's `macro_rules!` instead of the C
//! preprocessor.
//!
//! This module defines only the macro; it assigns no opcodes of its own —
//! picking concrete mnemonics is the dispatcher's job (a non-goal of this
//! core, spec.md §1). [`CodeObject::disassemble`](crate::code::CodeObject::disassemble)
//! takes the resulting name table as a plain `&[&str]` so it never has to
//! know which macro invocation produced it.

/// Declare a dense, `u8`-valued opcode table from an ordered mnemonic list.
///
/// Expands to a `u8` constant per mnemonic (its index in the list) plus a
/// `pub const $names_ident: &[&str]` parallel name table suitable for
/// [`crate::code::CodeObject::disassemble`].
///
/// ```
/// use interp_core::opcode_table;
///
/// opcode_table! {
///     name: DEMO_OP_NAMES,
///     LOAD_CONST,
///     ADD,
///     RETURN,
/// }
///
/// assert_eq!(LOAD_CONST, 0);
/// assert_eq!(ADD, 1);
/// assert_eq!(RETURN, 2);
/// assert_eq!(DEMO_OP_NAMES, ["LOAD_CONST", "ADD", "RETURN"]);
/// ```
#[macro_export]
macro_rules! opcode_table {
    (name: $names:ident, $($mnemonic:ident),+ $(,)?) => {
        $crate::opcode_table!(@count 0usize; $($mnemonic),+);
        pub const $names: &[&str] = &[$(stringify!($mnemonic)),+];
    };
    (@count $idx:expr; $mnemonic:ident $(, $rest:ident)*) => {
        #[allow(dead_code)]
        pub const $mnemonic: u8 = $idx as u8;
        $crate::opcode_table!(@count ($idx + 1usize); $($rest),*);
    };
    (@count $idx:expr;) => {};
}
