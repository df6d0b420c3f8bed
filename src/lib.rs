//! # interp_core
//!
//! The core execution substrate for an embeddable dynamic-language
//! interpreter: a bytecode program representation ([`code::CodeObject`]),
//! an execution frame over it ([`frame::Frame`]), and the small-string /
//! interned-name value layer they're built on ([`strval::Str`],
//! [`strname::StrName`]).
//!
//! This crate deliberately stops short of being a virtual machine. It
//! defines no opcode semantics, no object/value model beyond the
//! [`value::ValueHandle`] contract an embedder's value type must satisfy,
//! no parser or compiler, no garbage collector, and no concurrency policy
//! of its own — those are the dispatcher's, the compiler's, and the
//! embedder's responsibilities. What's here is the substrate all of those
//! are built on top of.
//!
//! Each piece is grounded on a concrete counterpart from a real embedded
//! interpreter's C++ implementation: [`code::CodeObject`] and
//! [`frame::Frame`] mirror `codeobject.h`'s `CodeObject`/`Frame` classes;
//! [`strval::Str`] and [`strname::StrName`] mirror `str.cpp`'s `Str`/
//! `StrName`. [`opcode::opcode_table`] gives a dispatcher a way to declare
//! its own mnemonic set without this crate ever naming one.

pub mod code;
pub mod error;
pub mod frame;
pub mod limits;
pub mod opcode;
pub mod pool;
pub mod strname;
pub mod strstream;
pub mod strval;
pub mod value;

pub use code::{CodeObject, Instruction};
pub use error::{FrameError, Utf8DecodeError};
pub use frame::Frame;
pub use limits::Limits;
pub use strname::StrName;
pub use strstream::FastStrStream;
pub use strval::Str;
pub use value::ValueHandle;
