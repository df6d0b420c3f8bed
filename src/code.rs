//! # Compiled code object
//!
//! A [`CodeObject`] is one compiled unit — a function or a module body: an
//! instruction stream plus its constant pool and name pool. It is built
//! once by the compiler (§4.C's builder contract: `addConst`, `addName`,
//! `getNameIndex`, direct instruction append) and is read-only once handed
//! to a [`crate::frame::Frame`] for execution.
//!
//! Grounded on `examples/original_source/src/codeobject.h`'s `ByteCode` /
//! `CodeObject` / `toString`. The instruction triple here stays
//! *undecoded* (`op: u8, arg: i32, line: u16`) rather than the teacher's own
//! `Instr` enum (`runtime/src/bytecode.rs`) — decoding `op` into
//! opcode-specific behavior is the dispatcher's job, a non-goal of this
//! core (spec.md §1).

use crate::strval::Str;
use crate::value::ValueHandle;

/// One bytecode instruction: an opcode index, an optional immediate
/// (`-1` conventionally renders as "no argument" in disassembly; whether
/// `-1` is also a legal real operand is opcode-defined, spec.md §9), and a
/// 1-based source line (`0` means unknown).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub op: u8,
    pub arg: i32,
    pub line: u16,
}

impl Instruction {
    pub fn new(op: u8, arg: i32, line: u16) -> Instruction {
        Instruction { op, arg, line }
    }
}

/// A compiled function or module: instruction stream, constant pool, name
/// pool, source-location table, and (optionally) a precomputed maximum
/// operand-stack depth.
pub struct CodeObject<V: ValueHandle> {
    code: Vec<Instruction>,
    filename: Str,
    name: Str,
    consts: Vec<V>,
    names: Vec<Str>,
    max_stack: Option<u32>,
}

impl<V: ValueHandle> CodeObject<V> {
    /// A fresh, empty code object with the given provenance.
    pub fn new(filename: impl Into<Str>, name: impl Into<Str>) -> CodeObject<V> {
        CodeObject {
            code: Vec::new(),
            filename: filename.into(),
            name: name.into(),
            consts: Vec::new(),
            names: Vec::new(),
            max_stack: None,
        }
    }

    pub fn filename(&self) -> &Str {
        &self.filename
    }

    pub fn name(&self) -> &Str {
        &self.name
    }

    /// The instruction stream, 0-indexed; every branch-target immediate in
    /// it must be a valid index into this slice (invariant 1, spec.md §3).
    pub fn code(&self) -> &[Instruction] {
        &self.code
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn consts(&self) -> &[V] {
        &self.consts
    }

    pub fn names(&self) -> &[Str] {
        &self.names
    }

    /// An optional compiler-supplied hint for the frame's operand-stack
    /// capacity (spec.md §9 — permitted, not required).
    pub fn max_stack(&self) -> Option<u32> {
        self.max_stack
    }

    pub fn set_max_stack(&mut self, depth: u32) {
        self.max_stack = Some(depth);
    }

    /// Append an instruction to the code stream.
    pub fn push_instr(&mut self, op: u8, arg: i32, line: u16) {
        self.code.push(Instruction::new(op, arg, line));
    }

    /// Append `v` to the constant pool, returning its 0-based index — the
    /// immediate a load-const instruction should carry.
    pub fn add_const(&mut self, v: V) -> usize {
        self.consts.push(v);
        self.consts.len() - 1
    }

    /// Append `name` to the name pool, coalescing duplicates: a second
    /// `add_name` with an equal string returns the existing index and
    /// leaves the pool unchanged (invariant 3, spec.md §3).
    pub fn add_name(&mut self, name: &str) -> usize {
        if let Some(i) = self.get_name_index(name) {
            return i;
        }
        self.names.push(Str::from(name));
        self.names.len() - 1
    }

    /// Look up `name`'s index without inserting it. The teacher's C++
    /// ancestor returns `-1` for "not found" (`int getNameIndex`); this
    /// core expresses that as `None`, the idiomatic Rust form of the same
    /// sentinel.
    pub fn get_name_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n.as_bytes() == name.as_bytes())
    }

    /// Human-readable disassembly: one line per instruction (blank line
    /// field when the source line is unchanged from the previous
    /// instruction, with a blank separator line inserted at each change),
    /// followed by the constant pool's type names and the name pool's
    /// literal names, followed by a nested disassembly for every constant
    /// that is itself a function.
    ///
    /// `op_names` is the externally supplied opcode mnemonic table
    /// (spec.md §6; see [`crate::opcode_table`]). This format is
    /// informational, not a stable interface (spec.md §4.C).
    pub fn disassemble(&self, op_names: &[&str]) -> String {
        let mut out = String::new();
        let mut prev_line: Option<u16> = None;
        for (i, instr) in self.code.iter().enumerate() {
            let line_field = if prev_line == Some(instr.line) {
                String::new()
            } else {
                if prev_line.is_some() {
                    out.push('\n');
                }
                prev_line = Some(instr.line);
                instr.line.to_string()
            };
            let op_name = op_names.get(instr.op as usize).copied().unwrap_or("<unknown-op>");
            let arg_field = if instr.arg == -1 { String::new() } else { instr.arg.to_string() };
            out.push_str(&format!("{:>12} {:>3} {:<20} {}\n", line_field, i, op_name, arg_field));
        }

        out.push('\n');
        out.push_str("consts: ");
        let const_names: Vec<&str> = self.consts.iter().map(ValueHandle::type_name).collect();
        out.push_str(&const_names.join(", "));
        out.push('\n');

        out.push_str("names: ");
        let name_strs: Vec<String> = self.names.iter().map(|n| n.as_str().to_string()).collect();
        out.push_str(&name_strs.join(", "));
        out.push('\n');

        for c in &self.consts {
            if let Some(inner) = c.as_function_code() {
                out.push('\n');
                out.push_str(inner.name.as_str());
                out.push_str(":\n");
                out.push_str(&inner.disassemble(op_names));
            }
        }
        out
    }
}
