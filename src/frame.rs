//! # Execution frame
//!
//! A [`Frame`] is one activation of a [`CodeObject`]: an instruction
//! pointer into that code object's instruction stream, an operand stack,
//! and the two name→value scopes (locals, globals) the dispatcher consults
//! to resolve identifiers. The frame owns none of the opcode semantics
//! (spec.md §1 Non-goals) — it only exposes the primitive stack/IP/scope
//! operations a dispatcher built on top of it needs.
//!
//! Grounded on `examples/original_source/src/codeobject.h`'s `Frame` class:
//! `s_data` (operand stack), `ip`, `_locals`/`_module` (scope maps),
//! `readCode`, `currentLine`, `isEnd`, `jumpTo`, `popValue`/`topValue`/
//! `pushValue`/`valueCount`/`popNReversed`.

use std::collections::HashMap;
use std::rc::Rc;

use crate::code::{CodeObject, Instruction};
use crate::error::FrameError;
use crate::limits::Limits;
use crate::strname::StrName;
use crate::value::ValueHandle;

/// One activation record. Frames are stack-discipline: a dispatcher pushes
/// a new frame on call, runs it to completion or suspension, and pops it
/// on return — this core imposes no policy on how that call stack is held
/// (`Vec<Frame<V>>`, a linked list, etc. are all embedder choices).
pub struct Frame<V: ValueHandle> {
    code: Rc<CodeObject<V>>,
    ip: usize,
    stack: Vec<V>,
    locals: HashMap<StrName, V>,
    globals: Rc<HashMap<StrName, V>>,
    limits: Limits,
}

impl<V: ValueHandle> Frame<V> {
    /// A fresh frame over `code`, starting at instruction `0` with the
    /// given initial locals (typically a function's bound arguments) and
    /// a shared view of the enclosing module's global scope.
    ///
    /// When `code` carries a [`CodeObject::max_stack`] hint the operand
    /// stack is preallocated to that depth (spec.md §9).
    pub fn new(code: Rc<CodeObject<V>>, locals: HashMap<StrName, V>, globals: Rc<HashMap<StrName, V>>) -> Frame<V> {
        Frame::with_limits(code, locals, globals, Limits::default())
    }

    /// As [`Frame::new`], but with an explicit [`Limits`] instead of the
    /// default — for an embedder that wants a tighter (or looser) operand
    /// stack safety ceiling than [`Limits::default`].
    pub fn with_limits(
        code: Rc<CodeObject<V>>,
        locals: HashMap<StrName, V>,
        globals: Rc<HashMap<StrName, V>>,
        limits: Limits,
    ) -> Frame<V> {
        let stack = match code.max_stack() {
            Some(n) => Vec::with_capacity(n as usize),
            None => Vec::new(),
        };
        Frame {
            code,
            ip: 0,
            stack,
            locals,
            globals,
            limits,
        }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn code(&self) -> &CodeObject<V> {
        &self.code
    }

    /// The current instruction pointer.
    pub fn ip(&self) -> usize {
        self.ip
    }

    /// Fetch the instruction at the current instruction pointer and advance
    /// past it, in one step (spec.md §4.D: "→ reference to instruction at
    /// `ip`; advance `ip` by 1"; `original_source/src/codeobject.h`'s
    /// `return code->co_code[ip++];`). `Instruction` is `Copy`, so this
    /// returns by value rather than by reference — the same observable
    /// contract without holding a borrow across the mutation.
    ///
    /// Precondition: `!is_end()`; unchecked by design in release builds
    /// (spec.md §4.D), debug-asserted here the way [`Frame::pop_value`] is.
    pub fn read_code(&mut self) -> Instruction {
        debug_assert!(!self.is_end(), "frame: read_code past the end of the instruction stream");
        let instr = *self
            .code
            .code()
            .get(self.ip)
            .expect("frame: read_code past the end of the instruction stream");
        self.ip += 1;
        instr
    }

    /// Unconditionally set the instruction pointer, for jump/branch opcodes.
    pub fn jump_to(&mut self, target: usize) {
        self.ip = target;
    }

    /// `true` once the instruction pointer has run past the end of the
    /// code object's instruction stream.
    pub fn is_end(&self) -> bool {
        self.ip >= self.code.len()
    }

    /// The source line of the instruction at the current instruction
    /// pointer, or `-1` once the frame has ended (spec.md §4.D;
    /// `original_source/src/codeobject.h:112`'s `if(isEnd()) return -1;`).
    pub fn current_line(&self) -> i32 {
        match self.code.code().get(self.ip) {
            Some(instr) => instr.line as i32,
            None => -1,
        }
    }

    // -- operand stack --------------------------------------------------

    pub fn push_value(&mut self, v: V) {
        self.stack.push(v);
    }

    /// As [`Frame::push_value`], but refuses the push once the stack would
    /// grow past this frame's configured [`Limits::max_stack_depth`]
    /// (spec.md §3's "configurable safety ceiling"). The dispatcher's
    /// everyday push path stays [`Frame::push_value`]; this is for callers
    /// that want the ceiling enforced, e.g. around a user-level call
    /// instruction where unbounded recursion is the one failure mode this
    /// core can actually observe from inside a single frame.
    pub fn try_push_value(&mut self, v: V) -> Result<(), FrameError> {
        if self.stack.len() >= self.limits.max_stack_depth {
            return Err(FrameError::StackOverflow {
                depth: self.stack.len(),
                limit: self.limits.max_stack_depth,
            });
        }
        self.stack.push(v);
        Ok(())
    }

    /// Pop and return the top of the operand stack. Popping an empty stack
    /// is a dispatcher bug (a malformed or miscompiled instruction stream),
    /// not a recoverable runtime condition — debug builds catch it, release
    /// builds elide the check (spec.md §7.2).
    pub fn pop_value(&mut self) -> V {
        debug_assert!(!self.stack.is_empty(), "frame: pop_value on an empty operand stack");
        self.stack.pop().expect("frame: pop_value on an empty operand stack")
    }

    /// A reference to the top of the operand stack without removing it.
    pub fn top_value(&self) -> &V {
        debug_assert!(!self.stack.is_empty(), "frame: top_value on an empty operand stack");
        self.stack.last().expect("frame: top_value on an empty operand stack")
    }

    pub fn value_count(&self) -> usize {
        self.stack.len()
    }

    /// Pop the top `n` values, returned in the order they were pushed
    /// (reversing the stack's natural LIFO pop order) — the layout a call
    /// instruction wants for positional arguments.
    pub fn pop_n_reversed(&mut self, n: usize) -> Vec<V> {
        debug_assert!(n <= self.stack.len(), "frame: pop_n_reversed exceeds the operand stack depth");
        let start = self.stack.len() - n;
        let mut popped: Vec<V> = self.stack.split_off(start);
        popped.reverse();
        popped
    }

    // -- scopes -----------------------------------------------------------

    pub fn get_local(&self, name: StrName) -> Option<&V> {
        self.locals.get(&name)
    }

    pub fn set_local(&mut self, name: StrName, v: V) {
        self.locals.insert(name, v);
    }

    pub fn get_global(&self, name: StrName) -> Option<&V> {
        self.globals.get(&name)
    }

    pub fn locals(&self) -> &HashMap<StrName, V> {
        &self.locals
    }

    pub fn globals(&self) -> &HashMap<StrName, V> {
        &self.globals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::demo::DemoValue;

    fn code_with(instrs: &[(u8, i32, u16)]) -> Rc<CodeObject<DemoValue>> {
        let mut code: CodeObject<DemoValue> = CodeObject::new("t.pk", "<module>");
        for &(op, arg, line) in instrs {
            code.push_instr(op, arg, line);
        }
        Rc::new(code)
    }

    #[test]
    fn fresh_frame_starts_at_instruction_zero() {
        let code = code_with(&[(0, -1, 1), (1, -1, 1)]);
        let frame: Frame<DemoValue> = Frame::new(code, HashMap::new(), Rc::new(HashMap::new()));
        assert_eq!(frame.ip(), 0);
        assert!(!frame.is_end());
    }

    #[test]
    fn read_code_advances_ip_and_reaches_the_end_of_the_stream() {
        let code = code_with(&[(0, -1, 1), (1, -1, 2)]);
        let mut frame: Frame<DemoValue> = Frame::new(code, HashMap::new(), Rc::new(HashMap::new()));
        assert_eq!(frame.current_line(), 1);
        frame.read_code();
        assert_eq!(frame.ip(), 1);
        assert_eq!(frame.current_line(), 2);
        assert!(!frame.is_end());
        frame.read_code();
        assert!(frame.is_end());
        assert_eq!(frame.current_line(), -1);
    }

    #[test]
    fn read_code_returns_instructions_in_order_and_jump_to_resets_the_end_flag() {
        let code = code_with(&[(0, -1, 1), (1, -1, 1), (2, -1, 1)]);
        let mut frame: Frame<DemoValue> = Frame::new(code, HashMap::new(), Rc::new(HashMap::new()));
        assert_eq!(frame.read_code(), Instruction::new(0, -1, 1));
        assert_eq!(frame.read_code(), Instruction::new(1, -1, 1));
        assert_eq!(frame.read_code(), Instruction::new(2, -1, 1));
        assert!(frame.is_end());
        frame.jump_to(0);
        assert!(!frame.is_end());
        assert_eq!(frame.read_code(), Instruction::new(0, -1, 1));
    }

    #[test]
    fn jump_to_sets_the_instruction_pointer_directly() {
        let code = code_with(&[(0, -1, 1), (1, -1, 1), (2, -1, 1)]);
        let mut frame: Frame<DemoValue> = Frame::new(code, HashMap::new(), Rc::new(HashMap::new()));
        frame.jump_to(2);
        assert_eq!(frame.ip(), 2);
        assert!(!frame.is_end());
    }

    #[test]
    fn operand_stack_push_pop_is_lifo() {
        let code = code_with(&[(0, -1, 1)]);
        let mut frame: Frame<DemoValue> = Frame::new(code, HashMap::new(), Rc::new(HashMap::new()));
        frame.push_value(DemoValue::Int(1));
        frame.push_value(DemoValue::Int(2));
        assert_eq!(frame.value_count(), 2);
        match frame.pop_value() {
            DemoValue::Int(n) => assert_eq!(n, 2),
            _ => panic!("expected int"),
        }
        match frame.pop_value() {
            DemoValue::Int(n) => assert_eq!(n, 1),
            _ => panic!("expected int"),
        }
        assert_eq!(frame.value_count(), 0);
    }

    #[test]
    fn pop_n_reversed_restores_push_order() {
        let code = code_with(&[(0, -1, 1)]);
        let mut frame: Frame<DemoValue> = Frame::new(code, HashMap::new(), Rc::new(HashMap::new()));
        frame.push_value(DemoValue::Int(1));
        frame.push_value(DemoValue::Int(2));
        frame.push_value(DemoValue::Int(3));
        let args = frame.pop_n_reversed(3);
        let ints: Vec<i64> = args
            .into_iter()
            .map(|v| match v {
                DemoValue::Int(n) => n,
                _ => panic!("expected int"),
            })
            .collect();
        assert_eq!(ints, vec![1, 2, 3]);
        assert_eq!(frame.value_count(), 0);
    }

    #[test]
    fn locals_shadow_nothing_in_globals_but_both_are_queryable() {
        let code = code_with(&[(0, -1, 1)]);
        let mut globals = HashMap::new();
        globals.insert(StrName::get("g"), DemoValue::Int(100));
        let mut frame: Frame<DemoValue> = Frame::new(code, HashMap::new(), Rc::new(globals));
        frame.set_local(StrName::get("x"), DemoValue::Int(1));
        assert!(matches!(frame.get_local(StrName::get("x")), Some(DemoValue::Int(1))));
        assert!(frame.get_local(StrName::get("g")).is_none());
        assert!(matches!(frame.get_global(StrName::get("g")), Some(DemoValue::Int(100))));
    }

    #[test]
    fn try_push_value_respects_the_configured_ceiling() {
        let code = code_with(&[(0, -1, 1)]);
        let mut frame: Frame<DemoValue> =
            Frame::with_limits(code, HashMap::new(), Rc::new(HashMap::new()), Limits { max_stack_depth: 2 });
        assert!(frame.try_push_value(DemoValue::Int(1)).is_ok());
        assert!(frame.try_push_value(DemoValue::Int(2)).is_ok());
        let err = frame.try_push_value(DemoValue::Int(3)).unwrap_err();
        assert_eq!(err, crate::error::FrameError::StackOverflow { depth: 2, limit: 2 });
        assert_eq!(frame.value_count(), 2);
    }

    #[test]
    fn max_stack_hint_preallocates_capacity() {
        let mut inner: CodeObject<DemoValue> = CodeObject::new("t.pk", "<module>");
        inner.push_instr(0, -1, 1);
        inner.set_max_stack(8);
        let frame: Frame<DemoValue> = Frame::new(Rc::new(inner), HashMap::new(), Rc::new(HashMap::new()));
        assert!(frame.value_count() == 0);
    }
}
