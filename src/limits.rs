//! # Configurable resource ceilings
//!
//! spec.md §3 leaves the operand stack's capacity unbounded in principle
//! ("Capacity grows on demand; no hard upper bound specified") but asks
//! implementations to "impose a configurable safety ceiling." This module
//! is that knob: a plain, `Default`-able struct rather than a CLI flag or
//! config-file format, since reading configuration off disk belongs to the
//! embedding layer (spec.md §1 Non-goals), not this core.
//!
//! The ceiling is enforced only by [`crate::frame::Frame::try_push_value`],
//! a checked alternative to the unchecked, hot-path [`crate::frame::Frame::push_value`]
//! — a dispatcher that wants the safety net opts into it explicitly, the
//! same way `Frame::pop_value` stays unchecked in release builds (spec.md §7.2)
//! while `try_push_value` is a deliberate, always-on boundary check.

/// Resource ceilings a [`crate::frame::Frame`] may be constructed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum operand-stack depth before [`crate::frame::Frame::try_push_value`]
    /// refuses the push. `Frame::push_value` itself never consults this —
    /// it always succeeds, matching spec.md §4.D's "No capacity guarantee
    /// beyond dynamic growth."
    pub max_stack_depth: usize,
}

impl Default for Limits {
    /// A generous default sized well above any but a pathological or
    /// runaway-recursion workload, matching the role pocketpy's own hard
    /// recursion ceiling plays in `original_source/` — present as a
    /// backstop, not a workload-shaping limit.
    fn default() -> Self {
        Limits {
            max_stack_depth: 1 << 16,
        }
    }
}
