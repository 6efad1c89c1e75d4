//! Stack growth for deep forcing chains.
//!
//! Realizing a deferred node forces its predecessor's cell, which forces the
//! predecessor's predecessor, and so on back to the origin. A repetition over
//! a long input or a deeply parenthesised expression therefore turns into a
//! call chain as long as the input. Every rule evaluation in `abnf_runtime`
//! runs inside [`ensure_sufficient_stack`] so those chains grow the stack
//! instead of overflowing it.
//!
//! - **Native targets**: `stacker::maybe_grow`.
//! - **WASM targets**: plain call.

/// Remaining stack below which we grow (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn evaluate(&self, rule: RuleId, pred: &OutcomeCell) -> MatchOutcome {
///     ensure_sufficient_stack(|| self.evaluate_body(rule, pred))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
