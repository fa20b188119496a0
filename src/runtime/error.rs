use thiserror::Error;

/// Request-level failures. A failed operation leaves the stack and the heap
/// exactly as they were before the call.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Error)]
pub enum VmError {
    /// The free list was empty and a forced collection reclaimed nothing:
    /// every allocated cell is still reachable. Retrying cannot succeed
    /// until the caller drops some roots.
    #[error("memory exhausted: every allocated cell is reachable")]
    ExhaustedMemory,
    /// `pop` was called on an empty stack.
    #[error("no values on the stack")]
    EmptyStackAccess,
    /// `push_pair` was called with fewer than two operands on the stack.
    #[error("need at least 2 operands on the stack to make a pair")]
    InsufficientOperands,
}
