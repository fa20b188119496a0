use crate::heap::{gc, GcStats, Heap};
use crate::runtime::cell::{CellRef, CellValue};
use crate::runtime::config::Config;
use crate::runtime::error::VmError;

/// The whole machine in one owned value: the cell pool, the configuration,
/// and the execution stack the collector treats as its root set.
///
/// The stack is the only public mutation surface. Every mutation ends with a
/// threshold check, so a collection can run synchronously inside any of
/// `push_atom`, `push_pair` and `pop` before the call returns.
pub struct Vm {
    heap: Heap,
    stack: Vec<CellRef>,
    config: Config,
}

impl Vm {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            heap: Heap::new(config.heap_size),
            stack: Vec::new(),
            config,
        }
    }

    /// Allocates an atom and roots it on the stack.
    pub fn push_atom(&mut self, value: i64) -> Result<CellRef, VmError> {
        let cell = self.allocate(CellValue::Atom(value))?;
        self.stack.push(cell);
        self.check_threshold();
        Ok(cell)
    }

    /// Combines the two topmost operands into a fresh pair and roots it; the
    /// most recently pushed operand becomes the right child.
    ///
    /// The pair is allocated while both operands are still on the stack, so
    /// a collection forced by the allocation cannot reclaim them. Requires
    /// two operands on the stack, not merely two live objects: garbage that
    /// is still allocated does not count.
    pub fn push_pair(&mut self) -> Result<CellRef, VmError> {
        if self.stack.len() < 2 {
            return Err(VmError::InsufficientOperands);
        }
        let right = self.stack[self.stack.len() - 1];
        let left = self.stack[self.stack.len() - 2];
        let cell = self.allocate(CellValue::Pair(left, right))?;
        self.stack.truncate(self.stack.len() - 2);
        self.stack.push(cell);
        self.check_threshold();
        Ok(cell)
    }

    /// Removes and returns the top of the stack. The cell is not freed here:
    /// it becomes garbage for the next collection unless something still
    /// reachable holds a reference to it.
    pub fn pop(&mut self) -> Result<CellRef, VmError> {
        let cell = self.stack.pop().ok_or(VmError::EmptyStackAccess)?;
        self.check_threshold();
        Ok(cell)
    }

    /// Number of allocated cells, unswept garbage included.
    pub fn live_count(&self) -> usize {
        self.heap.live_count()
    }

    /// Forces a full mark and sweep.
    pub fn collect(&mut self) {
        gc::collect(&mut self.heap, &self.stack);
    }

    /// Reads an atom's value. `None` for pairs and stale references.
    pub fn atom(&self, cell: CellRef) -> Option<i64> {
        match self.heap.get(cell)?.value {
            CellValue::Atom(value) => Some(value),
            CellValue::Pair(..) => None,
        }
    }

    /// Reads a pair's children. `None` for atoms and stale references.
    pub fn pair(&self, cell: CellRef) -> Option<(CellRef, CellRef)> {
        match self.heap.get(cell)?.value {
            CellValue::Pair(left, right) => Some((left, right)),
            CellValue::Atom(_) => None,
        }
    }

    /// Relinks an existing pair's children, which is how a client builds
    /// structures the stack discipline alone cannot express, reference
    /// cycles included. Returns false without touching anything if `cell` is
    /// not a live pair or either child is not a live cell.
    pub fn set_pair(&mut self, cell: CellRef, left: CellRef, right: CellRef) -> bool {
        if self.heap.get(left).is_none() || self.heap.get(right).is_none() {
            return false;
        }
        match self.heap.get_mut(cell) {
            Some(slot) => match slot.value {
                CellValue::Pair(..) => {
                    slot.value = CellValue::Pair(left, right);
                    true
                }
                CellValue::Atom(_) => false,
            },
            None => false,
        }
    }

    pub fn is_marked(&self, cell: CellRef) -> bool {
        self.heap.is_marked(cell)
    }

    pub fn stats(&self) -> &GcStats {
        &self.heap.stats
    }

    fn allocate(&mut self, value: CellValue) -> Result<CellRef, VmError> {
        if let Some(cell) = self.heap.try_allocate(value) {
            return Ok(cell);
        }
        // Free list empty: one synchronous collection, then give up. If
        // nothing came back, every allocated cell was reachable.
        self.collect();
        self.heap
            .try_allocate(value)
            .ok_or(VmError::ExhaustedMemory)
    }

    fn check_threshold(&mut self) {
        if self.heap.live_count() >= self.config.max_objects {
            self.collect();
        }
    }
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Vm {
    /// Teardown mirrors construction in reverse: drop every root, run one
    /// last collection so the log shows the final reclamation, then let the
    /// pool free its storage with the value.
    fn drop(&mut self) {
        self.stack.clear();
        gc::collect(&mut self.heap, &self.stack);
    }
}
