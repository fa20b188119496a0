pub mod freelist;
pub mod gc;

use crate::runtime::cell::{Cell, CellRef, CellValue};
use freelist::FreeList;

/// One pool entry. The `Used` discriminant is the allocated-set membership
/// test: the sweep phase walks every index and inspects it.
enum Slot {
    Free,
    Used(Cell),
}

/// Counters kept across collections, readable by clients.
#[derive(Clone, Debug, Default)]
pub struct GcStats {
    /// Completed mark/sweep cycles.
    pub collections: usize,
    /// Cells returned to the free list over all cycles.
    pub reclaimed: usize,
}

/// Fixed-capacity cell pool plus its allocation bookkeeping.
///
/// Exactly `heap_size` slots exist for the heap's whole life. Every slot is
/// either on the free list or counted in `live_count`:
/// `live_count + free_count == capacity` at all times.
pub struct Heap {
    slots: Vec<Slot>,
    free_list: FreeList,
    live_count: usize,
    pub stats: GcStats,
}

impl Heap {
    pub fn new(heap_size: usize) -> Self {
        let mut slots = Vec::with_capacity(heap_size);
        let mut free_list = FreeList::new();
        for idx in 0..heap_size {
            slots.push(Slot::Free);
            free_list.add(CellRef(idx as u32));
        }
        Self {
            slots,
            free_list,
            live_count: 0,
            stats: GcStats::default(),
        }
    }

    /// Draws a slot from the free list and installs `value` in it, mark
    /// cleared. `None` means the pool is exhausted; the caller decides
    /// whether a collection can still save the request.
    pub fn try_allocate(&mut self, value: CellValue) -> Option<CellRef> {
        let cell = self.free_list.alloc()?;
        self.slots[cell.index()] = Slot::Used(Cell::new(value));
        self.live_count += 1;
        Some(cell)
    }

    /// Allocated cells, unswept garbage included.
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, cell: CellRef) -> Option<&Cell> {
        match self.slots.get(cell.index()) {
            Some(Slot::Used(cell)) => Some(cell),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, cell: CellRef) -> Option<&mut Cell> {
        match self.slots.get_mut(cell.index()) {
            Some(Slot::Used(cell)) => Some(cell),
            _ => None,
        }
    }

    pub fn is_marked(&self, cell: CellRef) -> bool {
        self.get(cell).map_or(false, |c| c.marked)
    }

    /// Resolves a reference that is known to be live: a root-stack entry or
    /// a live pair's child. A `Free` slot here means the bookkeeping broke.
    pub(crate) fn cell(&self, cell: CellRef) -> &Cell {
        match &self.slots[cell.index()] {
            Slot::Used(cell) => cell,
            Slot::Free => unreachable!("dangling cell reference {:?}", cell),
        }
    }

    pub(crate) fn cell_mut(&mut self, cell: CellRef) -> &mut Cell {
        match &mut self.slots[cell.index()] {
            Slot::Used(cell) => cell,
            Slot::Free => unreachable!("dangling cell reference {:?}", cell),
        }
    }
}
