/// Heap sizing, in cells.
#[derive(Copy, Clone, Debug)]
pub struct Config {
    /// Live-object count at which a collection fires automatically.
    pub max_objects: usize,
    /// Total number of slots in the pool. Fixed at construction.
    pub heap_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_objects: 10,
            heap_size: 100,
        }
    }
}
