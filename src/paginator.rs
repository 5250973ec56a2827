/// Incremental reveal over an already fetched list: starts with `floor`
/// items and grows by `step` on each "load more".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paginator {
    floor: u32,
    step: u32,
    visible: u32,
}

impl Paginator {
    pub fn new(floor: u32, step: u32) -> Self {
        Paginator {
            floor,
            step,
            visible: floor,
        }
    }

    pub fn visible(&self) -> u32 {
        self.visible
    }

    pub fn reset(&mut self) {
        self.visible = self.floor;
    }

    pub fn load_more(&mut self) {
        self.visible = self.visible.saturating_add(self.step);
    }

    pub fn has_more(&self, item_count: usize) -> bool {
        (self.visible as usize) < item_count
    }

    /// Number of "load more" steps taken since the last reset.
    pub fn steps(&self) -> u32 {
        match self.step {
            0 => 0,
            step => (self.visible - self.floor) / step,
        }
    }

    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = (self.visible as usize).min(items.len());
        &items[..end]
    }
}
