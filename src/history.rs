use crate::error::QixError;
use crate::line::Line;

/// Fixed-size ring of the most recently drawn lines. The slot under the
/// cursor always holds the oldest line, which is the next one to erase.
pub struct HistoryRing {
    entries: Box<[Line]>,
    cursor: usize,
}

impl HistoryRing {
    /// every slot starts as a copy of `initial`
    pub fn new(capacity: usize, initial: Line) -> Result<Self, QixError> {
        if capacity == 0 {
            return Err(QixError::Config(
                "history size must be at least 1".to_string(),
            ));
        }
        Ok(HistoryRing {
            entries: vec![initial; capacity].into_boxed_slice(),
            cursor: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// the line that the next push will evict
    pub fn oldest(&self) -> &Line {
        &self.entries[self.cursor]
    }

    /// store `line` over the oldest entry and hand back what was there
    pub fn push_and_get_evicted(&mut self, line: Line) -> Line {
        let evicted = std::mem::replace(&mut self.entries[self.cursor], line);
        self.cursor = (self.cursor + 1) % self.entries.len();
        evicted
    }

    /// oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Line> + '_ {
        let (newer, older) = self.entries.split_at(self.cursor);
        older.iter().chain(newer.iter())
    }
}
