use serde::Serialize;

/// Byte range into the template source.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: u32,
    pub length: u32,
}

impl Span {
    #[must_use]
    pub fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }

    #[must_use]
    pub fn from_bounds(start: usize, end: usize) -> Self {
        let start_u32 = u32::try_from(start).unwrap_or(u32::MAX);
        let length = u32::try_from(end.saturating_sub(start)).unwrap_or(u32::MAX);
        Self::new(start_u32, length)
    }

    #[must_use]
    pub fn end(&self) -> u32 {
        self.start.saturating_add(self.length)
    }

    #[must_use]
    pub fn as_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end() as usize
    }
}
