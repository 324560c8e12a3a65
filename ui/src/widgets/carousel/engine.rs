//! Index and geometry bookkeeping for the carousel. Pure; no host access.

/// Layout measurements, taken fresh every time they are needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub container_width: f64,
    pub item_width: f64,
    pub gap: f64,
    pub item_count: usize,
}

impl Geometry {
    /// Distance between the left edges of two neighbouring items.
    pub fn step(&self) -> f64 {
        self.item_width + self.gap
    }

    /// How many items fit in the container at once (never less than one).
    pub fn visible_count(&self) -> usize {
        // Float-to-int casts saturate: NaN and negatives become 0, infinity usize::MAX.
        ((self.container_width / self.step()).floor() as usize).max(1)
    }

    pub fn max_index(&self) -> usize {
        self.item_count.saturating_sub(self.visible_count())
    }

    /// Horizontal translation that brings item `index` to the left edge.
    pub fn offset(&self, index: usize) -> f64 {
        -(index as f64) * self.step()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Next,
    Prev,
}

/// Classify a finished drag. `start_x - end_x` must exceed `threshold`;
/// dragging content leftwards (positive delta) advances.
pub fn swipe(start_x: f64, end_x: f64, threshold: f64) -> Option<Swipe> {
    let delta = start_x - end_x;
    if delta.abs() <= threshold {
        None
    } else if delta > 0.0 {
        Some(Swipe::Next)
    } else {
        Some(Swipe::Prev)
    }
}

#[derive(Debug, Default, Clone)]
pub struct CarouselEngine {
    current: usize,
}

impl CarouselEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Step forward unless already at `max_index`. Returns whether it moved.
    pub fn next(&mut self, max_index: usize) -> bool {
        if self.current < max_index {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    pub fn go_to(&mut self, index: i64, max_index: usize) {
        self.current = usize::try_from(index.max(0))
            .unwrap_or(usize::MAX)
            .min(max_index);
    }

    /// Pull the index back inside `[0, max_index]` after a layout change.
    pub fn reclamp(&mut self, max_index: usize) -> bool {
        if self.current > max_index {
            self.current = max_index;
            true
        } else {
            false
        }
    }
}
