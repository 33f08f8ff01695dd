//! Per-column y-buffer: the topmost row already painted in each column.
use raylib::prelude::Color;

use crate::render::framebuffer::Framebuffer;

pub struct OcclusionBuffer {
    tops: Vec<u32>,
    height: u32,
}

impl OcclusionBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { tops: vec![height; width as usize], height }
    }

    /// Reopens every column. Keeps the allocation unless the size changed.
    pub fn reset(&mut self, width: u32, height: u32) {
        self.height = height;
        self.tops.resize(width as usize, height);
        self.tops.fill(height);
    }

    pub fn width(&self) -> u32 { self.tops.len() as u32 }

    #[inline]
    pub fn top(&self, column: u32) -> Option<u32> {
        self.tops.get(column as usize).copied()
    }

    /// Paints `[proposed_top, top)` of `column` and lowers its top when the
    /// proposal is above what is already there. Returns whether it drew.
    #[inline]
    pub fn composite(&mut self, target: &mut Framebuffer, column: u32, proposed_top: u32, color: Color) -> bool {
        let Some(top) = self.tops.get_mut(column as usize) else {
            return false;
        };
        if proposed_top >= *top {
            return false;
        }
        target.fill_column(column, proposed_top, *top, color);
        *top = proposed_top;
        true
    }
}
