use super::{Argb, PixelBuffer, P2};
use crate::game::{Cell, Grid};

impl PixelBuffer {
    pub fn set_pixel_xy(&mut self, p: P2, c: Argb) {
        if let Some(i) = self.index_of(p) {
            self.buffer[i] = c;
        }
    }

    /// Filled rectangle covering `[p, p + (w, h))`, clipped to the buffer.
    pub fn draw_rect_wh(&mut self, p: P2, w: usize, h: usize, c: Argb) {
        let xs = p.0.max(0) as usize;
        let ys = p.1.max(0) as usize;
        let xe = (p.0 + w as i32).clamp(0, self.width as i32) as usize;
        let ye = (p.1 + h as i32).clamp(0, self.height as i32) as usize;

        if xs >= xe {
            return;
        }

        let width = self.width;

        for line in self.buffer.chunks_exact_mut(width).take(ye).skip(ys) {
            line[xs..xe].fill(c);
        }
    }

    /// One pixel wide closed outline through the four corners
    /// `p`, `p + (w, 0)`, `p + (w, h)` and `p + (0, h)`.
    pub fn draw_rect_outline(&mut self, p: P2, w: usize, h: usize, c: Argb) {
        let (w, h) = (w as i32, h as i32);

        for x in 0..=w {
            self.set_pixel_xy(P2(p.0 + x, p.1), c);
            self.set_pixel_xy(P2(p.0 + x, p.1 + h), c);
        }

        for y in 0..=h {
            self.set_pixel_xy(P2(p.0, p.1 + y), c);
            self.set_pixel_xy(P2(p.0 + w, p.1 + y), c);
        }
    }

    /// Vacant cells are drawn as outlines, occupied ones are filled.
    pub fn draw_cell(&mut self, cell: &Cell, len: usize) {
        if cell.is_vacant() {
            self.draw_rect_outline(cell.position(), len, len, cell.color());
        } else {
            self.draw_rect_wh(cell.position(), len, len, cell.color());
        }
    }

    pub fn draw_grid(&mut self, grid: &Grid) {
        let len = grid.cell_len() as usize;

        self.clear();

        // Outlines first so that filled cells cover the shared edges.
        for cell in grid.cells().filter(|c| c.is_vacant()) {
            self.draw_cell(cell, len);
        }

        for cell in grid.cells().filter(|c| c.is_occupied()) {
            self.draw_cell(cell, len);
        }
    }
}
