//=========================================================================
// Surface
//=========================================================================
//
// The opaque drawing target handed to every `draw` call.
//
// Widgets never inspect a surface; they only issue primitive calls on it
// and forward it to their children. `FrameBuffer` is a headless ARGB
// implementation used by the logic thread and by tests.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::geometry::{Point, Rect, Size};

//=== Color ===============================================================

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packs the colour as `0xAARRGGBB` with full alpha.
    pub const fn to_argb(self) -> u32 {
        0xFF00_0000 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

//=== Surface Trait =======================================================

/// Drawing service the widget tree renders into.
pub trait Surface: Send {
    /// Current drawable size.
    fn size(&self) -> Size;

    /// Reallocates the drawable area (window resize).
    fn resize(&mut self, size: Size);

    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Fills `rect`, clipped to the surface bounds.
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

//=== FrameBuffer =========================================================

/// In-memory ARGB pixel buffer.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    size: Size,
    pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![0; size.area()],
        }
    }

    /// Returns the packed pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.pixels.get((y * self.size.width + x) as usize).copied()
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    fn bounds(&self) -> Rect {
        Rect::new(Point::ORIGIN, self.size)
    }
}

impl Surface for FrameBuffer {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.pixels.clear();
        self.pixels.resize(size.area(), 0);
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_argb());
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(clipped) = rect.intersect(&self.bounds()) else {
            return;
        };

        let argb = color.to_argb();
        let stride = self.size.width as usize;
        let x0 = clipped.origin.x as usize;
        let x1 = x0 + clipped.size.width as usize;

        for y in clipped.origin.y as usize..clipped.origin.y as usize + clipped.size.height as usize {
            let row = y * stride;
            self.pixels[row + x0..row + x1].fill(argb);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn argb_packing() {
        assert_eq!(Color::rgb(0x12, 0x34, 0x56).to_argb(), 0xFF12_3456);
        assert_eq!(Color::BLACK.to_argb(), 0xFF00_0000);
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut fb = FrameBuffer::new(Size::new(4, 3));
        fb.clear(RED);
        assert!(fb.pixels().iter().all(|&p| p == RED.to_argb()));
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut fb = FrameBuffer::new(Size::new(4, 4));
        fb.clear(Color::BLACK);

        fb.fill_rect(Rect::new(Point::new(2, 2), Size::new(10, 10)), RED);

        assert_eq!(fb.pixel(1, 1), Some(Color::BLACK.to_argb()));
        assert_eq!(fb.pixel(2, 2), Some(RED.to_argb()));
        assert_eq!(fb.pixel(3, 3), Some(RED.to_argb()));
        assert_eq!(fb.pixel(4, 4), None);
    }

    #[test]
    fn fill_rect_outside_is_noop() {
        let mut fb = FrameBuffer::new(Size::new(4, 4));
        fb.fill_rect(Rect::new(Point::new(-10, -10), Size::new(5, 5)), RED);
        assert!(fb.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn resize_reallocates() {
        let mut fb = FrameBuffer::new(Size::new(2, 2));
        fb.resize(Size::new(8, 5));
        assert_eq!(fb.size(), Size::new(8, 5));
        assert_eq!(fb.pixels().len(), 40);
    }
}
