pub mod blend;
pub mod draw;

use std::ops;

pub use blend::{Argb, Mixer};

pub(crate) trait Pixel:
    Copy
    + Clone
    + Sized
    + ops::BitAnd<Output = Self>
    + ops::BitOr<Output = Self>
    + std::fmt::Debug
{
    fn white() -> Self;
    fn trans() -> Self;

    fn mix(self, other: Self) -> Self;

    fn decompose(self) -> [u8; 4];
    fn compose(array: [u8; 4]) -> Self;
}

/// Pixel position, may lie outside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct P2(pub i32, pub i32);

/// Software canvas the game is drawn into before being handed to a
/// front end.
pub struct PixelBuffer {
    buffer: Vec<Argb>,
    width: usize,
    height: usize,

    mixer: Mixer,
    background: Argb,
}

impl PixelBuffer {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            buffer: vec![Argb::trans(); w * h],
            width: w,
            height: h,

            mixer: Argb::mix,
            background: Argb::white(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.buffer.fill(Argb::trans());
    }

    pub fn pixel_xy(&self, p: P2) -> Option<Argb> {
        self.index_of(p).map(|i| self.buffer[i])
    }

    fn index_of(&self, p: P2) -> Option<usize> {
        let (x, y) = (usize::try_from(p.0).ok()?, usize::try_from(p.1).ok()?);

        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Blows every pixel up into a `scale` x `scale` block of `dest`,
    /// compositing it over the background.
    ///
    /// `width` is the row length of `dest`, which may be wider than the
    /// scaled buffer after the window was resized. Anything outside the
    /// scaled area keeps the background color.
    pub fn scale_to(&self, scale: usize, dest: &mut [Argb], width: Option<usize>) {
        if self.width == 0 || scale == 0 {
            return;
        }

        let dst_width = width.unwrap_or(self.width * scale);

        dest.fill(self.background);

        let copy_width = (self.width * scale).min(dst_width);

        self.buffer
            .chunks_exact(self.width) // source lines
            .zip(dest.chunks_mut(dst_width * scale)) // with destination bands
            .for_each(|(src_row, dst_band)| {
                for dst_row in dst_band.chunks_exact_mut(dst_width) {
                    src_row
                        .iter()
                        .zip(dst_row[..copy_width].chunks_mut(scale))
                        .for_each(|(src_pixel, dst_chunk)| {
                            dst_chunk.fill((self.mixer)(self.background, *src_pixel))
                        });
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_doubles_pixels() {
        let mut pix = PixelBuffer::new(2, 1);
        pix.set_pixel_xy(P2(1, 0), 0xFF_FF_00_00);

        let mut dest = vec![0; 4 * 2];
        pix.scale_to(2, &mut dest, None);

        assert_eq!(
            dest,
            [
                0xFF_FF_FF_FF,
                0xFF_FF_FF_FF,
                0xFF_FF_00_00,
                0xFF_FF_00_00,
                0xFF_FF_FF_FF,
                0xFF_FF_FF_FF,
                0xFF_FF_00_00,
                0xFF_FF_00_00,
            ]
        );
    }

    #[test]
    fn wider_destination_keeps_background() {
        let mut pix = PixelBuffer::new(1, 1);
        pix.set_pixel_xy(P2(0, 0), 0xFF_00_00_FF);

        let mut dest = vec![0; 3 * 2];
        pix.scale_to(1, &mut dest, Some(3));

        assert_eq!(dest[0], 0xFF_00_00_FF);
        assert_eq!(&dest[1..], &[Argb::white(); 5]);
    }

    #[test]
    fn out_of_range_positions_are_ignored() {
        let pix = PixelBuffer::new(4, 4);

        assert_eq!(pix.pixel_xy(P2(-1, 0)), None);
        assert_eq!(pix.pixel_xy(P2(4, 0)), None);
        assert_eq!(pix.pixel_xy(P2(3, 3)), Some(Argb::trans()));
    }
}
