use crate::pixels::PixelTrait;

/// A trait for getting access to image data.
///
/// Rows of image must be stored sequentially. Each row must
/// contain exactly `width()` pixels.
pub trait ImageView {
    type Pixel: PixelTrait;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Count of rows, it is equal to height of image.
    #[inline]
    fn rows(&self) -> u32 {
        self.height()
    }

    /// Count of columns, it is equal to width of image.
    #[inline]
    fn cols(&self) -> u32 {
        self.width()
    }

    /// Returns iterator by slices with image rows.
    fn iter_rows(&self, start_row: u32) -> impl Iterator<Item = &[Self::Pixel]>;

    fn get_row(&self, row: u32) -> Option<&[Self::Pixel]> {
        if row < self.height() {
            self.iter_rows(row).next()
        } else {
            None
        }
    }

    fn get_pixel(&self, row: u32, col: u32) -> Option<&Self::Pixel> {
        self.get_row(row)
            .and_then(|pixels| pixels.get(col as usize))
    }
}

/// A trait for getting mutable access to image data.
pub trait ImageViewMut: ImageView {
    /// Returns iterator by mutable slices with image rows.
    fn iter_rows_mut(&mut self, start_row: u32) -> impl Iterator<Item = &mut [Self::Pixel]>;

    fn get_row_mut(&mut self, row: u32) -> Option<&mut [Self::Pixel]> {
        if row < self.height() {
            self.iter_rows_mut(row).next()
        } else {
            None
        }
    }

    fn get_pixel_mut(&mut self, row: u32, col: u32) -> Option<&mut Self::Pixel> {
        self.get_row_mut(row)
            .and_then(|pixels| pixels.get_mut(col as usize))
    }
}
