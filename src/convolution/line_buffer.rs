use std::iter;
use std::ops::Deref;

use super::BorderManagement;

/// Reusable buffer with a copy of one line (row or column) of an image.
///
/// With [BorderManagement::Copy] the line is padded from both sides
/// by `half_width` replicas of its edge pixels.
pub(crate) struct LineBuffer<P> {
    pixels: Vec<P>,
    half_width: usize,
}

impl<P: Copy> LineBuffer<P> {
    pub fn new(half_width: usize, len: usize) -> Self {
        Self {
            pixels: Vec::with_capacity(len + 2 * half_width),
            half_width,
        }
    }

    pub fn load_row(&mut self, row: &[P], border: BorderManagement) -> &[P] {
        self.pixels.clear();
        match (border, row.first(), row.last()) {
            (BorderManagement::Copy, Some(&first), Some(&last)) => {
                self.pixels.extend(iter::repeat_n(first, self.half_width));
                self.pixels.extend_from_slice(row);
                self.pixels.extend(iter::repeat_n(last, self.half_width));
            }
            _ => self.pixels.extend_from_slice(row),
        }
        &self.pixels
    }

    pub fn load_column<R>(&mut self, rows: &[R], col: usize, border: BorderManagement) -> &[P]
    where
        R: Deref<Target = [P]>,
    {
        self.pixels.clear();
        let column = rows.iter().map(|row| row[col]);
        match (border, rows.first(), rows.last()) {
            (BorderManagement::Copy, Some(first), Some(last)) => {
                self.pixels.extend(iter::repeat_n(first[col], self.half_width));
                self.pixels.extend(column);
                self.pixels.extend(iter::repeat_n(last[col], self.half_width));
            }
            _ => self.pixels.extend(column),
        }
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_row() {
        let mut buffer = LineBuffer::new(2, 3);
        assert_eq!(
            buffer.load_row(&[1, 2, 3], BorderManagement::Copy),
            &[1, 1, 1, 2, 3, 3, 3]
        );
        assert_eq!(buffer.load_row(&[4, 5], BorderManagement::Crop), &[4, 5]);
        assert!(buffer.load_row(&[], BorderManagement::Copy).is_empty());
    }

    #[test]
    fn padded_column() {
        let rows: [&[u8]; 3] = [&[1, 2], &[3, 4], &[5, 6]];
        let mut buffer = LineBuffer::new(1, 3);
        assert_eq!(
            buffer.load_column(&rows, 1, BorderManagement::Copy),
            &[2, 2, 4, 6, 6]
        );
        assert_eq!(
            buffer.load_column(&rows, 0, BorderManagement::Crop),
            &[1, 3, 5]
        );
    }
}
