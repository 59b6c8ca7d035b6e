use std::ops::Range;

use super::line_buffer::LineBuffer;
use super::{convolve_line, cropped_range, BorderManagement};
use crate::pixels::{KernelWeight, PixelTrait};
use crate::{ImageView, ImageViewMut, Kernel};

/// Convolves rows `rows` of the source image by the kernel and stores
/// results into the same rows of the destination image.
///
/// Both images must have the same dimensions, `rows` must lie
/// inside of them. Other rows of the destination image are not changed.
pub fn horizontal_convolution<P: PixelTrait>(
    src: &impl ImageView<Pixel = P>,
    kernel: &Kernel<KernelWeight<P>>,
    dst: &mut impl ImageViewMut<Pixel = P>,
    rows: Range<u32>,
    border: BorderManagement,
) {
    debug_assert!(src.width() == dst.width() && src.height() == dst.height());
    debug_assert!(rows.start <= rows.end && rows.end <= src.height());
    let rows_count = rows.end.saturating_sub(rows.start) as usize;
    convolve_rows(
        src.iter_rows(rows.start).take(rows_count),
        dst.iter_rows_mut(rows.start).take(rows_count),
        src.width() as usize,
        kernel,
        border,
    );
}

/// Convolves rows `rows` of the image by the kernel in place.
pub fn horizontal_convolution_inplace<P: PixelTrait>(
    image: &mut impl ImageViewMut<Pixel = P>,
    kernel: &Kernel<KernelWeight<P>>,
    rows: Range<u32>,
    border: BorderManagement,
) {
    debug_assert!(rows.start <= rows.end && rows.end <= image.height());
    let rows_count = rows.end.saturating_sub(rows.start) as usize;
    let width = image.width() as usize;
    convolve_rows_inplace(
        image.iter_rows_mut(rows.start).take(rows_count),
        width,
        kernel,
        border,
    );
}

pub(crate) fn convolve_rows<'a, 'b, P: PixelTrait>(
    src_rows: impl Iterator<Item = &'a [P]>,
    dst_rows: impl Iterator<Item = &'b mut [P]>,
    width: usize,
    kernel: &Kernel<KernelWeight<P>>,
    border: BorderManagement,
) {
    if width == 0 {
        return;
    }
    let weights = kernel.values();
    let half_width = kernel.half_width();
    match border {
        BorderManagement::Copy => {
            let mut line = LineBuffer::new(half_width, width);
            for (src_row, dst_row) in src_rows.zip(dst_rows) {
                let padded = line.load_row(src_row, border);
                convolve_line(padded, weights, dst_row);
            }
        }
        BorderManagement::Crop => {
            let Some(cropped) = cropped_range(width, half_width) else {
                return;
            };
            // Source and destination are different, so the row
            // of source image may be used without copying.
            for (src_row, dst_row) in src_rows.zip(dst_rows) {
                convolve_line(src_row, weights, &mut dst_row[cropped.clone()]);
            }
        }
    }
}

pub(crate) fn convolve_rows_inplace<'a, P: PixelTrait>(
    rows: impl Iterator<Item = &'a mut [P]>,
    width: usize,
    kernel: &Kernel<KernelWeight<P>>,
    border: BorderManagement,
) {
    if width == 0 {
        return;
    }
    let weights = kernel.values();
    let half_width = kernel.half_width();
    let cropped = match border {
        BorderManagement::Copy => 0..width,
        BorderManagement::Crop => match cropped_range(width, half_width) {
            Some(cropped) => cropped,
            None => return,
        },
    };
    let mut line = LineBuffer::new(half_width, width);
    for row in rows {
        let src_line = line.load_row(row, border);
        convolve_line(src_line, weights, &mut row[cropped.clone()]);
    }
}
