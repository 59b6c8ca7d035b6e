use std::ops::Range;

use super::line_buffer::LineBuffer;
use super::{convolve_window, cropped_range, BorderManagement};
use crate::pixels::{KernelWeight, PixelTrait};
use crate::{ImageView, ImageViewMut, Kernel};

/// Convolves columns `cols` of the source image by the kernel and stores
/// results into the same columns of the destination image.
///
/// Both images must have the same dimensions, `cols` must lie
/// inside of them. Other columns of the destination image are not changed.
pub fn vertical_convolution<P: PixelTrait>(
    src: &impl ImageView<Pixel = P>,
    kernel: &Kernel<KernelWeight<P>>,
    dst: &mut impl ImageViewMut<Pixel = P>,
    cols: Range<u32>,
    border: BorderManagement,
) {
    debug_assert!(src.width() == dst.width() && src.height() == dst.height());
    debug_assert!(cols.start <= cols.end && cols.end <= src.width());
    let height = src.height() as usize;
    let (first_col, last_col) = (cols.start as usize, cols.end as usize);
    let src_rows: Vec<&[P]> = src.iter_rows(0).take(height).collect();
    let mut dst_rows: Vec<&mut [P]> = dst
        .iter_rows_mut(0)
        .take(height)
        .map(|row| &mut row[first_col..last_col])
        .collect();
    convolve_columns(&src_rows, &mut dst_rows, first_col, kernel, border);
}

/// Convolves columns `cols` of the image by the kernel in place.
pub fn vertical_convolution_inplace<P: PixelTrait>(
    image: &mut impl ImageViewMut<Pixel = P>,
    kernel: &Kernel<KernelWeight<P>>,
    cols: Range<u32>,
    border: BorderManagement,
) {
    debug_assert!(cols.start <= cols.end && cols.end <= image.width());
    let height = image.height() as usize;
    let (first_col, last_col) = (cols.start as usize, cols.end as usize);
    let mut rows: Vec<&mut [P]> = image
        .iter_rows_mut(0)
        .take(height)
        .map(|row| &mut row[first_col..last_col])
        .collect();
    convolve_columns_inplace(&mut rows, kernel, border);
}

/// Convolves a strip of columns.
///
/// `src_rows` are full rows of the source image, `dst_rows` are segments
/// of destination rows that start from the column `first_col`.
pub(crate) fn convolve_columns<P: PixelTrait>(
    src_rows: &[&[P]],
    dst_rows: &mut [&mut [P]],
    first_col: usize,
    kernel: &Kernel<KernelWeight<P>>,
    border: BorderManagement,
) {
    debug_assert_eq!(src_rows.len(), dst_rows.len());
    let strip_width = dst_rows.first().map_or(0, |row| row.len());
    if src_rows.is_empty() || strip_width == 0 {
        return;
    }
    match border {
        BorderManagement::Copy => {
            convolve_columns_border_copy(src_rows, dst_rows, first_col, kernel.values())
        }
        BorderManagement::Crop => {
            convolve_columns_border_crop(src_rows, dst_rows, first_col, kernel.values())
        }
    }
}

/// Every destination row is a weighted sum of whole source rows.
/// Indexes of source rows outside the image are clamped to the nearest edge.
fn convolve_columns_border_copy<P: PixelTrait>(
    src_rows: &[&[P]],
    dst_rows: &mut [&mut [P]],
    first_col: usize,
    weights: &[KernelWeight<P>],
) {
    let last_src_row = src_rows.len() - 1;
    let half_width = weights.len() / 2;
    let mut taps: Vec<(&[P], KernelWeight<P>)> = Vec::with_capacity(weights.len());
    for (y, dst_row) in dst_rows.iter_mut().enumerate() {
        let last_col = first_col + dst_row.len();
        taps.clear();
        taps.extend(weights.iter().enumerate().map(|(k, &weight)| {
            let src_y = (y + k).saturating_sub(half_width).min(last_src_row);
            (&src_rows[src_y][first_col..last_col], weight)
        }));
        convolve_taps(&taps, dst_row);
    }
}

#[inline]
fn convolve_taps<P: PixelTrait>(taps: &[(&[P], KernelWeight<P>)], dst: &mut [P]) {
    let mut x = 0;
    let mut dst_chunks = dst.chunks_exact_mut(4);
    for dst_chunk in &mut dst_chunks {
        let mut sums = [P::zero_accumulator(); 4];
        for &(src, weight) in taps {
            for (sum, &pixel) in sums.iter_mut().zip(&src[x..x + 4]) {
                P::accumulate(sum, pixel, weight);
            }
        }
        for (dst_pixel, sum) in dst_chunk.iter_mut().zip(sums) {
            *dst_pixel = P::from_accumulator(sum);
        }
        x += 4;
    }

    for dst_pixel in dst_chunks.into_remainder() {
        let mut sum = P::zero_accumulator();
        for &(src, weight) in taps {
            P::accumulate(&mut sum, src[x], weight);
        }
        *dst_pixel = P::from_accumulator(sum);
        x += 1;
    }
}

fn convolve_columns_border_crop<P: PixelTrait>(
    src_rows: &[&[P]],
    dst_rows: &mut [&mut [P]],
    first_col: usize,
    weights: &[KernelWeight<P>],
) {
    let half_width = weights.len() / 2;
    let Some(cropped) = cropped_range(src_rows.len(), half_width) else {
        return;
    };
    let strip_width = dst_rows.first().map_or(0, |row| row.len());
    let mut line = LineBuffer::new(half_width, src_rows.len());
    for x in 0..strip_width {
        let column = line.load_column(src_rows, first_col + x, BorderManagement::Crop);
        let windows = column.windows(weights.len());
        for (dst_row, window) in dst_rows[cropped.clone()].iter_mut().zip(windows) {
            dst_row[x] = convolve_window(window, weights);
        }
    }
}

pub(crate) fn convolve_columns_inplace<P: PixelTrait>(
    rows: &mut [&mut [P]],
    kernel: &Kernel<KernelWeight<P>>,
    border: BorderManagement,
) {
    let height = rows.len();
    let strip_width = rows.first().map_or(0, |row| row.len());
    if height == 0 || strip_width == 0 {
        return;
    }
    let weights = kernel.values();
    let half_width = kernel.half_width();
    let cropped = match border {
        BorderManagement::Copy => 0..height,
        BorderManagement::Crop => match cropped_range(height, half_width) {
            Some(cropped) => cropped,
            None => return,
        },
    };
    let mut line = LineBuffer::new(half_width, height);
    for x in 0..strip_width {
        let column = line.load_column(&*rows, x, border);
        let windows = column.windows(weights.len());
        for (row, window) in rows[cropped.clone()].iter_mut().zip(windows) {
            row[x] = convolve_window(window, weights);
        }
    }
}
