//! One-dimensional convolution of rows or columns of an image
//! inside a single band.
use std::ops::Range;

pub use horizontal::{horizontal_convolution, horizontal_convolution_inplace};
pub use vertical::{vertical_convolution, vertical_convolution_inplace};

pub(crate) use horizontal::{convolve_rows, convolve_rows_inplace};
pub(crate) use vertical::{convolve_columns, convolve_columns_inplace};

use crate::pixels::{KernelWeight, PixelTrait};

mod horizontal;
mod line_buffer;
mod vertical;

/// Strategy to handle pixels near image borders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BorderManagement {
    /// Pixels outside the image are treated as replicas of the nearest
    /// edge pixel. Every output pixel is computed.
    #[default]
    Copy,
    /// Only output pixels for which the whole kernel lies inside the image
    /// are computed. Pixels closer than `kernel.half_width()` to the edges
    /// of convolved direction are not written.
    Crop,
}

#[inline(always)]
pub(crate) fn convolve_window<P: PixelTrait>(window: &[P], weights: &[KernelWeight<P>]) -> P {
    let mut sum = P::zero_accumulator();
    for (&pixel, &weight) in window.iter().zip(weights) {
        P::accumulate(&mut sum, pixel, weight);
    }
    P::from_accumulator(sum)
}

/// Convolves every full window of `src` and writes results into `dst`.
#[inline]
pub(crate) fn convolve_line<P: PixelTrait>(
    src: &[P],
    weights: &[KernelWeight<P>],
    dst: &mut [P],
) {
    debug_assert_eq!(src.len() + 1, dst.len() + weights.len());
    for (dst_pixel, window) in dst.iter_mut().zip(src.windows(weights.len())) {
        *dst_pixel = convolve_window(window, weights);
    }
}

/// Positions of a line with given length that are fully covered
/// by a kernel centered on them.
#[inline]
pub(crate) fn cropped_range(len: usize, half_width: usize) -> Option<Range<usize>> {
    (len > 2 * half_width).then(|| half_width..len - half_width)
}
