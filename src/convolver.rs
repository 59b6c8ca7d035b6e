use log::debug;

use crate::convolution::{self, BorderManagement};
use crate::images::TypedImage;
use crate::pixels::{KernelWeight, PixelTrait};
use crate::threading::{fork_join, split_columns_into_bands, split_range, split_rows_into_bands};
use crate::{hardware_concurrency, ImageBufferError, ImageView, ImageViewMut, Kernel};

/// Convolves whole images by splitting them into bands
/// which are processed concurrently.
///
/// Horizontal convolution splits an image into bands of rows,
/// vertical convolution splits it into bands of columns. Every non-empty
/// band is processed by its own worker, methods return after all workers
/// have finished. Results don't depend on count of threads.
///
/// A panic inside of any band is propagated to the caller after all
/// other bands have been processed.
///
/// # Examples
///
/// ```
/// use fast_image_conv::images::TypedImage;
/// use fast_image_conv::{BorderManagement, Convolver, Kernel};
///
/// let src = TypedImage::<f32>::from_pixels(5, 1, vec![1., 2., 3., 4., 5.]).unwrap();
/// let mut dst = TypedImage::new(0, 0);
/// let kernel = Kernel::new(vec![1f32, 1., 1.]).unwrap();
///
/// let convolver = Convolver::new(2);
/// convolver
///     .horizontal_convolution(&src, &kernel, &mut dst, BorderManagement::Copy)
///     .unwrap();
/// assert_eq!(dst.pixels(), &[4., 6., 9., 12., 14.]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Convolver {
    num_threads: usize,
}

impl Default for Convolver {
    /// Creates a convolver that uses all hardware threads.
    fn default() -> Self {
        Self::new(hardware_concurrency())
    }
}

impl Convolver {
    /// Zero `num_threads` is treated as `1`.
    pub fn new(num_threads: usize) -> Self {
        Self {
            num_threads: num_threads.max(1),
        }
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    pub fn set_num_threads(&mut self, num_threads: usize) {
        self.num_threads = num_threads.max(1);
    }

    /// Convolves rows of the source image by the kernel.
    ///
    /// The destination image is resized to dimensions of the source image
    /// if they are different.
    pub fn horizontal_convolution<P: PixelTrait>(
        &self,
        src: &impl ImageView<Pixel = P>,
        kernel: &Kernel<KernelWeight<P>>,
        dst: &mut TypedImage<'_, P>,
        border: BorderManagement,
    ) -> Result<(), ImageBufferError> {
        dst.resize(src.width(), src.height())?;
        let width = src.width() as usize;
        let height = src.height() as usize;
        let boundaries = split_range(src.height(), self.num_threads);
        debug!(
            "Horizontal convolution of {}x{} image by {} bands",
            width,
            height,
            self.num_threads.min(height)
        );

        let src_rows: Vec<&[P]> = src.iter_rows(0).take(height).collect();
        let mut dst_rows: Vec<&mut [P]> = dst.iter_rows_mut(0).collect();
        let jobs = split_rows_into_bands(&mut dst_rows, &boundaries);
        fork_join(jobs, |(band, dst_band)| {
            let src_band = &src_rows[band.start as usize..band.end as usize];
            convolution::convolve_rows(
                src_band.iter().copied(),
                dst_band.iter_mut().map(|row| &mut **row),
                width,
                kernel,
                border,
            );
        });
        Ok(())
    }

    /// Convolves rows of the image by the kernel in place.
    pub fn horizontal_convolution_inplace<P: PixelTrait>(
        &self,
        image: &mut impl ImageViewMut<Pixel = P>,
        kernel: &Kernel<KernelWeight<P>>,
        border: BorderManagement,
    ) {
        let width = image.width() as usize;
        let height = image.height() as usize;
        let boundaries = split_range(image.height(), self.num_threads);
        debug!(
            "Horizontal in-place convolution of {}x{} image by {} bands",
            width,
            height,
            self.num_threads.min(height)
        );

        let mut rows: Vec<&mut [P]> = image.iter_rows_mut(0).take(height).collect();
        let jobs = split_rows_into_bands(&mut rows, &boundaries);
        fork_join(jobs, |(_, band_rows)| {
            convolution::convolve_rows_inplace(
                band_rows.iter_mut().map(|row| &mut **row),
                width,
                kernel,
                border,
            );
        });
    }

    /// Convolves columns of the source image by the kernel.
    ///
    /// The destination image is resized to dimensions of the source image
    /// if they are different.
    pub fn vertical_convolution<P: PixelTrait>(
        &self,
        src: &impl ImageView<Pixel = P>,
        kernel: &Kernel<KernelWeight<P>>,
        dst: &mut TypedImage<'_, P>,
        border: BorderManagement,
    ) -> Result<(), ImageBufferError> {
        dst.resize(src.width(), src.height())?;
        let width = src.width() as usize;
        let height = src.height() as usize;
        let boundaries = split_range(src.width(), self.num_threads);
        debug!(
            "Vertical convolution of {}x{} image by {} bands",
            width,
            height,
            self.num_threads.min(width)
        );

        let src_rows: Vec<&[P]> = src.iter_rows(0).take(height).collect();
        let dst_rows: Vec<&mut [P]> = dst.iter_rows_mut(0).collect();
        let jobs = split_columns_into_bands(dst_rows, &boundaries);
        fork_join(jobs, |(band, mut dst_band)| {
            convolution::convolve_columns(
                &src_rows,
                &mut dst_band,
                band.start as usize,
                kernel,
                border,
            );
        });
        Ok(())
    }

    /// Convolves columns of the image by the kernel in place.
    pub fn vertical_convolution_inplace<P: PixelTrait>(
        &self,
        image: &mut impl ImageViewMut<Pixel = P>,
        kernel: &Kernel<KernelWeight<P>>,
        border: BorderManagement,
    ) {
        let width = image.width() as usize;
        let height = image.height() as usize;
        let boundaries = split_range(image.width(), self.num_threads);
        debug!(
            "Vertical in-place convolution of {}x{} image by {} bands",
            width,
            height,
            self.num_threads.min(width)
        );

        let rows: Vec<&mut [P]> = image.iter_rows_mut(0).take(height).collect();
        let jobs = split_columns_into_bands(rows, &boundaries);
        fork_join(jobs, |(_, mut band_rows)| {
            convolution::convolve_columns_inplace(&mut band_rows, kernel, border);
        });
    }

    /// Convolves the source image by `kernel_x` along rows and then
    /// by `kernel_y` along columns.
    ///
    /// An intermediate image has the same pixel type as the source one.
    /// With [BorderManagement::Crop] pixels near edges of the destination
    /// image are not computed, their values are unspecified.
    pub fn separable_convolution<P: PixelTrait>(
        &self,
        src: &impl ImageView<Pixel = P>,
        kernel_x: &Kernel<KernelWeight<P>>,
        kernel_y: &Kernel<KernelWeight<P>>,
        dst: &mut TypedImage<'_, P>,
        border: BorderManagement,
    ) -> Result<(), ImageBufferError> {
        let mut tmp = TypedImage::new(src.width(), src.height());
        self.horizontal_convolution(src, kernel_x, &mut tmp, border)?;
        self.vertical_convolution(&tmp, kernel_y, dst, border)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_threads() {
        assert_eq!(Convolver::new(0).num_threads(), 1);
        let mut convolver = Convolver::default();
        assert!(convolver.num_threads() >= 1);
        convolver.set_num_threads(0);
        assert_eq!(convolver.num_threads(), 1);
    }

    #[test]
    fn destination_is_resized() {
        let src = TypedImage::<u8>::from_pixels(3, 2, vec![9; 6]).unwrap();
        let mut dst = TypedImage::new(1, 1);
        Convolver::new(4)
            .vertical_convolution(&src, &Kernel::identity(), &mut dst, BorderManagement::Copy)
            .unwrap();
        assert_eq!((dst.width(), dst.height()), (3, 2));
        assert_eq!(dst.pixels(), src.pixels());
    }

    #[test]
    fn too_small_borrowed_destination() {
        let src = TypedImage::<u8>::new(3, 2);
        let mut buffer = [0u8; 4];
        let mut dst = TypedImage::from_pixels_slice(2, 2, &mut buffer).unwrap();
        let result = Convolver::new(2).horizontal_convolution(
            &src,
            &Kernel::identity(),
            &mut dst,
            BorderManagement::Copy,
        );
        assert_eq!(result, Err(ImageBufferError::InvalidBufferSize));
    }
}
