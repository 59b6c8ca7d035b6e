use std::fmt::Debug;

use log::debug;

use crate::images::BufferContainer;
use crate::pixels::PixelTrait;
use crate::{ImageBufferError, ImageView, ImageViewMut, InvalidPixelsSize};

/// Generic reference to image data that provides [ImageView].
#[derive(Debug, Clone, Copy)]
pub struct TypedImageRef<'a, P> {
    width: u32,
    height: u32,
    pixels: &'a [P],
}

impl<'a, P> TypedImageRef<'a, P> {
    pub fn new(width: u32, height: u32, pixels: &'a [P]) -> Result<Self, InvalidPixelsSize> {
        let pixels_count = width as usize * height as usize;
        if pixels.len() < pixels_count {
            return Err(InvalidPixelsSize);
        }
        Ok(Self {
            width,
            height,
            pixels: &pixels[..pixels_count],
        })
    }

    pub fn pixels(&self) -> &[P] {
        self.pixels
    }
}

impl<'a, P: PixelTrait> ImageView for TypedImageRef<'a, P> {
    type Pixel = P;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn iter_rows(&self, start_row: u32) -> impl Iterator<Item = &[Self::Pixel]> {
        iter_rows(self.pixels, self.width, start_row)
    }
}

/// Generic image container that provides [ImageView] and [ImageViewMut].
///
/// Pixels are stored row by row in one contiguous buffer.
/// The buffer may be owned by the image or borrowed from a caller.
#[derive(Debug)]
pub struct TypedImage<'a, P: Default + Copy + Debug> {
    width: u32,
    height: u32,
    pixels: BufferContainer<'a, P>,
}

impl<P: Default + Copy + Debug> TypedImage<'static, P> {
    /// Create an image filled with default pixels.
    pub fn new(width: u32, height: u32) -> Self {
        let pixels_count = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: BufferContainer::Owned(vec![P::default(); pixels_count]),
        }
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<P>) -> Result<Self, InvalidPixelsSize> {
        let pixels_count = width as usize * height as usize;
        if pixels.len() < pixels_count {
            return Err(InvalidPixelsSize);
        }
        Ok(Self {
            width,
            height,
            pixels: BufferContainer::Owned(pixels),
        })
    }
}

impl<'a, P: Default + Copy + Debug> TypedImage<'a, P> {
    pub fn from_pixels_slice(
        width: u32,
        height: u32,
        pixels: &'a mut [P],
    ) -> Result<Self, InvalidPixelsSize> {
        let pixels_count = width as usize * height as usize;
        if pixels.len() < pixels_count {
            return Err(InvalidPixelsSize);
        }
        Ok(Self {
            width,
            height,
            pixels: BufferContainer::Borrowed(pixels),
        })
    }

    #[inline]
    fn pixels_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Pixels of image in row-major order.
    pub fn pixels(&self) -> &[P] {
        let count = self.pixels_count();
        &self.pixels.borrow()[..count]
    }

    pub fn pixels_mut(&mut self) -> &mut [P] {
        let count = self.pixels_count();
        &mut self.pixels.borrow_mut()[..count]
    }

    pub fn into_vec(self) -> Vec<P> {
        let count = self.pixels_count();
        let mut pixels = self.pixels.into_vec();
        pixels.truncate(count);
        pixels
    }

    pub fn image_ref(&self) -> TypedImageRef<'_, P> {
        TypedImageRef {
            width: self.width,
            height: self.height,
            pixels: self.pixels(),
        }
    }

    /// Changes dimensions of image.
    ///
    /// Nothing happens if the image already has given dimensions.
    /// Otherwise, an owned buffer is replaced by a new one filled with
    /// default pixels. A borrowed buffer is reused if it is big enough
    /// to store all pixels, its content is not changed.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ImageBufferError> {
        if self.width == width && self.height == height {
            return Ok(());
        }
        let pixels_count = width as usize * height as usize;
        match &mut self.pixels {
            BufferContainer::Owned(vec) => {
                debug!(
                    "Reallocate image buffer from {}x{} to {}x{}",
                    self.width, self.height, width, height
                );
                *vec = vec![P::default(); pixels_count];
            }
            BufferContainer::Borrowed(slice) => {
                if slice.len() < pixels_count {
                    return Err(ImageBufferError::InvalidBufferSize);
                }
                debug!(
                    "Reuse borrowed image buffer for {}x{} instead of {}x{}",
                    width, height, self.width, self.height
                );
            }
        }
        self.width = width;
        self.height = height;
        Ok(())
    }
}

impl<'a, P: PixelTrait> ImageView for TypedImage<'a, P> {
    type Pixel = P;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn iter_rows(&self, start_row: u32) -> impl Iterator<Item = &[Self::Pixel]> {
        iter_rows(self.pixels(), self.width, start_row)
    }
}

impl<'a, P: PixelTrait> ImageViewMut for TypedImage<'a, P> {
    fn iter_rows_mut(&mut self, start_row: u32) -> impl Iterator<Item = &mut [Self::Pixel]> {
        let width = self.width as usize;
        let pixels = self.pixels_mut();
        if width == 0 {
            pixels[..0].chunks_exact_mut(1)
        } else {
            let start = start_row as usize * width;
            pixels.get_mut(start..).unwrap_or_default().chunks_exact_mut(width)
        }
    }
}

#[inline]
fn iter_rows<P>(pixels: &[P], width: u32, start_row: u32) -> std::slice::ChunksExact<'_, P> {
    let width = width as usize;
    if width == 0 {
        pixels[..0].chunks_exact(1)
    } else {
        let start = start_row as usize * width;
        pixels.get(start..).unwrap_or_default().chunks_exact(width)
    }
}
