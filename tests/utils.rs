#![allow(dead_code)]
use fast_image_conv::images::TypedImage;
use fast_image_conv::pixels::Pixel;
use fast_image_conv::{BorderManagement, Kernel};

/// Deterministic pseudo-random generator of test data.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u8(&mut self) -> u8 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 56) as u8
    }
}

pub fn u8_image(width: u32, height: u32, seed: u64) -> TypedImage<'static, u8> {
    let mut rng = Lcg::new(seed);
    let pixels = (0..width * height).map(|_| rng.next_u8()).collect();
    TypedImage::from_pixels(width, height, pixels).unwrap()
}

pub fn f32_image(width: u32, height: u32, seed: u64) -> TypedImage<'static, f32> {
    let mut rng = Lcg::new(seed);
    let pixels = (0..width * height)
        .map(|_| rng.next_u8() as f32 / 7.)
        .collect();
    TypedImage::from_pixels(width, height, pixels).unwrap()
}

pub fn rgb_image(width: u32, height: u32, seed: u64) -> TypedImage<'static, Pixel<u8, 3>> {
    let mut rng = Lcg::new(seed);
    let pixels = (0..width * height)
        .map(|_| Pixel::new([rng.next_u8(), rng.next_u8(), rng.next_u8()]))
        .collect();
    TypedImage::from_pixels(width, height, pixels).unwrap()
}

/// Gaussian kernel with 5 weights.
pub fn gaussian_kernel() -> Kernel<f32> {
    Kernel::new(vec![1., 4., 6., 4., 1.]).unwrap().normalized()
}

pub const BORDERS: [BorderManagement; 2] = [BorderManagement::Copy, BorderManagement::Crop];

/// Returns transposed copy of the image.
pub fn transpose<P: Copy + Default + std::fmt::Debug>(
    pixels: &[P],
    width: u32,
    height: u32,
) -> Vec<P> {
    let (width, height) = (width as usize, height as usize);
    let mut res = vec![P::default(); pixels.len()];
    for y in 0..height {
        for x in 0..width {
            res[x * height + y] = pixels[y * width + x];
        }
    }
    res
}
