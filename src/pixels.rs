//! Contains types of pixels and mapping of them into accumulator types.
use std::fmt::Debug;

use num_traits::{Float, Zero};

/// Type of one component of pixel.
///
/// Each component type has an associated accumulator type which is
/// used to sum up products of pixels and weights of a kernel.
/// The accumulator type is also the type of kernel weights.
pub trait PixelComponent: Copy + Default + Debug + PartialEq + Send + Sync + 'static {
    type Accumulator: Float + Debug + Send + Sync + 'static;

    fn to_accumulator(self) -> Self::Accumulator;

    /// Narrows a value of accumulator into the component type
    /// with the help of `as` conversion.
    fn from_accumulator(acc: Self::Accumulator) -> Self;
}

macro_rules! pixel_component {
    ($($type:ty => $acc:ty),+ $(,)?) => {
        $(
            impl PixelComponent for $type {
                type Accumulator = $acc;

                #[inline(always)]
                fn to_accumulator(self) -> $acc {
                    self as $acc
                }

                #[inline(always)]
                fn from_accumulator(acc: $acc) -> Self {
                    acc as $type
                }
            }
        )+
    };
}

pixel_component!(
    u8 => f32,
    i8 => f32,
    u16 => f32,
    i16 => f32,
    u32 => f64,
    i32 => f64,
    f32 => f32,
    f64 => f64,
);

/// Type of kernel weights used to convolve pixels of type `P`.
pub type KernelWeight<P> = <<P as PixelTrait>::Component as PixelComponent>::Accumulator;

/// Pixel which can be convolved.
pub trait PixelTrait: Copy + Default + Debug + PartialEq + Send + Sync + 'static {
    type Component: PixelComponent;
    type Accumulator: Copy + Send;

    fn count_of_components() -> usize;

    fn zero_accumulator() -> Self::Accumulator;

    /// `acc += pixel * weight`
    fn accumulate(
        acc: &mut Self::Accumulator,
        pixel: Self,
        weight: <Self::Component as PixelComponent>::Accumulator,
    );

    fn from_accumulator(acc: Self::Accumulator) -> Self;
}

macro_rules! scalar_pixel {
    ($($type:ty),+) => {
        $(
            impl PixelTrait for $type {
                type Component = $type;
                type Accumulator = <$type as PixelComponent>::Accumulator;

                #[inline(always)]
                fn count_of_components() -> usize {
                    1
                }

                #[inline(always)]
                fn zero_accumulator() -> Self::Accumulator {
                    Zero::zero()
                }

                #[inline(always)]
                fn accumulate(
                    acc: &mut Self::Accumulator,
                    pixel: Self,
                    weight: <$type as PixelComponent>::Accumulator,
                ) {
                    *acc = *acc + pixel.to_accumulator() * weight;
                }

                #[inline(always)]
                fn from_accumulator(acc: Self::Accumulator) -> Self {
                    <$type as PixelComponent>::from_accumulator(acc)
                }
            }
        )+
    };
}

scalar_pixel!(u8, i8, u16, i16, u32, i32, f32, f64);

/// Generic type to represent a pixel with several components.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct Pixel<C, const COUNT: usize>(pub [C; COUNT]);

impl<C: Copy, const COUNT: usize> Pixel<C, COUNT> {
    #[inline(always)]
    pub const fn new(v: [C; COUNT]) -> Self {
        Self(v)
    }
}

impl<C: Default + Copy, const COUNT: usize> Default for Pixel<C, COUNT> {
    fn default() -> Self {
        Self([C::default(); COUNT])
    }
}

impl<C: PixelComponent, const COUNT: usize> PixelTrait for Pixel<C, COUNT> {
    type Component = C;
    type Accumulator = [C::Accumulator; COUNT];

    #[inline(always)]
    fn count_of_components() -> usize {
        COUNT
    }

    #[inline(always)]
    fn zero_accumulator() -> Self::Accumulator {
        [Zero::zero(); COUNT]
    }

    #[inline(always)]
    fn accumulate(acc: &mut Self::Accumulator, pixel: Self, weight: C::Accumulator) {
        for (a, &c) in acc.iter_mut().zip(pixel.0.iter()) {
            *a = *a + c.to_accumulator() * weight;
        }
    }

    #[inline(always)]
    fn from_accumulator(acc: Self::Accumulator) -> Self {
        Self(acc.map(C::from_accumulator))
    }
}

#[cfg(feature = "image")]
unsafe impl<C: bytemuck::Zeroable, const COUNT: usize> bytemuck::Zeroable for Pixel<C, COUNT> {}

#[cfg(feature = "image")]
unsafe impl<C: bytemuck::Pod, const COUNT: usize> bytemuck::Pod for Pixel<C, COUNT> {}

/// Two bytes per pixel (e.g. LA)
pub type U8x2 = Pixel<u8, 2>;
/// Three bytes per pixel (e.g. RGB)
pub type U8x3 = Pixel<u8, 3>;
/// Four bytes per pixel (RGBA, RGBx, CMYK and other)
pub type U8x4 = Pixel<u8, 4>;
/// Two `u16` components per pixel (e.g. LA16)
pub type U16x2 = Pixel<u16, 2>;
/// Three `u16` components per pixel (e.g. RGB16)
pub type U16x3 = Pixel<u16, 3>;
/// Four `u16` components per pixel (e.g. RGBA16)
pub type U16x4 = Pixel<u16, 4>;
/// Two `f32` components per pixel (e.g. LA32F)
pub type F32x2 = Pixel<f32, 2>;
/// Three `f32` components per pixel (e.g. RGB32F)
pub type F32x3 = Pixel<f32, 3>;
/// Four `f32` components per pixel (e.g. RGBA32F)
pub type F32x4 = Pixel<f32, 4>;
