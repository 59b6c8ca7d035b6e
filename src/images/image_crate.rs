use bytemuck::{cast_slice, cast_vec};
use image::{GrayImage, ImageBuffer, Luma, Rgb, Rgb32FImage, RgbImage, Rgba, RgbaImage};

use crate::images::TypedImage;
use crate::pixels::{F32x3, U8x3, U8x4};
use crate::ImageView;

macro_rules! image_crate_conversion {
    ($image_type:ty, $pixel:ty, $subpixel:ty, $buffer_pixel:ident) => {
        impl From<&$image_type> for TypedImage<'static, $pixel> {
            fn from(image: &$image_type) -> Self {
                let pixels: Vec<$pixel> = cast_slice(image.as_raw()).to_vec();
                // ImageBuffer guarantees that its buffer is big enough.
                TypedImage::from_pixels(image.width(), image.height(), pixels)
                    .unwrap_or_else(|_| TypedImage::new(image.width(), image.height()))
            }
        }

        impl From<TypedImage<'_, $pixel>> for $image_type {
            fn from(image: TypedImage<'_, $pixel>) -> Self {
                let width = image.width();
                let height = image.height();
                let components: Vec<$subpixel> = cast_vec(image.into_vec());
                ImageBuffer::<$buffer_pixel<$subpixel>, Vec<$subpixel>>::from_raw(
                    width, height, components,
                )
                .unwrap_or_else(|| ImageBuffer::new(width, height))
            }
        }
    };
}

image_crate_conversion!(GrayImage, u8, u8, Luma);
image_crate_conversion!(RgbImage, U8x3, u8, Rgb);
image_crate_conversion!(RgbaImage, U8x4, u8, Rgba);
image_crate_conversion!(Rgb32FImage, F32x3, f32, Rgb);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_image_round_trip() {
        let mut rgb = RgbImage::new(3, 2);
        rgb.put_pixel(2, 1, Rgb([1, 2, 3]));
        let typed = TypedImage::<U8x3>::from(&rgb);
        assert_eq!(typed.get_pixel(1, 2), Some(&U8x3::new([1, 2, 3])));

        let back = RgbImage::from(typed);
        assert_eq!(back, rgb);
    }
}
