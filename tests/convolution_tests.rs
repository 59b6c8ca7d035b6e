use itertools::iproduct;

use fast_image_conv::images::TypedImage;
use fast_image_conv::pixels::{Pixel, U8x3};
use fast_image_conv::testing::{clear_log, logs_contain};
use fast_image_conv::{
    horizontal_convolution, horizontal_convolution_inplace, vertical_convolution,
    vertical_convolution_inplace, BorderManagement, Convolver, ImageView, Kernel, KernelWeight,
    PixelTrait,
};

use utils::{f32_image, gaussian_kernel, rgb_image, transpose, u8_image, BORDERS};

mod utils;

fn copy_image<P: PixelTrait>(image: &TypedImage<P>) -> TypedImage<'static, P> {
    TypedImage::from_pixels(image.width(), image.height(), image.pixels().to_vec()).unwrap()
}

/// Results of all operations of the convolver must be equal to
/// results of processing of the whole image as a single band.
fn check_parallel_transparency<P: PixelTrait>(
    src: &TypedImage<P>,
    kernel: &Kernel<KernelWeight<P>>,
) {
    let width = src.width();
    let height = src.height();
    for border in BORDERS {
        let mut horiz_expected = TypedImage::new(width, height);
        horizontal_convolution(src, kernel, &mut horiz_expected, 0..height, border);
        let mut vert_expected = TypedImage::new(width, height);
        vertical_convolution(src, kernel, &mut vert_expected, 0..width, border);

        for num_threads in 1..=9 {
            let convolver = Convolver::new(num_threads);
            let case = format!("threads={num_threads}, border={border:?}");

            let mut dst = TypedImage::new(0, 0);
            convolver
                .horizontal_convolution(src, kernel, &mut dst, border)
                .unwrap();
            assert_eq!(dst.pixels(), horiz_expected.pixels(), "horizontal, {case}");

            let mut dst = TypedImage::new(0, 0);
            convolver
                .vertical_convolution(src, kernel, &mut dst, border)
                .unwrap();
            assert_eq!(dst.pixels(), vert_expected.pixels(), "vertical, {case}");

            // In-place results are compared with copy results computed
            // into a destination that initially held the source pixels.
            let mut image = copy_image(src);
            convolver.horizontal_convolution_inplace(&mut image, kernel, border);
            let mut expected = copy_image(src);
            horizontal_convolution(src, kernel, &mut expected, 0..height, border);
            assert_eq!(image.pixels(), expected.pixels(), "horizontal inplace, {case}");

            let mut image = copy_image(src);
            convolver.vertical_convolution_inplace(&mut image, kernel, border);
            let mut expected = copy_image(src);
            vertical_convolution(src, kernel, &mut expected, 0..width, border);
            assert_eq!(image.pixels(), expected.pixels(), "vertical inplace, {case}");
        }
    }
}

#[test]
fn parallel_transparency_u8() {
    let kernel = gaussian_kernel();
    for (width, height) in [(37, 23), (5, 40), (40, 3), (1, 1)] {
        check_parallel_transparency(&u8_image(width, height, 7), &kernel);
    }
}

#[test]
fn parallel_transparency_f32() {
    let kernel = Kernel::new(vec![-1f32, 0., 2., 0., -1., 0.5, 0.25]).unwrap();
    check_parallel_transparency(&f32_image(29, 31, 42), &kernel);
}

#[test]
fn parallel_transparency_u8x3() {
    check_parallel_transparency(&rgb_image(19, 17, 3), &gaussian_kernel());
}

#[test]
fn parallel_transparency_i32() {
    let pixels: Vec<i32> = (0..21 * 13).map(|i| (i * 7919) % 1000 - 500).collect();
    let src = TypedImage::from_pixels(21, 13, pixels).unwrap();
    let kernel = Kernel::new(vec![1f64, -3., 1.]).unwrap();
    check_parallel_transparency(&src, &kernel);
}

#[test]
fn source_image_is_not_changed() {
    let src = u8_image(16, 16, 1);
    let pixels = src.pixels().to_vec();
    let kernel = gaussian_kernel();
    let convolver = Convolver::new(3);
    for border in BORDERS {
        let mut dst = TypedImage::new(0, 0);
        convolver
            .horizontal_convolution(&src, &kernel, &mut dst, border)
            .unwrap();
        convolver
            .vertical_convolution(&src, &kernel, &mut dst, border)
            .unwrap();
    }
    assert_eq!(src.pixels(), &pixels[..]);
}

#[test]
fn identity_kernel_keeps_image() {
    let kernel: Kernel<f32> = Kernel::identity();
    let convolver = Convolver::new(4);
    for border in BORDERS {
        let mut image = u8_image(13, 11, 5);
        let expected = image.pixels().to_vec();
        convolver.horizontal_convolution_inplace(&mut image, &kernel, border);
        convolver.vertical_convolution_inplace(&mut image, &kernel, border);
        assert_eq!(image.pixels(), &expected[..]);
    }
}

#[test]
fn border_crop_keeps_edges_of_destination() {
    let src = u8_image(10, 8, 11);
    let kernel = gaussian_kernel();
    let mut dst = TypedImage::<u8>::from_pixels(10, 8, vec![77; 80]).unwrap();
    Convolver::new(3)
        .vertical_convolution(&src, &kernel, &mut dst, BorderManagement::Crop)
        .unwrap();
    for (y, row) in dst.iter_rows(0).enumerate() {
        if y < 2 || y >= 6 {
            assert!(row.iter().all(|&p| p == 77), "row {y}");
        }
    }

    let mut dst = TypedImage::<u8>::from_pixels(10, 8, vec![77; 80]).unwrap();
    Convolver::new(3)
        .horizontal_convolution(&src, &kernel, &mut dst, BorderManagement::Crop)
        .unwrap();
    for row in dst.iter_rows(0) {
        assert_eq!(&row[..2], &[77, 77]);
        assert_eq!(&row[8..], &[77, 77]);
    }
}

#[test]
fn vertical_is_horizontal_of_transposed() {
    let (width, height) = (23, 14);
    let src = f32_image(width, height, 99);
    let transposed = TypedImage::from_pixels(
        height,
        width,
        transpose(src.pixels(), width, height),
    )
    .unwrap();
    let kernel = Kernel::new(vec![0.1f32, 0.2, 0.4, 0.2, 0.1]).unwrap();
    let convolver = Convolver::new(4);

    for border in BORDERS {
        let mut vert = TypedImage::new(width, height);
        convolver
            .vertical_convolution(&src, &kernel, &mut vert, border)
            .unwrap();
        let mut horiz = TypedImage::new(height, width);
        convolver
            .horizontal_convolution(&transposed, &kernel, &mut horiz, border)
            .unwrap();
        assert_eq!(
            transpose(horiz.pixels(), height, width),
            vert.pixels(),
            "{border:?}"
        );
    }
}

#[test]
fn one_band_per_thread() {
    let kernel = gaussian_kernel();
    let mut image = u8_image(6, 2, 0);

    clear_log();
    Convolver::new(4).horizontal_convolution_inplace(&mut image, &kernel, BorderManagement::Copy);
    // Only 2 rows, so only 2 bands are not empty.
    assert!(logs_contain("Run 2 bands"));

    clear_log();
    Convolver::new(4).vertical_convolution_inplace(&mut image, &kernel, BorderManagement::Copy);
    assert!(logs_contain("Run 4 bands"));

    clear_log();
    let mut empty = TypedImage::<u8>::new(0, 0);
    Convolver::new(4).vertical_convolution_inplace(&mut empty, &kernel, BorderManagement::Copy);
    assert!(logs_contain("Run 0 bands"));
}

#[test]
fn dimensions_are_preserved() {
    let kernel = gaussian_kernel();
    for (num_threads, border, (width, height)) in iproduct!(
        [1, 3, 8],
        BORDERS,
        [(0, 0), (0, 5), (5, 0), (1, 7), (7, 1), (2, 2)]
    ) {
        let src = u8_image(width, height, 2);
        let mut dst = TypedImage::new(3, 3);
        let convolver = Convolver::new(num_threads);
        convolver
            .horizontal_convolution(&src, &kernel, &mut dst, border)
            .unwrap();
        assert_eq!((dst.width(), dst.height()), (width, height));
        convolver
            .vertical_convolution(&src, &kernel, &mut dst, border)
            .unwrap();
        assert_eq!((dst.width(), dst.height()), (width, height));
    }
}

#[test]
fn separable_convolution_equals_two_passes() {
    let src = rgb_image(15, 9, 8);
    let kernel_x = gaussian_kernel();
    let kernel_y = Kernel::new(vec![0.5f32, 0., 0.5]).unwrap();
    let convolver = Convolver::new(2);

    let mut tmp = TypedImage::new(15, 9);
    horizontal_convolution(&src, &kernel_x, &mut tmp, 0..9, BorderManagement::Copy);
    vertical_convolution_inplace(&mut tmp, &kernel_y, 0..15, BorderManagement::Copy);

    let mut dst = TypedImage::new(0, 0);
    convolver
        .separable_convolution(&src, &kernel_x, &kernel_y, &mut dst, BorderManagement::Copy)
        .unwrap();
    assert_eq!(dst.pixels(), tmp.pixels());
}

#[test]
fn multi_component_pixels() {
    let src = TypedImage::<U8x3>::from_pixels(
        3,
        1,
        vec![
            Pixel::new([0, 10, 200]),
            Pixel::new([30, 10, 100]),
            Pixel::new([60, 10, 0]),
        ],
    )
    .unwrap();
    let kernel = Kernel::new(vec![0.25f32, 0.5, 0.25]).unwrap();
    let mut image = copy_image(&src);
    horizontal_convolution_inplace(&mut image, &kernel, 0..1, BorderManagement::Crop);
    assert_eq!(image.pixels()[1], Pixel::new([30, 10, 100]));
    assert_eq!(image.pixels()[0], src.pixels()[0]);
}

#[test]
fn image_crate_conversion() {
    let mut gray = image::GrayImage::new(4, 4);
    gray.put_pixel(1, 2, image::Luma([90]));
    let mut src: TypedImage<u8> = TypedImage::from(&gray);
    let kernel = Kernel::new(vec![1f32, 1., 1.]).unwrap();
    Convolver::new(2).vertical_convolution_inplace(&mut src, &kernel, BorderManagement::Copy);

    let result = image::GrayImage::from(src);
    for y in 0..4 {
        let expected = if (1..=3).contains(&y) { 90 } else { 0 };
        assert_eq!(result.get_pixel(1, y).0, [expected], "row {y}");
        assert_eq!(result.get_pixel(0, y).0, [0]);
    }
}
