use std::ffi::OsStr;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use fast_image_conv as fc;
use fast_image_conv::images::TypedImage;
use fast_image_conv::pixels::{U8x3, U8x4};
use fast_image_conv::PixelTrait;
use image::{ColorType, DynamicImage, GrayImage, ImageReader, RgbImage, RgbaImage};
use log::debug;

mod structs;

#[derive(Parser)]
#[clap(author = "Kirill K.")]
#[clap(version, about, long_about = None)]
#[clap(disable_help_flag = true)]
struct Cli {
    #[clap(long, action = clap::ArgAction::HelpLong)]
    help: Option<bool>,

    /// Path to source image file
    #[clap(value_parser)]
    source_path: PathBuf,

    /// Path to result image file
    #[clap(value_parser)]
    destination_path: Option<PathBuf>,

    /// Comma-separated weights of kernel used to convolve rows of image
    #[clap(short = 'x', long, value_parser)]
    kernel_x: Option<structs::Weights>,

    /// Comma-separated weights of kernel used to convolve columns of image
    #[clap(short = 'y', long, value_parser)]
    kernel_y: Option<structs::Weights>,

    /// Divide weights of kernels by their sum
    #[clap(short, long, action)]
    normalize: bool,

    /// Handling of pixels near edges of image
    #[clap(short, long, value_enum, default_value_t = structs::Border::Copy)]
    border: structs::Border,

    /// Count of threads, all hardware threads are used by default
    #[clap(short, long, value_parser)]
    threads: Option<usize>,

    /// Overwrite destination file
    #[clap(short, long, action)]
    overwrite: bool,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

struct Kernels {
    x: Option<fc::Kernel<f32>>,
    y: Option<fc::Kernel<f32>>,
}

fn main() -> Result<()> {
    let cli: Cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();
    convolve(&cli)
}

fn convolve(cli: &Cli) -> Result<()> {
    let kernels = Kernels {
        x: parse_kernel(cli.kernel_x.as_ref(), cli.normalize)
            .with_context(|| "Invalid kernel for rows")?,
        y: parse_kernel(cli.kernel_y.as_ref(), cli.normalize)
            .with_context(|| "Invalid kernel for columns")?,
    };
    if kernels.x.is_none() && kernels.y.is_none() {
        return Err(anyhow!("At least one of kernels must be specified"));
    }
    let convolver = match cli.threads {
        Some(threads) => fc::Convolver::new(threads),
        None => fc::Convolver::default(),
    };
    debug!("Use {} threads", convolver.num_threads());

    let image = open_source_image(cli)?;
    let border = cli.border.into();
    let result: DynamicImage = match image.color() {
        ColorType::L8 => {
            let mut src = TypedImage::<u8>::from(&image.to_luma8());
            convolve_image(&convolver, &kernels, &mut src, border);
            GrayImage::from(src).into()
        }
        ColorType::Rgb8 => {
            let mut src = TypedImage::<U8x3>::from(&image.to_rgb8());
            convolve_image(&convolver, &kernels, &mut src, border);
            RgbImage::from(src).into()
        }
        ColorType::Rgba8 => {
            let mut src = TypedImage::<U8x4>::from(&image.to_rgba8());
            convolve_image(&convolver, &kernels, &mut src, border);
            RgbaImage::from(src).into()
        }
        color_type => {
            return Err(anyhow!(
                "Unsupported pixel's format of source image: {:?}",
                color_type
            ))
        }
    };

    save_result(cli, result)
}

fn parse_kernel(
    weights: Option<&structs::Weights>,
    normalize: bool,
) -> Result<Option<fc::Kernel<f32>>> {
    weights
        .map(|weights| weights.kernel(normalize))
        .transpose()
        .map_err(Into::into)
}

fn open_source_image(cli: &Cli) -> Result<DynamicImage> {
    let source_path = &cli.source_path;
    debug!("Opening the source image {:?}", source_path);
    ImageReader::open(source_path)
        .with_context(|| format!("Failed to read source file from {:?}", source_path))?
        .decode()
        .with_context(|| "Failed to decode source image")
}

fn convolve_image<P>(
    convolver: &fc::Convolver,
    kernels: &Kernels,
    image: &mut TypedImage<P>,
    border: fc::BorderManagement,
) where
    P: PixelTrait<Component = u8>,
{
    if let Some(kernel) = &kernels.x {
        debug!("Convolve rows by kernel {:?}", kernel.values());
        convolver.horizontal_convolution_inplace(image, kernel, border);
    }
    if let Some(kernel) = &kernels.y {
        debug!("Convolve columns by kernel {:?}", kernel.values());
        convolver.vertical_convolution_inplace(image, kernel, border);
    }
}

fn save_result(cli: &Cli, image: DynamicImage) -> Result<()> {
    let result_path = if let Some(path) = cli.destination_path.clone() {
        path
    } else {
        let mut path = PathBuf::from("./");
        let ext = cli
            .source_path
            .extension()
            .unwrap_or_else(|| OsStr::new("png"));
        path.push("result");
        path.set_extension(ext);
        path
    };
    if result_path.exists() && !cli.overwrite {
        return Err(anyhow!(
            "Destination path {:?} already exists.",
            result_path
        ));
    };

    debug!("Save the result image into the file {:?}", result_path);
    image
        .save(&result_path)
        .with_context(|| "Failed to save the result image")?;
    Ok(())
}
