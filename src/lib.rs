#![doc = include_str!("../README.md")]
//!
//! ## Feature flags
#![doc = document_features::document_features!()]

pub use convolution::{
    horizontal_convolution, horizontal_convolution_inplace, vertical_convolution,
    vertical_convolution_inplace, BorderManagement,
};
pub use convolver::Convolver;
pub use errors::*;
pub use image_view::{ImageView, ImageViewMut};
pub use kernel::Kernel;
pub use pixels::{KernelWeight, PixelComponent, PixelTrait};
pub use threading::{bands, hardware_concurrency, split_range};

mod convolution;
mod convolver;
mod errors;
mod image_view;
pub mod images;
mod kernel;
pub mod pixels;
#[cfg(feature = "for_testing")]
pub mod testing;
mod threading;
