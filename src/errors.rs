use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageBufferError {
    #[error("Size of buffer is smaller than required")]
    InvalidBufferSize,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Size of pixels vector is smaller than required")]
pub struct InvalidPixelsSize;

impl From<InvalidPixelsSize> for ImageBufferError {
    fn from(_: InvalidPixelsSize) -> Self {
        ImageBufferError::InvalidBufferSize
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    #[error("Kernel must contain at least one weight")]
    Empty,
    #[error("Kernel size must be odd, got {0}")]
    EvenLength(usize),
}
