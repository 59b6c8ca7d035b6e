use std::ops::Index;

use num_traits::Float;

use crate::KernelError;

/// One-dimensional convolution kernel with odd count of weights.
///
/// The center of kernel is the weight with index `len() / 2`.
///
/// # Examples
///
/// ```
/// use fast_image_conv::Kernel;
///
/// let kernel = Kernel::new(vec![1f32, 2., 1.]).unwrap();
/// assert_eq!(kernel.half_width(), 1);
/// assert_eq!(kernel[1], 2.);
///
/// assert!(Kernel::new(vec![1f32, 1.]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel<W> {
    values: Vec<W>,
}

impl<W: Float> Kernel<W> {
    pub fn new(values: Vec<W>) -> Result<Self, KernelError> {
        if values.is_empty() {
            return Err(KernelError::Empty);
        }
        if values.len() % 2 == 0 {
            return Err(KernelError::EvenLength(values.len()));
        }
        Ok(Self { values })
    }

    pub fn from_slice(values: &[W]) -> Result<Self, KernelError> {
        Self::new(values.to_vec())
    }

    /// Kernel that doesn't change an image.
    pub fn identity() -> Self {
        Self {
            values: vec![W::one()],
        }
    }

    /// Returns a copy of the kernel with weights divided by their sum.
    ///
    /// Kernels with zero sum of weights (derivative filters)
    /// are returned as is.
    pub fn normalized(&self) -> Self {
        let sum = self.values.iter().fold(W::zero(), |acc, &w| acc + w);
        if sum == W::zero() {
            return self.clone();
        }
        Self {
            values: self.values.iter().map(|&w| w / sum).collect(),
        }
    }
}

impl<W> Kernel<W> {
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn half_width(&self) -> usize {
        self.values.len() / 2
    }

    #[inline]
    pub fn values(&self) -> &[W] {
        &self.values
    }
}

impl<W> Index<usize> for Kernel<W> {
    type Output = W;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}
