use std::str::FromStr;

use fast_image_conv as fc;

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum Border {
    /// Pixels outside the image are replicas of the nearest edge pixel.
    Copy,
    /// Pixels near edges of the image are not convolved.
    Crop,
}

impl From<Border> for fc::BorderManagement {
    fn from(border: Border) -> Self {
        match border {
            Border::Copy => fc::BorderManagement::Copy,
            Border::Crop => fc::BorderManagement::Crop,
        }
    }
}

/// Weights of kernel given as comma-separated numbers, e.g. `1,2,1`.
#[derive(Clone, Debug, PartialEq)]
pub struct Weights(pub Vec<f32>);

impl FromStr for Weights {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let weights = s
            .split(',')
            .map(|v| {
                v.trim()
                    .parse::<f32>()
                    .map_err(|_| format!("Invalid weight of kernel: {:?}", v))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(weights))
    }
}

impl Weights {
    pub fn kernel(&self, normalize: bool) -> Result<fc::Kernel<f32>, fc::KernelError> {
        let kernel = fc::Kernel::from_slice(&self.0)?;
        Ok(if normalize {
            kernel.normalized()
        } else {
            kernel
        })
    }
}
