//! Physical device selection
//!
//! Devices are considered in enumeration order and the first one the
//! [`DeviceSuitability`] policy accepts is selected. Every candidate's name,
//! 2D image limit and feature set is logged before the policy sees it.

use thiserror::Error;

use super::{DeviceFeatures, DeviceProperties, GraphicsApi, GraphicsError};
use crate::foundation::logging::Logger;
use crate::foundation::thread::MainThread;
use crate::logln;

/// Device selection errors
#[derive(Error, Debug)]
pub enum DeviceSelectionError {
    /// Enumeration itself failed
    #[error(transparent)]
    Graphics(#[from] GraphicsError),

    /// The instance exposes no physical device at all
    #[error("no vulkan gpu found")]
    NoDevices,

    /// Devices exist but the policy rejected every one
    #[error("none of the {considered} vulkan gpus is suitable")]
    NoneSuitable {
        /// Number of devices the policy rejected
        considered: usize,
    },
}

/// A physical device as the suitability policy sees it
#[derive(Debug, Clone)]
pub struct DeviceCandidate {
    /// Position in enumeration order
    pub index: usize,
    /// Device identity and limits
    pub properties: DeviceProperties,
    /// Optional features
    pub features: DeviceFeatures,
}

/// Policy deciding whether a physical device may be used
///
/// Implemented for any `Fn(&DeviceCandidate) -> bool`.
pub trait DeviceSuitability {
    /// Whether `candidate` may be selected
    fn is_suitable(&self, candidate: &DeviceCandidate) -> bool;
}

impl<F> DeviceSuitability for F
where
    F: Fn(&DeviceCandidate) -> bool,
{
    fn is_suitable(&self, candidate: &DeviceCandidate) -> bool {
        self(candidate)
    }
}

/// Accepts every device, so the first enumerated device wins
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAny;

impl DeviceSuitability for AcceptAny {
    fn is_suitable(&self, _candidate: &DeviceCandidate) -> bool {
        true
    }
}

/// Pick the first device in enumeration order that `suitability` accepts
pub fn select_physical_device<G: GraphicsApi>(
    api: &G,
    thread: &MainThread,
    instance: &G::Instance,
    logger: &dyn Logger,
    suitability: &dyn DeviceSuitability,
) -> Result<G::PhysicalDevice, DeviceSelectionError> {
    let devices = api.enumerate_physical_devices(thread, instance)?;
    if devices.is_empty() {
        return Err(DeviceSelectionError::NoDevices);
    }

    for (index, &device) in devices.iter().enumerate() {
        let candidate = DeviceCandidate {
            index,
            properties: api.device_properties(thread, instance, device),
            features: api.device_features(thread, instance, device),
        };

        logln!(logger, "{}", candidate.properties.name);
        logln!(logger, "max img dim 2d {}", candidate.properties.max_image_dimension_2d);
        logln!(logger, "{}", candidate.features);

        if suitability.is_suitable(&candidate) {
            log::info!(
                "Selected GPU: {} ({})",
                candidate.properties.name,
                candidate.properties.device_type
            );
            return Ok(device);
        }
    }

    Err(DeviceSelectionError::NoneSuitable {
        considered: devices.len(),
    })
}
