//! Vulkan instance and physical device management
//!
//! [`GraphicsApi`] covers the slice of Vulkan the bootstrap uses: loading the
//! library, creating and destroying an instance, listing instance extensions
//! and describing physical devices. [`AshGraphics`] implements it on `ash`.
//! Device selection over any implementation lives in [`device`].

pub mod device;
mod instance;

pub use device::{select_physical_device, AcceptAny, DeviceCandidate, DeviceSelectionError, DeviceSuitability};
pub use instance::{AshGraphics, AshInstance};

use ash::vk;
use std::fmt;
use thiserror::Error;

use crate::core::config::ApplicationInfo;
use crate::foundation::thread::MainThread;

/// Vulkan-specific error types
#[derive(Error, Debug)]
pub enum GraphicsError {
    /// The Vulkan loader library could not be found or initialized
    #[error("Failed to load Vulkan: {0}")]
    LoaderUnavailable(String),

    /// A Vulkan call returned a non-success result
    #[error("Vulkan API error in {operation}: {result:?}")]
    Api {
        /// The call that failed
        operation: &'static str,
        /// Result code returned by the driver
        result: vk::Result,
    },

    /// A name handed to Vulkan contains an interior NUL byte
    #[error("Invalid name for Vulkan: {0:?}")]
    InvalidName(String),

    /// Called before `load`
    #[error("Vulkan is not loaded")]
    NotLoaded,
}

/// Result type for Vulkan operations
pub type GraphicsResult<T> = Result<T, GraphicsError>;

/// Kind of physical device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    /// Anything not covered below
    Other,
    /// GPU sharing memory with the host
    IntegratedGpu,
    /// Separate GPU
    DiscreteGpu,
    /// GPU in a virtualized environment
    VirtualGpu,
    /// Software rasterizer running on the CPU
    Cpu,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Other => "other",
            Self::IntegratedGpu => "integrated gpu",
            Self::DiscreteGpu => "discrete gpu",
            Self::VirtualGpu => "virtual gpu",
            Self::Cpu => "cpu",
        };
        f.write_str(name)
    }
}

/// Identity and limits of a physical device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProperties {
    /// Driver-reported device name
    pub name: String,
    /// Kind of device
    pub device_type: DeviceType,
    /// PCI vendor id
    pub vendor_id: u32,
    /// Vendor-specific device id
    pub device_id: u32,
    /// Packed Vulkan version the device supports
    pub api_version: u32,
    /// Packed, vendor-specific driver version
    pub driver_version: u32,
    /// Largest width or height of a 2D image
    pub max_image_dimension_2d: u32,
}

/// Optional features of a physical device, in Vulkan declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceFeatures {
    flags: Vec<(&'static str, bool)>,
}

impl DeviceFeatures {
    /// Build from `(feature name, supported)` pairs
    pub fn new(flags: Vec<(&'static str, bool)>) -> Self {
        Self { flags }
    }

    /// Whether the named feature is supported; unknown names are not
    pub fn is_supported(&self, name: &str) -> bool {
        self.flags.iter().any(|&(flag, on)| on && flag == name)
    }

    /// Names of the supported features
    pub fn supported(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.flags.iter().filter(|(_, on)| *on).map(|(name, _)| *name)
    }

    /// All feature flags
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        self.flags.iter().copied()
    }
}

impl fmt::Display for DeviceFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, on)) in self.flags.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}:{on}")?;
        }
        f.write_str("}")
    }
}

/// An instance extension the loader reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionProperty {
    /// Extension name
    pub name: String,
    /// Extension spec version
    pub spec_version: u32,
}

/// Graphics API seam
///
/// `load` installs the loader and must succeed before any other call. An
/// instance is destroyed exactly once; physical devices are borrowed from
/// their instance and never destroyed.
pub trait GraphicsApi {
    /// Live instance handle owned by the caller
    type Instance;
    /// Physical device handle borrowed from an instance
    type PhysicalDevice: Copy;

    /// Resolve the Vulkan entry points
    fn load(&mut self, thread: &MainThread) -> GraphicsResult<()>;

    /// Create an instance with exactly the given extensions enabled
    fn create_instance(
        &mut self,
        thread: &MainThread,
        info: &ApplicationInfo,
        extensions: &[String],
    ) -> GraphicsResult<Self::Instance>;

    /// All instance extensions the loader and drivers provide
    fn instance_extension_properties(&self, thread: &MainThread) -> GraphicsResult<Vec<ExtensionProperty>>;

    /// Physical devices in enumeration order
    fn enumerate_physical_devices(
        &self,
        thread: &MainThread,
        instance: &Self::Instance,
    ) -> GraphicsResult<Vec<Self::PhysicalDevice>>;

    /// Properties of a physical device
    fn device_properties(
        &self,
        thread: &MainThread,
        instance: &Self::Instance,
        device: Self::PhysicalDevice,
    ) -> DeviceProperties;

    /// Features of a physical device
    fn device_features(
        &self,
        thread: &MainThread,
        instance: &Self::Instance,
        device: Self::PhysicalDevice,
    ) -> DeviceFeatures;

    /// Destroy an instance
    fn destroy_instance(&mut self, thread: &MainThread, instance: Self::Instance);
}
