//! `ash` implementation of [`GraphicsApi`]

use ash::vk;
use ash::{Entry, Instance};
use std::ffi::{c_char, CStr, CString};

use super::{
    DeviceFeatures, DeviceProperties, DeviceType, ExtensionProperty, GraphicsApi, GraphicsError,
    GraphicsResult,
};
use crate::core::config::{ApplicationInfo, Version};
use crate::foundation::thread::MainThread;

/// Vulkan through the system loader
#[derive(Default)]
pub struct AshGraphics {
    entry: Option<Entry>,
}

/// Live Vulkan instance created by [`AshGraphics`]
pub struct AshInstance {
    instance: Instance,
}

impl AshInstance {
    /// Raw instance handle
    pub fn handle(&self) -> vk::Instance {
        self.instance.handle()
    }
}

impl AshGraphics {
    /// Create a backend with nothing loaded yet
    pub const fn new() -> Self {
        Self { entry: None }
    }

    fn entry(&self) -> GraphicsResult<&Entry> {
        self.entry.as_ref().ok_or(GraphicsError::NotLoaded)
    }
}

fn api_version(version: Version) -> u32 {
    vk::make_api_version(0, version.major, version.minor, version.patch)
}

fn c_string(name: &str) -> GraphicsResult<CString> {
    CString::new(name).map_err(|_| GraphicsError::InvalidName(name.to_string()))
}

/// Reads a fixed-size, NUL-terminated name array filled in by the driver
fn fixed_name(raw: &[c_char]) -> String {
    // SAFETY: Vulkan guarantees these arrays are NUL-terminated within their length
    unsafe { CStr::from_ptr(raw.as_ptr()) }.to_string_lossy().into_owned()
}

fn device_type(raw: vk::PhysicalDeviceType) -> DeviceType {
    match raw {
        vk::PhysicalDeviceType::INTEGRATED_GPU => DeviceType::IntegratedGpu,
        vk::PhysicalDeviceType::DISCRETE_GPU => DeviceType::DiscreteGpu,
        vk::PhysicalDeviceType::VIRTUAL_GPU => DeviceType::VirtualGpu,
        vk::PhysicalDeviceType::CPU => DeviceType::Cpu,
        _ => DeviceType::Other,
    }
}

macro_rules! feature_flags {
    ($features:expr; $($field:ident),* $(,)?) => {
        vec![$((stringify!($field), $features.$field == vk::TRUE)),*]
    };
}

fn feature_list(features: &vk::PhysicalDeviceFeatures) -> Vec<(&'static str, bool)> {
    feature_flags!(features;
        robust_buffer_access,
        full_draw_index_uint32,
        image_cube_array,
        independent_blend,
        geometry_shader,
        tessellation_shader,
        sample_rate_shading,
        dual_src_blend,
        logic_op,
        multi_draw_indirect,
        draw_indirect_first_instance,
        depth_clamp,
        depth_bias_clamp,
        fill_mode_non_solid,
        depth_bounds,
        wide_lines,
        large_points,
        alpha_to_one,
        multi_viewport,
        sampler_anisotropy,
        texture_compression_etc2,
        texture_compression_astc_ldr,
        texture_compression_bc,
        occlusion_query_precise,
        pipeline_statistics_query,
        vertex_pipeline_stores_and_atomics,
        fragment_stores_and_atomics,
        shader_tessellation_and_geometry_point_size,
        shader_image_gather_extended,
        shader_storage_image_extended_formats,
        shader_storage_image_multisample,
        shader_storage_image_read_without_format,
        shader_storage_image_write_without_format,
        shader_uniform_buffer_array_dynamic_indexing,
        shader_sampled_image_array_dynamic_indexing,
        shader_storage_buffer_array_dynamic_indexing,
        shader_storage_image_array_dynamic_indexing,
        shader_clip_distance,
        shader_cull_distance,
        shader_float64,
        shader_int64,
        shader_int16,
        shader_resource_residency,
        shader_resource_min_lod,
        sparse_binding,
        sparse_residency_buffer,
        sparse_residency_image2_d,
        sparse_residency_image3_d,
        sparse_residency2_samples,
        sparse_residency4_samples,
        sparse_residency8_samples,
        sparse_residency16_samples,
        sparse_residency_aliased,
        variable_multisample_rate,
        inherited_queries,
    )
}

impl GraphicsApi for AshGraphics {
    type Instance = AshInstance;
    type PhysicalDevice = vk::PhysicalDevice;

    fn load(&mut self, _thread: &MainThread) -> GraphicsResult<()> {
        let entry = unsafe { Entry::load() }
            .map_err(|e| GraphicsError::LoaderUnavailable(e.to_string()))?;

        log::debug!("Vulkan loader resolved");
        self.entry = Some(entry);
        Ok(())
    }

    fn create_instance(
        &mut self,
        _thread: &MainThread,
        info: &ApplicationInfo,
        extensions: &[String],
    ) -> GraphicsResult<AshInstance> {
        let entry = self.entry()?;

        let app_name = c_string(&info.application_name)?;
        let engine_name = c_string(&info.engine_name)?;
        let app_info = vk::ApplicationInfo::builder()
            .application_name(&app_name)
            .application_version(api_version(info.application_version))
            .engine_name(&engine_name)
            .engine_version(api_version(info.engine_version))
            .api_version(api_version(info.api_version));

        let extension_names = extensions
            .iter()
            .map(|name| c_string(name))
            .collect::<GraphicsResult<Vec<_>>>()?;
        let extension_ptrs: Vec<*const c_char> = extension_names.iter().map(|name| name.as_ptr()).collect();

        let create_info = vk::InstanceCreateInfo::builder()
            .application_info(&app_info)
            .enabled_extension_names(&extension_ptrs);

        let instance = unsafe { entry.create_instance(&create_info, None) }.map_err(|result| {
            GraphicsError::Api {
                operation: "vkCreateInstance",
                result,
            }
        })?;

        Ok(AshInstance { instance })
    }

    fn instance_extension_properties(&self, _thread: &MainThread) -> GraphicsResult<Vec<ExtensionProperty>> {
        let entry = self.entry()?;

        #[allow(unused_unsafe)]
        let properties = unsafe { entry.enumerate_instance_extension_properties(None) }.map_err(|result| {
            GraphicsError::Api {
                operation: "vkEnumerateInstanceExtensionProperties",
                result,
            }
        })?;

        Ok(properties
            .iter()
            .map(|property| ExtensionProperty {
                name: fixed_name(&property.extension_name),
                spec_version: property.spec_version,
            })
            .collect())
    }

    fn enumerate_physical_devices(
        &self,
        _thread: &MainThread,
        instance: &AshInstance,
    ) -> GraphicsResult<Vec<vk::PhysicalDevice>> {
        unsafe { instance.instance.enumerate_physical_devices() }.map_err(|result| GraphicsError::Api {
            operation: "vkEnumeratePhysicalDevices",
            result,
        })
    }

    fn device_properties(
        &self,
        _thread: &MainThread,
        instance: &AshInstance,
        device: vk::PhysicalDevice,
    ) -> DeviceProperties {
        let properties = unsafe { instance.instance.get_physical_device_properties(device) };

        DeviceProperties {
            name: fixed_name(&properties.device_name),
            device_type: device_type(properties.device_type),
            vendor_id: properties.vendor_id,
            device_id: properties.device_id,
            api_version: properties.api_version,
            driver_version: properties.driver_version,
            max_image_dimension_2d: properties.limits.max_image_dimension2_d,
        }
    }

    fn device_features(
        &self,
        _thread: &MainThread,
        instance: &AshInstance,
        device: vk::PhysicalDevice,
    ) -> DeviceFeatures {
        let features = unsafe { instance.instance.get_physical_device_features(device) };
        DeviceFeatures::new(feature_list(&features))
    }

    fn destroy_instance(&mut self, _thread: &MainThread, instance: AshInstance) {
        unsafe { instance.instance.destroy_instance(None) };
    }
}
