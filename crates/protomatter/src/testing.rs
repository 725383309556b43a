//! Recording fakes for the windowing and graphics seams
//!
//! Both fakes append to a shared [`Journal`] so tests can assert the exact
//! order of calls across collaborators.

use ash::vk;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crate::core::config::ApplicationInfo;
use crate::foundation::logging::Logger;
use crate::foundation::thread::MainThread;
use crate::render::vulkan::{
    DeviceFeatures, DeviceProperties, DeviceType, ExtensionProperty, GraphicsApi, GraphicsError, GraphicsResult,
};
use crate::render::window::{WindowError, WindowHints, WindowResult, Windowing};

/// One collaborator call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    WindowingInit,
    ApplyHints(WindowHints),
    CreateWindow { width: u32, height: u32, title: String },
    RequiredExtensions,
    PollEvents,
    ShouldClose,
    DestroyWindow,
    Terminate,
    GraphicsLoad,
    CreateInstance { info: ApplicationInfo, extensions: Vec<String> },
    InstanceExtensionProperties,
    EnumeratePhysicalDevices,
    DeviceProperties(u32),
    DeviceFeatures(u32),
    DestroyInstance,
}

impl Call {
    pub const fn is_graphics(&self) -> bool {
        matches!(
            self,
            Self::GraphicsLoad
                | Self::CreateInstance { .. }
                | Self::InstanceExtensionProperties
                | Self::EnumeratePhysicalDevices
                | Self::DeviceProperties(_)
                | Self::DeviceFeatures(_)
                | Self::DestroyInstance
        )
    }
}

/// Shared, ordered call log
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Call>>>);

impl Journal {
    pub fn record(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    /// Index of the first call matching `pred`
    pub fn position(&self, pred: impl Fn(&Call) -> bool) -> Option<usize> {
        self.0.borrow().iter().position(pred)
    }

    pub fn count(&self, call: &Call) -> usize {
        self.0.borrow().iter().filter(|c| *c == call).count()
    }
}

/// Fake windowing library
pub struct FakeWindowing {
    journal: Journal,
    fail_init: bool,
    fail_create: bool,
    extensions: Vec<String>,
    close_flags: RefCell<VecDeque<bool>>,
}

impl FakeWindowing {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            fail_init: false,
            fail_create: false,
            extensions: vec!["VK_KHR_surface".to_string(), "VK_KHR_xcb_surface".to_string()],
            close_flags: RefCell::new(VecDeque::new()),
        }
    }

    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions.iter().map(ToString::to_string).collect();
        self
    }

    /// Successive `should_close` answers; once exhausted the window closes
    pub fn with_close_flags(self, flags: &[bool]) -> Self {
        self.close_flags.replace(flags.iter().copied().collect());
        self
    }
}

impl Windowing for FakeWindowing {
    type Window = u32;

    fn init(&mut self, _thread: &MainThread) -> WindowResult<()> {
        self.journal.record(Call::WindowingInit);
        if self.fail_init {
            return Err(WindowError::InitializationFailed("no display".to_string()));
        }
        Ok(())
    }

    fn apply_hints(&mut self, _thread: &MainThread, hints: WindowHints) {
        self.journal.record(Call::ApplyHints(hints));
    }

    fn create_window(&mut self, _thread: &MainThread, width: u32, height: u32, title: &str) -> WindowResult<u32> {
        self.journal.record(Call::CreateWindow {
            width,
            height,
            title: title.to_string(),
        });
        if self.fail_create {
            return Err(WindowError::CreationFailed {
                title: title.to_string(),
                width,
                height,
            });
        }
        Ok(1)
    }

    fn required_instance_extensions(&self, _thread: &MainThread) -> WindowResult<Vec<String>> {
        self.journal.record(Call::RequiredExtensions);
        Ok(self.extensions.clone())
    }

    fn poll_events(&mut self, _thread: &MainThread) {
        self.journal.record(Call::PollEvents);
    }

    fn should_close(&self, _thread: &MainThread, _window: &u32) -> bool {
        self.journal.record(Call::ShouldClose);
        self.close_flags.borrow_mut().pop_front().unwrap_or(true)
    }

    fn destroy_window(&mut self, _thread: &MainThread, _window: u32) {
        self.journal.record(Call::DestroyWindow);
    }

    fn terminate(&mut self, _thread: &MainThread) {
        self.journal.record(Call::Terminate);
    }
}

/// Fake graphics API exposing a configurable number of devices
pub struct FakeGraphics {
    journal: Journal,
    devices: usize,
    fail_load: bool,
    fail_create_instance: bool,
    fail_enumeration: bool,
}

impl FakeGraphics {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            devices: 1,
            fail_load: false,
            fail_create_instance: false,
            fail_enumeration: false,
        }
    }

    pub fn with_devices(mut self, devices: usize) -> Self {
        self.devices = devices;
        self
    }

    pub fn failing_load(mut self) -> Self {
        self.fail_load = true;
        self
    }

    pub fn failing_create_instance(mut self) -> Self {
        self.fail_create_instance = true;
        self
    }

    pub fn failing_enumeration(mut self) -> Self {
        self.fail_enumeration = true;
        self
    }

    /// Handle of the `index`-th enumerated device
    pub fn device_handle(&self, index: usize) -> u32 {
        100 + u32::try_from(index).unwrap()
    }

    fn device_index(device: u32) -> u32 {
        device - 100
    }
}

impl GraphicsApi for FakeGraphics {
    type Instance = u32;
    type PhysicalDevice = u32;

    fn load(&mut self, _thread: &MainThread) -> GraphicsResult<()> {
        self.journal.record(Call::GraphicsLoad);
        if self.fail_load {
            return Err(GraphicsError::LoaderUnavailable("libvulkan.so.1 not found".to_string()));
        }
        Ok(())
    }

    fn create_instance(
        &mut self,
        _thread: &MainThread,
        info: &ApplicationInfo,
        extensions: &[String],
    ) -> GraphicsResult<u32> {
        self.journal.record(Call::CreateInstance {
            info: info.clone(),
            extensions: extensions.to_vec(),
        });
        if self.fail_create_instance {
            return Err(GraphicsError::Api {
                operation: "vkCreateInstance",
                result: vk::Result::ERROR_EXTENSION_NOT_PRESENT,
            });
        }
        Ok(7)
    }

    fn instance_extension_properties(&self, _thread: &MainThread) -> GraphicsResult<Vec<ExtensionProperty>> {
        self.journal.record(Call::InstanceExtensionProperties);
        Ok(vec![
            ExtensionProperty {
                name: "VK_KHR_surface".to_string(),
                spec_version: 25,
            },
            ExtensionProperty {
                name: "VK_KHR_xcb_surface".to_string(),
                spec_version: 6,
            },
            ExtensionProperty {
                name: "VK_EXT_debug_utils".to_string(),
                spec_version: 2,
            },
        ])
    }

    fn enumerate_physical_devices(&self, _thread: &MainThread, _instance: &u32) -> GraphicsResult<Vec<u32>> {
        self.journal.record(Call::EnumeratePhysicalDevices);
        if self.fail_enumeration {
            return Err(GraphicsError::Api {
                operation: "vkEnumeratePhysicalDevices",
                result: vk::Result::ERROR_INITIALIZATION_FAILED,
            });
        }
        Ok((0..self.devices).map(|i| self.device_handle(i)).collect())
    }

    fn device_properties(&self, _thread: &MainThread, _instance: &u32, device: u32) -> DeviceProperties {
        self.journal.record(Call::DeviceProperties(device));
        let index = Self::device_index(device);
        DeviceProperties {
            name: format!("Fake GPU {index}"),
            device_type: if index == 0 {
                DeviceType::IntegratedGpu
            } else {
                DeviceType::DiscreteGpu
            },
            vendor_id: 0x10de,
            device_id: index,
            api_version: vk::API_VERSION_1_2,
            driver_version: 1,
            max_image_dimension_2d: 4096 << index,
        }
    }

    fn device_features(&self, _thread: &MainThread, _instance: &u32, device: u32) -> DeviceFeatures {
        self.journal.record(Call::DeviceFeatures(device));
        DeviceFeatures::new(vec![
            ("robust_buffer_access", true),
            ("geometry_shader", true),
            ("sampler_anisotropy", Self::device_index(device) > 0),
        ])
    }

    fn destroy_instance(&mut self, _thread: &MainThread, _instance: u32) {
        self.journal.record(Call::DestroyInstance);
    }
}

/// Logger that keeps every line
#[derive(Debug, Default)]
pub struct RecordingLogger {
    lines: RefCell<Vec<String>>,
}

impl RecordingLogger {
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl Logger for RecordingLogger {
    fn println(&self, args: fmt::Arguments<'_>) {
        self.lines.borrow_mut().push(args.to_string());
    }
}
