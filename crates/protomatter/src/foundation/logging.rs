//! Logging utilities
//!
//! The application reports each lifecycle step through an injected [`Logger`].
//! [`DefaultLogger`] forwards those lines to the `log` facade, which the binary
//! wires to `env_logger` through [`init`].

use std::fmt;

pub use log::{debug, error, info, trace, warn};

/// Sink for diagnostic lines written by the application
///
/// One call produces one line. Implementations must not fail.
pub trait Logger {
    /// Emit one formatted line
    fn println(&self, args: fmt::Arguments<'_>);
}

/// Logger that forwards every line to `log::info!`
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn println(&self, args: fmt::Arguments<'_>) {
        log::info!(target: "protomatter", "{args}");
    }
}

impl<L: Logger + ?Sized> Logger for &L {
    fn println(&self, args: fmt::Arguments<'_>) {
        (**self).println(args);
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn println(&self, args: fmt::Arguments<'_>) {
        (**self).println(args);
    }
}

impl<L: Logger + ?Sized> Logger for std::rc::Rc<L> {
    fn println(&self, args: fmt::Arguments<'_>) {
        (**self).println(args);
    }
}

/// Write a formatted line to a [`Logger`]
///
/// ```rust
/// use protomatter::{logln, foundation::logging::DefaultLogger};
///
/// logln!(DefaultLogger, "max img dim 2d {}", 16384);
/// ```
#[macro_export]
macro_rules! logln {
    ($logger:expr, $($arg:tt)*) => {
        $crate::foundation::logging::Logger::println(&$logger, format_args!($($arg)*))
    };
}

/// Initialize the logging system
///
/// Defaults to the `info` level; `RUST_LOG` overrides it.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
