//! # Config Module
//!
//! Tunables shared by every node that points at the same [`ConfigId`].
//!
//! ## Key Types
//! - **`Config`**: point scale factor, web defaults, experimental features and
//!   the logger.
//! - **`Logger`**: sink for engine diagnostics. A `Fatal` message panics once
//!   the logger returns.
//! - **`TracingLogger`**: the default sink, forwarding to `tracing`.

use crate::enums::{ExperimentalFeature, LogLevel};
use crate::tree::NodeId;
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Handle to a [`Config`] stored in a [`crate::LayoutTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigId(pub(crate) usize);

impl ConfigId {
    /// The config every tree starts with. It cannot be removed.
    pub const DEFAULT: ConfigId = ConfigId(0);
}

impl fmt::Display for ConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config#{}", self.0)
    }
}

/// Receives every diagnostic the engine emits. Returns the number of bytes
/// written.
pub trait Logger {
    fn log(&self, config: &Config, node: Option<NodeId>, level: LogLevel, message: &str) -> usize;
}

/// Forwards engine diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, _config: &Config, node: Option<NodeId>, level: LogLevel, message: &str) -> usize {
        let node = node.map(|id| id.to_string()).unwrap_or_default();
        match level {
            LogLevel::Fatal | LogLevel::Error => tracing::error!(node = %node, "{message}"),
            LogLevel::Warn => tracing::warn!(node = %node, "{message}"),
            LogLevel::Info => tracing::info!(node = %node, "{message}"),
            LogLevel::Debug => tracing::debug!(node = %node, "{message}"),
            LogLevel::Verbose => tracing::trace!(node = %node, "{message}"),
        }
        message.len()
    }
}

/// Nesting allowed before a layout pass is aborted. Chosen so that a full
/// pass fits on a default 2 MiB thread stack in unoptimized builds.
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Clone)]
pub struct Config {
    pub(crate) experimental_features: [bool; ExperimentalFeature::COUNT],
    pub(crate) use_web_defaults: bool,
    pub(crate) use_legacy_stretch_behaviour: bool,
    pub(crate) point_scale_factor: f32,
    pub(crate) print_tree: bool,
    pub(crate) max_depth: usize,
    pub(crate) logger: Rc<dyn Logger>,
    pub(crate) context: Option<Rc<dyn Any>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            experimental_features: [false; ExperimentalFeature::COUNT],
            use_web_defaults: false,
            use_legacy_stretch_behaviour: false,
            point_scale_factor: 1.0,
            print_tree: false,
            max_depth: DEFAULT_MAX_DEPTH,
            logger: Rc::new(TracingLogger),
            context: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("experimental_features", &self.experimental_features)
            .field("use_web_defaults", &self.use_web_defaults)
            .field(
                "use_legacy_stretch_behaviour",
                &self.use_legacy_stretch_behaviour,
            )
            .field("point_scale_factor", &self.point_scale_factor)
            .field("print_tree", &self.print_tree)
            .field("max_depth", &self.max_depth)
            .field("has_context", &self.context.is_some())
            .finish()
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Device pixels per layout point. `0.0` disables rounding.
    pub fn point_scale_factor(&self) -> f32 {
        self.point_scale_factor
    }

    /// Negative factors are treated as `0.0`.
    pub fn set_point_scale_factor(&mut self, factor: f32) {
        if factor < 0.0 || factor.is_nan() {
            self.log(
                None,
                LogLevel::Warn,
                "Scale factor should not be less than zero",
            );
        }
        self.point_scale_factor = if factor > 0.0 { factor } else { 0.0 };
    }

    pub fn use_web_defaults(&self) -> bool {
        self.use_web_defaults
    }

    /// Applies to nodes created (or reset) after the change.
    pub fn set_use_web_defaults(&mut self, enabled: bool) {
        self.use_web_defaults = enabled;
    }

    pub fn use_legacy_stretch_behaviour(&self) -> bool {
        self.use_legacy_stretch_behaviour
    }

    /// Lets a container with unconstrained main size keep the space its
    /// flexible children were offered instead of shrinking to their content.
    pub fn set_use_legacy_stretch_behaviour(&mut self, enabled: bool) {
        self.use_legacy_stretch_behaviour = enabled;
    }

    pub fn is_experimental_feature_enabled(&self, feature: ExperimentalFeature) -> bool {
        self.experimental_features[feature as usize]
    }

    pub fn set_experimental_feature_enabled(
        &mut self,
        feature: ExperimentalFeature,
        enabled: bool,
    ) {
        self.experimental_features[feature as usize] = enabled;
    }

    pub fn print_tree(&self) -> bool {
        self.print_tree
    }

    /// Logs the laid-out tree at `Debug` after every computed layout pass.
    pub fn set_print_tree(&mut self, enabled: bool) {
        self.print_tree = enabled;
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn set_max_depth(&mut self, depth: usize) {
        self.max_depth = depth;
    }

    pub fn set_logger(&mut self, logger: Rc<dyn Logger>) {
        self.logger = logger;
    }

    /// Restores the [`TracingLogger`].
    pub fn reset_logger(&mut self) {
        self.logger = Rc::new(TracingLogger);
    }

    pub fn context(&self) -> Option<&Rc<dyn Any>> {
        self.context.as_ref()
    }

    pub fn set_context(&mut self, context: Option<Rc<dyn Any>>) {
        self.context = context;
    }

    pub fn log(&self, node: Option<NodeId>, level: LogLevel, message: &str) -> usize {
        let written = self.logger.log(self, node, level, message);
        if level == LogLevel::Fatal {
            panic!("{message}");
        }
        written
    }

    /// Reports a broken caller contract. Never returns.
    pub(crate) fn fatal(&self, node: Option<NodeId>, message: &str) -> ! {
        self.logger.log(self, node, LogLevel::Fatal, message);
        panic!("{message}");
    }
}
