//! Runtime registry mapping tool names to descriptors and handler types.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use crate::{FunctionDescriptor, HandlerType, Tool, ToolError, ToolResult};

/// Declarative pairing of a descriptor with the handler type serving it.
///
/// This is the explicit form of "register this tool when the process loads".
#[derive(Clone, Debug)]
pub struct ToolBinding {
    descriptor: FunctionDescriptor,
    handler: HandlerType,
}

impl ToolBinding {
    /// Creates a new binding.
    #[must_use]
    pub fn new(descriptor: FunctionDescriptor, handler: HandlerType) -> Self {
        Self { descriptor, handler }
    }

    /// Binds `descriptor` to the handler type `T`.
    #[must_use]
    pub fn of<T>(descriptor: FunctionDescriptor) -> Self
    where
        T: Tool + Default + 'static,
    {
        Self::new(descriptor, HandlerType::of::<T>())
    }

    /// Returns the descriptor carried by this binding.
    #[must_use]
    pub fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    /// Registers the binding with the provided manager.
    ///
    /// # Errors
    ///
    /// See [`ToolManager::register`].
    pub fn register(self, manager: &ToolManager) -> ToolResult<()> {
        let ToolBinding { descriptor, handler } = self;
        manager.register(descriptor, handler)
    }
}

// `order` records first insertion; both maps always share its key set.
#[derive(Debug, Default)]
struct Entries {
    order: Vec<String>,
    tools: HashMap<String, HandlerType>,
    functions: HashMap<String, FunctionDescriptor>,
}

/// Registry of tools keyed by function name, in insertion order.
///
/// Registration normally happens once at start-up, but the maps sit behind a
/// read-write lock so late registrations are safe during checks.
pub struct ToolManager {
    inner: RwLock<Entries>,
    warn_on_overwrite: bool,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Entries::default()),
            warn_on_overwrite: true,
        }
    }
}

impl std::fmt::Debug for ToolManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolManager")
            .field("registered", &self.names())
            .field("warn_on_overwrite", &self.warn_on_overwrite)
            .finish()
    }
}

impl ToolManager {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles the warning emitted when a name is registered twice.
    #[must_use]
    pub fn with_overwrite_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_overwrite = enabled;
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validates a candidate tool and adds it on success.
    ///
    /// One handler instance is built and its `pre_check` is called exactly
    /// once. A rejected candidate never enters the registry.
    ///
    /// The handler must advertise the same function name it is registered
    /// under. Registering a handler under an alias is refused rather than
    /// keyed on the descriptor alone.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidDescriptor`] for an unnamed descriptor,
    /// [`ToolError::InvalidHandler`] when the handler advertises a different
    /// function, and [`ToolError::RegistrationRejected`] when the pre-check
    /// refuses.
    pub fn register(&self, descriptor: FunctionDescriptor, handler: HandlerType) -> ToolResult<()> {
        descriptor.validate()?;
        let name = descriptor.name().to_owned();

        let tool = handler.instantiate();
        if tool.function().name() != name {
            return Err(ToolError::InvalidHandler {
                reason: format!(
                    "{} advertises function `{}`",
                    handler.type_name(),
                    tool.function().name()
                ),
                name,
            });
        }

        match tool.pre_check() {
            Ok(()) => {
                self.add_tool(name.clone(), descriptor, handler);
                info!(function = %name, "function loaded");
                Ok(())
            }
            Err(reason) => {
                info!(function = %name, %reason, "function load failed");
                Err(ToolError::RegistrationRejected { name, reason })
            }
        }
    }

    /// Inserts a tool without validation, overwriting any entry with the same
    /// name in place.
    pub fn add_tool(&self, name: impl Into<String>, descriptor: FunctionDescriptor, handler: HandlerType) {
        let name = name.into();
        let mut inner = self.write();
        let previous = inner.tools.insert(name.clone(), handler);
        inner.functions.insert(name.clone(), descriptor);
        match previous {
            None => inner.order.push(name),
            Some(previous) if self.warn_on_overwrite => {
                warn!(
                    function = %name,
                    previous = previous.type_name(),
                    current = handler.type_name(),
                    "tool name registered twice; keeping the latest"
                );
            }
            Some(_) => {}
        }
    }

    /// Returns the handler type registered under `name`.
    #[must_use]
    pub fn get_tool(&self, name: &str) -> Option<HandlerType> {
        self.read().tools.get(name).copied()
    }

    /// Returns the descriptor registered under `name`.
    #[must_use]
    pub fn get_function(&self, name: &str) -> Option<FunctionDescriptor> {
        self.read().functions.get(name).cloned()
    }

    /// Returns the first name, in insertion order, bound to `handler`.
    #[must_use]
    pub fn find_tool(&self, handler: &HandlerType) -> Option<String> {
        let inner = self.read();
        inner
            .order
            .iter()
            .find(|name| inner.tools.get(name.as_str()) == Some(handler))
            .cloned()
    }

    /// Returns the first name, in insertion order, bound to `descriptor`.
    #[must_use]
    pub fn find_function(&self, descriptor: &FunctionDescriptor) -> Option<String> {
        let inner = self.read();
        inner
            .order
            .iter()
            .find(|name| inner.functions.get(name.as_str()) == Some(descriptor))
            .cloned()
    }

    /// Lists every registered handler type in insertion order.
    #[must_use]
    pub fn get_all_tool(&self) -> Vec<(String, HandlerType)> {
        let inner = self.read();
        inner
            .order
            .iter()
            .filter_map(|name| inner.tools.get(name).map(|tool| (name.clone(), *tool)))
            .collect()
    }

    /// Lists every registered descriptor in insertion order.
    #[must_use]
    pub fn get_all_function(&self) -> Vec<(String, FunctionDescriptor)> {
        let inner = self.read();
        inner
            .order
            .iter()
            .filter_map(|name| {
                inner
                    .functions
                    .get(name)
                    .map(|function| (name.clone(), function.clone()))
            })
            .collect()
    }

    /// Returns registered names in insertion order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.read().order.clone()
    }

    /// Returns the number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().order.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs every tool's message check against `message_text`.
    ///
    /// A fresh handler is built per tool. Tools named in `ignore` are skipped.
    /// The registered descriptors of all matching tools are returned in
    /// insertion order.
    #[must_use]
    pub fn run_all_check<S>(&self, message_text: &str, ignore: &[S]) -> Vec<FunctionDescriptor>
    where
        S: AsRef<str>,
    {
        let snapshot: Vec<(String, HandlerType, FunctionDescriptor)> = {
            let inner = self.read();
            inner
                .order
                .iter()
                .filter_map(|name| {
                    let tool = inner.tools.get(name)?;
                    let function = inner.functions.get(name)?;
                    Some((name.clone(), *tool, function.clone()))
                })
                .collect()
        };

        let mut matched = Vec::new();
        for (name, handler, function) in snapshot {
            if handler.instantiate().func_message(message_text).is_none() {
                continue;
            }
            if ignore.iter().any(|ignored| ignored.as_ref() == name) {
                debug!(function = %name, "matched tool ignored");
                continue;
            }
            debug!(function = %name, "tool matched message");
            matched.push(function);
        }
        matched
    }
}
