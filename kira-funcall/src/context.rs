//! Process-wide state shared by the orchestrator and tool handlers.

use kira_chain::{AuthReloader, Chain, ChainReloader};
use kira_config::FuncCallConfig;
use kira_primitives::ChainId;
use kira_tools::{
    FunctionDescriptor, HandlerType, Tool, ToolBinding, ToolError, ToolManager, ToolResult,
};
use tracing::debug;

/// Tool registry plus the auth and chain task stores.
///
/// Build one at start-up, register every tool, then share it (typically in an
/// `Arc`) with whatever handles incoming messages.
#[derive(Debug)]
pub struct FuncCallContext {
    config: FuncCallConfig,
    tools: ToolManager,
    auth: AuthReloader,
    chains: ChainReloader,
}

impl Default for FuncCallContext {
    fn default() -> Self {
        Self::new(FuncCallConfig::default())
    }
}

impl FuncCallContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new(config: FuncCallConfig) -> Self {
        let tools = ToolManager::new().with_overwrite_warnings(config.registry.warn_on_overwrite);
        Self {
            config,
            tools,
            auth: AuthReloader::new(),
            chains: ChainReloader::new(),
        }
    }

    /// Returns the configuration the context was built with.
    #[must_use]
    pub fn config(&self) -> &FuncCallConfig {
        &self.config
    }

    /// Returns the tool registry.
    #[must_use]
    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    /// Returns the auth task store.
    #[must_use]
    pub fn auth(&self) -> &AuthReloader {
        &self.auth
    }

    /// Returns the chain task store.
    #[must_use]
    pub fn chains(&self) -> &ChainReloader {
        &self.chains
    }

    /// Registers a tool after its pre-check.
    ///
    /// # Errors
    ///
    /// See [`ToolManager::register`].
    pub fn register(&self, descriptor: FunctionDescriptor, handler: HandlerType) -> ToolResult<()> {
        self.tools.register(descriptor, handler)
    }

    /// Registers a binding.
    ///
    /// # Errors
    ///
    /// See [`ToolManager::register`].
    pub fn register_binding(&self, binding: ToolBinding) -> ToolResult<()> {
        binding.register(&self.tools)
    }

    /// Returns the descriptors of every tool that wants `message_text`.
    ///
    /// Tools disabled in configuration are skipped alongside `ignore`.
    #[must_use]
    pub fn match_tools<S>(&self, message_text: &str, ignore: &[S]) -> Vec<FunctionDescriptor>
    where
        S: AsRef<str>,
    {
        let ignored: Vec<&str> = ignore
            .iter()
            .map(|name| name.as_ref())
            .chain(self.config.registry.disabled_tools.iter().map(String::as_str))
            .collect();
        let matched = self.tools.run_all_check(message_text, ignored.as_slice());
        debug!(matched = matched.len(), "message checked against tools");
        matched
    }

    /// Looks up the descriptor and handler type registered under `name`.
    #[must_use]
    pub fn lookup_by_name(&self, name: &str) -> Option<(FunctionDescriptor, HandlerType)> {
        Some((self.tools.get_function(name)?, self.tools.get_tool(name)?))
    }

    /// Finds the name bound to a handler type.
    #[must_use]
    pub fn reverse_lookup_by_handler_type(&self, handler: &HandlerType) -> Option<String> {
        self.tools.find_tool(handler)
    }

    /// Finds the name bound to a descriptor.
    #[must_use]
    pub fn reverse_lookup_by_descriptor(&self, descriptor: &FunctionDescriptor) -> Option<String> {
        self.tools.find_function(descriptor)
    }

    /// Builds a fresh handler for the tool registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownTool`] when nothing is registered under
    /// `name`.
    pub fn instantiate(&self, name: &str) -> ToolResult<Box<dyn Tool>> {
        self.tools
            .get_tool(name)
            .map(|handler| handler.instantiate())
            .ok_or_else(|| ToolError::UnknownTool {
                name: name.to_owned(),
            })
    }

    /// Parks `chain` until the user authorizes it, returning the id to resume
    /// with.
    pub fn begin_auth_wait(&self, chain: Chain) -> ChainId {
        let id = chain.uuid();
        self.auth.add_task(chain);
        id
    }

    /// Takes the chain parked under `uuid`, if it is still pending.
    #[must_use]
    pub fn resume_auth_wait(&self, uuid: &ChainId) -> Option<Chain> {
        self.auth.get_task(uuid)
    }

    /// Queues a follow-up chain for its user.
    pub fn enqueue_chain(&self, chain: Chain) {
        self.chains.add_task(chain);
    }

    /// Takes the user's next follow-up chain.
    #[must_use]
    pub fn dequeue_chain(&self, user_id: &str) -> Option<Chain> {
        self.chains.get_task(user_id)
    }
}
