//! The contract every tool handler implements.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use kira_primitives::Receiver;
use regex::Regex;
use serde_json::Value;

use crate::{FunctionDescriptor, ToolResult};

/// Static configuration declared by a tool.
#[derive(Clone, Debug)]
pub struct ToolConfig {
    silent: bool,
    function: FunctionDescriptor,
    keywords: Vec<String>,
    pattern: Option<Regex>,
    // `pattern` wrapped as `^(?:...)`, so a miss at offset 0 ends the search.
    anchored: Option<Regex>,
    require_auth: bool,
}

impl ToolConfig {
    /// Creates a configuration exposing `function` with no triggers.
    #[must_use]
    pub fn new(function: FunctionDescriptor) -> Self {
        Self {
            silent: false,
            function,
            keywords: Vec::new(),
            pattern: None,
            anchored: None,
            require_auth: false,
        }
    }

    /// Sets the keywords checked by substring containment, in order.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the pattern tried when no keyword hits.
    #[must_use]
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.anchored = Regex::new(&format!("^(?:{})", pattern.as_str())).ok();
        self.pattern = Some(pattern);
        self
    }

    /// Suppresses visible side-channel effects such as progress notices.
    #[must_use]
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Requires the orchestrator to obtain user authorization before `run`.
    #[must_use]
    pub fn require_auth(mut self, require_auth: bool) -> Self {
        self.require_auth = require_auth;
        self
    }

    /// Returns the advertised function descriptor.
    #[must_use]
    pub fn function(&self) -> &FunctionDescriptor {
        &self.function
    }

    /// Returns the configured keywords.
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Returns the optional trigger pattern.
    #[must_use]
    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    /// Returns whether the tool is silent.
    #[must_use]
    pub const fn is_silent(&self) -> bool {
        self.silent
    }

    /// Returns whether the tool needs authorization before running.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        self.require_auth
    }

    /// Applies the trigger policy to `message_text`.
    ///
    /// A keyword contained anywhere in the text wins first. Otherwise the
    /// pattern must match at the very start of the text.
    #[must_use]
    pub fn triggers_on(&self, message_text: &str) -> bool {
        if self
            .keywords
            .iter()
            .any(|keyword| message_text.contains(keyword.as_str()))
        {
            return true;
        }
        if let Some(anchored) = &self.anchored {
            return anchored.is_match(message_text);
        }
        self.pattern
            .as_ref()
            .and_then(|pattern| pattern.find(message_text))
            .is_some_and(|found| found.start() == 0)
    }
}

/// Capability set implemented by every tool handler.
///
/// `pre_check` and `func_message` are synchronous and must not have side
/// effects. `failed`, `run` and `callback` may suspend.
///
/// Handlers are constructed fresh for every registry check, so any state they
/// hold is configuration rather than shared mutable state.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the static configuration of the tool.
    fn config(&self) -> &ToolConfig;

    /// Returns the advertised function descriptor.
    fn function(&self) -> &FunctionDescriptor {
        self.config().function()
    }

    /// Returns whether the tool suppresses visible side effects.
    fn silent(&self) -> bool {
        self.config().is_silent()
    }

    /// Returns whether the orchestrator must route through authorization.
    fn require_auth(&self) -> bool {
        self.config().requires_auth()
    }

    /// Validates the environment once at registration time.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when the tool must not be registered,
    /// for example a missing API key.
    fn pre_check(&self) -> Result<(), String>;

    /// Returns the descriptor when the tool wants to handle `message_text`.
    fn func_message(&self, message_text: &str) -> Option<FunctionDescriptor> {
        self.config()
            .triggers_on(message_text)
            .then(|| self.function().clone())
    }

    /// Reports a dispatch or execution failure to the user. Never fails.
    async fn failed(&self, platform: &str, task: &Value, receiver: &Receiver, reason: &str);

    /// Executes the tool.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Execution`](crate::ToolError::Execution) when the
    /// tool cannot produce a response.
    async fn run(&self, task: &Value, receiver: &Receiver, arg: Value) -> ToolResult<Value>;

    /// Resumes work previously suspended under `sign`, usually a chain id.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Execution`](crate::ToolError::Execution) when the
    /// resumed work fails.
    async fn callback(&self, sign: &str, task: &Value) -> ToolResult<Option<Value>>;
}

/// A tool handler type, as opposed to an instance of it.
///
/// Equality and hashing follow the underlying [`TypeId`].
#[derive(Clone, Copy)]
pub struct HandlerType {
    id: TypeId,
    name: &'static str,
    construct: fn() -> Box<dyn Tool>,
}

fn construct<T>() -> Box<dyn Tool>
where
    T: Tool + Default + 'static,
{
    Box::new(T::default())
}

impl HandlerType {
    /// Captures the handler type `T`.
    #[must_use]
    pub fn of<T>() -> Self
    where
        T: Tool + Default + 'static,
    {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            construct: construct::<T>,
        }
    }

    /// Returns the Rust type name of the handler.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.name
    }

    /// Builds a fresh handler instance.
    #[must_use]
    pub fn instantiate(&self) -> Box<dyn Tool> {
        (self.construct)()
    }
}

impl PartialEq for HandlerType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for HandlerType {}

impl Hash for HandlerType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for HandlerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HandlerType").field(&self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        config: ToolConfig,
    }

    impl Default for Probe {
        fn default() -> Self {
            let function = FunctionDescriptor::new("probe").unwrap();
            Self {
                config: ToolConfig::new(function)
                    .with_keywords(["ping", "probe"])
                    .with_pattern(Regex::new(r"/p(robe)?\b").unwrap())
                    .require_auth(true),
            }
        }
    }

    #[async_trait]
    impl Tool for Probe {
        fn config(&self) -> &ToolConfig {
            &self.config
        }

        fn pre_check(&self) -> Result<(), String> {
            Ok(())
        }

        async fn failed(&self, _: &str, _: &Value, _: &Receiver, _: &str) {}

        async fn run(&self, _: &Value, _: &Receiver, arg: Value) -> ToolResult<Value> {
            Ok(arg)
        }

        async fn callback(&self, _: &str, _: &Value) -> ToolResult<Option<Value>> {
            Ok(None)
        }
    }

    #[derive(Default)]
    struct Other(Probe);

    #[async_trait]
    impl Tool for Other {
        fn config(&self) -> &ToolConfig {
            self.0.config()
        }

        fn pre_check(&self) -> Result<(), String> {
            Err("never".into())
        }

        async fn failed(&self, _: &str, _: &Value, _: &Receiver, _: &str) {}

        async fn run(&self, _: &Value, _: &Receiver, _: Value) -> ToolResult<Value> {
            Ok(Value::Null)
        }

        async fn callback(&self, _: &str, _: &Value) -> ToolResult<Option<Value>> {
            Ok(None)
        }
    }

    #[test]
    fn keyword_containment_matches_anywhere() {
        let tool = Probe::default();
        let hit = tool.func_message("could you ping the server");
        assert_eq!(hit.as_ref().map(FunctionDescriptor::name), Some("probe"));
    }

    #[test]
    fn pattern_must_match_at_start() {
        let tool = Probe::default();
        assert!(tool.func_message("/p now").is_some());
        assert!(tool.func_message("/probe now").is_some());
        assert!(tool.func_message("run /p now").is_none());
        assert!(tool.func_message("nothing relevant").is_none());
    }

    #[test]
    fn anchoring_keeps_alternation_and_flags_scoped() {
        let config = ToolConfig::new(FunctionDescriptor::new("alt").unwrap())
            .with_pattern(Regex::new(r"(?i)hi|hello").unwrap());
        assert!(config.triggers_on("HI there"));
        assert!(config.triggers_on("hello"));
        assert!(!config.triggers_on("oh hello"));
        assert_eq!(config.pattern().map(Regex::as_str), Some(r"(?i)hi|hello"));
    }

    #[test]
    fn pattern_less_tool_only_uses_keywords() {
        let config = ToolConfig::new(FunctionDescriptor::new("k").unwrap()).with_keywords(["abc"]);
        assert!(config.triggers_on("xxabcxx"));
        assert!(!config.triggers_on("ab c"));
    }

    #[test]
    fn flags_are_exposed() {
        let tool = Probe::default();
        assert!(tool.require_auth());
        assert!(!tool.silent());
        assert_eq!(tool.config().keywords(), ["ping", "probe"]);
    }

    #[test]
    fn handler_type_equality_follows_type() {
        assert_eq!(HandlerType::of::<Probe>(), HandlerType::of::<Probe>());
        assert_ne!(HandlerType::of::<Probe>(), HandlerType::of::<Other>());
        assert!(HandlerType::of::<Probe>().type_name().ends_with("Probe"));
    }

    #[tokio::test]
    async fn instantiate_builds_fresh_handlers() {
        let handler = HandlerType::of::<Probe>();
        let tool = handler.instantiate();
        assert!(tool.pre_check().is_ok());

        let receiver = Receiver::new("test", "u", "c").unwrap();
        let out = tool
            .run(&Value::Null, &receiver, serde_json::json!({ "q": 1 }))
            .await
            .unwrap();
        assert_eq!(out["q"], 1);

        assert_eq!(
            HandlerType::of::<Other>().instantiate().pre_check(),
            Err("never".to_string())
        );
    }
}
