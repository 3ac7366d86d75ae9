//! Reply address handed to tools when they run or report failures.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Where a tool's response should be delivered.
///
/// The `platform` names the transport adapter (for example `telegram`),
/// `user_id` identifies the requester and `chat_id` the conversation the reply
/// belongs to.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Receiver {
    platform: String,
    user_id: String,
    chat_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thread_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message_id: Option<String>,
}

impl Receiver {
    /// Creates a receiver after validating the mandatory fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidReceiver`] when any of the fields is empty.
    pub fn new(
        platform: impl Into<String>,
        user_id: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Result<Self> {
        let platform = non_empty(platform.into(), "receiver platform cannot be empty")?;
        let user_id = non_empty(user_id.into(), "receiver user id cannot be empty")?;
        let chat_id = non_empty(chat_id.into(), "receiver chat id cannot be empty")?;
        Ok(Self {
            platform,
            user_id,
            chat_id,
            thread_id: None,
            message_id: None,
        })
    }

    /// Scopes the receiver to a thread inside the chat.
    #[must_use]
    pub fn with_thread_id(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    /// Marks the message the reply answers.
    #[must_use]
    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    /// Returns the platform name.
    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Returns the requesting user.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the chat identifier.
    #[must_use]
    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    /// Returns the optional thread identifier.
    #[must_use]
    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    /// Returns the optional message identifier.
    #[must_use]
    pub fn message_id(&self) -> Option<&str> {
        self.message_id.as_deref()
    }

    /// Renders the `platform:chat` address stored on chains.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.platform, self.chat_id)
    }
}

fn non_empty(value: String, reason: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(Error::InvalidReceiver {
            reason: reason.into(),
        });
    }
    Ok(value)
}
