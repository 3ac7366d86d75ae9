//! The chain correlation record.

use kira_primitives::{ChainId, Receiver};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ChainError, ChainResult};

/// Correlates a user, a reply address, an ordering time and a payload under a
/// unique id.
///
/// Chains are immutable once built; stores only add and remove whole chains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    user_id: String,
    address: String,
    #[serde(default)]
    time: i64,
    #[serde(default)]
    arg: Value,
    #[serde(default)]
    uuid: ChainId,
}

impl Chain {
    /// Creates a chain with time `0` and a fresh id.
    #[must_use]
    pub fn new(user_id: impl Into<String>, address: impl Into<String>, arg: Value) -> Self {
        Self {
            user_id: user_id.into(),
            address: address.into(),
            time: 0,
            arg,
            uuid: ChainId::random(),
        }
    }

    /// Starts building a chain for `user_id` replying to `address`.
    #[must_use]
    pub fn builder(user_id: impl Into<String>, address: impl Into<String>) -> ChainBuilder {
        ChainBuilder {
            user_id: user_id.into(),
            address: address.into(),
            time: 0,
            arg: Value::Null,
            uuid: ChainId::random(),
        }
    }

    /// Starts building a chain addressed to `receiver`.
    #[must_use]
    pub fn for_receiver(receiver: &Receiver) -> ChainBuilder {
        Self::builder(receiver.user_id(), receiver.address())
    }

    /// Returns the owning user.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the reply address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the ordering time.
    #[must_use]
    pub const fn time(&self) -> i64 {
        self.time
    }

    /// Returns the payload.
    #[must_use]
    pub fn arg(&self) -> &Value {
        &self.arg
    }

    /// Returns the unique id.
    #[must_use]
    pub const fn uuid(&self) -> ChainId {
        self.uuid
    }

    /// Consumes the chain, returning its payload.
    #[must_use]
    pub fn into_arg(self) -> Value {
        self.arg
    }
}

/// Builder used to assemble [`Chain`] instances.
#[derive(Debug)]
pub struct ChainBuilder {
    user_id: String,
    address: String,
    time: i64,
    arg: Value,
    uuid: ChainId,
}

impl ChainBuilder {
    /// Sets the ordering time. Lower times are dequeued first.
    #[must_use]
    pub fn time(mut self, time: i64) -> Self {
        self.time = time;
        self
    }

    /// Sets the payload.
    #[must_use]
    pub fn arg(mut self, arg: Value) -> Self {
        self.arg = arg;
        self
    }

    /// Overrides the generated id.
    #[must_use]
    pub fn uuid(mut self, uuid: ChainId) -> Self {
        self.uuid = uuid;
        self
    }

    /// Finalises the builder.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidChain`] when the user id is blank.
    pub fn build(self) -> ChainResult<Chain> {
        if self.user_id.trim().is_empty() {
            return Err(ChainError::InvalidChain("chain user id must not be empty"));
        }
        Ok(Chain {
            user_id: self.user_id,
            address: self.address,
            time: self.time,
            arg: self.arg,
            uuid: self.uuid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_uses_defaults() {
        let chain = Chain::new("u1", "telegram:1", json!({ "step": 1 }));
        assert_eq!(chain.time(), 0);
        assert_eq!(chain.arg()["step"], 1);
        assert_ne!(chain.uuid(), Chain::new("u1", "telegram:1", Value::Null).uuid());
    }

    #[test]
    fn builder_rejects_blank_user() {
        let err = Chain::builder(" ", "addr").build().expect_err("blank user should fail");
        assert!(matches!(err, ChainError::InvalidChain(_)));
    }

    #[test]
    fn builder_from_receiver() {
        let receiver = Receiver::new("discord", "42", "chan").unwrap();
        let chain = Chain::for_receiver(&receiver).time(9).build().unwrap();
        assert_eq!(chain.user_id(), "42");
        assert_eq!(chain.address(), "discord:chan");
        assert_eq!(chain.time(), 9);
    }

    #[test]
    fn deserialise_fills_defaults() {
        let chain: Chain =
            serde_json::from_value(json!({ "user_id": "u", "address": "a" })).unwrap();
        assert_eq!(chain.time(), 0);
        assert!(chain.arg().is_null());

        let copy: Chain = serde_json::from_value(serde_json::to_value(&chain).unwrap()).unwrap();
        assert_eq!(copy, chain);
    }
}
