//! Chain identifier types.
//!
//! A [`ChainId`] displays as 32 hex digits without hyphens. That string is the
//! `sign` a tool embeds in callback payloads, so it stays short and free of
//! separators; parsing also accepts the hyphenated form.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// Unique identifier correlating a suspended chain with its later resumption.
///
/// Tools hand the string form out as the `sign` of a callback and parse it
/// back with [`FromStr`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(Uuid);

impl ChainId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for ChainId {
    fn default() -> Self {
        Self::random()
    }
}

impl Display for ChainId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0.simple(), f)
    }
}

impl From<Uuid> for ChainId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<ChainId> for Uuid {
    fn from(value: ChainId) -> Self {
        value.0
    }
}

impl FromStr for ChainId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::parse_str(s.trim()).map_err(Error::from)?;
        Ok(Self::from_uuid(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_chain_id() {
        let id = ChainId::random();
        let parsed = id.to_string().parse::<ChainId>().expect("parse");
        assert_eq!(id, parsed);
    }

    #[test]
    fn accepts_hyphenated_form() {
        let id = ChainId::random();
        let parsed = id.as_uuid().hyphenated().to_string().parse::<ChainId>();
        assert_eq!(parsed.expect("parse"), id);
    }

    #[test]
    fn rejects_garbage() {
        let err = "not-a-chain".parse::<ChainId>().expect_err("garbage should fail");
        assert!(matches!(err, Error::InvalidChainId { .. }));
    }

    #[test]
    fn fresh_ids_are_distinct() {
        assert_ne!(ChainId::random(), ChainId::default());
    }
}
