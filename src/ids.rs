//! Typed Ids
//!
//! Backend rows are keyed by opaque string identifiers. [`TypedId`] tags
//! each one with the record it belongs to so a product id cannot be passed
//! where an order id is expected.

use std::{
    borrow::Borrow,
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// String identifier tagged with the record type it refers to.
pub struct TypedId<T>(String, PhantomData<fn() -> T>);

impl<T> TypedId<T> {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into(), PhantomData)
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the raw identifier.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        Self::new(self.0.clone())
    }
}

impl<T> Debug for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for TypedId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedId<T> {}

impl<T> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for TypedId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TypedId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Borrow<str> for TypedId<T> {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl<T> From<&str> for TypedId<T> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<T> From<String> for TypedId<T> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<T> Serialize for TypedId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de, T> Deserialize<'de> for TypedId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// Marker for signed-in users.
#[derive(Debug)]
pub struct User;

/// User Id
pub type UserId = TypedId<User>;

/// Who the session belongs to. Decides where cart and wishlist state is
/// persisted: the device for guests, the backend for accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Identity {
    /// Not signed in
    #[default]
    Guest,

    /// Signed in as this user
    Account(UserId),
}

impl Identity {
    /// From an optional signed-in user.
    pub fn from_user(user_id: Option<UserId>) -> Self {
        user_id.map_or(Self::Guest, Self::Account)
    }

    /// The signed-in user, if any.
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Guest => None,
            Self::Account(user_id) => Some(user_id),
        }
    }

    /// Whether the session is signed in.
    pub fn is_account(&self) -> bool {
        matches!(self, Self::Account(_))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn serializes_as_plain_string() -> TestResult {
        let id = UserId::new("u-1");

        assert_eq!(serde_json::to_string(&id)?, "\"u-1\"");
        assert_eq!(serde_json::from_str::<UserId>("\"u-1\"")?, id);

        Ok(())
    }

    #[test]
    fn identity_from_optional_user() {
        assert_eq!(Identity::from_user(None), Identity::Guest);

        let identity = Identity::from_user(Some("u-1".into()));

        assert!(identity.is_account());
        assert_eq!(identity.user_id().map(UserId::as_str), Some("u-1"));
    }
}
