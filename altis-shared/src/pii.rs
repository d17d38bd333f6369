use serde::{Serialize, Deserialize, Serializer};
use std::fmt;

/// Placeholder printed in place of masked values
pub const MASK: &str = "********";

/// Wraps personal data (passenger names) so `{}` and `{:?}` in log macros
/// never print it. Serialization still emits the real value for API bodies.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T> Masked<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn as_inner(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl From<&str> for Masked<String> {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_hides_value_in_formatting() {
        let name = Masked::from("Alice");
        assert_eq!(format!("{}", name), MASK);
        assert_eq!(format!("{:?}", name), MASK);
        assert_eq!(name.as_inner(), "Alice");
    }

    #[test]
    fn test_masked_round_trips_through_json() {
        let json = serde_json::to_string(&Masked::from("Bob")).unwrap();
        assert_eq!(json, "\"Bob\"");

        let back: Masked<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.into_inner(), "Bob");
    }
}
