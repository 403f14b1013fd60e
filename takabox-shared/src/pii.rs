use serde::{Serialize, Deserialize, Serializer};
use std::fmt;

/// A wrapper for sensitive customer data (name, mobile) that masks its value in Debug output.
#[derive(Clone, Deserialize)]
pub struct Masked<T>(pub T);

impl<T: fmt::Display> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: fmt::Display> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialized responses need the real value (the courier receives the
        // recipient name and phone); masking applies to log macros like
        // tracing::info!("{:?}", order) only.
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn into_inner(self) -> T {
        self.0
    }

    pub fn inner(&self) -> &T {
        &self.0
    }
}

impl<T: PartialEq> PartialEq for Masked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> From<T> for Masked<T> {
    fn from(value: T) -> Self {
        Masked(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_is_masked() {
        let mobile = Masked("01712345678".to_string());
        assert_eq!(format!("{:?}", mobile), "********");
        assert_eq!(format!("{}", mobile), "********");
    }

    #[test]
    fn test_serialization_keeps_real_value() {
        let name = Masked("Rahim Uddin".to_string());
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"Rahim Uddin\"");
    }
}
