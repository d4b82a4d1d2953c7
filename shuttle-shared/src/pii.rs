use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A wrapper for sensitive identity data (CNIC numbers) that masks its value in
/// Debug/Display output while serializing the real value for API payloads.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Masked<T>(pub T);

impl<T: fmt::Display> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Keep separators so a masked CNIC still reads as one: *****-*******-*
        for c in self.0.to_string().chars() {
            if c == '-' || c == ' ' {
                write!(f, "{}", c)?;
            } else {
                write!(f, "*")?;
            }
        }
        Ok(())
    }
}

impl<T: fmt::Display> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Masking is for log macros like tracing::info!("{:?}", ..); the wire
        // value must stay intact for the booking API.
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

impl<T> From<T> for Masked<T> {
    fn from(value: T) -> Self {
        Masked(value)
    }
}
