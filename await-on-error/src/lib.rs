#![no_std]

use core::fmt;

use alloc::{
    borrow::Cow,
    boxed::Box,
    collections::btree_map::BTreeMap,
    string::{String, ToString},
};

extern crate alloc;

pub type BoxError = Box<dyn core::error::Error + Send + Sync>;

pub type Result<T> = core::result::Result<T, Error>;

/// A captured failure.
///
/// Wraps whatever error a deferred computation or thunk produced, together
/// with optional key/value context the producer attached before failing.
#[derive(Debug)]
pub struct Error {
    inner: BoxError,
    context: BTreeMap<Cow<'static, str>, Cow<'static, str>>,
}

impl Error {
    pub fn new<T: Into<BoxError>>(error: T) -> Error {
        Error {
            inner: error.into(),
            context: Default::default(),
        }
    }

    /// Failure carrying nothing but a message, for producers that reject
    /// with plain text instead of a typed error.
    pub fn msg(message: impl fmt::Display) -> Error {
        Error::new(Message(message.to_string()))
    }

    pub fn context(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(|value| value.as_ref())
    }

    pub fn inner(&self) -> &(dyn core::error::Error + Send + Sync + 'static) {
        &*self.inner
    }

    pub fn downcast_ref<T: core::error::Error + 'static>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    pub fn is<T: core::error::Error + 'static>(&self) -> bool {
        self.inner.is::<T>()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)?;

        if !self.context.is_empty() {
            write!(f, " [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", key, value)?;
            }
            write!(f, "]")?;
        }

        Ok(())
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        self.inner.source()
    }
}

impl From<BoxError> for Error {
    fn from(value: BoxError) -> Self {
        Error::new(value)
    }
}

impl From<&'static str> for Error {
    fn from(value: &'static str) -> Self {
        Error::msg(value)
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::new(Message(value))
    }
}

#[derive(Debug)]
struct Message(String);

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl core::error::Error for Message {}

#[cfg(feature = "serde")]
impl serde::Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        struct Collect<'a>(&'a (dyn core::error::Error + Send + Sync));

        impl serde::Serialize for Collect<'_> {
            fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_str(self.0)
            }
        }

        let mut state = serializer.serialize_struct("Error", 2)?;
        state.serialize_field("message", &Collect(&*self.inner))?;
        state.serialize_field("context", &self.context)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[derive(Debug, PartialEq)]
    struct Timeout(u32);

    impl fmt::Display for Timeout {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "timed out after {}ms", self.0)
        }
    }

    impl core::error::Error for Timeout {}

    #[test]
    fn test_display_without_context() {
        let err = Error::msg("Some error");
        assert_eq!(format!("{}", err), "Some error");
    }

    #[test]
    fn test_display_with_context() {
        let err = Error::new(Timeout(250))
            .context("host", "localhost")
            .context("attempt", "2");
        assert_eq!(
            format!("{}", err),
            "timed out after 250ms [attempt: 2, host: localhost]"
        );
        assert_eq!(err.context_value("host"), Some("localhost"));
        assert_eq!(err.context_value("port"), None);
    }

    #[test]
    fn test_downcast_keeps_original_error() {
        let err = Error::new(Timeout(10));
        assert!(err.is::<Timeout>());
        assert_eq!(err.downcast_ref::<Timeout>(), Some(&Timeout(10)));
        assert!(!err.is::<Message>());
    }

    #[test]
    fn test_from_strings() {
        let err: Error = "rejected".into();
        assert!(err.is::<Message>());
        assert_eq!(format!("{}", err.inner()), "rejected");

        let err: Error = String::from("also rejected").into();
        assert_eq!(format!("{}", err), "also rejected");
    }

    #[test]
    fn test_from_box_error() {
        let boxed: BoxError = Box::new(Timeout(5));
        let err = Error::from(boxed);
        assert_eq!(err.downcast_ref::<Timeout>(), Some(&Timeout(5)));
    }
}
