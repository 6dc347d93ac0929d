use alloc::{vec, vec::Vec};
use either::Either;

use crate::result::{IntoEither, IntoResult};

/// What a normalized input resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Payload<T> {
    /// A failure, a deferred computation, a thunk or a bare value.
    One(T),
    /// A sequence, in input order.
    Many(Vec<T>),
}

impl<T> Payload<T> {
    pub fn as_one(&self) -> Option<&T> {
        match self {
            Payload::One(value) => Some(value),
            Payload::Many(_) => None,
        }
    }

    pub fn as_many(&self) -> Option<&[T]> {
        match self {
            Payload::One(_) => None,
            Payload::Many(values) => Some(values),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Payload::One(value) => vec![value],
            Payload::Many(values) => values,
        }
    }
}

impl<T> IntoEither for Payload<T> {
    type Left = T;
    type Right = Vec<T>;

    fn into_either(self) -> Either<T, Vec<T>> {
        match self {
            Payload::One(value) => Either::Left(value),
            Payload::Many(values) => Either::Right(values),
        }
    }
}

/// Two-slot result: a payload or a failure, never both and never neither.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Outcome<P, E> {
    inner: Result<P, E>,
}

impl<P, E> Outcome<P, E> {
    pub fn success(payload: P) -> Self {
        Outcome { inner: Ok(payload) }
    }

    pub fn failure(error: E) -> Self {
        Outcome { inner: Err(error) }
    }

    pub fn payload(&self) -> Option<&P> {
        self.inner.as_ref().ok()
    }

    pub fn error(&self) -> Option<&E> {
        self.inner.as_ref().err()
    }

    pub fn is_success(&self) -> bool {
        self.inner.is_ok()
    }

    pub fn is_failure(&self) -> bool {
        self.inner.is_err()
    }

    /// Splits into `(payload, error)`. Exactly one side is `Some`.
    pub fn into_parts(self) -> (Option<P>, Option<E>) {
        match self.inner {
            Ok(payload) => (Some(payload), None),
            Err(err) => (None, Some(err)),
        }
    }

    pub fn map<U, F>(self, func: F) -> Outcome<U, E>
    where
        F: FnOnce(P) -> U,
    {
        Outcome {
            inner: self.inner.map(func),
        }
    }

    pub fn map_err<U, F>(self, func: F) -> Outcome<P, U>
    where
        F: FnOnce(E) -> U,
    {
        Outcome {
            inner: self.inner.map_err(func),
        }
    }
}

impl<P, E> From<Result<P, E>> for Outcome<P, E> {
    fn from(inner: Result<P, E>) -> Self {
        Outcome { inner }
    }
}

impl<P, E> IntoResult for Outcome<P, E> {
    type Output = P;
    type Error = E;

    fn into_result(self) -> Result<P, E> {
        self.inner
    }
}

#[cfg(feature = "serde")]
impl<T> serde::Serialize for Payload<T>
where
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Payload::One(value) => serde::Serialize::serialize(value, serializer),
            Payload::Many(values) => serde::Serialize::serialize(values, serializer),
        }
    }
}

#[cfg(feature = "serde")]
impl<P, E> serde::Serialize for Outcome<P, E>
where
    P: serde::Serialize,
    E: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeTuple;

        let mut state = serializer.serialize_tuple(2)?;
        state.serialize_element(&self.payload())?;
        state.serialize_element(&self.error())?;
        state.end()
    }
}
