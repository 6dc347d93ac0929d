use alloc::{boxed::Box, vec::Vec};
use await_on_error::Error;
use core::fmt;
use futures_core::future::BoxFuture;

use crate::normalize::{Normalize, normalize};

/// A computation that eventually settles with a value or a failure.
pub type Deferred<'a, T, E = Error> = BoxFuture<'a, Result<T, E>>;

/// A zero-argument callable, invoked at most once.
pub type Thunk<'a, T, E = Error> = Box<dyn FnOnce() -> Returned<'a, T, E> + Send + 'a>;

/// What a [`Thunk`] hands back when invoked.
pub enum Returned<'a, T, E = Error> {
    Value(T),
    /// The thunk failed synchronously.
    Failure(E),
    Deferred(Deferred<'a, T, E>),
}

impl<'a, T, E> Returned<'a, T, E> {
    /// Boxes `future` as the computation the thunk started.
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'a,
    {
        Returned::Deferred(Box::pin(future))
    }
}

impl<'a, T, E> From<Result<T, E>> for Returned<'a, T, E> {
    fn from(value: Result<T, E>) -> Self {
        match value {
            Ok(value) => Returned::Value(value),
            Err(err) => Returned::Failure(err),
        }
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Returned<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Returned::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Returned::Failure(err) => f.debug_tuple("Failure").field(err).finish(),
            Returned::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// A single member of an [`Input::Sequence`].
///
/// There is no sequence variant: a nested collection can only be carried as
/// an opaque `Value` and is never expanded.
pub enum Element<'a, T, E = Error> {
    Failure(E),
    Deferred(Deferred<'a, T, E>),
    Thunk(Thunk<'a, T, E>),
    Value(T),
}

impl<'a, T, E> Element<'a, T, E> {
    /// Boxes `future` as a deferred element.
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'a,
    {
        Element::Deferred(Box::pin(future))
    }

    /// Thunk returning a value, a synchronous failure (`Err`) or a
    /// [`Returned::Deferred`].
    pub fn thunk<F, R>(func: F) -> Self
    where
        F: FnOnce() -> R + Send + 'a,
        R: Into<Returned<'a, T, E>>,
    {
        Element::Thunk(Box::new(move || -> Returned<'a, T, E> { func().into() }))
    }

    /// Thunk whose invocation starts an asynchronous computation.
    pub fn thunk_async<F, U>(func: F) -> Self
    where
        F: FnOnce() -> U + Send + 'a,
        U: Future<Output = Result<T, E>> + Send + 'a,
    {
        Element::Thunk(Box::new(move || Returned::deferred(func())))
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Element<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Failure(err) => f.debug_tuple("Failure").field(err).finish(),
            Element::Deferred(_) => f.write_str("Deferred(..)"),
            Element::Thunk(_) => f.write_str("Thunk(..)"),
            Element::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// Everything [`normalize`] accepts.
pub enum Input<'a, T, E = Error> {
    Failure(E),
    Deferred(Deferred<'a, T, E>),
    Thunk(Thunk<'a, T, E>),
    Value(T),
    Sequence(Vec<Element<'a, T, E>>),
}

impl<'a, T, E> Input<'a, T, E> {
    /// Boxes `future` as a deferred input.
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'a,
    {
        Input::Deferred(Box::pin(future))
    }

    /// Thunk returning a value, a synchronous failure (`Err`) or a
    /// [`Returned::Deferred`].
    pub fn thunk<F, R>(func: F) -> Self
    where
        F: FnOnce() -> R + Send + 'a,
        R: Into<Returned<'a, T, E>>,
    {
        Input::Thunk(Box::new(move || -> Returned<'a, T, E> { func().into() }))
    }

    /// Thunk whose invocation starts an asynchronous computation.
    pub fn thunk_async<F, U>(func: F) -> Self
    where
        F: FnOnce() -> U + Send + 'a,
        U: Future<Output = Result<T, E>> + Send + 'a,
    {
        Input::Thunk(Box::new(move || Returned::deferred(func())))
    }

    /// Collects `elements` into a sequence, keeping their order.
    pub fn sequence<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = Element<'a, T, E>>,
    {
        Input::Sequence(elements.into_iter().collect())
    }

    pub fn normalize(self) -> Normalize<'a, T, E> {
        normalize(self)
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Input<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Failure(err) => f.debug_tuple("Failure").field(err).finish(),
            Input::Deferred(_) => f.write_str("Deferred(..)"),
            Input::Thunk(_) => f.write_str("Thunk(..)"),
            Input::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Input::Sequence(elements) => f.debug_tuple("Sequence").field(elements).finish(),
        }
    }
}

impl<'a, T, E> From<Element<'a, T, E>> for Input<'a, T, E> {
    fn from(element: Element<'a, T, E>) -> Self {
        match element {
            Element::Failure(err) => Input::Failure(err),
            Element::Deferred(future) => Input::Deferred(future),
            Element::Thunk(func) => Input::Thunk(func),
            Element::Value(value) => Input::Value(value),
        }
    }
}

impl<'a, T, E> From<Vec<Element<'a, T, E>>> for Input<'a, T, E> {
    fn from(elements: Vec<Element<'a, T, E>>) -> Self {
        Input::Sequence(elements)
    }
}
