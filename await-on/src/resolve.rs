use core::{
    pin::Pin,
    task::{Context, Poll, ready},
};

use pin_project_lite::pin_project;

use crate::input::{Deferred, Element, Returned};

/// Resolves a single element to `Result<T, E>`.
///
/// Shared by the top level of [`normalize`](crate::normalize()) and by every
/// member of a sequence.
pub fn resolve<'a, T, E>(element: Element<'a, T, E>) -> Resolve<'a, T, E> {
    Resolve::new(element)
}

pin_project! {
    #[project = ResolveProj]
    pub enum Resolve<'a, T, E> {
        Init {
            element: Option<Element<'a, T, E>>,
        },
        Waiting {
            #[pin]
            future: Deferred<'a, T, E>,
        },
        Done,
    }
}

impl<'a, T, E> Resolve<'a, T, E> {
    pub fn new(element: Element<'a, T, E>) -> Self {
        Resolve::Init {
            element: Some(element),
        }
    }

    /// Runs everything that settles without a wake: failure values, bare
    /// values and the thunk call.
    ///
    /// Returns `None` when a deferred computation is left to await, or when
    /// the element was already started.
    pub fn start(mut self: Pin<&mut Self>) -> Option<Result<T, E>> {
        let ResolveProj::Init { element } = self.as_mut().project() else {
            return None;
        };

        let returned = match element.take().expect("poll after done") {
            Element::Failure(err) => Returned::Failure(err),
            Element::Value(value) => Returned::Value(value),
            Element::Deferred(future) => Returned::Deferred(future),
            Element::Thunk(func) => {
                tracing::trace!("invoking thunk");
                func()
            }
        };

        match returned {
            Returned::Value(value) => {
                self.set(Resolve::Done);
                Some(Ok(value))
            }
            Returned::Failure(err) => {
                self.set(Resolve::Done);
                Some(Err(err))
            }
            Returned::Deferred(future) => {
                self.set(Resolve::Waiting { future });
                None
            }
        }
    }
}

impl<'a, T, E> Future for Resolve<'a, T, E> {
    type Output = Result<T, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        loop {
            match self.as_mut().project() {
                ResolveProj::Init { .. } => {
                    if let Some(ret) = self.as_mut().start() {
                        return Poll::Ready(ret);
                    }
                }
                ResolveProj::Waiting { future } => {
                    let ret = ready!(future.poll(cx));
                    self.set(Resolve::Done);
                    return Poll::Ready(ret);
                }
                ResolveProj::Done => {
                    panic!("poll after done")
                }
            }
        }
    }
}
