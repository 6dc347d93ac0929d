use core::{
    pin::Pin,
    task::{Context, Poll, ready},
};

use pin_project_lite::pin_project;

use crate::{
    input::{Element, Input},
    join::Join,
    outcome::{Outcome, Payload},
    resolve::Resolve,
};

/// Turns any [`Input`] into an [`Outcome`].
///
/// A `Failure` input is the failure, before anything else is looked at. A
/// deferred computation is awaited, a thunk is invoked once (and awaited if it
/// hands back a deferred computation) and a bare value is the payload as is.
/// A sequence resolves every element concurrently and settles with the first
/// failure observed, or with all values in input order.
///
/// Nothing is invoked until the returned future is first polled.
///
/// ```
/// use await_on::{Element, Input, Payload, normalize};
///
/// let input: Input<'_, &str, &str> = Input::sequence([
///     Element::deferred(async { Ok("hello") }),
///     Element::thunk(|| Ok::<_, &str>("world")),
/// ]);
///
/// let (payload, error) = futures::executor::block_on(normalize(input)).into_parts();
/// assert_eq!(payload, Some(Payload::Many(vec!["hello", "world"])));
/// assert_eq!(error, None);
/// ```
pub fn normalize<'a, T, E>(input: Input<'a, T, E>) -> Normalize<'a, T, E> {
    match input {
        Input::Sequence(elements) => Normalize::Many {
            join: Join::new(elements),
        },
        Input::Failure(err) => Normalize::one(Element::Failure(err)),
        Input::Deferred(future) => Normalize::one(Element::Deferred(future)),
        Input::Thunk(func) => Normalize::one(Element::Thunk(func)),
        Input::Value(value) => Normalize::one(Element::Value(value)),
    }
}

pin_project! {
    #[project = NormalizeProj]
    pub enum Normalize<'a, T, E> {
        One {
            #[pin]
            resolve: Resolve<'a, T, E>,
        },
        Many {
            #[pin]
            join: Join<'a, T, E>,
        },
    }
}

impl<'a, T, E> Normalize<'a, T, E> {
    fn one(element: Element<'a, T, E>) -> Self {
        Normalize::One {
            resolve: Resolve::new(element),
        }
    }
}

impl<'a, T, E> Future for Normalize<'a, T, E> {
    type Output = Outcome<Payload<T>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let ret = match self.project() {
            NormalizeProj::One { resolve } => ready!(resolve.poll(cx)).map(Payload::One),
            NormalizeProj::Many { join } => ready!(join.poll(cx)).map(Payload::Many),
        };

        Poll::Ready(ret.into())
    }
}
