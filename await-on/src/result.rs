use core::task::{Poll, ready};

use either::Either;
use pin_project_lite::pin_project;

use crate::outcome::Outcome;

pub trait IntoResult {
    type Output;
    type Error;

    fn into_result(self) -> Result<Self::Output, Self::Error>;
}

impl<T, E> IntoResult for Result<T, E> {
    type Error = E;
    type Output = T;
    fn into_result(self) -> Result<Self::Output, Self::Error> {
        self
    }
}

impl<L, R> IntoResult for Either<L, R>
where
    L: IntoResult,
    R: IntoResult<Output = L::Output, Error = L::Error>,
{
    type Error = L::Error;
    type Output = L::Output;
    fn into_result(self) -> Result<Self::Output, Self::Error> {
        match self {
            Either::Left(left) => left.into_result(),
            Either::Right(right) => right.into_result(),
        }
    }
}

pub trait IntoEither {
    type Left;
    type Right;

    fn into_either(self) -> Either<Self::Left, Self::Right>;
}

pub trait FutureOutcomeExt: Future {
    /// Settles with an [`Outcome`] instead of a `Result`-like value.
    fn outcome(self) -> OutcomeFuture<Self>
    where
        Self: Sized,
        Self::Output: IntoResult,
    {
        OutcomeFuture::new(self)
    }
}

impl<T> FutureOutcomeExt for T where T: Future {}

pin_project! {
  pub struct OutcomeFuture<T> {
      #[pin]
      future: T
  }
}

impl<T> OutcomeFuture<T> {
    pub fn new(future: T) -> OutcomeFuture<T> {
        OutcomeFuture { future }
    }
}

impl<T> Future for OutcomeFuture<T>
where
    T: Future,
    T::Output: IntoResult,
{
    type Output = Outcome<<T::Output as IntoResult>::Output, <T::Output as IntoResult>::Error>;

    fn poll(
        self: core::pin::Pin<&mut Self>,
        cx: &mut core::task::Context<'_>,
    ) -> Poll<Self::Output> {
        Poll::Ready(ready!(self.project().future.poll(cx)).into_result().into())
    }
}
