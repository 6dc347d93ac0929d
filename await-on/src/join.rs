use alloc::vec::Vec;
use core::{
    pin::Pin,
    task::{Context, Poll},
};

use pin_project_lite::pin_project;

use crate::{input::Element, resolve::Resolve};

enum Slot<'a, T, E> {
    Pending(Resolve<'a, T, E>),
    Ready(T),
}

pin_project! {
    /// Waits for every element of a sequence, settling early with the first
    /// failure observed.
    ///
    /// The first poll starts every element in input order before any
    /// deferred computation is awaited: a failure value or a thunk failing
    /// synchronously wins over a rejection. After that, pending elements are
    /// polled in input order on every wake. Values are kept in their slot
    /// until all are ready, so the output order is the input order whatever
    /// the completion order was.
    pub struct Join<'a, T, E> {
        slots: Vec<Slot<'a, T, E>>,
        started: bool,
        finished: bool,
    }
}

impl<'a, T, E> Join<'a, T, E> {
    pub fn new<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = Element<'a, T, E>>,
    {
        Join {
            slots: elements
                .into_iter()
                .map(|element| Slot::Pending(Resolve::new(element)))
                .collect(),
            started: false,
            finished: false,
        }
    }
}

impl<'a, T, E> Future for Join<'a, T, E> {
    type Output = Result<Vec<T>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        if *this.finished {
            panic!("poll after done")
        }

        let mut pending = false;
        let mut failure = None;

        if !*this.started {
            *this.started = true;

            for (index, slot) in this.slots.iter_mut().enumerate() {
                let Slot::Pending(resolve) = &mut *slot else {
                    continue;
                };

                match Pin::new(resolve).start() {
                    Some(Ok(value)) => *slot = Slot::Ready(value),
                    Some(Err(err)) => {
                        tracing::debug!(index, "sequence element failed on start");
                        failure = Some(err);
                        break;
                    }
                    None => {}
                }
            }
        }

        if failure.is_none() {
            for (index, slot) in this.slots.iter_mut().enumerate() {
                let Slot::Pending(resolve) = &mut *slot else {
                    continue;
                };

                let polled = Pin::new(resolve).poll(cx);
                match polled {
                    Poll::Ready(Ok(value)) => *slot = Slot::Ready(value),
                    Poll::Ready(Err(err)) => {
                        tracing::debug!(index, "sequence element failed, settling early");
                        failure = Some(err);
                        break;
                    }
                    Poll::Pending => pending = true,
                }
            }
        }

        if let Some(err) = failure {
            *this.finished = true;
            // Outstanding siblings are dropped here, their results discarded.
            this.slots.clear();
            return Poll::Ready(Err(err));
        }

        if pending {
            return Poll::Pending;
        }

        *this.finished = true;

        let values = core::mem::take(this.slots)
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Ready(value) => Some(value),
                Slot::Pending(_) => None,
            })
            .collect();

        Poll::Ready(Ok(values))
    }
}
