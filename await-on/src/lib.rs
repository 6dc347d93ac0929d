#![no_std]

extern crate alloc;

mod input;
mod join;
mod normalize;
mod outcome;
mod resolve;
mod result;

pub use self::{
    input::{Deferred, Element, Input, Returned, Thunk},
    join::Join,
    normalize::{Normalize, normalize},
    outcome::{Outcome, Payload},
    resolve::{Resolve, resolve},
    result::*,
};

pub use await_on_error::{BoxError, Error};
