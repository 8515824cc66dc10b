//! Chain composition.

use tracing::debug;

use crate::handler::Handler;
use crate::step::Step;
use crate::ware::Ware;

/// Folds `wares` around `handler` into a single step.
///
/// The last ware wraps the handler, the one before it wraps that, and so on,
/// so at request time the wares run in the order given:
///
/// ```text
/// compose([], h)           = h
/// compose([w, ..rest], h)  = w(compose(rest, h))
/// ```
///
/// No validation happens here. Callers run [`validate`](crate::validate) on
/// the same wares and handler first; the registrar always does.
///
/// Takes anything that iterates the wares by reference from both ends, so a
/// slice, an array or an endpoint's [`chain`](crate::Endpoint::chain) all work
/// without copying.
pub fn compose<'a, I>(wares: I, handler: &Handler) -> Step
where
    I: IntoIterator<Item = &'a Ware>,
    I::IntoIter: DoubleEndedIterator,
{
    let mut count = 0usize;
    let step = wares
        .into_iter()
        .rev()
        .fold(handler.step().clone(), |next, ware| {
            count += 1;
            ware.wrap(next)
        });
    debug!(handler = handler.name(), wares = count, "composed chain");
    step
}
