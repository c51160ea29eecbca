// SPDX-License-Identifier: MPL-2.0
//! First-to-settle composition of two futures.
//!
//! The loser is dropped as soon as the winner resolves. Dropping a `reqwest`
//! future stops polling it but does not promise the bytes already on the wire
//! are recalled.

use futures_util::future::{self, Either};
use std::future::Future;
use std::pin::pin;
use std::time::Duration;

/// Which side of a [`race`] settled first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner<A, B> {
    First(A),
    Second(B),
}

/// Polls both futures and returns the output of whichever completes first.
///
/// When both are ready on the same poll, `first` wins.
pub async fn race<A, B>(first: A, second: B) -> Winner<A::Output, B::Output>
where
    A: Future,
    B: Future,
{
    let first = pin!(first);
    let second = pin!(second);
    match future::select(first, second).await {
        Either::Left((output, _)) => Winner::First(output),
        Either::Right((output, _)) => Winner::Second(output),
    }
}

/// Outcome of [`with_timeout`] when the timer wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed(pub Duration);

/// Races `fut` against a `limit` wall-clock timer.
pub async fn with_timeout<F>(limit: Duration, fut: F) -> Result<F::Output, Elapsed>
where
    F: Future,
{
    match race(fut, tokio::time::sleep(limit)).await {
        Winner::First(output) => Ok(output),
        Winner::Second(()) => Err(Elapsed(limit)),
    }
}
