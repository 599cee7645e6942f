use std::future::Future;

#[cfg(feature = "tracing")]
use tracing::Instrument;

/// Wraps a future in a debug span when the `tracing` feature is enabled.
pub trait MaybeInstrument: Future + Sized {
    #[cfg(feature = "tracing")]
    fn maybe_instrument(self, name: &'static str) -> impl Future<Output = Self::Output> {
        self.instrument(tracing::debug_span!("config_op", op = name))
    }

    #[cfg(not(feature = "tracing"))]
    fn maybe_instrument(self, _name: &'static str) -> Self {
        self
    }
}

impl<F: Future> MaybeInstrument for F {}
