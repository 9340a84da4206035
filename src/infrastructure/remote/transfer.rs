//! Transport fallback
//!
//! Tries the primary transport and, if it is unavailable or fails, the
//! fallback. Partial state left by the primary is not rolled back.

use tracing::{debug, warn};

use crate::domain::ports::{TransferError, TransferRequest, Transport};

pub struct FallbackTransport<P, F>
where
    P: Transport,
    F: Transport,
{
    primary: P,
    fallback: F,
}

impl<P, F> FallbackTransport<P, F>
where
    P: Transport,
    F: Transport,
{
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    fn attempt<T: Transport>(
        transport: &T,
        request: &TransferRequest<'_>,
    ) -> Result<&'static str, TransferError> {
        if !transport.is_available() {
            return Err(TransferError::Unavailable {
                transport: transport.name(),
            });
        }
        debug!(transport = transport.name(), "attempting transfer");
        transport.transfer(request)
    }
}

impl<P, F> Transport for FallbackTransport<P, F>
where
    P: Transport,
    F: Transport,
{
    fn name(&self) -> &'static str {
        self.primary.name()
    }

    fn is_available(&self) -> bool {
        self.primary.is_available() || self.fallback.is_available()
    }

    fn transfer(&self, request: &TransferRequest<'_>) -> Result<&'static str, TransferError> {
        let primary = match Self::attempt(&self.primary, request) {
            Ok(used) => return Ok(used),
            Err(e) => e,
        };
        warn!(
            error = %primary,
            fallback = self.fallback.name(),
            "primary transport failed, falling back"
        );

        Self::attempt(&self.fallback, request).map_err(|fallback| TransferError::AllFailed {
            primary: Box::new(primary),
            fallback: Box::new(fallback),
        })
    }
}
