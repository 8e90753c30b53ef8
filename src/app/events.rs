//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  They are observability
//! only; replies to the requester go through the transport.

use crate::alerts::Alert;
use crate::error::TransportError;

use super::dispatch::DispatchKind;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Bring-up finished (successfully or not) and cycling begins.
    Started,

    /// A complete message of `len` bytes left the framer.
    MessageReceived(usize),

    /// A message was dispatched.
    CommandHandled(DispatchKind),

    /// The thermostat switched heating on (`true`) or off.
    HeatingChanged(bool),

    /// A sensor crossed its alert threshold this cycle.
    AlertRaised(Alert),

    /// An inbound message overflowed the buffer and was truncated.
    FramingOverflow,

    /// A transport call failed; the cycle carried on.
    TransportFault(TransportError),
}
