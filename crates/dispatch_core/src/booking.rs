//! Bookings, booking results, and the single-use ticket that delivers them.

use std::fmt;
use std::sync::mpsc;
use std::time::Duration;

/// One unit of work matching a passenger to a driver for one simulated trip.
///
/// Transient; exists only for the lifetime of the dispatch task that runs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: u64,
    pub passenger_name: String,
    pub region_name: String,
}

impl Booking {
    pub fn new(id: u64, passenger_name: impl Into<String>, region_name: impl Into<String>) -> Self {
        Self {
            id,
            passenger_name: passenger_name.into(),
            region_name: region_name.into(),
        }
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "booking-{} [{} @ {}]",
            self.id, self.passenger_name, self.region_name
        )
    }
}

/// Immutable outcome of one completed booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingResult {
    pub booking_id: u64,
    pub passenger_name: String,
    pub driver_name: String,
    /// Total elapsed time of the acquire + pickup + drive cycle.
    pub total_time: Duration,
}

/// Why a booking was rejected or failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// The region name is not configured; nothing was scheduled.
    UnknownRegion(String),
    /// The region no longer accepts bookings; nothing was scheduled.
    RegionShuttingDown(String),
    /// The wait for a driver was aborted because dispatch shut down.
    DispatchShuttingDown,
    /// The booking task died before producing a result.
    TaskFailed,
}

impl fmt::Display for BookingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRegion(name) => write!(f, "unknown region: {name}"),
            Self::RegionShuttingDown(name) => {
                write!(f, "region {name} is shutting down and rejects new bookings")
            }
            Self::DispatchShuttingDown => {
                write!(f, "dispatch shut down while the booking awaited a driver")
            }
            Self::TaskFailed => write!(f, "booking task failed before completing"),
        }
    }
}

impl std::error::Error for BookingError {}

/// Caller-facing handle to one booking's eventual outcome.
///
/// Backed by a single-use result channel: the ticket resolves exactly once,
/// either to a [`BookingResult`] or to a [`BookingError`]. If the producing
/// task dies without completing, waiting surfaces [`BookingError::TaskFailed`]
/// instead of pending forever.
#[derive(Debug)]
pub struct BookingTicket {
    booking_id: u64,
    result: mpsc::Receiver<Result<BookingResult, BookingError>>,
}

impl BookingTicket {
    pub fn booking_id(&self) -> u64 {
        self.booking_id
    }

    /// Block until the booking completes.
    pub fn wait(self) -> Result<BookingResult, BookingError> {
        self.result
            .recv()
            .unwrap_or(Err(BookingError::TaskFailed))
    }

    /// Block for at most `timeout`; `None` means still in flight.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Result<BookingResult, BookingError>> {
        match self.result.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(mpsc::RecvTimeoutError::Timeout) => None,
            Err(mpsc::RecvTimeoutError::Disconnected) => Some(Err(BookingError::TaskFailed)),
        }
    }

    /// Non-blocking poll; `None` means still in flight.
    pub fn try_result(&self) -> Option<Result<BookingResult, BookingError>> {
        match self.result.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(Err(BookingError::TaskFailed)),
        }
    }
}

/// Producer half of a booking's result channel.
pub(crate) struct BookingSlot {
    sender: mpsc::Sender<Result<BookingResult, BookingError>>,
}

impl BookingSlot {
    /// Resolve the ticket. The caller may already have given up waiting, so
    /// a closed channel is not an error.
    pub(crate) fn complete(self, outcome: Result<BookingResult, BookingError>) {
        let _ = self.sender.send(outcome);
    }
}

/// A connected slot/ticket pair for one booking.
pub(crate) fn booking_channel(booking_id: u64) -> (BookingSlot, BookingTicket) {
    let (sender, receiver) = mpsc::channel();
    (
        BookingSlot { sender },
        BookingTicket {
            booking_id,
            result: receiver,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_renders_id_passenger_and_region() {
        let booking = Booking::new(7, "alex", "north");
        assert_eq!(booking.to_string(), "booking-7 [alex @ north]");
    }

    #[test]
    fn ticket_resolves_to_completed_result() {
        let (slot, ticket) = booking_channel(1);
        slot.complete(Ok(BookingResult {
            booking_id: 1,
            passenger_name: "alex".into(),
            driver_name: "d-0".into(),
            total_time: Duration::from_millis(5),
        }));
        let result = ticket.wait().expect("completed booking");
        assert_eq!(result.driver_name, "d-0");
    }

    #[test]
    fn dropped_slot_fails_the_ticket_instead_of_hanging() {
        let (slot, ticket) = booking_channel(1);
        drop(slot);
        assert_eq!(ticket.wait(), Err(BookingError::TaskFailed));
    }

    #[test]
    fn try_result_reports_in_flight_then_outcome() {
        let (slot, ticket) = booking_channel(1);
        assert!(ticket.try_result().is_none());
        slot.complete(Err(BookingError::DispatchShuttingDown));
        assert_eq!(
            ticket.try_result(),
            Some(Err(BookingError::DispatchShuttingDown))
        );
    }
}
