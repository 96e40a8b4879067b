use std::fmt;
use std::fmt::{Debug, Display, Formatter};

/// The human-readable progress of a report, shown to whoever started it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Unsupported,
    RequestingAccess,
    AccessDenied,
    Sending,
    CompletingRedirect,
    RedirectNotFound,
    TransmitFailed,
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let message = match self {
            Status::Unsupported => "Geolocation not supported.",
            Status::RequestingAccess => "Requesting location access...",
            Status::AccessDenied => "Location access denied. Cannot redirect.",
            Status::Sending => "Sending location data...",
            Status::CompletingRedirect => "Completing redirect...",
            Status::RedirectNotFound => "Redirect URL not found.",
            Status::TransmitFailed => "Error processing location. Redirection cancelled.",
        };
        f.write_str(message)
    }
}

pub trait StatusReporter: Debug + Send + Sync {
    fn report(&self, status: Status);
}
