use core::fmt;

/// How urgent a driver diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// A sink for driver diagnostics.
///
/// Fire-and-forget: the driver never depends on a message being delivered,
/// and every sink is optional. Messages arrive as [`fmt::Arguments`] so sinks
/// can render them without the driver allocating.
pub trait EventLog {
    fn log(&mut self, severity: Severity, message: fmt::Arguments);
}

impl<'a, T> EventLog for &'a mut T
where
    T: EventLog + ?Sized,
{
    fn log(&mut self, severity: Severity, message: fmt::Arguments) {
        (**self).log(severity, message)
    }
}

/// A log sink that does not have any physical basis.
///
/// This is the sink the driver is constructed with when the caller does not
/// care about diagnostics; every message is discarded.
pub struct NullLog;

impl EventLog for NullLog {
    fn log(&mut self, _severity: Severity, _message: fmt::Arguments) {}
}

/// Forwards driver diagnostics to the `log` crate facade.
#[cfg(feature = "log")]
pub struct LogFacade;

#[cfg(feature = "log")]
impl EventLog for LogFacade {
    fn log(&mut self, severity: Severity, message: fmt::Arguments) {
        match severity {
            Severity::Info => log::info!("{}", message),
            Severity::Warn => log::warn!("{}", message),
            Severity::Error => log::error!("{}", message),
        }
    }
}
