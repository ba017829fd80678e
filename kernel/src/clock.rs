use time::{Date, OffsetDateTime};

pub trait Clock: 'static + Sync + Send {
    fn now(&self) -> OffsetDateTime;

    /// Calendar date of [`Clock::now`].
    fn today(&self) -> Date {
        self.now().date()
    }
}

pub trait DependOnClock: 'static + Sync + Send {
    type Clock: Clock;
    fn clock(&self) -> &Self::Clock;
}
