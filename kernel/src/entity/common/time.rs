use std::marker::PhantomData;

use time::{Duration, OffsetDateTime};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CreatedAt<T>(OffsetDateTime, PhantomData<T>);

impl<T> CreatedAt<T> {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into(), PhantomData)
    }
}

impl<T> AsRef<OffsetDateTime> for CreatedAt<T> {
    fn as_ref(&self) -> &OffsetDateTime {
        &self.0
    }
}

impl<T> From<CreatedAt<T>> for OffsetDateTime {
    fn from(value: CreatedAt<T>) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UpdatedAt<T>(OffsetDateTime, PhantomData<T>);

impl<T> UpdatedAt<T> {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into(), PhantomData)
    }

    /// Next modification stamp. Never equal to or earlier than the current one,
    /// even when the clock has not moved (or moved backwards) since.
    pub fn advance(&self, now: OffsetDateTime) -> Self {
        if now > self.0 {
            Self::new(now)
        } else {
            Self::new(self.0 + Duration::microseconds(1))
        }
    }
}

impl<T> AsRef<OffsetDateTime> for UpdatedAt<T> {
    fn as_ref(&self) -> &OffsetDateTime {
        &self.0
    }
}

impl<T> From<UpdatedAt<T>> for OffsetDateTime {
    fn from(value: UpdatedAt<T>) -> Self {
        value.0
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use time::Duration;

    use super::UpdatedAt;

    #[test]
    fn advance_takes_later_clock() {
        let updated = UpdatedAt::<()>::new(datetime!(2024-01-01 10:00 UTC));
        let next = updated.advance(datetime!(2024-01-01 11:00 UTC));
        assert_eq!(next.as_ref(), &datetime!(2024-01-01 11:00 UTC));
    }

    #[test]
    fn advance_on_stalled_clock() {
        let at = datetime!(2024-01-01 10:00 UTC);
        let updated = UpdatedAt::<()>::new(at);
        assert_eq!(updated.advance(at).as_ref(), &(at + Duration::microseconds(1)));
        let earlier = at - Duration::hours(1);
        assert!(updated.advance(earlier).as_ref() > updated.as_ref());
    }
}
