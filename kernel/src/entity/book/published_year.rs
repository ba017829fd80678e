use std::ops::RangeInclusive;

use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Fromln, AsRefln)]
pub struct PublishedYear(i32);

impl PublishedYear {
    pub const PLAUSIBLE: RangeInclusive<i32> = 1000..=9999;

    pub fn new(year: impl Into<i32>) -> Self {
        Self(year.into())
    }

    pub fn is_plausible(&self) -> bool {
        Self::PLAUSIBLE.contains(&self.0)
    }
}
