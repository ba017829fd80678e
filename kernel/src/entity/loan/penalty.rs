use rust_decimal::Decimal;
use vodca::{AsRefln, Fromln};

/// Currency-agnostic late fee, carried at the scale of two decimal places
/// the store keeps. Nothing accrues it yet, so it stays zero.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Fromln, AsRefln)]
pub struct PenaltyAmount(Decimal);

impl PenaltyAmount {
    pub const SCALE: u32 = 2;

    pub fn new(amount: impl Into<Decimal>) -> Self {
        let mut amount = amount.into();
        amount.rescale(Self::SCALE);
        Self(amount)
    }

    pub fn zero() -> Self {
        Self(Decimal::new(0, Self::SCALE))
    }
}

impl Default for PenaltyAmount {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;

    use super::PenaltyAmount;

    #[test]
    fn zero_has_storage_scale() {
        assert_eq!(PenaltyAmount::zero().as_ref().to_string(), "0.00");
        assert_eq!(PenaltyAmount::default(), PenaltyAmount::zero());
    }

    #[test]
    fn new_rescales_to_cents() {
        assert_eq!(
            PenaltyAmount::new(Decimal::new(5, 0)).as_ref().to_string(),
            "5.00"
        );
        assert_eq!(PenaltyAmount::new(Decimal::ZERO), PenaltyAmount::zero());
    }
}
