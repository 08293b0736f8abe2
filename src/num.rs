use alloy::primitives::U256;
use fastnum::{
    bint,
    decimal::{Context, RoundingMode, UnsignedDecimal},
};

/// Share of an order being filled, `numerator / denominator`.
///
/// Scaling rounds down and reports intermediate overflow the same way the
/// exchange contract does, so amounts never exceed the proportional share.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Proportion {
    numerator: U256,
    denominator: U256,
}

impl Proportion {
    /// Returns `None` for a zero denominator.
    pub fn new(numerator: U256, denominator: U256) -> Option<Self> {
        (!denominator.is_zero()).then_some(Self {
            numerator,
            denominator,
        })
    }

    /// Whole amounts pass through unscaled.
    pub fn is_whole(&self) -> bool {
        self.numerator == self.denominator
    }

    /// `floor(total * numerator / denominator)`, `None` if the product does
    /// not fit into 256 bits.
    pub fn scale(&self, total: U256) -> Option<U256> {
        if self.is_whole() {
            return Some(total);
        }
        total
            .checked_mul(self.numerator)
            .and_then(|product| product.checked_div(self.denominator))
    }
}

/// Token base units to decimal converter.
#[derive(Clone, Copy, Debug, Default)]
pub struct Converter {
    decimals: i32,
}

impl Converter {
    pub fn new(decimals: u8) -> Self {
        Self {
            decimals: decimals as i32,
        }
    }

    pub fn decimals(&self) -> u8 {
        self.decimals as u8
    }

    /// One whole token in base units, `10^decimals`, `None` past 77 decimals.
    pub fn unit(&self) -> Option<U256> {
        U256::from(10u8).checked_pow(U256::from(self.decimals()))
    }

    pub fn from_unsigned<const N: usize>(&self, value: U256) -> UnsignedDecimal<N> {
        let unscaled = bint::UInt::<N>::from_le_slice(value.as_le_slice())
            .expect("Converter: U256 -> UInt::<N>");
        UnsignedDecimal::<N>::from_parts(
            unscaled,
            -self.decimals,
            Context::default().with_rounding_mode(RoundingMode::Floor),
        )
    }

    /// Base units of the decimal amount.
    ///
    /// `None` if the amount has more fractional digits than the token or does
    /// not fit into 256 bits.
    pub fn to_unsigned<const N: usize>(&self, value: UnsignedDecimal<N>) -> Option<U256> {
        let rescaled = value.rescale(self.decimals as i16);
        if rescaled.is_op_clamped() || rescaled.is_op_inexact() {
            return None;
        }
        U256::try_from_le_slice(rescaled.digits().to_radix_le(256).as_slice())
    }
}

#[cfg(test)]
mod tests {
    use fastnum::{UD128, udec128, udec256};

    use super::*;

    #[test]
    fn test_proportion_whole_passes_through() {
        let p = Proportion::new(U256::from(5), U256::from(5)).unwrap();
        assert!(p.is_whole());
        assert_eq!(p.scale(U256::MAX), Some(U256::MAX));
    }

    #[test]
    fn test_proportion_rounds_down() {
        let p = Proportion::new(U256::from(1), U256::from(3)).unwrap();
        assert_eq!(p.scale(U256::from(10)), Some(U256::from(3)));
        assert_eq!(p.scale(U256::from(2)), Some(U256::ZERO));

        let half = Proportion::new(U256::from(1), U256::from(2)).unwrap();
        assert_eq!(half.scale(U256::from(7)), Some(U256::from(3)));
        assert_eq!(half.scale(U256::from(8)), Some(U256::from(4)));
    }

    #[test]
    fn test_proportion_overflow() {
        let p = Proportion::new(U256::from(2), U256::from(3)).unwrap();
        assert_eq!(p.scale(U256::MAX), None);
        assert_eq!(
            p.scale(U256::MAX / U256::from(2)),
            Some(U256::MAX / U256::from(3) - U256::from(1))
        );
    }

    #[test]
    fn test_proportion_zero_denominator() {
        assert_eq!(Proportion::new(U256::from(1), U256::ZERO), None);
    }

    #[test]
    fn test_converter_unit() {
        assert_eq!(Converter::new(0).unit(), Some(U256::from(1)));
        assert_eq!(Converter::new(6).unit(), Some(U256::from(1_000_000)));
        assert_eq!(
            Converter::new(18).unit(),
            Some(U256::from(1_000_000_000_000_000_000u64))
        );
        assert!(Converter::new(77).unit().is_some());
        assert_eq!(Converter::new(78).unit(), None);
        assert_eq!(Converter::new(u8::MAX).unit(), None);
    }

    #[test]
    fn test_converter_from_unsigned() {
        assert_eq!(
            Converter::new(0).from_unsigned(U256::from(1234567890)),
            udec256!(1234567890)
        );
        assert_eq!(
            Converter::new(18).from_unsigned(U256::from(50_000_000_000_000_000u64)),
            udec256!(0.05)
        );
    }

    #[test]
    fn test_converter_to_unsigned() {
        assert_eq!(
            Converter::new(18).to_unsigned(udec128!(0.05)),
            Some(U256::from(50_000_000_000_000_000u64))
        );
        assert_eq!(
            Converter::new(6).to_unsigned(udec128!(1234.56789)),
            Some(U256::from(1234567890))
        );
    }

    #[test]
    fn test_converter_to_unsigned_out_of_range() {
        // 1e39 base units do not fit into 128 bits
        assert_eq!(
            Converter::new(18).to_unsigned(udec128!(1000000000000000000000)),
            None
        );
        assert_eq!(
            Converter::new(18).to_unsigned(udec256!(1000000000000000000000)),
            Some(U256::from(10u8).pow(U256::from(39)))
        );
        assert_eq!(Converter::new(1).to_unsigned(UD128::MAX), None);
        // 1e78 is past U256::MAX
        assert_eq!(
            Converter::new(60).to_unsigned(udec256!(1000000000000000000)),
            None
        );
    }

    #[test]
    fn test_converter_to_unsigned_inexact() {
        assert_eq!(Converter::new(6).to_unsigned(udec128!(1.2345678)), None);
        assert_eq!(Converter::new(0).to_unsigned(udec128!(0.5)), None);
    }
}
