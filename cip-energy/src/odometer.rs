//! Energy odometers and their segmented wire encoding
//!
//! Each counter is transmitted as five 16-bit digit groups in base 1000,
//! least significant first: Wh, kWh, MWh, GWh, TWh. Only 15 decimal
//! digits are ever significant, so five groups always suffice.

use cip_codec::CipEncoder;
use serde::{Deserialize, Serialize};

/// Number of digit groups in one odometer
pub const ODOMETER_POSITIONS: usize = 5;

/// Inclusive upper bound of every counter, in watt-hours (15 digits)
pub const ODOMETER_MAX_WH: i64 = 999_999_999_999_999;

/// Inclusive lower bound of the net-total counter, in watt-hours
pub const ODOMETER_MIN_WH: i64 = -999_999_999_999_999;

/// Bound-crossing correction applied after each accumulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WrapMode {
    /// Subtract the bound exactly once when crossed. A delta crossing
    /// the bound by more than one bound-width leaves the counter still
    /// out of range; this matches the legacy stacks bit for bit.
    #[default]
    SingleStep,
    /// Subtract the bound repeatedly until the counter is in range.
    Modulo,
}

/// Split an unsigned counter into base-1000 digit groups, units first
pub fn unsigned_digit_groups(value: u64) -> [u16; ODOMETER_POSITIONS] {
    let mut groups = [0u16; ODOMETER_POSITIONS];
    let mut rest = value;
    for group in groups.iter_mut() {
        *group = (rest % 1000) as u16;
        rest /= 1000;
    }
    groups
}

/// Split a signed counter into base-1000 digit groups, units first
///
/// Truncating division; each remainder carries the sign of the value,
/// so every transmitted group of a negative total is negative or zero.
pub fn signed_digit_groups(value: i64) -> [i16; ODOMETER_POSITIONS] {
    let mut groups = [0i16; ODOMETER_POSITIONS];
    let mut rest = value;
    for group in groups.iter_mut() {
        *group = (rest % 1000) as i16;
        rest /= 1000;
    }
    groups
}

/// Encode an unsigned odometer as five UINT fields, group 0 first
pub fn encode_unsigned_odometer(value: u64, encoder: &mut CipEncoder) {
    for group in unsigned_digit_groups(value) {
        encoder.encode_u16(group);
    }
}

/// Encode the signed net-total odometer as five INT fields, group 0 first
pub fn encode_signed_odometer(value: i64, encoder: &mut CipEncoder) {
    for group in signed_digit_groups(value) {
        encoder.encode_i16(group);
    }
}

/// The three energy counters of one Base Energy instance
///
/// `total` is the running sum of signed deltas; `consumed` and
/// `produced` collect the positive and negative deltas respectively,
/// sign-normalized to non-negative. All three start at zero and live as
/// long as the owning object instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyOdometers {
    consumed: u64,
    produced: u64,
    total: i64,
    wrap_mode: WrapMode,
}

impl EnergyOdometers {
    /// Create zeroed counters with the single-step wrap rule
    pub fn new() -> Self {
        Self::with_wrap_mode(WrapMode::SingleStep)
    }

    /// Create zeroed counters with an explicit wrap rule
    pub fn with_wrap_mode(wrap_mode: WrapMode) -> Self {
        Self {
            consumed: 0,
            produced: 0,
            total: 0,
            wrap_mode,
        }
    }

    /// Consumed energy in watt-hours
    pub fn consumed_wh(&self) -> u64 {
        self.consumed
    }

    /// Produced energy in watt-hours
    pub fn produced_wh(&self) -> u64 {
        self.produced
    }

    /// Net total energy in watt-hours
    pub fn total_wh(&self) -> i64 {
        self.total
    }

    /// Apply one measured energy delta
    ///
    /// A non-negative delta is net consumption and feeds `consumed` and
    /// `total`; a negative delta is net production and feeds `produced`
    /// (by its magnitude) and `total`. The configured wrap rule is then
    /// applied to each counter independently.
    pub fn accumulate(&mut self, delta_wh: i64) {
        if delta_wh >= 0 {
            self.consumed = self.consumed.saturating_add(delta_wh as u64);
            self.total = self.total.saturating_add(delta_wh);
        } else {
            self.produced = self.produced.saturating_add(delta_wh.unsigned_abs());
            self.total = self.total.saturating_add(delta_wh);
        }
        self.wrap();
    }

    /// Reset all three counters to zero
    pub fn reset(&mut self) {
        self.consumed = 0;
        self.produced = 0;
        self.total = 0;
    }

    fn wrap(&mut self) {
        match self.wrap_mode {
            WrapMode::SingleStep => {
                if self.consumed > ODOMETER_MAX_WH as u64 {
                    self.consumed -= ODOMETER_MAX_WH as u64;
                }
                if self.produced > ODOMETER_MAX_WH as u64 {
                    self.produced -= ODOMETER_MAX_WH as u64;
                }
                if self.total > ODOMETER_MAX_WH {
                    self.total -= ODOMETER_MAX_WH;
                }
                if self.total < ODOMETER_MIN_WH {
                    self.total -= ODOMETER_MIN_WH;
                }
            }
            WrapMode::Modulo => {
                while self.consumed > ODOMETER_MAX_WH as u64 {
                    self.consumed -= ODOMETER_MAX_WH as u64;
                }
                while self.produced > ODOMETER_MAX_WH as u64 {
                    self.produced -= ODOMETER_MAX_WH as u64;
                }
                while self.total > ODOMETER_MAX_WH {
                    self.total -= ODOMETER_MAX_WH;
                }
                while self.total < ODOMETER_MIN_WH {
                    self.total -= ODOMETER_MIN_WH;
                }
            }
        }
    }
}

impl Default for EnergyOdometers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recompose_unsigned(groups: [u16; ODOMETER_POSITIONS]) -> u64 {
        groups
            .iter()
            .rev()
            .fold(0u64, |acc, group| acc * 1000 + *group as u64)
    }

    fn recompose_signed(groups: [i16; ODOMETER_POSITIONS]) -> i64 {
        groups
            .iter()
            .rev()
            .fold(0i64, |acc, group| acc * 1000 + *group as i64)
    }

    #[test]
    fn test_unsigned_groups_round_trip() {
        for value in [0u64, 1, 999, 1000, 1500, 123_456_789_012_345, 999_999_999_999_999] {
            let groups = unsigned_digit_groups(value);
            assert_eq!(recompose_unsigned(groups), value, "value {}", value);
        }
    }

    #[test]
    fn test_unsigned_groups_order() {
        // 1500 Wh = 500 Wh + 1 kWh
        assert_eq!(unsigned_digit_groups(1500), [500, 1, 0, 0, 0]);
        assert_eq!(
            unsigned_digit_groups(999_999_999_999_999),
            [999, 999, 999, 999, 999]
        );
    }

    #[test]
    fn test_signed_groups_round_trip() {
        for value in [
            0i64,
            1,
            -1,
            -999,
            -1_234_567,
            987_654_321_000_123,
            -999_999_999_999_999,
        ] {
            let groups = signed_digit_groups(value);
            assert_eq!(recompose_signed(groups), value, "value {}", value);
        }
    }

    #[test]
    fn test_signed_groups_carry_sign() {
        assert_eq!(signed_digit_groups(-1_234_567), [-567, -234, -1, 0, 0]);
    }

    #[test]
    fn test_encode_wire_order() {
        let mut encoder = cip_codec::CipEncoder::new();
        encode_unsigned_odometer(1500, &mut encoder);
        assert_eq!(
            encoder.into_bytes(),
            vec![0xF4, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_accumulate_splits_by_sign() {
        let mut odometers = EnergyOdometers::new();
        odometers.accumulate(1500);
        odometers.accumulate(-300);
        assert_eq!(odometers.consumed_wh(), 1500);
        assert_eq!(odometers.produced_wh(), 300);
        assert_eq!(odometers.total_wh(), 1200);
    }

    #[test]
    fn test_accumulate_sequential_equals_summed() {
        // holds for same-sign in-bound deltas
        let mut sequential = EnergyOdometers::new();
        sequential.accumulate(700);
        sequential.accumulate(800);

        let mut summed = EnergyOdometers::new();
        summed.accumulate(1500);
        assert_eq!(sequential, summed);

        let mut sequential = EnergyOdometers::new();
        sequential.accumulate(-700);
        sequential.accumulate(-800);

        let mut summed = EnergyOdometers::new();
        summed.accumulate(-1500);
        assert_eq!(sequential, summed);
    }

    #[test]
    fn test_single_step_wrap_constant() {
        let mut odometers = EnergyOdometers::new();
        odometers.accumulate(999_999_999_999_000);
        odometers.accumulate(2000);
        // 999_999_999_999_000 + 2000 - 999_999_999_999_999
        assert_eq!(odometers.total_wh(), 1001);
        assert_eq!(odometers.consumed_wh(), 1001);
    }

    #[test]
    fn test_single_step_wrap_negative_bound() {
        let mut odometers = EnergyOdometers::new();
        odometers.accumulate(-999_999_999_999_000);
        odometers.accumulate(-2000);
        // crossing the lower bound adds its magnitude back once
        assert_eq!(odometers.total_wh(), -1001);
        assert_eq!(odometers.produced_wh(), 1001);
    }

    #[test]
    fn test_single_step_wrap_is_partial_for_huge_deltas() {
        let mut odometers = EnergyOdometers::new();
        odometers.accumulate(3 * ODOMETER_MAX_WH);
        // three bound-widths in, one subtracted: still out of range
        assert_eq!(odometers.total_wh(), 2 * ODOMETER_MAX_WH);
        assert_eq!(odometers.consumed_wh(), 2 * ODOMETER_MAX_WH as u64);
    }

    #[test]
    fn test_modulo_wrap_fully_reduces() {
        let mut odometers = EnergyOdometers::with_wrap_mode(WrapMode::Modulo);
        odometers.accumulate(3 * ODOMETER_MAX_WH + 5);
        assert_eq!(odometers.total_wh(), 5);
        assert_eq!(odometers.consumed_wh(), 5);
    }

    #[test]
    fn test_reset() {
        let mut odometers = EnergyOdometers::new();
        odometers.accumulate(42);
        odometers.accumulate(-7);
        odometers.reset();
        assert_eq!(odometers, EnergyOdometers::new());
    }
}
