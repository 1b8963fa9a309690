//! Per-machine productivity envelopes.

use std::collections::HashMap;

use crate::{
    horizon::{ENVELOPE_LEN, WEEK_HOURS},
    machine::Machine,
};

/// `E[m]`, the maximum units machine `m` could produce per hour, length [`ENVELOPE_LEN`].
pub type Envelope = Vec<f64>;

/// `machine id -> E[m]` for every machine.
pub type Envelopes = HashMap<u32, Envelope>;

/// Tiles each machine's weekly shift mask across the horizon and scales by its ideal run
/// rate, yielding the hourly productivity envelope.
pub fn build_envelopes(machines: &[Machine]) -> Envelopes {
    machines
        .iter()
        .map(|m| (m.id, build_one(m)))
        .collect()
}

fn build_one(machine: &Machine) -> Envelope {
    (0..ENVELOPE_LEN)
        .map(|t| machine.shift_mask.0[t % WEEK_HOURS] * machine.ideal_run_rate)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::machine::ShiftMask;

    #[test]
    fn envelope_is_zero_exactly_at_idle_hours() {
        let machine = Machine::new(1, 100.0, ShiftMask::all_zero());
        let envelope = build_one(&machine);
        assert_eq!(envelope.len(), ENVELOPE_LEN);
        assert!(envelope.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn envelope_tiles_the_weekly_mask() {
        let mut mask = ShiftMask::all_zero();
        mask.0[6] = 1.0;
        let machine = Machine::new(1, 50.0, mask);
        let envelope = build_one(&machine);
        assert_eq!(envelope[6], 50.0);
        assert_eq!(envelope[6 + WEEK_HOURS], 50.0);
        assert_eq!(envelope[5], 0.0);
    }
}
