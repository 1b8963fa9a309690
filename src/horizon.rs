//! The planning horizon: five production weeks plus a leading and trailing zero-week.

/// Hours in a week, also the length of a tiled shift mask.
pub const WEEK_HOURS: usize = 168;

/// Number of inter-anchor segments: the 5 production weeks plus a trailing zero-target
/// week (the leading zero-target week contributes anchor 0, not an extra segment). There
/// are `ANCHOR_WEEKS + 1` anchors in total and `ANCHOR_WEEKS` segments between them.
pub const ANCHOR_WEEKS: usize = 6;

/// Total number of hourly slots in the horizon: `6 * 168 + 1`.
///
/// Slot 0 is 00:00 on the next Monday. Demand curves `D` and schedules `S` are indexed
/// over the full `0..H`; productivity envelopes `E` are indexed only over `0..H-1` since
/// demand is anchored at the final slot and that slot is never scheduled. Keep this
/// asymmetry in mind when indexing `E` against `D` or `S` in the same loop.
pub const H: usize = ANCHOR_WEEKS * WEEK_HOURS + 1;

/// Length of the productivity envelope, one short of the full horizon.
pub const ENVELOPE_LEN: usize = H - 1;
