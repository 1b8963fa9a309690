//! Enumeration of legal block-start indices per machine.

use std::collections::HashMap;

use crate::productivity::{Envelope, Envelopes};

/// `V[m]`, the ordered set of legal swap-block start indices for machine `m`.
pub type SwapSites = Vec<usize>;

/// `machine id -> V[m]` for every machine.
pub type SwapSiteSets = HashMap<u32, SwapSites>;

/// Derives `V[m]` for every machine's envelope, honoring `min_swap_hours`.
pub fn build_swap_sites(envelopes: &Envelopes, min_swap_hours: usize) -> SwapSiteSets {
    envelopes
        .iter()
        .map(|(&id, envelope)| (id, build_one(envelope, min_swap_hours)))
        .collect()
}

/// Scans `envelope` left to right, starting a new block wherever a not-yet-consumed hour
/// is productive, then marking the following `min_swap_hours` hours as consumed.
fn build_one(envelope: &Envelope, min_swap_hours: usize) -> SwapSites {
    let mut sites = Vec::new();
    let mut next_allowed = 0usize;
    for (i, &productivity) in envelope.iter().enumerate() {
        if i < next_allowed {
            continue;
        }
        if productivity > 0.0 {
            sites.push(i);
            next_allowed = i + min_swap_hours;
        }
    }
    sites
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[test]
    fn sites_are_strictly_increasing_with_minimum_gap() {
        let envelope: Envelope = vec![1.0; 100];
        let sites = build_one(&envelope, 8);
        for w in sites.windows(2) {
            assert!(w[1] - w[0] >= 8);
        }
    }

    #[rstest]
    #[case::one(1)]
    #[case::four(4)]
    #[case::eight(8)]
    #[case::whole_envelope(100)]
    fn gap_between_consecutive_sites_is_always_at_least_min_swap_hours(#[case] min_swap_hours: usize) {
        let envelope: Envelope = vec![1.0; 100];
        let sites = build_one(&envelope, min_swap_hours);
        for w in sites.windows(2) {
            assert!(w[1] - w[0] >= min_swap_hours);
        }
    }

    #[test]
    fn every_site_is_productive() {
        let mut envelope: Envelope = vec![0.0; 50];
        for i in 10..20 {
            envelope[i] = 1.0;
        }
        let sites = build_one(&envelope, 3);
        for &s in &sites {
            assert!(envelope[s] > 0.0);
        }
    }

    #[test]
    fn all_zero_envelope_has_no_sites() {
        let envelope: Envelope = vec![0.0; 50];
        assert!(build_one(&envelope, 8).is_empty());
    }

    #[test]
    fn idle_gaps_are_skipped_without_wasting_a_start() {
        // productive 0..5, idle 5..10, productive 10..20
        let mut envelope: Envelope = vec![0.0; 20];
        for i in 0..5 {
            envelope[i] = 1.0;
        }
        for i in 10..20 {
            envelope[i] = 1.0;
        }
        let sites = build_one(&envelope, 4);
        // first block starts at 0, consumes [0,4); next scan hits 4 (productive) -> site 4
        assert!(sites.contains(&0));
        assert!(!sites.iter().any(|&s| (5..10).contains(&s)));
    }
}
