//! Translation between declared bit selects and canonical 0-based indices.

use proptest::prelude::*;
use weft_netlist::{Design, ScopeKind, SignalKind};

fn vector(msb: i64, lsb: i64) -> (Design, weft_netlist::NodeId) {
    let mut d = Design::new();
    let top = d.new_scope(None, "top", ScopeKind::Module);
    let v = d.new_vector_signal(top, "v", SignalKind::Wire, msb, lsb);
    (d, v)
}

/// Bounds in either order plus a bit select inside them.
fn bounds_and_select() -> impl Strategy<Value = (i64, i64, i64)> {
    (-64i64..64, -64i64..64).prop_flat_map(|(msb, lsb)| {
        let (lo, hi) = (msb.min(lsb), msb.max(lsb));
        (Just(msb), Just(lsb), lo..=hi)
    })
}

proptest! {
    #[test]
    fn index_round_trips_to_select((msb, lsb, sb) in bounds_and_select()) {
        let (d, v) = vector(msb, lsb);
        let sig = d.signal(v);
        let idx = sig.sb_to_idx(sb);
        prop_assert!(idx >= 0 && idx < i64::from(sig.vector_width()));
        prop_assert_eq!(sig.idx_to_sb(idx), sb);
    }

    #[test]
    fn lsb_is_index_zero(msb in -64i64..64, lsb in -64i64..64) {
        let (d, v) = vector(msb, lsb);
        let sig = d.signal(v);
        prop_assert_eq!(sig.sb_to_idx(lsb), 0);
        prop_assert_eq!(sig.idx_to_sb(i64::from(sig.vector_width()) - 1), msb);
    }

    #[test]
    fn validity_matches_index_range(msb in -16i64..16, lsb in -16i64..16, sb in -40i64..40) {
        let (d, v) = vector(msb, lsb);
        let sig = d.signal(v);
        let idx = sig.sb_to_idx(sb);
        prop_assert_eq!(sig.sb_is_valid(sb), idx >= 0 && idx < i64::from(sig.vector_width()));
    }
}
