extern crate std;

use embassy_futures::block_on;
use std::vec::Vec;

use super::*;

use crate::switch_test_stub::{KeyMatrix, Pin};
use crate::time_driver_test_stub::set_time;

macro_rules! setup {
    ($km:ident, $sampler:ident: $settle_us:literal $b:block) => {
        block_on(async move {
            let senses = [Pin::new(11), Pin::new(12), Pin::new(13)];
            let selects = [Pin::new(16), Pin::new(17), Pin::new(18), Pin::new(19)];
            let $km = KeyMatrix::new(Vec::from(&senses), Vec::from(&selects));

            #[allow(unused_mut)]
            let mut $sampler =
                MatrixSampler::new(senses, selects, Duration::from_micros($settle_us));

            $b
        })
    };
}

#[test]
fn starts_with_all_selectors_low() {
    setup!(km, sampler: 0 {
        assert_eq!(km.active_selects(), 0);
        assert!(sampler.select_pins().iter().all(|p| p.get_state() == Some(false)));
    });
}

#[test]
fn empty_matrix() {
    setup!(km, sampler: 0 {
        assert_eq!(sampler.sample().await, Snapshot::EMPTY);
        assert_eq!(km.active_selects(), 1);
    });
}

#[test]
fn bit_order() {
    setup!(km, sampler: 0 {
        // first intersection sampled lands in the highest bit
        km.down(0, 0);
        assert_eq!(sampler.sample().await, Snapshot(1 << 11));

        km.up(0, 0);
        km.down(2, 3);
        assert_eq!(sampler.sample().await, Snapshot(1));

        km.down(1, 1);
        assert_eq!(sampler.sample().await, Snapshot(0b000_010_000_001));
    });
}

#[test]
fn one_selector_active_between_samples() {
    setup!(km, sampler: 0 {
        km.down(1, 2);
        for _ in 0..3 {
            let snap = sampler.sample().await;
            assert_eq!(snap.closed_count(), 1);
            assert_eq!(km.active_selects(), 1);
            assert_eq!(sampler.select_pins()[3].get_state(), Some(true));
        }
        // one drive per selector per scan
        assert_eq!(km.drives(), 12);
    });
}

#[test]
fn settle_wait() {
    setup!(km, sampler: 50 {
        set_time(1000);
        km.down(2, 1);
        let start = embassy_time::Instant::now();
        let snap = sampler.sample().await;
        assert_eq!(snap, Snapshot(1 << 6));
        assert_eq!(embassy_time::Instant::now().duration_since(start).as_micros(), 200);
    });
}

#[test]
fn wire_bytes() {
    let snap = Snapshot(0x12_3456_789a);
    assert_eq!(snap.to_le_bytes(), [0x9a, 0x78, 0x56, 0x34, 0x12]);
    assert_eq!(Snapshot::from_le_bytes([0x9a, 0x78, 0x56, 0x34, 0x12]), snap);
    // bits above the wire width are not sent
    assert_eq!(Snapshot(1 << 40).to_le_bytes(), [0; 5]);
}
