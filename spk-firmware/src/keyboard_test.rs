extern crate std;

use embassy_futures::{block_on, join::join};
use embassy_time::Duration;
use std::vec;
use std::vec::Vec;

use super::*;
use crate::fuser::Side;
use crate::kc;
use crate::layout::{COLS, DEFAULT, ROWS, SPLIT_COL};
use crate::link::LinkConfig;
use crate::serial_test_stub::SerialPort;
use crate::sink_test_stub::{RecordingSink, SinkEvent};
use crate::switch_test_stub::{KeyMatrix, Pin};
use crate::time_driver_test_stub::set_time;

struct Half {
    km: KeyMatrix,
    led: Pin,
    kb: Keyboard<Pin, Pin, SerialPort, Pin, 5, 8, ROWS, COLS>,
    out: RecordingSink,
}

impl Half {
    fn new(role: Role, side: Side, port: SerialPort) -> Self {
        let senses: [Pin; 5] = core::array::from_fn(|i| Pin::new(11 + i as u8));
        let selects: [Pin; 8] = core::array::from_fn(|i| Pin::new(16 + i as u8));
        let km = KeyMatrix::new(Vec::from(&senses), Vec::from(&selects));
        let led = Pin::new(25);

        let kb = Keyboard::new(
            MatrixSampler::new(senses, selects, Duration::from_ticks(0)),
            Link::new(role, port, LinkConfig::default()),
            Fuser::new(SPLIT_COL, side),
            KeyStateEngine::with_default_settle(DEFAULT),
            MouseEmulator::default(),
            led.clone(),
        );
        Self {
            km,
            led,
            kb,
            out: RecordingSink::default(),
        }
    }

    async fn cycle(&mut self) {
        self.kb.cycle(&mut self.out).await;
    }
}

fn pair() -> (Half, Half) {
    let (a, b) = SerialPort::pair();
    (
        Half::new(Role::Host, Side::Left, a),
        Half::new(Role::Peer, Side::Right, b),
    )
}

#[test]
fn local_key() {
    set_time(1000);
    let (mut host, mut peer) = pair();
    assert_eq!(host.kb.role(), Role::Host);
    assert_eq!(peer.kb.role(), Role::Peer);

    host.km.down(0, 1);
    block_on(async {
        join(host.cycle(), peer.cycle()).await;
        join(host.cycle(), peer.cycle()).await;
    });

    assert_eq!(host.out.take(), vec![SinkEvent::Press(vec![kc!("1")])]);
    assert!(peer.out.take().is_empty());
    assert_eq!(peer.kb.link().stats().served, 2);
}

#[test]
fn function_key_on_the_peer() {
    set_time(1000);
    let (mut host, mut peer) = pair();

    host.km.down(0, 0);
    peer.km.down(3, 7);
    block_on(async {
        join(host.cycle(), peer.cycle()).await;
    });
    assert_eq!(host.out.take(), vec![SinkEvent::Press(vec![kc!("pound")])]);

    peer.km.up(3, 7);
    block_on(async {
        join(host.cycle(), peer.cycle()).await;
    });
    assert_eq!(
        host.out.take(),
        vec![
            SinkEvent::Press(vec![kc!("esc")]),
            SinkEvent::Release(vec![kc!("pound")]),
        ]
    );
}

#[test]
fn mouse_from_the_function_layer() {
    set_time(1000);
    let (mut host, mut peer) = pair();

    peer.km.down(3, 7);
    host.km.down(1, 3);
    host.km.down(4, 4);
    block_on(async {
        join(host.cycle(), peer.cycle()).await;
        join(host.cycle(), peer.cycle()).await;
    });
    assert_eq!(
        host.out.take(),
        vec![
            SinkEvent::PressButtons(2),
            SinkEvent::Move(0, -3, 0),
            SinkEvent::Move(0, -3, 0),
        ]
    );
}

#[test]
fn silent_peer() {
    set_time(1000);
    let mut host = Half::new(Role::Host, Side::Right, SerialPort::loose());

    // right half: local column 1 is grid column 9
    host.km.down(2, 1);
    block_on(host.cycle());
    assert_eq!(host.out.take(), vec![SinkEvent::Press(vec![kc!("j")])]);

    if let Link::Requester(r) = host.kb.link() {
        assert_eq!(r.stats().misses, 1);
    } else {
        panic!("expected requester");
    }
}

#[test]
fn heartbeat() {
    set_time(1000);
    let mut peer = Half::new(Role::Peer, Side::Right, SerialPort::loose());
    assert_eq!(peer.led.get_state(), Some(true));

    block_on(async {
        for _ in 0..HEARTBEAT_CYCLES - 1 {
            peer.cycle().await;
        }
        assert_eq!(peer.led.get_state(), Some(true));
        peer.cycle().await;
        assert_eq!(peer.led.get_state(), Some(false));
        for _ in 0..HEARTBEAT_CYCLES {
            peer.cycle().await;
        }
        assert_eq!(peer.led.get_state(), Some(true));
    });
}
