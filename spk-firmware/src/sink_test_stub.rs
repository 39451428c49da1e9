extern crate std;

use embassy_time::Instant;
use std::vec::Vec;

use crate::key_reporter::{KeySink, PointerSink};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Press(Vec<u8>),
    Release(Vec<u8>),
    Move(i8, i8, i8),
    PressButtons(u8),
    ReleaseButtons(u8),
}

/// Records everything sent to it along with when it arrived.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<(Instant, SinkEvent)>,
}

impl RecordingSink {
    pub fn take(&mut self) -> Vec<SinkEvent> {
        core::mem::take(&mut self.events)
            .into_iter()
            .map(|(_, e)| e)
            .collect()
    }

    fn push(&mut self, event: SinkEvent) {
        self.events.push((Instant::now(), event));
    }
}

impl KeySink for RecordingSink {
    async fn press(&mut self, keys: &[u8]) {
        self.push(SinkEvent::Press(Vec::from(keys)));
    }

    async fn release(&mut self, keys: &[u8]) {
        self.push(SinkEvent::Release(Vec::from(keys)));
    }
}

impl PointerSink for RecordingSink {
    async fn move_by(&mut self, dx: i8, dy: i8, wheel: i8) {
        self.push(SinkEvent::Move(dx, dy, wheel));
    }

    async fn press_buttons(&mut self, buttons: u8) {
        self.push(SinkEvent::PressButtons(buttons));
    }

    async fn release_buttons(&mut self, buttons: u8) {
        self.push(SinkEvent::ReleaseButtons(buttons));
    }
}
