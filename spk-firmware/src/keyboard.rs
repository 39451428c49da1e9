use embedded_hal::digital::{InputPin, OutputPin};
use embedded_io_async::{Read, Write};
use spk_common::globals::HEARTBEAT_CYCLES;

use crate::{
    fuser::Fuser,
    info,
    key_reporter::{KeySink, PointerSink},
    key_state::KeyStateEngine,
    link::{Link, Role},
    matrix_sampler::MatrixSampler,
    mouse::MouseEmulator,
};

/// One half of the keyboard and everything its scan loop owns.
pub struct Keyboard<
    I: InputPin,
    O: OutputPin,
    S: Read + Write,
    L: OutputPin,
    const SENSE_N: usize,
    const SELECT_N: usize,
    const ROWS: usize,
    const COLS: usize,
> {
    sampler: MatrixSampler<I, O, SENSE_N, SELECT_N>,
    link: Link<S>,
    fuser: Fuser<ROWS, COLS>,
    engine: KeyStateEngine<ROWS, COLS>,
    mouse: MouseEmulator,
    led: L,
    led_on: bool,
    cycles: u32,
}

impl<
        I: InputPin,
        O: OutputPin,
        S: Read + Write,
        L: OutputPin,
        const SENSE_N: usize,
        const SELECT_N: usize,
        const ROWS: usize,
        const COLS: usize,
    > Keyboard<I, O, S, L, SENSE_N, SELECT_N, ROWS, COLS>
{
    pub fn new(
        sampler: MatrixSampler<I, O, SENSE_N, SELECT_N>,
        link: Link<S>,
        fuser: Fuser<ROWS, COLS>,
        engine: KeyStateEngine<ROWS, COLS>,
        mouse: MouseEmulator,
        mut led: L,
    ) -> Self {
        let _ = led.set_high();
        Self {
            sampler,
            link,
            fuser,
            engine,
            mouse,
            led,
            led_on: true,
            cycles: 0,
        }
    }

    pub fn role(&self) -> Role {
        self.link.role()
    }

    pub fn link(&self) -> &Link<S> {
        &self.link
    }

    pub fn engine(&self) -> &KeyStateEngine<ROWS, COLS> {
        &self.engine
    }

    /// Scan forever. `host` receives both keyboard and pointer reports.
    pub async fn run(mut self, host: &mut (impl KeySink + PointerSink)) -> ! {
        info!("keyboard running as {:?} ({:?} half)", self.role(), self.fuser.side());
        loop {
            self.cycle(host).await;
        }
    }

    /// One pass: sample, then either fetch the peer's matrix and report, or serve it.
    pub async fn cycle(&mut self, host: &mut (impl KeySink + PointerSink)) {
        let local = self.sampler.sample().await;

        match &mut self.link {
            Link::Requester(requester) => {
                let peer = requester.exchange().await;
                let grid = self.fuser.fuse(local, peer);
                let edges = self.engine.advance(grid);
                self.engine.dispatch(&edges, host).await;

                let update = self.mouse.update(&edges.current);
                self.mouse.report(&update, host).await;
            }
            Link::Responder(responder) => {
                responder.respond(local).await;
            }
        }

        self.heartbeat();
    }

    fn heartbeat(&mut self) {
        self.cycles = self.cycles.wrapping_add(1);
        if self.cycles % HEARTBEAT_CYCLES == 0 {
            self.led_on = !self.led_on;
            let _ = if self.led_on {
                self.led.set_high()
            } else {
                self.led.set_low()
            };
        }
    }
}

#[cfg(test)]
#[path = "keyboard_test.rs"]
mod test;
