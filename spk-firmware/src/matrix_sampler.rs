use embassy_time::{Duration, Timer};
use embedded_hal::digital::{InputPin, OutputPin};
use spk_common::globals::SNAPSHOT_BYTES;

/// One scan of one half: a bit per (selector, sense) intersection, first sampled in the highest
/// used bit and last sampled in bit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot(pub u64);
impl Snapshot {
    pub const EMPTY: Snapshot = Snapshot(0);

    pub fn to_le_bytes(self) -> [u8; SNAPSHOT_BYTES] {
        let mut bytes = [0; SNAPSHOT_BYTES];
        bytes.copy_from_slice(&self.0.to_le_bytes()[..SNAPSHOT_BYTES]);
        bytes
    }

    pub fn from_le_bytes(bytes: [u8; SNAPSHOT_BYTES]) -> Self {
        let mut wide = [0; 8];
        wide[..SNAPSHOT_BYTES].copy_from_slice(&bytes);
        Self(u64::from_le_bytes(wide))
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn closed_count(&self) -> u32 {
        self.0.count_ones()
    }
}

/// Scans a selector/sense switch matrix, one selector line driven high at a time.
pub struct MatrixSampler<I: InputPin, O: OutputPin, const SENSE_N: usize, const SELECT_N: usize> {
    sense_pins: [I; SENSE_N],
    select_pins: [O; SELECT_N],

    /// Wait between driving a selector and reading the sense lines. Zero reads straight away.
    settle: Duration,
}

impl<I: InputPin, O: OutputPin, const SENSE_N: usize, const SELECT_N: usize>
    MatrixSampler<I, O, SENSE_N, SELECT_N>
{
    const FITS: () = assert!(
        SENSE_N * SELECT_N <= SNAPSHOT_BYTES * 8,
        "matrix does not fit in a snapshot"
    );

    /// All selector lines start inactive.
    pub fn new(sense_pins: [I; SENSE_N], mut select_pins: [O; SELECT_N], settle: Duration) -> Self {
        #[allow(clippy::let_unit_value)]
        let _ = Self::FITS;
        for out in select_pins.iter_mut() {
            let _ = out.set_low();
        }
        Self {
            sense_pins,
            select_pins,
            settle,
        }
    }

    /// Scan the whole matrix.
    ///
    /// Only the previously driven selector is released before the next one is driven, so the
    /// last selector stays high between calls.
    pub async fn sample(&mut self) -> Snapshot {
        let mut bits = 0u64;
        for idx in 0..SELECT_N {
            let prev = if idx == 0 { SELECT_N - 1 } else { idx - 1 };
            let _ = self.select_pins[prev].set_low();
            let _ = self.select_pins[idx].set_high();

            if self.settle.as_ticks() != 0 {
                Timer::after(self.settle).await;
            }

            for ip in self.sense_pins.iter_mut() {
                let closed = ip.is_high().unwrap_or(false);
                bits = (bits << 1) | closed as u64;
            }
        }
        Snapshot(bits)
    }

    #[cfg(test)]
    pub(crate) fn select_pins(&mut self) -> &mut [O; SELECT_N] {
        &mut self.select_pins
    }
}

#[cfg(test)]
#[path = "matrix_sampler_test.rs"]
mod test;
