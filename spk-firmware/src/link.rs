//! The serial link between the two halves.
//!
//! The host-attached half asks for the other half's matrix once per scan cycle by sending
//! [`REQUEST_TOKEN`]; the other half answers with its [`Snapshot`] as [`SNAPSHOT_BYTES`]
//! little-endian bytes. There is no framing beyond that, so both sides resynchronise by
//! discarding bytes that do not fit.

use embassy_time::{with_timeout, Duration};
use embedded_io_async::{Read, Write};
use spk_common::globals::{
    DRAIN_WINDOW_MS, PEER_LOST_AFTER, REPLY_TIMEOUT_MS, REQUEST_TOKEN, REQUEST_WINDOW_MS,
    SNAPSHOT_BYTES,
};

use crate::{debug, info, matrix_sampler::Snapshot, warn};

const TOKEN_LEN: usize = REQUEST_TOKEN.len();
const DRAIN_MAX_READS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    Serial,
    Timeout,
    /// The line went quiet or closed after this many bytes.
    ShortReply(usize),
    BadToken,
}

/// Which end of the link this half is; decided once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    /// Wired to the host; requests the peer's matrix and reports to the host.
    Host,
    /// Answers requests with its own matrix.
    Peer,
}
impl Role {
    pub fn from_host_attached(host_attached: bool) -> Self {
        if host_attached {
            Role::Host
        } else {
            Role::Peer
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkConfig {
    /// How long the host half waits for a complete reply.
    pub reply_timeout: Duration,
    /// How long the peer half waits for a request each cycle.
    pub request_window: Duration,
    /// Quiet time that ends a drain of stale bytes.
    pub drain_window: Duration,
    /// Consecutive failed exchanges before the peer's keys are dropped.
    pub lost_after: u16,
}
impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            reply_timeout: Duration::from_millis(REPLY_TIMEOUT_MS),
            request_window: Duration::from_millis(REQUEST_WINDOW_MS),
            drain_window: Duration::from_millis(DRAIN_WINDOW_MS),
            lost_after: PEER_LOST_AFTER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    pub exchanges: u32,
    pub misses: u32,
    pub served: u32,
}

/// Fill `buf[*filled..]`, keeping `filled` current so a caller that gives up early still knows
/// how much arrived.
async fn read_full<S: Read>(
    serial: &mut S,
    buf: &mut [u8],
    filled: &mut usize,
) -> Result<(), LinkError> {
    while *filled < buf.len() {
        match serial.read(&mut buf[*filled..]).await {
            Ok(0) => return Err(LinkError::ShortReply(*filled)),
            Ok(n) => *filled += n,
            Err(_) => return Err(LinkError::Serial),
        }
    }
    Ok(())
}

pub struct Requester<S: Read + Write> {
    serial: S,
    config: LinkConfig,
    peer: Snapshot,
    misses_in_a_row: u16,
    connected: bool,
    /// Set after a broken exchange; stale reply bytes may still be on the line.
    needs_drain: bool,
    stats: LinkStats,
}

impl<S: Read + Write> Requester<S> {
    pub fn new(serial: S, config: LinkConfig) -> Self {
        Self {
            serial,
            config,
            peer: Snapshot::EMPTY,
            misses_in_a_row: 0,
            connected: false,
            needs_drain: false,
            stats: LinkStats::default(),
        }
    }

    /// Ask the peer for its matrix.
    ///
    /// Returns the fresh snapshot, or the last good one when this exchange failed. Once the peer
    /// has missed [`LinkConfig::lost_after`] exchanges in a row the empty snapshot is returned
    /// until it answers again.
    pub async fn exchange(&mut self) -> Snapshot {
        self.stats.exchanges = self.stats.exchanges.wrapping_add(1);
        match self.try_exchange().await {
            Ok(snapshot) => {
                if !self.connected {
                    info!("peer half connected");
                    self.connected = true;
                }
                self.misses_in_a_row = 0;
                self.peer = snapshot;
            }
            Err(err) => {
                self.stats.misses = self.stats.misses.wrapping_add(1);
                self.needs_drain = true;
                self.misses_in_a_row = self.misses_in_a_row.saturating_add(1);
                debug!("peer exchange failed: {:?}", err);
                if self.connected && self.misses_in_a_row >= self.config.lost_after {
                    warn!(
                        "peer half lost after {} missed exchanges",
                        self.misses_in_a_row
                    );
                    self.connected = false;
                    self.peer = Snapshot::EMPTY;
                }
            }
        }
        self.peer
    }

    async fn try_exchange(&mut self) -> Result<Snapshot, LinkError> {
        if self.needs_drain {
            self.drain().await;
            self.needs_drain = false;
        }

        self.serial
            .write_all(&REQUEST_TOKEN)
            .await
            .map_err(|_| LinkError::Serial)?;
        self.serial.flush().await.map_err(|_| LinkError::Serial)?;

        let mut reply = [0; SNAPSHOT_BYTES];
        let mut filled = 0;
        match with_timeout(
            self.config.reply_timeout,
            read_full(&mut self.serial, &mut reply, &mut filled),
        )
        .await
        {
            Ok(Ok(())) => Ok(Snapshot::from_le_bytes(reply)),
            Ok(Err(err)) => Err(err),
            Err(_) if filled == 0 => Err(LinkError::Timeout),
            Err(_) => Err(LinkError::ShortReply(filled)),
        }
    }

    /// Throw away whatever is on the line until it has been quiet for the drain window.
    async fn drain(&mut self) {
        let mut scratch = [0; 16];
        let mut dropped = 0;
        for _ in 0..DRAIN_MAX_READS {
            match with_timeout(self.config.drain_window, self.serial.read(&mut scratch)).await {
                Ok(Ok(n)) if n > 0 => dropped += n,
                _ => break,
            }
        }
        if dropped != 0 {
            debug!("dropped {} stale link bytes", dropped);
        }
    }

    pub fn peer(&self) -> Snapshot {
        self.peer
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn stats(&self) -> LinkStats {
        self.stats
    }
}

pub struct Responder<S: Read + Write> {
    serial: S,
    config: LinkConfig,
    /// Request bytes carried over from an earlier cycle.
    window: [u8; TOKEN_LEN],
    filled: usize,
    stats: LinkStats,
}

impl<S: Read + Write> Responder<S> {
    pub fn new(serial: S, config: LinkConfig) -> Self {
        Self {
            serial,
            config,
            window: [0; TOKEN_LEN],
            filled: 0,
            stats: LinkStats::default(),
        }
    }

    /// Answer one request with `local` if one arrives within the request window.
    ///
    /// Returns whether the halves synced this cycle. Nothing is written unless exactly the
    /// request token was received.
    pub async fn respond(&mut self, local: Snapshot) -> bool {
        self.stats.exchanges = self.stats.exchanges.wrapping_add(1);
        match self.try_respond(local).await {
            Ok(()) => {
                self.stats.served = self.stats.served.wrapping_add(1);
                true
            }
            Err(LinkError::Timeout) => false,
            Err(err) => {
                self.stats.misses = self.stats.misses.wrapping_add(1);
                debug!("request rejected: {:?}", err);
                false
            }
        }
    }

    async fn try_respond(&mut self, local: Snapshot) -> Result<(), LinkError> {
        match with_timeout(self.config.request_window, self.await_request()).await {
            Ok(result) => result?,
            Err(_) => return Err(LinkError::Timeout),
        }

        self.serial
            .write_all(&local.to_le_bytes())
            .await
            .map_err(|_| LinkError::Serial)?;
        self.serial.flush().await.map_err(|_| LinkError::Serial)
    }

    /// Wait for [`TOKEN_LEN`] bytes and check them against the request token. A partial token
    /// is kept for the next cycle, and so is the tail of a mismatch, so a stream that slipped
    /// by a byte or two lines up again within a few cycles.
    async fn await_request(&mut self) -> Result<(), LinkError> {
        if let Err(err) = read_full(&mut self.serial, &mut self.window, &mut self.filled).await {
            if err == LinkError::Serial {
                self.filled = 0;
            }
            return Err(err);
        }

        if self.window == REQUEST_TOKEN {
            self.filled = 0;
            return Ok(());
        }

        self.window.copy_within(1.., 0);
        self.filled = TOKEN_LEN - 1;
        Err(LinkError::BadToken)
    }

    pub fn stats(&self) -> LinkStats {
        self.stats
    }
}

/// The link as seen from this half.
pub enum Link<S: Read + Write> {
    Requester(Requester<S>),
    Responder(Responder<S>),
}

impl<S: Read + Write> Link<S> {
    pub fn new(role: Role, serial: S, config: LinkConfig) -> Self {
        match role {
            Role::Host => Link::Requester(Requester::new(serial, config)),
            Role::Peer => Link::Responder(Responder::new(serial, config)),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Link::Requester(_) => Role::Host,
            Link::Responder(_) => Role::Peer,
        }
    }

    pub fn stats(&self) -> LinkStats {
        match self {
            Link::Requester(r) => r.stats(),
            Link::Responder(r) => r.stats(),
        }
    }
}

#[cfg(test)]
#[path = "link_test.rs"]
mod test;
