extern crate std;

use core::{future::poll_fn, task::Poll};
use embedded_io_async::{ErrorKind, ErrorType, Read, Write};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

#[derive(Default)]
struct Line {
    bytes: VecDeque<u8>,
    closed: bool,
    fail_next: bool,
}

/// One end of an in-memory serial cable. Reads wait (by returning `Pending`) until the other
/// end writes something.
#[derive(Clone)]
pub struct SerialPort {
    rx: Rc<RefCell<Line>>,
    tx: Rc<RefCell<Line>>,
    /// Everything this end has written.
    sent: Rc<RefCell<Vec<u8>>>,
}

impl SerialPort {
    /// Two ends connected to each other.
    pub fn pair() -> (SerialPort, SerialPort) {
        let a = Rc::new(RefCell::new(Line::default()));
        let b = Rc::new(RefCell::new(Line::default()));
        (
            SerialPort {
                rx: a.clone(),
                tx: b.clone(),
                sent: Default::default(),
            },
            SerialPort {
                rx: b,
                tx: a,
                sent: Default::default(),
            },
        )
    }

    /// A port whose other end is only driven by the test.
    pub fn loose() -> SerialPort {
        Self::pair().0
    }

    /// Queue bytes as if the other end had sent them.
    pub fn inject(&self, bytes: &[u8]) {
        self.rx.borrow_mut().bytes.extend(bytes.iter().copied());
    }

    /// The other end hangs up; reads return end-of-file once the queue is empty.
    pub fn close_input(&self) {
        self.rx.borrow_mut().closed = true;
    }

    /// Forget anything queued for this end.
    pub fn clear_input(&self) {
        self.rx.borrow_mut().bytes.clear();
    }

    pub fn fail_next_read(&self) {
        self.rx.borrow_mut().fail_next = true;
    }

    pub fn take_sent(&self) -> Vec<u8> {
        core::mem::take(&mut *self.sent.borrow_mut())
    }

    pub fn pending_input(&self) -> usize {
        self.rx.borrow().bytes.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SerialError;
impl embedded_io_async::Error for SerialError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl ErrorType for SerialPort {
    type Error = SerialError;
}

impl Read for SerialPort {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        poll_fn(|cx| {
            let mut line = self.rx.borrow_mut();
            if line.fail_next {
                line.fail_next = false;
                return Poll::Ready(Err(SerialError));
            }
            if buf.is_empty() {
                return Poll::Ready(Ok(0));
            }
            if line.bytes.is_empty() {
                if line.closed {
                    return Poll::Ready(Ok(0));
                }
                cx.waker().wake_by_ref();
                return Poll::Pending;
            }
            let mut n = 0;
            while n < buf.len() {
                match line.bytes.pop_front() {
                    Some(b) => {
                        buf[n] = b;
                        n += 1;
                    }
                    None => break,
                }
            }
            Poll::Ready(Ok(n))
        })
        .await
    }
}

impl Write for SerialPort {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.tx.borrow_mut().bytes.extend(buf.iter().copied());
        self.sent.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }
}
