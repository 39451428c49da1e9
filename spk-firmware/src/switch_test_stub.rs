extern crate alloc;
extern crate std;

use alloc::vec;
use embedded_hal::digital::{Error, ErrorType, InputPin, OutputPin};
use std::rc::Rc;
use std::sync::Mutex;
use std::vec::Vec;

pub trait Observer {
    fn update(&self, pin: Pin);
}

#[derive(Debug)]
struct KeyMatrixInner {
    switches: Vec<bool>,
    senses: Vec<Pin>,
    selects: Vec<Pin>,
    /// Count of selector writes that drove a line high.
    drives: usize,
}

/// A pull-down switch matrix: a sense pin reads high while a closed switch connects it to a
/// selector that is driven high.
#[derive(Clone)]
pub struct KeyMatrix {
    inner: Rc<Mutex<KeyMatrixInner>>,
}
impl KeyMatrix {
    pub fn new(senses: Vec<Pin>, selects: Vec<Pin>) -> Self {
        let me = Self {
            inner: Rc::new(Mutex::new(KeyMatrixInner {
                switches: vec![false; senses.len() * selects.len()],
                senses,
                selects,
                drives: 0,
            })),
        };

        for o in me.inner().selects.iter() {
            o.add_observer(Rc::new(me.clone()))
        }

        me
    }

    pub fn down(&self, sense: usize, select: usize) {
        self.set_switch(sense, select, true);
    }

    pub fn up(&self, sense: usize, select: usize) {
        self.set_switch(sense, select, false);
    }

    pub fn set_switch(&self, sense: usize, select: usize, is_down: bool) {
        {
            let mut inner = self.inner();
            let idx = sense * inner.selects.len() + select;
            inner.switches[idx] = is_down;
        }
        self.refresh();
    }

    /// Number of selector lines currently driven high.
    pub fn active_selects(&self) -> usize {
        self.inner()
            .selects
            .iter()
            .filter(|p| p.get_state() == Some(true))
            .count()
    }

    pub fn drives(&self) -> usize {
        self.inner().drives
    }

    fn refresh(&self) {
        let inner = self.inner();
        let n_selects = inner.selects.len();
        for (sense, p) in inner.senses.iter().enumerate() {
            let closed = inner.selects.iter().enumerate().any(|(select, o)| {
                o.get_state() == Some(true) && inner.switches[sense * n_selects + select]
            });
            p.force(closed);
        }
    }

    fn inner(&self) -> std::sync::MutexGuard<'_, KeyMatrixInner> {
        self.inner.lock().unwrap()
    }
}
impl Observer for KeyMatrix {
    fn update(&self, pin: Pin) {
        if pin.get_state() == Some(true) {
            self.inner().drives += 1;
        }
        self.refresh();
    }
}

#[derive(Debug)]
pub struct TestError;

#[derive(Clone)]
pub struct Pin(Rc<PinShared>);
impl core::fmt::Debug for Pin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.get_state();

        f.debug_struct("Pin")
            .field("n", &self.0.n)
            .field("state", &state)
            .finish()
    }
}
impl Pin {
    pub fn new(n: u8) -> Self {
        Self(Rc::new(PinShared {
            n,
            observer: Mutex::new(None),
            is_high: Mutex::new(None),
        }))
    }

    pub fn num(&self) -> u8 {
        self.0.n
    }

    /// `None` until the pin has been driven or sensed.
    pub fn get_state(&self) -> Option<bool> {
        *self.0.is_high.lock().unwrap()
    }

    fn force(&self, is_high: bool) {
        *self.0.is_high.lock().unwrap() = Some(is_high);
    }

    fn add_observer(&self, observer: Rc<dyn Observer>) {
        *self.0.observer.lock().unwrap() = Some(observer);
    }

    fn drive(&mut self, is_high: bool) {
        if self.get_state() != Some(is_high) {
            self.force(is_high);
            let observer = self.0.observer.lock().unwrap().clone();
            if let Some(o) = observer {
                o.update(self.clone());
            }
        }
    }
}

struct PinShared {
    n: u8,
    observer: Mutex<Option<Rc<dyn Observer>>>,
    is_high: Mutex<Option<bool>>,
}

impl Error for TestError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl ErrorType for Pin {
    type Error = TestError;
}

impl InputPin for Pin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(matches!(self.get_state(), Some(true)))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!matches!(self.get_state(), Some(true)))
    }
}

impl OutputPin for Pin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}
