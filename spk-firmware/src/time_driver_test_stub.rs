//! Host clock for `embassy-time`.
//!
//! Real wall-clock time until [`set_time`] is called on the thread; from then on time is virtual
//! and a timer wait jumps the clock straight to its deadline (plus any [`set_wait_lag`]).

extern crate std;

use core::{cell::RefCell, task::Waker};
use embassy_time_driver::Driver;
use std::time::SystemTime;

struct TestTimeDriver;

#[derive(Default, Clone, Copy)]
struct Clock {
    now: u64,
    lag: u64,
}

impl Driver for TestTimeDriver {
    fn now(&self) -> u64 {
        CLOCK.with_borrow(|clock| {
            if clock.now == 0 {
                SystemTime::now()
                    .duration_since(SystemTime::UNIX_EPOCH)
                    .unwrap()
                    .as_micros() as u64
            } else {
                clock.now
            }
        })
    }

    fn schedule_wake(&self, at: u64, waker: &Waker) {
        CLOCK.with_borrow_mut(|clock| {
            if clock.now != 0 && at > clock.now {
                clock.now = at + clock.lag;
            }
        });

        waker.wake_by_ref();
    }
}

std::thread_local! {
    static CLOCK: RefCell<Clock> = const { RefCell::new(Clock { now: 0, lag: 0 }) };
}

embassy_time_driver::time_driver_impl!(static TIME_DRIVER: TestTimeDriver = TestTimeDriver);

/// Switch this thread to virtual time starting at `t` microseconds.
pub fn set_time(t: u64) {
    CLOCK.with_borrow_mut(|clock| clock.now = t);
}

/// Extra microseconds added every time a timer fires.
pub fn set_wait_lag(t: u64) {
    CLOCK.with_borrow_mut(|clock| clock.lag = t);
}

/// Move virtual time forward without a timer.
pub fn advance(us: u64) {
    CLOCK.with_borrow_mut(|clock| {
        if clock.now != 0 {
            clock.now += us;
        }
    });
}
