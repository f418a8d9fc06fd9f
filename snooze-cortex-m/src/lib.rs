#![no_std]

mod sleep;

pub use self::sleep::{deepsleep, sleep, Wfi};
