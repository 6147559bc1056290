//! LED logic — brightness, blink timing, shared-LED arbitration, and the
//! ordered write sequences that push a result to the hardware.

mod arbiter;
mod blink;
mod color;
mod ops;

pub use arbiter::{Arbiter, normalize};
pub use blink::BlinkParams;
pub use color::{brightness, format_color, parse_color};
pub use ops::{LedFrame, write_brightness, write_shared_led};
