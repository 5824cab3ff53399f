//! The popout window: a mirror living on its own thread.
//!
//! The opener gets a `PopoutWindow` handle. It forwards gestures to the popout
//! thread, reads the popout's last rendered state and can only learn that the
//! popout closed by polling `is_closed`.

mod request;
mod window;

pub use request::*;
pub use window::*;
