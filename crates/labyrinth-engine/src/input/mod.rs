//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! `platform::winit` translates window events into `InputEvent`s;
//! [`GestureTracker`] turns those into camera inputs.

mod frame;
mod gesture;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use gesture::GestureTracker;
pub use state::InputState;
pub use types::{
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    MouseWheelDelta,
    PointerButtonEvent,
    PointerMoveEvent,
};
