use super::ctx::FrameCtx;

/// Returned from [`App::on_frame`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// What the runtime drives once per frame.
///
/// Input arrives already translated in [`FrameCtx::input`] and
/// [`FrameCtx::input_frame`]; there is no per-event hook. An app that cannot
/// continue records the cause with [`RuntimeCtx::fail`](crate::window::RuntimeCtx::fail)
/// and returns [`AppControl::Exit`].
pub trait App {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
