use std::time::Duration;

use tandem_shared::ViewId;

/// A consumer of game state updated every tick before the actors, such as a
/// player view or an AI controller. Each view asks the render context for a
/// renderer of its `view_type`.
pub trait GameView {
    fn view_type(&self) -> &str;

    fn on_attach(&mut self, _view_id: ViewId) {}

    /// The render context created (or failed to create) this view's renderer
    fn on_renderer_ready(&mut self, _success: bool) {}

    fn on_update(&mut self, time: Duration, delta: Duration);

    fn on_detach(&mut self) {}
}
