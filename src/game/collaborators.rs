use crate::model::Tile;

/// Rendering collaborator. Each call returns once playback has completed;
/// the engine proceeds only after the animation settles, so consecutive
/// cascade steps never overlap visually.
pub trait BoardAnimator {
    /// Two tiles slide past each other (also used for the revert).
    fn play_swap(&mut self, a: &Tile, b: &Tile);
    /// Matched tiles shrink away.
    fn play_deflate(&mut self, tiles: &[Tile]);
    /// Refilled tiles pop back in.
    fn play_inflate(&mut self, tiles: &[Tile]);
}

/// Audio collaborator; fire-and-forget.
pub trait AudioPlayer {
    fn play_match_sound(&mut self);
}

/// No-op animator for headless runs and tests.
#[derive(Debug, Default)]
pub struct NullAnimator;

impl BoardAnimator for NullAnimator {
    fn play_swap(&mut self, _a: &Tile, _b: &Tile) {}
    fn play_deflate(&mut self, _tiles: &[Tile]) {}
    fn play_inflate(&mut self, _tiles: &[Tile]) {}
}

/// No-op audio sink.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioPlayer for NullAudio {
    fn play_match_sound(&mut self) {}
}
