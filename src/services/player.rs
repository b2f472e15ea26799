//! Tokio driver for a [`Slideshow`].
//!
//! One task owns the slideshow, the renderer and the surface. Commands and
//! fired timers arrive on channels and are handled one at a time, so the
//! state is never touched concurrently.

use std::time::Duration;

use pixel_grid::Palette;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{broadcast, mpsc};
use tokio::task::{JoinError, JoinHandle};

use crate::rendering::{Frame, GridRenderer, RenderSurface};
use crate::services::slideshow::{Scheduler, Slideshow, TimerHandle, TimerId, TransitionKind};

/// Runs each timer as a sleeping task that posts its id when it fires.
pub struct TokioScheduler {
    fired: mpsc::UnboundedSender<TimerId>,
}

impl TokioScheduler {
    pub fn new(fired: mpsc::UnboundedSender<TimerId>) -> Self {
        Self { fired }
    }
}

/// Aborts the sleeping task on cancel.
pub struct TokioTimer(JoinHandle<()>);

impl TimerHandle for TokioTimer {
    fn cancel(&mut self) {
        self.0.abort();
    }
}

impl Scheduler for TokioScheduler {
    type Handle = TokioTimer;

    fn schedule(&mut self, id: TimerId, delay: Duration) -> TokioTimer {
        let fired = self.fired.clone();
        TokioTimer(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = fired.send(id);
        }))
    }
}

/// Broadcast whenever the slideshow advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideChanged {
    pub index: usize,
}

enum Command {
    Replace {
        frames: Vec<Frame>,
        transition: TransitionKind,
    },
    Resize {
        width: usize,
        height: usize,
    },
    Retheme(Palette),
    Detach,
    Shutdown,
}

/// Handle to a running slideshow task.
pub struct SlideshowPlayer<S> {
    commands: mpsc::UnboundedSender<Command>,
    events: broadcast::Sender<SlideChanged>,
    task: JoinHandle<S>,
}

impl<S: RenderSurface + Send + 'static> SlideshowPlayer<S> {
    /// Start the event loop. Must be called inside a Tokio runtime.
    pub fn spawn(surface: S, palette: Palette, width: usize, height: usize) -> Self {
        Self::spawn_with_rng(surface, palette, width, height, StdRng::from_entropy())
    }

    /// Like [`spawn`](Self::spawn) with a caller-supplied delay generator.
    pub fn spawn_with_rng(
        surface: S,
        palette: Palette,
        width: usize,
        height: usize,
        rng: StdRng,
    ) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(16);
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        let slideshow = Slideshow::with_rng(TokioScheduler::new(fired_tx), rng);

        let state = PlayerState {
            slideshow,
            renderer: GridRenderer::new(),
            surface,
            palette,
            width,
            height,
            events: events.clone(),
        };
        let task = tokio::spawn(state.run(command_rx, fired_rx));

        Self {
            commands,
            events,
            task,
        }
    }

    /// Show a new sequence from its first frame.
    pub fn replace(&self, frames: Vec<Frame>, transition: TransitionKind) {
        self.send(Command::Replace { frames, transition });
    }

    /// Change the target area. Redraws only if the size actually changed.
    pub fn resize(&self, width: usize, height: usize) {
        self.send(Command::Resize { width, height });
    }

    /// Swap the palette. Level frames are recolored without re-decoding.
    pub fn retheme(&self, palette: Palette) {
        self.send(Command::Retheme(palette));
    }

    /// Stop cycling and clear the surface.
    pub fn detach(&self) {
        self.send(Command::Detach);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SlideChanged> {
        self.events.subscribe()
    }

    /// Stop the loop, cancel any pending timer and hand back the surface.
    pub async fn shutdown(self) -> Result<S, JoinError> {
        self.send(Command::Shutdown);
        self.task.await
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            tracing::warn!("Slideshow player is no longer running");
        }
    }
}

struct PlayerState<S> {
    slideshow: Slideshow<TokioScheduler>,
    renderer: GridRenderer,
    surface: S,
    palette: Palette,
    width: usize,
    height: usize,
    events: broadcast::Sender<SlideChanged>,
}

impl<S: RenderSurface> PlayerState<S> {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut fired: mpsc::UnboundedReceiver<TimerId>,
    ) -> S {
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Replace { frames, transition }) => {
                        self.slideshow.attach(frames, transition);
                        self.redraw();
                    }
                    Some(Command::Resize { width, height }) => {
                        if self.surface.size() != (width, height) {
                            self.surface.resize(width, height);
                            self.renderer.invalidate();
                        }
                        self.width = width;
                        self.height = height;
                        self.redraw();
                    }
                    Some(Command::Retheme(palette)) => {
                        self.palette = palette;
                        self.redraw();
                    }
                    Some(Command::Detach) => {
                        self.slideshow.detach();
                        self.redraw();
                    }
                    Some(Command::Shutdown) | None => break,
                },
                Some(id) = fired.recv() => {
                    if let Some(index) = self.slideshow.on_timer(id) {
                        self.redraw();
                        let _ = self.events.send(SlideChanged { index });
                    }
                }
            }
        }

        self.slideshow.detach();
        tracing::debug!("Slideshow player stopped");
        self.surface
    }

    fn redraw(&mut self) {
        let Some(frame) = self.slideshow.current() else {
            // Nothing to show: blank out whatever the last sequence left
            if self.surface.begin_frame().is_ok() {
                self.surface.clear();
            }
            self.renderer.invalidate();
            return;
        };
        match self.renderer.render_if_changed(
            &mut self.surface,
            frame,
            &self.palette,
            self.width,
            self.height,
        ) {
            Ok(true) => tracing::trace!(
                index = self.slideshow.current_index(),
                "Slideshow frame drawn"
            ),
            Ok(false) => {}
            Err(e) => tracing::warn!(error = %e, "Slideshow render failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::PixelBuffer;
    use pixel_grid::{IntensityGrid, Role, Srgb};
    use pretty_assertions::assert_eq;
    use tokio::time::Instant;

    fn palette() -> Palette {
        Palette::new(
            Srgb::new(200, 0, 0),
            Srgb::new(0, 200, 0),
            Srgb::new(0, 0, 200),
            Srgb::WHITE,
            Srgb::BLACK,
        )
    }

    fn level_frames(levels: &[u8]) -> Vec<Frame> {
        levels
            .iter()
            .map(|&l| Frame::Levels(IntensityGrid::filled(4, 16, l).unwrap()))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycles_through_all_frames_and_wraps() {
        let player = SlideshowPlayer::spawn_with_rng(
            PixelBuffer::new(8, 8),
            palette(),
            8,
            8,
            StdRng::seed_from_u64(3),
        );
        let mut events = player.subscribe();
        let start = Instant::now();
        player.replace(level_frames(&[0, 5, 10, 0]), TransitionKind::Fade);

        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(events.recv().await.unwrap().index);
        }

        assert_eq!(seen, vec![1, 2, 3, 0]);
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(4 * 3000), "{elapsed:?}");
        assert!(elapsed <= Duration::from_millis(4 * 5000), "{elapsed:?}");

        let surface = player.shutdown().await.unwrap();
        assert_eq!(surface.get(0, 0), palette().color(Role::Primary));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_frame_is_static() {
        let player = SlideshowPlayer::spawn(PixelBuffer::new(4, 4), palette(), 4, 4);
        let mut events = player.subscribe();
        player.replace(level_frames(&[12]), TransitionKind::Cut);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(events.try_recv().is_err());

        let surface = player.shutdown().await.unwrap();
        assert_eq!(surface.frames(), 1);
        assert_eq!(surface.get(3, 3), palette().color(Role::Accent));
    }

    #[tokio::test(start_paused = true)]
    async fn test_replace_mid_cycle_restarts_sequence() {
        let player = SlideshowPlayer::spawn(PixelBuffer::new(4, 4), palette(), 4, 4);
        let mut events = player.subscribe();
        player.replace(level_frames(&[0, 5, 10]), TransitionKind::Cut);
        assert_eq!(events.recv().await.unwrap().index, 1);

        player.replace(level_frames(&[10, 0]), TransitionKind::Cut);
        // The old timer was cancelled: the next event comes from the new
        // sequence, which starts over at index 0
        assert_eq!(events.recv().await.unwrap().index, 1);

        let surface = player.shutdown().await.unwrap();
        assert_eq!(surface.get(0, 0), palette().color(Role::Primary));
    }

    #[tokio::test(start_paused = true)]
    async fn test_redraws_only_on_change() {
        let player = SlideshowPlayer::spawn(PixelBuffer::new(8, 8), palette(), 8, 8);
        player.replace(level_frames(&[0]), TransitionKind::Cut);
        player.resize(8, 8);
        player.retheme(palette());
        player.retheme(palette().with(Role::Primary, Srgb::new(1, 2, 3)));
        player.resize(4, 4);

        let surface = player.shutdown().await.unwrap();
        // Initial draw, new palette, new size
        assert_eq!(surface.frames(), 3);
        assert_eq!(surface.get(0, 0), Srgb::new(1, 2, 3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_resize_grows_surface_and_fills_it() {
        let player = SlideshowPlayer::spawn(PixelBuffer::new(8, 8), palette(), 8, 8);
        player.replace(level_frames(&[12]), TransitionKind::Cut);
        player.resize(16, 16);

        let surface = player.shutdown().await.unwrap();
        assert_eq!(surface.size(), (16, 16));
        assert_eq!(surface.get(0, 0), palette().color(Role::Accent));
        assert_eq!(surface.get(15, 15), palette().color(Role::Accent));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_sequence_clears_previous_frame() {
        let player = SlideshowPlayer::spawn(PixelBuffer::new(4, 4), palette(), 4, 4);
        let mut events = player.subscribe();
        player.replace(level_frames(&[12, 0]), TransitionKind::Cut);
        player.replace(Vec::new(), TransitionKind::Cut);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(events.try_recv().is_err());

        let surface = player.shutdown().await.unwrap();
        assert_eq!(surface.frames(), 2);
        assert!(surface.pixels().iter().all(|&p| p == Srgb::BLACK));
    }

    #[tokio::test(start_paused = true)]
    async fn test_detach_clears_and_stops_cycling() {
        let player = SlideshowPlayer::spawn(PixelBuffer::new(4, 4), palette(), 4, 4);
        let mut events = player.subscribe();
        player.replace(level_frames(&[12, 5]), TransitionKind::Cut);
        player.detach();

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(events.try_recv().is_err());

        let surface = player.shutdown().await.unwrap();
        assert_eq!(surface.get(3, 3), Srgb::BLACK);
    }

    #[tokio::test(start_paused = true)]
    async fn test_redraw_after_clear_draws_again() {
        let player = SlideshowPlayer::spawn(PixelBuffer::new(4, 4), palette(), 4, 4);
        player.replace(level_frames(&[12]), TransitionKind::Cut);
        player.detach();
        player.replace(level_frames(&[12]), TransitionKind::Cut);

        let surface = player.shutdown().await.unwrap();
        assert_eq!(surface.frames(), 3);
        assert_eq!(surface.get(0, 0), palette().color(Role::Accent));
    }
}
