//! Slideshow player behavior under a paused Tokio clock.

mod common;

use std::time::Duration;

use common::fixtures;
use pixel_grid::{IntensityGrid, Role};
use pixel_portrait::rendering::{Frame, PixelBuffer};
use pixel_portrait::services::{SlideshowPlayer, TransitionKind};
use pretty_assertions::assert_eq;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::time::Instant;

fn frames(levels: &[u8]) -> Vec<Frame> {
    levels
        .iter()
        .map(|&l| Frame::Levels(IntensityGrid::filled(8, 16, l).unwrap()))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_every_slide_shown_within_max_cumulative_delay() {
    let player = SlideshowPlayer::spawn(
        PixelBuffer::new(16, 16),
        fixtures::vivid_palette(),
        16,
        16,
    );
    let mut events = player.subscribe();
    player.replace(frames(&[0, 6, 12, 3]), TransitionKind::Slide);

    let start = Instant::now();
    let mut last = start;
    let mut visited = Vec::new();
    while visited.last() != Some(&0) {
        let change = events.recv().await.unwrap();
        let gap = last.elapsed();
        assert!(
            gap >= Duration::from_millis(3000) && gap <= Duration::from_millis(5000),
            "delay {gap:?} out of range"
        );
        last = Instant::now();
        visited.push(change.index);
    }

    assert_eq!(visited, vec![1, 2, 3, 0]);
    assert!(start.elapsed() <= Duration::from_millis(4 * 5000));
    player.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_shrinking_to_one_slide_stops_cycling() {
    let player = SlideshowPlayer::spawn(
        PixelBuffer::new(8, 8),
        fixtures::vivid_palette(),
        8,
        8,
    );
    let mut events = player.subscribe();
    player.replace(frames(&[0, 12]), TransitionKind::Cut);
    assert_eq!(events.recv().await.unwrap().index, 1);

    player.replace(frames(&[6]), TransitionKind::Cut);
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

    let surface = player.shutdown().await.unwrap();
    assert_eq!(
        surface.get(7, 7),
        fixtures::vivid_palette().color(Role::Secondary)
    );
}

#[tokio::test(start_paused = true)]
async fn test_retheme_recolors_current_slide() {
    let player = SlideshowPlayer::spawn(
        PixelBuffer::new(8, 8),
        fixtures::vivid_palette(),
        8,
        8,
    );
    player.replace(frames(&[15]), TransitionKind::Cut);
    let retheme = pixel_grid::Palette::default();
    player.retheme(retheme);

    let surface = player.shutdown().await.unwrap();
    assert_eq!(surface.frames(), 2);
    common::assert_region(&surface, 0, 0, 8, 8, retheme.color(Role::Accent));
}
