pub mod codec;
pub mod pipeline;
pub mod player;
pub mod slideshow;

pub use codec::ArtifactCodec;
pub use pipeline::{ArtPipeline, BitmapSource, MemorySource, PngFileSource};
pub use player::{SlideChanged, SlideshowPlayer, TokioScheduler};
pub use slideshow::{random_delay, Scheduler, Slideshow, TimerHandle, TimerId, TransitionKind};
