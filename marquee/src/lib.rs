pub mod assets;
pub mod buffer;
pub mod event;
pub mod layout;
pub mod logo;
pub mod marquee;
pub mod motion;
mod render;
pub mod runner;
pub mod terminal;
pub mod text;
pub mod types;

pub use assets::{AssetError, AssetGate, AssetLoader, AssetStatus};
pub use buffer::{Buffer, Cell};
pub use event::{Event, Key, Modifiers};
pub use layout::{
    measure_sequence, target_replicas, Rect, Replica, Slot, Track, COPY_HEADROOM, MIN_COPIES,
};
pub use logo::{Logo, LogoArt};
pub use marquee::{Marquee, MarqueeOptions, Phase};
pub use motion::{Motion, SMOOTH_TAU};
pub use runner::run;
pub use terminal::Terminal;
pub use types::*;
