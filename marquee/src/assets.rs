use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use log::debug;
use thiserror::Error;

use crate::logo::{Logo, LogoArt};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Per-item asset state.
#[derive(Debug, Clone, Default)]
pub enum AssetStatus {
    /// Text badge, nothing to load.
    #[default]
    None,
    /// Image decode in flight.
    Pending,
    /// Decoded art, ready to draw.
    Ready(LogoArt),
    /// Decode failed; the label fallback stays.
    Failed,
}

impl AssetStatus {
    pub fn art(&self) -> Option<&LogoArt> {
        match self {
            Self::Ready(art) => Some(art),
            _ => None,
        }
    }

    /// Settled means a completion signal was observed. Success and
    /// failure count identically, so a broken image can never hold the
    /// animation hostage.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Counts settle signals for the gating set.
#[derive(Debug)]
pub struct AssetGate {
    remaining: usize,
}

impl AssetGate {
    pub fn new(count: usize) -> Self {
        Self { remaining: count }
    }

    /// Record one completion signal, success or failure alike.
    pub fn settle(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

/// Off-thread decoder for the image-bearing logos.
///
/// One worker reads and decodes every sourced logo and reports per-index
/// results over a channel; the component drains the channel at the top of
/// each tick, so all state mutation stays on the driving thread. Dropping
/// the loader (disposal) closes the channel and the worker exits at its
/// next send.
#[derive(Debug)]
pub struct AssetLoader {
    rx: Receiver<(usize, Result<LogoArt, AssetError>)>,
}

impl AssetLoader {
    /// Spawn the decode worker for every logo with a `source`, scaling art
    /// to `item_height` cell rows.
    pub fn spawn(logos: &[Logo], item_height: u16) -> Self {
        let jobs: Vec<(usize, PathBuf)> = logos
            .iter()
            .enumerate()
            .filter_map(|(index, logo)| logo.source.clone().map(|path| (index, path)))
            .collect();

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for (index, path) in jobs {
                let result = decode(&path, item_height);
                if tx.send((index, result)).is_err() {
                    // Receiver dropped: the marquee was disposed.
                    return;
                }
            }
            debug!("asset loader finished");
        });

        Self { rx }
    }

    /// Drain settled results without blocking.
    pub fn poll(&self) -> Vec<(usize, Result<LogoArt, AssetError>)> {
        self.rx.try_iter().collect()
    }
}

fn decode(path: &Path, item_height: u16) -> Result<LogoArt, AssetError> {
    let data = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let img = image::load_from_memory(&data).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(LogoArt::from_image(&img, item_height))
}
