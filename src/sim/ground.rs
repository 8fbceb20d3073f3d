//! Ground and fall detection
//!
//! The board picture doubles as the collision mask: void is drawn fully
//! opaque black and anything else is path. [`WalkMask`] captures that once at
//! load time (from the bitmap or straight from the path tiles) and answers
//! point queries through the [`Ground`] capability.

use glam::Vec2;

use super::entity::{Actor, Slot};
use super::grid::{Grid, GridPos};
use crate::error::{LevelError, SampleError};

/// Void border around rasterized boards, grid units
pub const TILE_MARGIN: f32 = 1.0;

/// "Is this world point walkable" capability
pub trait Ground {
    fn is_walkable(&self, p: Vec2) -> Result<bool, SampleError>;
}

/// Per-pixel walkability of a board
#[derive(Debug, Clone, PartialEq)]
pub struct WalkMask {
    width: u32,
    height: u32,
    /// Screen position of pixel (0, 0)
    origin: Vec2,
    cells: Vec<bool>,
}

impl WalkMask {
    /// All-void mask
    pub fn empty(width: u32, height: u32, origin: Vec2) -> Self {
        Self {
            width,
            height,
            origin,
            cells: vec![false; width as usize * height as usize],
        }
    }

    /// Build from an RGBA8 board image. Opaque black is void.
    pub fn from_rgba(width: u32, height: u32, origin: Vec2, rgba: &[u8]) -> Result<Self, LevelError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(LevelError::BitmapSize {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }
        let cells = rgba
            .chunks_exact(4)
            .map(|px| px != [0, 0, 0, 255])
            .collect();
        Ok(Self {
            width,
            height,
            origin,
            cells,
        })
    }

    /// Rasterize path tiles centred on grid points onto a `cols` x `rows` board.
    ///
    /// The mask extends [`TILE_MARGIN`] grid units of void past every board
    /// edge: a tile on the outer row or column reaches the edge, and a probe
    /// stepping off it has to land on void rather than outside the mask.
    pub fn from_tiles<I>(cols: u32, rows: u32, grid: &Grid, tiles: I) -> Self
    where
        I: IntoIterator<Item = GridPos>,
    {
        let margin = grid.px(TILE_MARGIN);
        let width = (grid.px(cols as f32) + 2.0 * margin).ceil() as u32;
        let height = (grid.px(rows as f32) + 2.0 * margin).ceil() as u32;
        let mut mask = Self::empty(width, height, grid.origin - Vec2::splat(margin));
        for tile in tiles {
            let center = grid.to_screen(tile);
            let half = Vec2::splat(grid.unit);
            mask.paint(center - half, center + half, true);
        }
        mask
    }

    /// Mark the pixels of a screen-space rectangle (max exclusive)
    pub fn paint(&mut self, min: Vec2, max: Vec2, walkable: bool) {
        let lo = (min - self.origin).floor().max(Vec2::ZERO);
        let hi = (max - self.origin)
            .ceil()
            .min(Vec2::new(self.width as f32, self.height as f32));
        for y in lo.y as u32..hi.y.max(lo.y) as u32 {
            for x in lo.x as u32..hi.x.max(lo.x) as u32 {
                let idx = y as usize * self.width as usize + x as usize;
                self.cells[idx] = walkable;
            }
        }
    }
}

impl Ground for WalkMask {
    fn is_walkable(&self, p: Vec2) -> Result<bool, SampleError> {
        let local = (p - self.origin).floor();
        if !local.is_finite()
            || local.x < 0.0
            || local.y < 0.0
            || local.x >= self.width as f32
            || local.y >= self.height as f32
        {
            return Err(SampleError::OutOfBounds {
                x: p.x,
                y: p.y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = local.y as usize * self.width as usize + local.x as usize;
        Ok(self.cells[idx])
    }
}

/// Outcome of sampling both probes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroundVerdict {
    /// Both probes on the path
    OnPath,
    /// One foot off: shift the actor by `nudge` back toward the path
    Edge { nudge: Vec2 },
    /// Both probes over void but inside the attached ladder's bridge
    Bridged,
    /// Both probes over void
    OffPath,
}

/// Sample the actor's probes.
///
/// `nudge_len` is the fixed edge correction (half a grid unit); it does not
/// depend on how far the off-path probe overhangs.
pub fn sample<G: Ground + ?Sized>(
    ground: &G,
    actor: &Actor,
    ladder: Option<&Slot>,
    nudge_len: f32,
) -> Result<GroundVerdict, SampleError> {
    let [a, b] = actor.probes;
    let a_on = ground.is_walkable(a)?;
    let b_on = ground.is_walkable(b)?;

    Ok(match (a_on, b_on) {
        (true, true) => GroundVerdict::OnPath,
        (true, false) => GroundVerdict::Edge {
            nudge: (a - b).normalize_or_zero() * nudge_len,
        },
        (false, true) => GroundVerdict::Edge {
            nudge: (b - a).normalize_or_zero() * nudge_len,
        },
        (false, false) => match ladder {
            Some(slot) if slot.bridge.contains(a) && slot.bridge.contains(b) => GroundVerdict::Bridged,
            _ => GroundVerdict::OffPath,
        },
    })
}

/// Fall animation counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FallTimer {
    frame: Option<u32>,
    ticks: u32,
}

impl FallTimer {
    pub fn begin(&mut self) {
        self.frame = Some(0);
        self.ticks = 0;
    }

    pub fn clear(&mut self) {
        self.frame = None;
        self.ticks = 0;
    }

    /// Current frame, `None` when not falling
    pub fn frame(&self) -> Option<u32> {
        self.frame
    }

    pub fn is_falling(&self) -> bool {
        self.frame.is_some()
    }

    /// Advance one tick. Returns true when the animation has run past
    /// `max_frame`; the timer is reset to not-falling at that point.
    pub fn advance(&mut self, ticks_per_frame: u32, max_frame: u32) -> bool {
        let Some(frame) = self.frame else {
            return false;
        };
        self.ticks += 1;
        if self.ticks < ticks_per_frame.max(1) {
            return false;
        }
        self.ticks = 0;
        let next = frame + 1;
        if next > max_frame {
            self.clear();
            true
        } else {
            self.frame = Some(next);
            false
        }
    }
}
