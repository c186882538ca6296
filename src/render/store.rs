use tracing::debug;

use crate::core::Viewport;
use crate::error::{GraphError, GraphResult};

use super::Surface;

/// Ping-pong pair for the scrolling moving-trace cache.
///
/// Each cycle draws fresh trace columns into `current`, composites the
/// shifted `previous` frame behind them, then calls `swap` so the roles
/// alternate.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingPair {
    surfaces: [Surface; 2],
    current: usize,
}

impl MovingPair {
    pub fn new(width: u32, height: u32) -> GraphResult<Self> {
        Ok(Self {
            surfaces: [Surface::new(width, height)?, Surface::new(width, height)?],
            current: 0,
        })
    }

    #[must_use]
    pub fn current(&self) -> &Surface {
        &self.surfaces[self.current]
    }

    #[must_use]
    pub fn previous(&self) -> &Surface {
        &self.surfaces[1 - self.current]
    }

    /// Mutable current buffer together with the read-only previous one.
    pub fn split(&mut self) -> (&mut Surface, &Surface) {
        let (head, tail) = self.surfaces.split_at_mut(1);
        if self.current == 0 {
            (&mut head[0], &tail[0])
        } else {
            (&mut tail[0], &head[0])
        }
    }

    pub fn swap(&mut self) {
        self.current = 1 - self.current;
    }
}

/// The fixed named set of off-screen buffers backing one widget.
///
/// Invariant: every buffer always has the same size as every other and as
/// the widget; a resize replaces the whole set at once. Buffers are plain
/// owned values, released on drop.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceStore {
    pub background: Surface,
    pub grid: Surface,
    pub cache: Surface,
    pub moving: MovingPair,
    pub handles: Surface,
    pub realtime: Surface,
}

impl SurfaceStore {
    pub fn new(viewport: Viewport) -> GraphResult<Self> {
        if !viewport.is_valid() {
            return Err(GraphError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let (w, h) = (viewport.width, viewport.height);
        debug!(width = w, height = h, "creating surface store");
        Ok(Self {
            background: Surface::new(w, h)?,
            grid: Surface::new(w, h)?,
            cache: Surface::new(w, h)?,
            moving: MovingPair::new(w, h)?,
            handles: Surface::new(w, h)?,
            realtime: Surface::new(w, h)?,
        })
    }

    /// Replaces every buffer with a fresh one of the new size. The store is
    /// only mutated once all allocations succeed, so a failed resize never
    /// leaves a mixed-size state behind.
    pub fn recreate(&mut self, viewport: Viewport) -> GraphResult<()> {
        *self = Self::new(viewport)?;
        Ok(())
    }

    /// Common buffer size.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.background.size()
    }
}
