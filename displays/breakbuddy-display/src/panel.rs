//! Render surface over a physical panel
//!
//! Every change to the layer stack is pushed to the panel before the call
//! returns, so what the breathing engine sees as done is on screen.

use breakbuddy_core::color::Color;
use breakbuddy_core::traits::{Drawable, Placement, RenderSurface, SurfaceError};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

use crate::stack::{LayerId, LayerStack, MAX_LAYERS};

/// A [`LayerStack`] bound to a draw target
pub struct Panel<D, const N: usize = MAX_LAYERS> {
    target: D,
    stack: LayerStack<N>,
}

impl<D, const N: usize> Panel<D, N>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    /// Wrap a draw target, sized to its bounding box
    pub fn new(target: D, background: Color) -> Self {
        let size = target.bounding_box().size;
        Self {
            target,
            stack: LayerStack::new(size, background),
        }
    }

    /// Push pending changes to the panel
    pub fn flush(&mut self) -> Result<(), SurfaceError> {
        self.stack
            .render(&mut self.target)
            .map(|_| ())
            .map_err(|_| SurfaceError::Bus)
    }

    pub fn stack(&self) -> &LayerStack<N> {
        &self.stack
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    /// Give back the draw target
    pub fn release(self) -> D {
        self.target
    }
}

impl<D, const N: usize> RenderSurface for Panel<D, N>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    type Layer = LayerId;

    fn add_layer(
        &mut self,
        drawable: Drawable,
        placement: Placement,
    ) -> Result<LayerId, SurfaceError> {
        let id = self.stack.add_layer(drawable, placement)?;
        self.flush()?;
        Ok(id)
    }

    fn remove_layer(&mut self, layer: LayerId) -> Result<(), SurfaceError> {
        self.stack.remove_layer(layer)?;
        self.flush()
    }

    fn set_background(&mut self, color: Color) -> Result<(), SurfaceError> {
        self.stack.set_background(color)?;
        self.flush()
    }
}
