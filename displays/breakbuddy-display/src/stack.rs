//! Layer stack
//!
//! Holds the background color and the foreground drawables in draw order
//! (last on top). Changes only mark the stack dirty; pixels are produced
//! when the stack is drawn onto a target.

use breakbuddy_core::color::Color;
use breakbuddy_core::traits::{Drawable, Placement, RenderSurface, SurfaceError};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use embedded_graphics::Drawable as _;
use heapless::Vec;

use crate::color::to_rgb888;

/// Maximum foreground layers (breathing label plus pulse square, with room to spare)
pub const MAX_LAYERS: usize = 4;

/// Handle to a layer on a [`LayerStack`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerId(u16);

/// Background plus ordered foreground layers
#[derive(Debug, Clone)]
pub struct LayerStack<const N: usize = MAX_LAYERS> {
    size: Size,
    background: Color,
    layers: Vec<(LayerId, Drawable), N>,
    next_id: u16,
    dirty: bool,
}

impl<const N: usize> LayerStack<N> {
    /// Create an empty stack for a screen of the given size
    pub fn new(size: Size, background: Color) -> Self {
        Self {
            size,
            background,
            layers: Vec::new(),
            next_id: 0,
            dirty: true,
        }
    }

    /// Screen size
    pub fn size(&self) -> Size {
        self.size
    }

    /// Background color
    pub fn background(&self) -> Color {
        self.background
    }

    /// Foreground drawables, bottom first
    pub fn drawables(&self) -> impl Iterator<Item = &Drawable> {
        self.layers.iter().map(|(_, d)| d)
    }

    /// Number of foreground layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Check if there are no foreground layers
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Check if the stack changed since it was last rendered
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Draw everything onto `target`
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget,
        D::Color: From<Rgb888>,
    {
        target.clear(to_rgb888(self.background).into())?;
        for (_, drawable) in self.layers.iter() {
            match drawable {
                Drawable::Square { size_px, color } => {
                    self.draw_square(target, *size_px, *color)?
                }
                Drawable::Text { text, color } => self.draw_text(target, text, *color)?,
            }
        }
        Ok(())
    }

    /// Draw onto `target` if anything changed; returns whether it drew
    pub fn render<D>(&mut self, target: &mut D) -> Result<bool, D::Error>
    where
        D: DrawTarget,
        D::Color: From<Rgb888>,
    {
        if !self.dirty {
            return Ok(false);
        }
        self.draw(target)?;
        self.dirty = false;
        Ok(true)
    }

    /// Square of edge `size_px` centered on the screen
    pub fn square_area(&self, size_px: u16) -> Rectangle {
        let side = u32::from(size_px);
        let x = (self.size.width as i32 - side as i32) / 2;
        let y = (self.size.height as i32 - side as i32) / 2;
        Rectangle::new(Point::new(x, y), Size::new_equal(side))
    }

    fn draw_square<D>(
        &self,
        target: &mut D,
        size_px: u16,
        color: Color,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget,
        D::Color: From<Rgb888>,
    {
        // Keep oversize squares on screen
        let fill: D::Color = to_rgb888(color).into();
        let area = self.square_area(size_px).intersection(&target.bounding_box());
        area.into_styled(PrimitiveStyle::with_fill(fill)).draw(target)
    }

    fn draw_text<D>(&self, target: &mut D, text: &str, color: Color) -> Result<(), D::Error>
    where
        D: DrawTarget,
        D::Color: From<Rgb888>,
    {
        let text_color: D::Color = to_rgb888(color).into();
        let character_style = MonoTextStyle::new(&FONT_6X10, text_color);
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        // Center the whole block, not just the first line
        let lines = text.split('\n').count() as i32;
        let line_height = FONT_6X10.character_size.height as i32;
        let center = Rectangle::new(Point::zero(), self.size).center();
        let origin = center - Point::new(0, (lines - 1) * line_height / 2);

        Text::with_text_style(text, origin, character_style, text_style).draw(target)?;
        Ok(())
    }
}

impl<const N: usize> RenderSurface for LayerStack<N> {
    type Layer = LayerId;

    fn add_layer(
        &mut self,
        drawable: Drawable,
        placement: Placement,
    ) -> Result<LayerId, SurfaceError> {
        let id = LayerId(self.next_id);
        let index = match placement {
            Placement::Top => self.layers.len(),
            Placement::BelowTop => self.layers.len().saturating_sub(1),
        };
        self.layers
            .insert(index, (id, drawable))
            .map_err(|_| SurfaceError::LayerLimit)?;
        self.next_id = self.next_id.wrapping_add(1);
        self.dirty = true;
        Ok(id)
    }

    fn remove_layer(&mut self, layer: LayerId) -> Result<(), SurfaceError> {
        let index = self
            .layers
            .iter()
            .position(|(id, _)| *id == layer)
            .ok_or(SurfaceError::UnknownLayer)?;
        self.layers.remove(index);
        self.dirty = true;
        Ok(())
    }

    fn set_background(&mut self, color: Color) -> Result<(), SurfaceError> {
        if color != self.background {
            self.background = color;
            self.dirty = true;
        }
        Ok(())
    }
}
