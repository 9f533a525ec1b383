//! Render surface
//!
//! The surface owns a background color (always layer 0) and an ordered
//! stack of foreground layers, the last one drawn on top. The engine only
//! ever holds opaque handles to the layers it added.

use heapless::String;

use crate::color::Color;

/// Maximum label length in bytes
pub const MAX_LABEL_TEXT: usize = 48;

/// Text of a label layer
pub type LabelText = String<MAX_LABEL_TEXT>;

/// Something that can be put on a layer
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Drawable {
    /// Filled square centered on the screen
    Square {
        /// Edge length in pixels
        size_px: u16,
        /// Fill color
        color: Color,
    },
    /// Text label centered on the screen; `\n` starts a new line
    Text {
        /// Label text
        text: LabelText,
        /// Text color
        color: Color,
    },
}

impl Drawable {
    /// Centered square
    pub const fn square(size_px: u16, color: Color) -> Self {
        Drawable::Square { size_px, color }
    }

    /// Centered text label
    pub fn text(text: &LabelText, color: Color) -> Self {
        Drawable::Text {
            text: text.clone(),
            color,
        }
    }
}

/// Where a new layer goes in the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Placement {
    /// On top of everything
    Top,
    /// Directly beneath the current top layer (on top if the stack is empty)
    BelowTop,
}

/// Errors from the render surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// No room for another layer
    LayerLimit,
    /// Handle does not name a layer on this surface
    UnknownLayer,
    /// Pushing pixels to the panel failed
    Bus,
}

/// Layered drawing target
pub trait RenderSurface {
    /// Opaque layer handle
    type Layer: Copy + Eq + core::fmt::Debug;

    /// Add a layer and return its handle
    fn add_layer(
        &mut self,
        drawable: Drawable,
        placement: Placement,
    ) -> Result<Self::Layer, SurfaceError>;

    /// Remove a layer
    fn remove_layer(&mut self, layer: Self::Layer) -> Result<(), SurfaceError>;

    /// Set the background (layer 0) color
    fn set_background(&mut self, color: Color) -> Result<(), SurfaceError>;
}
