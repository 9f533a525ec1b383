//! Layer bookkeeping for the two screen layouts
//!
//! Idle layout: background plus the idle label. Breathing layout:
//! background, pulse square, breathing label on top. The scene remembers
//! every handle it holds, so a run that failed halfway can still be put
//! back to the idle layout.

use crate::color::Color;
use crate::traits::{Drawable, Placement, RenderSurface, SurfaceError};

/// Handles to the layers this crate placed on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scene<L> {
    idle_label: Option<L>,
    breathe_label: Option<L>,
    pulse: Option<L>,
}

impl<L: Copy> Scene<L> {
    /// Empty scene; nothing on screen yet
    pub const fn new() -> Self {
        Self {
            idle_label: None,
            breathe_label: None,
            pulse: None,
        }
    }

    /// Show the idle label (no-op if it is already shown)
    pub fn show_idle<S>(&mut self, surface: &mut S, label: &Drawable) -> Result<(), SurfaceError>
    where
        S: RenderSurface<Layer = L>,
    {
        if self.idle_label.is_none() {
            self.idle_label = Some(surface.add_layer(label.clone(), Placement::Top)?);
        }
        Ok(())
    }

    /// Swap the idle label for the breathing label on a reset background
    pub fn show_breathing<S>(
        &mut self,
        surface: &mut S,
        background: Color,
        label: &Drawable,
    ) -> Result<(), SurfaceError>
    where
        S: RenderSurface<Layer = L>,
    {
        if let Some(layer) = self.idle_label.take() {
            surface.remove_layer(layer)?;
        }
        surface.set_background(background)?;
        if self.breathe_label.is_none() {
            self.breathe_label = Some(surface.add_layer(label.clone(), Placement::Top)?);
        }
        Ok(())
    }

    /// Replace the pulse square, keeping it beneath the breathing label
    pub fn replace_pulse<S>(
        &mut self,
        surface: &mut S,
        square: Drawable,
    ) -> Result<(), SurfaceError>
    where
        S: RenderSurface<Layer = L>,
    {
        if let Some(layer) = self.pulse.take() {
            surface.remove_layer(layer)?;
        }
        self.pulse = Some(surface.add_layer(square, Placement::BelowTop)?);
        Ok(())
    }

    /// Remove the breathing label and any pulse square
    pub fn clear_breathing<S>(&mut self, surface: &mut S) -> Result<(), SurfaceError>
    where
        S: RenderSurface<Layer = L>,
    {
        if let Some(layer) = self.breathe_label.take() {
            surface.remove_layer(layer)?;
        }
        if let Some(layer) = self.pulse.take() {
            surface.remove_layer(layer)?;
        }
        Ok(())
    }

    /// Return to the idle layout from wherever a run stopped
    pub fn restore_idle<S>(&mut self, surface: &mut S, label: &Drawable) -> Result<(), SurfaceError>
    where
        S: RenderSurface<Layer = L>,
    {
        self.clear_breathing(surface)?;
        self.show_idle(surface, label)
    }

    /// Check if the idle layout is on screen
    pub fn is_idle(&self) -> bool {
        self.idle_label.is_some() && self.breathe_label.is_none() && self.pulse.is_none()
    }

    /// Current pulse square, if any
    pub fn pulse(&self) -> Option<L> {
        self.pulse
    }
}

impl<L: Copy> Default for Scene<L> {
    fn default() -> Self {
        Self::new()
    }
}
