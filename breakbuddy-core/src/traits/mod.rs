//! Collaborator traits
//!
//! These traits define the interface between the breathing engine and the
//! hardware it drives. The core never touches a peripheral directly; the
//! firmware hands it implementations of these traits, and tests hand it
//! mocks.
//!
//! Blocking sleeps go through [`embedded_hal::delay::DelayNs`].

pub mod audio;
pub mod clock;
pub mod input;
pub mod surface;

pub use audio::{AudioError, AudioOutput, AMPLITUDE_OFF, AMPLITUDE_ON};
pub use clock::{local_hour, Clock, ClockError, WallTime};
pub use input::{DigitalInput, InputError};
pub use surface::{Drawable, LabelText, Placement, RenderSurface, SurfaceError, MAX_LABEL_TEXT};
