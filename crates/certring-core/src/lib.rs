//! Core types for certring.
//!
//! This crate holds the circular focus selector behind the certificate
//! carousel: the certificate model, focus state, offset resolution, display
//! roles, the autoplay driver and content loading.

mod autoplay;
mod carousel;
mod certificate;
mod config;
mod content;
mod error;
mod focus;
mod offset;
mod role;

pub use autoplay::{AutoplayDriver, AutoplayState, AutoplayTick, TICK_CHANNEL_SIZE};
pub use carousel::{Carousel, Slot};
pub use certificate::{ACCENT_PALETTE, Certificate, CertificateId, builtin_certificates};
pub use config::{CarouselConfig, CarouselConfigBuilder, DEFAULT_AUTOPLAY_PERIOD_MS};
pub use content::{BuiltinSource, ContentFormat, ContentSource, FileSource, load_certificates};
pub use error::{ConfigError, ContentError};
pub use focus::FocusState;
pub use offset::resolve_offset;
pub use role::{Role, RoleStyle};
