//! Hearth core library — shared logic for the Hearth site tooling.
//!
//! `hearth-core` holds the two pieces of the marketing site that are not
//! page markup: the request rate limiter guarding the contact-capture
//! endpoint, and the offline image-optimization pipeline that produces
//! web-ready WebP derivatives and a lookup manifest. It is deliberately
//! decoupled from any HTTP framework so that both the `hearth-web` service
//! and the `hearth-optimize` batch binary can share the same logic.
//!
//! # Modules
//!
//! - [`limit`] — Fixed-window request rate limiting ([`RateLimiter`]).
//! - [`media`] — Image discovery, per-image optimization, and manifest
//!   aggregation.
//! - [`error`] — Unified error type ([`CoreError`]) and result alias
//!   ([`CoreResult`]).

pub mod error;
pub mod limit;
pub mod media;

pub use error::{CoreError, CoreResult};
pub use limit::RateLimiter;
pub use media::discover::find_images;
pub use media::manifest::{format_bytes, Manifest, ManifestBuilder, ManifestEntry};
pub use media::optimize::{optimize_image, target_dimensions};
pub use media::pipeline::{PipelineConfig, PipelineReport};
