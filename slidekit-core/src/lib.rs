//! # slidekit core
//!
//! Renderer-independent state machine for responsive slide carousels and
//! cross-fade galleries.
//!
//! ## Overview
//!
//! A [`Carousel`] owns the index state of one slider and drives a
//! [`SlideHost`], the DOM-like collaborator that answers layout queries and
//! receives every mutation as a [`HostCommand`]. Inputs (navigation, keys,
//! pointer gestures, end-of-transition events, resizes) arrive as method
//! calls; time arrives through [`Carousel::tick`].
//!
//! - [`options`]: base options and breakpoint overrides (serde)
//! - [`resolver`]: effective option values per viewport width
//! - [`geometry`]: widths, offsets and style plans
//! - [`index`]: the clone-extended index and its bounds
//! - [`transition`]: completion gating and the manual animator
//! - [`gesture`], [`nav`], [`autoplay`]: input adapters
//! - [`events`]: typed lifecycle events and snapshots
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Instant;
//!
//! use slidekit_core::{Capabilities, GoTarget, HeadlessHost, SliderHandle, SliderOptions};
//!
//! let options = SliderOptions {
//!     items: 3,
//!     slide_by: slidekit_core::options::SlideBy::Count(3),
//!     ..SliderOptions::default()
//! };
//! let host = HeadlessHost::new(6, 900.0);
//! let mut slider = SliderHandle::mount(host, options, Arc::new(Capabilities::modern()), Instant::now());
//!
//! assert!(slider.go_to(GoTarget::Next));
//! let info = slider.info().expect("mounted");
//! assert_eq!(info.displayed, 3);
//! ```

#![allow(missing_docs)]

pub mod autoplay;
pub mod capability;
pub mod carousel;
pub mod error;
pub mod events;
pub mod geometry;
pub mod gesture;
pub mod headless;
pub mod host;
pub mod index;
pub mod nav;
pub mod options;
pub mod resolver;
pub mod transition;

pub use capability::Capabilities;
pub use carousel::{Carousel, HeightTicket, ImagesLoaded, RESIZE_DEBOUNCE, SliderHandle};
pub use error::{Result, SliderError};
pub use events::{EventKind, RawEvent, SliderEvent, SliderInfo, SubscriptionId};
pub use gesture::{PointerKind, Propagation};
pub use headless::HeadlessHost;
pub use host::{HostCommand, ListenerGroup, SlideHost};
pub use index::GoTarget;
pub use nav::{Control, Key};
pub use options::{Axis, Mode, SliderOptions};
pub use transition::EndTarget;
