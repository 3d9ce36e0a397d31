//! Interactive zone canvas for polygon regions over a background.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It draws
//! named polygonal zones over either a raster image it renders itself or a
//! host-rendered background that follows published CSS transforms
//! (transparent mode). It handles hover, click and tap selection, mouse and
//! touch pan/zoom, animated zoom-to-zone, and polygon authoring in edit mode.
//! Zone data is owned by the host: the canvas reports additions and deletions
//! through callbacks and re-renders from whatever zones it is given next.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`host`] | [`host::ZoneCanvas`]: DOM listeners, animation frames, image loading |
//! | [`engine`] | Canvas wrapper and testable [`engine::EngineCore`] |
//! | [`viewport`] | View transforms, zoom limits, fitting and clamping |
//! | [`coords`] | Screen / content / normalized coordinate conversions |
//! | [`geometry`] | Points, bounds, point-in-polygon |
//! | [`zone`] | Zone records and the loaded zone set |
//! | [`hit`] | Topmost-zone hit testing |
//! | [`input`] | Input event types, modes, and UI state |
//! | [`gesture`] | Touch tap / pan / pinch tracking |
//! | [`drawing`] | In-progress polygon path |
//! | [`animation`] | Eased zoom animations |
//! | [`controls`] | Edit-mode toolbar layout |
//! | [`events`] | Host callbacks and transform subscriptions |
//! | [`render`] | Layered canvas rendering |
//! | [`style`] | Status palette and legend |
//! | [`config`] | JSON-loadable tuning |
//! | [`error`] | Crate error type |
//! | [`consts`] | Shared numeric defaults (slops, zoom limits, timings) |

pub mod animation;
pub mod config;
pub mod consts;
pub mod controls;
pub mod coords;
pub mod drawing;
pub mod engine;
pub mod error;
pub mod events;
pub mod geometry;
pub mod gesture;
pub mod hit;
pub mod host;
pub mod input;
pub mod render;
pub mod style;
pub mod viewport;
pub mod zone;
