//! Wayfind Visualization
//!
//! Playback control and a web API for animating recorded search traces.
//!
//! # Architecture
//!
//! - **Playback**: A state machine owning the cursor into one trace
//! - **Frame**: The observable highlight/table/queue/log slice
//! - **REST API**: Load a graph, start a search, drive playback
//! - **WebSocket**: The same controls plus streamed frames
//!
//! # Usage
//!
//! ```ignore
//! let server = VisServer::with_scene(nodes, &edges, false);
//! server.serve(3000).await?;
//! ```

mod error;
mod frame;
mod playback;
mod server;

pub use error::{Error, Result};
pub use frame::{Highlight, HighlightEdge, PlaybackFrame};
pub use playback::{AnimationSpeed, DriveMode, Playback, PlaybackState, PlaybackStatus};
pub use server::VisServer;
