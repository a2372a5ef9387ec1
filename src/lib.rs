// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Camera framing and model presentation core for photogrammetry mesh
//! viewers.
//!
//! Meshview loads a reconstructed mesh (textured, untextured fallback, or a
//! synthetic placeholder), recentres it on the world origin, measures its
//! bounds, and keeps a camera framed on it across view presets, projection
//! switches and viewport resizes.
//!
//! # Key entry points
//!
//! - [`session::ViewerSession`] - one viewer per viewport; owns the model,
//!   the camera and the command surface
//! - [`loader::ModelLoader`] - primary → fallback → placeholder loading
//! - [`bounds`] - bounding volume and size derivation for a model graph
//! - [`camera::framer::CameraFramer`] - camera placement from bounds
//! - [`viewport::ViewportController`] - camera ownership, presets, resize
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Data flow
//!
//! ```text
//! ModelLoader → ModelGraph → compute_bounds
//!             → CameraFramer → ViewportController
//! ```
//!
//! Loading is the only suspension point. Everything else runs synchronously
//! on the caller's thread, and any command issued before a model is present
//! is a no-op rather than an error.

pub mod bounds;
pub mod camera;
pub mod error;
pub mod input;
pub mod loader;
pub mod options;
pub mod scene;
pub mod session;
pub mod util;
pub mod viewport;

pub use error::ViewerError;
pub use session::{ViewerCommand, ViewerSession};
