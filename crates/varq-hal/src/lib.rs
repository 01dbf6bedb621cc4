//! varq simulation backend interface.
//!
//! The variational loop never executes circuits itself. It hands a
//! [`varq_ir::Circuit`] to a [`Backend`] and asks for one of two outputs:
//!
//! - [`ExecutionMode::Statevector`]: the exact amplitude vector
//! - [`ExecutionMode::Shots`]: sampled [`Counts`] over a shot budget
//!
//! # Backends
//!
//! | Backend | Crate | Modes |
//! |---------|-------|-------|
//! | Local statevector | `varq-adapter-sim` | statevector, shots |
//!
//! # Implementing a Custom Backend
//!
//! ```rust
//! use varq_hal::{Backend, BackendOutput, Capabilities, ExecutionMode, HalError, HalResult};
//! use varq_ir::Circuit;
//!
//! struct Offline {
//!     capabilities: Capabilities,
//! }
//!
//! impl Backend for Offline {
//!     fn name(&self) -> &str {
//!         "offline"
//!     }
//!
//!     fn capabilities(&self) -> &Capabilities {
//!         &self.capabilities
//!     }
//!
//!     fn is_available(&self) -> bool {
//!         false
//!     }
//!
//!     fn run(&self, _circuit: &Circuit, _mode: ExecutionMode) -> HalResult<BackendOutput> {
//!         Err(HalError::BackendUnavailable("offline".into()))
//!     }
//! }
//!
//! let backend = Offline { capabilities: Capabilities::simulator(4) };
//! assert!(backend.run(&Circuit::new("c", 1), ExecutionMode::Statevector).is_err());
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod result;

pub use backend::Backend;
pub use capability::Capabilities;
pub use error::{HalError, HalResult};
pub use result::{BackendOutput, Counts, ExecutionMode};
