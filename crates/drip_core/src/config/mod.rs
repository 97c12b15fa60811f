//! Request configuration
//!
//! [`SimulationRequest`](crate::model::SimulationRequest) can be built by hand,
//! but the builder DSL validates the range and position up front:
//!
//! ```ignore
//! use drip_core::config::RequestBuilder;
//!
//! let comparison = RequestBuilder::new("")
//!     .start(2024, 1, 1)
//!     .end(2024, 12, 31)
//!     .cash(10_000.0)
//!     .reinvest()
//!     .build_comparison(["JEPI", "QYLD", "SCHD"])?;
//! ```

pub mod builder;

pub use builder::RequestBuilder;
