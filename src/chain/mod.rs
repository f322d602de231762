//! Call-chain definitions
//!
//! The system under measurement: a fake data source behind a configurable
//! stack of forwarding layers, instrumented so every scheduler re-entry is
//! an observable event.

pub mod data_source;
pub mod forwarding;
pub mod mode;
pub mod probe;

pub use data_source::{FakeDataSource, PRODUCT_DETAILS};
pub use forwarding::ForwardingChain;
pub use mode::ForwardingMode;
pub use probe::SuspensionProbe;
