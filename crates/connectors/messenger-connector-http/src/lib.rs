//! Concrete collaborators for the messenger client.
//!
//! - [`ReqwestTransport`] posts messages with a blocking `reqwest` client
//! - [`TcpProbe`] treats a service as connected when its address accepts TCP

mod probe;
mod transport;

pub use probe::TcpProbe;
pub use transport::{ReqwestConnection, ReqwestTransport};
