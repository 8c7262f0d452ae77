pub mod config;
pub mod logging;

// Pipeline, leaf-first.
pub mod credentials;
pub mod params;
pub mod signing;
pub mod transport;
pub mod retry;
pub mod decode;
pub mod error;
pub mod invoke;

// Operation lookup and sample service facades.
pub mod registry;
pub mod services;

pub use config::ClientConfig;
pub use credentials::{Credentials, SecretKey};
pub use decode::{Document, Operation, XmlCursor};
pub use error::{DecodeError, InvokeError, ServiceError, ServiceErrorKind};
pub use invoke::QueryClient;
pub use params::ParameterSet;
pub use transport::{CurlTransport, Transport, TransportError};

// Clients are shared across caller threads; keep these Send + Sync.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    let _ = assert_send_sync::<QueryClient>;
    let _ = assert_send_sync::<Credentials>;
    let _ = assert_send_sync::<ServiceError>;
};
