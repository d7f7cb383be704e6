// tvctl-api: transport clients for the TV remote channel and the SmartThings cloud API

pub mod cloud;
pub mod error;
pub mod probe;
pub mod remote;

pub use cloud::CloudClient;
pub use error::Error;
pub use remote::{Key, Press, RemoteSession, RetryPolicy, SessionConfig};
