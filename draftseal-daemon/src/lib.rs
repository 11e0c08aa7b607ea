pub mod handler;
pub mod protocol;
pub mod server;

// Re-export commonly used types
pub use handler::RequestHandler;
pub use protocol::{Operation, Request, RequestData, Response, ResponseResult};
pub use server::DaemonServer;
