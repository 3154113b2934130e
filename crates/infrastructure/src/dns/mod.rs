pub mod handler;
pub mod name_server;
pub mod records;

pub use handler::AuthoritativeHandler;
pub use name_server::NameServer;
pub use records::RecordMapper;
