pub mod ip;

pub use ip::{UNSPECIFIED_ADDR, remote_addr, remote_addr_from_request};
