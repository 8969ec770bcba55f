//! サーバー通信

pub mod fetch;

pub use fetch::FetchTransport;
