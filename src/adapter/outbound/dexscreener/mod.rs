//! DexScreener market-data adapter.

mod client;
pub mod dto;
mod settings;

pub use client::DexScreenerClient;
pub use settings::HttpConfig;
