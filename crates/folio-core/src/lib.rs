pub mod config;
pub mod logging;

pub mod codec;
pub mod folio_name;
pub mod http;
pub mod manifest;
pub mod materialize;
pub mod table;
