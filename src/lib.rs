// Library for tests to access modules

pub mod age;
pub mod capacity;
pub mod config;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod series;
pub mod sort_url;
pub mod version;
