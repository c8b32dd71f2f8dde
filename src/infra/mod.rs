pub mod chromium;
pub mod http_client;
