//! Integration tests for changepoint-viewer

mod e2e_test;
mod http_test;
mod support;
