//! Sevenfold HTTP server library (router, handlers, state).

pub mod gateway;
