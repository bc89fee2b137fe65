/*
 * Responsibility
 * - Public surface of the middleware layer
 * - auth: per-call token validation; http: transport-level layers
 */
pub mod auth;
pub mod http;
