/*
 * Responsibility
 * - Clients for collaborating services (auth, vessel)
 * - Each client exposes a small trait so handlers/middleware stay testable
 */
pub mod auth;
pub mod vessel;
