// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for PawMarket.
//!
//! Buyers browse and filter listings, view photos and send inquiries through
//! the public routes. Admins log in for a session token and manage listings,
//! read inquiries and view dashboard metrics through `/v1/admin/*`.

pub mod auth;
pub mod handlers;
pub mod server;

pub use auth::{AdminCredentials, SessionStore};
pub use server::{GatewayState, ServerConfig, router, start_server};
