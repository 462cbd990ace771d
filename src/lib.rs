//! Campus bookstore front-end logic.
//!
//! `storeflow` models the interactive transaction flowchart of a campus
//! bookstore: a guided walkthrough over an ordered list of process steps, the
//! node and connector views derived from walkthrough state, and export of the
//! flowchart to PNG, PDF, SVG and JSON. Around that core sit the shop
//! catalogue, a demo order-status lookup and a contact form that only logs
//! what it receives.
//!
//! # Modules
//!
//! - [`flow`]: Step registry, walkthrough controller and autoplay session
//! - [`render`]: Node, connector and scene views as SVG
//! - [`export`]: PNG, PDF, SVG and JSON artefacts
//! - [`orders`]: Order status lookup against demo data
//! - [`contact`]: Contact form validation and the store directory
//! - [`catalog`]: Shop products and client-side search
//! - [`config`]: Configuration system with layered precedence (CLI > env > file > defaults)
//! - [`logging`]: Log filter resolution and subscriber installation
//! - [`error`]: Semantic error types for the application

pub mod catalog;
pub mod config;
pub mod contact;
pub mod error;
pub mod export;
pub mod flow;
pub mod logging;
pub mod orders;
pub mod render;
