//! Shared infrastructure
//!
//! This module contains the cross-cutting pieces used by every driver,
//! currently the logging abstraction.

pub mod logging;
