//! I/O utilities for buffer handling
//!
//! This module provides byte-order aware access to in-memory buffers.

pub mod byte_order;
