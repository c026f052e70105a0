//! Protocol module - headers, frames, versions, and frame encoding.
//!
//! This module implements the text wire format for the outbound path:
//! - Ordered, duplicate-tolerant header lists
//! - Frame struct with well-known command and header-key constants
//! - Protocol version tokens and header-token escaping
//! - The frame serializer used by the writer task

mod encoder;
mod frame;
mod headers;
pub mod version;

pub use encoder::write_frame;
pub use frame::{
    commands, Frame, DFLT_CONTENT_TYPE, HK_CONTENT_LENGTH, HK_CONTENT_TYPE, HK_SUPPRESS_CL,
    HK_SUPPRESS_CT,
};
pub use headers::Headers;
