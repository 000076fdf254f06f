//! Collection utilities.
//!
//! - [`RotatingBuffer`]: keeps the most recent `capacity` items and exports
//!   them oldest → newest, reusing the caller's vector when it is big enough.
//! - [`ListBuilder`]: a `Vec` wrapper with a chainable `append`.

pub mod buffer;
pub mod error;
pub mod list;

pub use buffer::RotatingBuffer;
pub use error::BufferError;
pub use list::ListBuilder;
