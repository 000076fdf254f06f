//! Task argument parsing.
//!
//! Arguments are `name=value` pairs; a bare `name` is specified without a
//! value. [`TaskArgs`] keeps them by name and offers typed lookups and
//! validation. [`Properties`] reads Java-style `.properties` files named by
//! an argument.

mod args;
pub mod error;
pub mod props;

pub use args::TaskArgs;
pub use error::ArgsError;
pub use props::Properties;
