// ABOUTME: Validated domain types.
// ABOUTME: Values that are passed verbatim to external tools are checked on construction.

mod function_name;

pub use function_name::{FunctionName, FunctionNameError};
