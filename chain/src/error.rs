use thiserror::Error;

/// Violation of a chain contract.
///
/// The panicking entry points panic with the `Display` of these; the `try_` variants return them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("chain: build called with zero values")]
    EmptyBuild,

    #[error("chain: target must not be nil")]
    NilTarget,

    #[error("chain: target must be a pointer, not {type_name}")]
    NotPointer {
        type_name: &'static str,
    },
}
