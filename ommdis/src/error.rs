use thiserror::Error;

/// Fatal per-file failures. The driver prints these as
/// `<path>: <reason>.` on stderr and exits with status 1.
#[derive(Error, Debug)]
pub enum Error {
    #[error("not an OMM file")]
    NotOmm,

    #[error("unexpected end of file")]
    Truncated,

    #[error("{0}")]
    Map(#[from] std::io::Error),
}
