//! This crate contains the code dedicated to parsing cpuinfo dumps.

pub mod cpuinfo;

/// Because the error that nom uses is rather lengthy and unintuitive, it's defined here
/// to simplify handling
pub(crate) type NomError<'a> = nom::Err<nom::error::Error<&'a str>>;
