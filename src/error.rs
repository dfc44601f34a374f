use crate::FourCC;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("out of bounds")]
    OutOfBounds,

    #[error("short read")]
    ShortRead,

    #[error("over decode: {0}")]
    OverDecode(FourCC),

    #[error("under decode: {0}")]
    UnderDecode(FourCC),

    #[error("atom too large: {0}")]
    TooLarge(FourCC),

    #[error("invalid size")]
    InvalidSize,

    #[error("unknown version: {0}")]
    UnknownVersion(u8),

    #[error("invalid chroma subsampling: {0}")]
    InvalidChromaSubsampling(u8),

    #[error("RGB matrix coefficients require 4:4:4 chroma subsampling")]
    RgbRequiresFullChroma,

    #[error("missing box: {0}")]
    MissingBox(FourCC),

    #[error("unexpected box: {0}")]
    UnexpectedBox(FourCC),

    #[error("unexpected eof")]
    UnexpectedEof,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
