//! # vpcc
//!
//! This library encodes and decodes the VP Codec Configuration record: the `vpcC`
//! atom that carries VP8/VP9 decoder configuration inside an ISO Base Media
//! (MP4/WebM-in-MP4) file. It reproduces the wire format bit-exactly, including
//! the packed color-config byte and the cross-field rules the format mandates.
//!
//! ## Atoms
//! MP4 files are made up of atoms, which are boxes of data with an upfront size
//! and a FourCC code to identify the type of box. This library only interprets
//! [VpcC]; any other atom is preserved as raw bytes via [Any::Unknown] so a
//! caller can walk a box tree without this crate getting in the way.
//!
//! Two wire layouts exist for the record. The versioned [FullBox](VpcC) form is
//! the only one ever written; some early muxers produced a legacy form without
//! the version/flags prefix, which can be read with [VpcC::decode_legacy] or by
//! passing [VpccLayout::Legacy] to [VpcC::decode_body_as]. Nothing in the
//! payload distinguishes the two, so the caller chooses.
//!
//! ## Traits
//! This library gates functionality behind a few traits:
//!
//! - [Atom] is primarily used for encoding/decoding but also provides [Atom::KIND].
//! - [Decode] and [Encode] when using byte slices.
//! - [ReadFrom] and [WriteTo] when using synchronous IO.
//! - **(feature = "tokio")** [AsyncReadFrom] and [AsyncWriteTo] when using asynchronous IO.
//! - [Buf] and [BufMut] for encoding/decoding contiguous byte slices.
//!
//! Additionally, there are some extra traits for decoding atoms given a header,
//! useful when the caller has already split the tree into header + body:
//!
//! - [DecodeAtom] when using byte slices.
//! - [ReadAtom] when using synchronous IO.
//! - **(feature = "tokio")** [AsyncReadAtom] when using asynchronous IO.
//!
//! ## Examples
//!
//! ### Decoding/encoding a byte buffer
//! ```rust
//! use vpcc::{Decode, Encode, VpcC};
//!
//! # fn main() -> anyhow::Result<()> {
//! // A 10-bit 4:2:0 config with BT.709 color and no extra data
//! let mut input: &[u8] = &[
//!     0x00, 0x00, 0x00, 0x14, b'v', b'p', b'c', b'C',
//!     0x01, 0x00, 0x00, 0x00, 0x00, 0x32, 0xa2, 0x01, 0x01, 0x01, 0x00, 0x00,
//! ];
//! let atom = VpcC::decode(&mut input)?;
//!
//! assert_eq!(atom.level, 0x32);
//! assert_eq!(atom.bit_depth, 10);
//!
//! // Encode it back
//! let mut output = Vec::new();
//! atom.encode(&mut output)?;
//! # Ok(()) }
//! ```
//!
//! ### Building a record by hand
//! ```rust
//! use vpcc::{Encode, VpcC};
//!
//! # fn main() -> anyhow::Result<()> {
//! let atom = VpcC {
//!     profile: 2,
//!     level: 41,
//!     bit_depth: 10,
//!     ..Default::default()
//! };
//!
//! // Decoding enforces the format's cross-field rules; check them up front
//! // when the record didn't come from the decoder.
//! atom.validate()?;
//!
//! let mut buf = Vec::new();
//! atom.encode(&mut buf)?;
//! assert_eq!(buf.len(), atom.size());
//! # Ok(()) }
//! ```
//!
//! ### Synchronous IO
//! ```rust
//! use vpcc::{Any, Atom, Header, ReadFrom, ReadAtom, VpcC};
//!
//! # fn main() -> anyhow::Result<()> {
//! # let mut reader = std::io::Cursor::new(b"\0\0\0\x14vpcC\x01\0\0\0\0\x32\xa2\x01\x01\x01\0\0");
//! let header = Header::read_from(&mut reader)?;
//! match header.kind {
//!     VpcC::KIND => {
//!         let vpcc = VpcC::read_atom(&header, &mut reader)?;
//!         assert_eq!(vpcc.bit_depth, 10);
//!     }
//!     _ => {
//!         // You can also use Any if you prefer
//!         let any = Any::read_atom(&header, &mut reader)?;
//!         println!("skipped atom: {:?}", any);
//!     }
//! };
//! # Ok(()) }
//! ```
//!
//! ### Asynchronous IO
//! Enable the `tokio` feature and use [AsyncReadFrom], [AsyncWriteTo], and
//! [AsyncReadAtom] instead.

mod any;
mod atom;
mod atom_ext;
mod buf;
mod coding;
mod error;
mod header;
mod io;
mod types;
mod vpcc;

pub use any::*;
pub use atom::*;
pub(crate) use atom_ext::*;
pub use buf::*;
pub use coding::*;
pub use error::*;
pub use header::*;
pub use io::*;
pub use types::*;
pub use vpcc::*;

#[cfg(feature = "tokio")]
mod tokio;

#[cfg(feature = "tokio")]
pub use self::tokio::*;
