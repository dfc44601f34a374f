use crate::*;

use std::fmt;
use std::io::Read;

/// Any atom this crate understands, which is just [VpcC].
///
/// Everything else is preserved as raw bytes so a caller walking a box tree
/// can skip past atoms without interpreting them.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Any {
    VpcC(VpcC),
    Unknown(FourCC, Vec<u8>),
}

impl Any {
    /// Get the kind of the atom.
    pub fn kind(&self) -> FourCC {
        match self {
            Any::VpcC(_) => VpcC::KIND,
            Any::Unknown(kind, _) => *kind,
        }
    }
}

impl Decode for Any {
    fn decode<B: Buf>(buf: &mut B) -> Result<Self> {
        match Self::decode_maybe(buf)? {
            Some(any) => Ok(any),
            None => Err(Error::OutOfBounds),
        }
    }
}

impl DecodeMaybe for Any {
    fn decode_maybe<B: Buf>(buf: &mut B) -> Result<Option<Self>> {
        let header = match Header::decode_maybe(buf)? {
            Some(header) => header,
            None => return Ok(None),
        };

        let size = header.size.unwrap_or(buf.remaining());
        if size > buf.remaining() {
            return Ok(None);
        }

        Ok(Some(Self::decode_atom(&header, buf)?))
    }
}

impl Encode for Any {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        let start = buf.len();
        0u32.encode(buf)?;
        self.kind().encode(buf)?;

        match self {
            Any::VpcC(inner) => Atom::encode_body(inner, buf),
            Any::Unknown(_, data) => data.encode(buf),
        }?;

        let size: u32 = (buf.len() - start)
            .try_into()
            .map_err(|_| Error::TooLarge(self.kind()))?;
        buf.set_slice(start, &size.to_be_bytes());

        Ok(())
    }
}

impl DecodeAtom for Any {
    /// Decode the atom from a header and payload.
    fn decode_atom<B: Buf>(header: &Header, buf: &mut B) -> Result<Self> {
        let size = header.size.unwrap_or(buf.remaining());
        if size > buf.remaining() {
            return Err(Error::OutOfBounds);
        }

        let mut body = &mut buf.slice(size);

        let atom = match header.kind {
            VpcC::KIND => Any::VpcC(match VpcC::decode_body(&mut body) {
                Ok(atom) => atom,
                Err(Error::OutOfBounds) => return Err(Error::OverDecode(VpcC::KIND)),
                Err(Error::ShortRead) => return Err(Error::UnderDecode(VpcC::KIND)),
                Err(err) => return Err(err),
            }),
            _ => {
                let body = Vec::decode(body)?;
                Any::Unknown(header.kind, body)
            }
        };

        if body.has_remaining() {
            tracing::warn!("under decode: {:?}", header.kind);
        }

        buf.advance(size);

        Ok(atom)
    }
}

impl fmt::Debug for Any {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Any::VpcC(inner) => inner.fmt(f),
            Any::Unknown(kind, body) => {
                write!(f, "Unknown {{ kind: {:?}, size: {:?} }}", kind, body.len())
            }
        }
    }
}

impl From<VpcC> for Any {
    fn from(inner: VpcC) -> Self {
        Any::VpcC(inner)
    }
}

impl ReadFrom for Any {
    fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        <Option<Any> as ReadFrom>::read_from(r)?.ok_or(Error::UnexpectedEof)
    }
}

impl ReadFrom for Option<Any> {
    fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let header = match <Option<Header> as ReadFrom>::read_from(r)? {
            Some(header) => header,
            None => return Ok(None),
        };

        let body = &mut header.read_body(r)?;
        Ok(Some(Any::decode_atom(&header, body)?))
    }
}

impl ReadAtom for Any {
    fn read_atom<R: Read>(header: &Header, r: &mut R) -> Result<Self> {
        let body = &mut header.read_body(r)?;
        Any::decode_atom(header, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_vpcc() {
        let expected = VpcC::default();

        let mut buf = Vec::new();
        Any::from(expected.clone()).encode(&mut buf).unwrap();

        let decoded = Any::decode(&mut buf.as_slice()).unwrap();
        assert_eq!(decoded, Any::VpcC(expected));
    }

    #[test]
    fn test_any_unknown() {
        let input: &[u8] = &[
            0x00, 0x00, 0x00, 0x0c, b'w', b'a', b'v', b'e', 0xde, 0xad, 0xbe, 0xef,
        ];

        let mut buf = input;
        let decoded = Any::decode(&mut buf).unwrap();
        assert_eq!(decoded, Any::Unknown(b"wave".into(), vec![0xde, 0xad, 0xbe, 0xef]));

        let mut output = Vec::new();
        decoded.encode(&mut output).unwrap();
        assert_eq!(input, output.as_slice());
    }
}
