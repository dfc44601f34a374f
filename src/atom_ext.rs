use crate::*;

// The FullBox prefix: a one byte version and 24 bits of flags, packed into a u32.
pub(crate) trait Ext: Default {
    fn encode(&self) -> Result<u32>;
    fn decode(v: u32) -> Result<Self>;
}

// Rather than encoding/decoding the version and flags in every atom, use this trait.
pub(crate) trait AtomExt: Sized {
    const KIND_EXT: FourCC;

    type Ext: Ext;

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<Self::Ext>;
    fn decode_body_ext<B: Buf>(buf: &mut B, ext: Self::Ext) -> Result<Self>;
}

impl<T: AtomExt> Atom for T {
    const KIND: FourCC = Self::KIND_EXT;

    fn decode_body<B: Buf>(buf: &mut B) -> Result<Self> {
        let ext = Ext::decode(u32::decode(buf)?)?;
        AtomExt::decode_body_ext(buf, ext)
    }

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        // Reserve space for the version/flags first
        let start = buf.len();
        0u32.encode(buf)?;

        // That way the body can return them as part of the trait, avoiding boilerplate
        let ext = self.encode_body_ext(buf)?;

        // Go back and update the version/flags
        let header = ext.encode()?;
        buf.set_slice(start, &header.to_be_bytes());

        Ok(())
    }
}
