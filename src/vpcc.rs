use crate::*;

/// VP Codec Configuration record, carried by the `vpcC` atom inside a
/// VP8/VP9 sample entry.
///
/// See <https://www.webmproject.org/vp9/mp4/>
///
/// The `flags` field is reserved by the format: it's kept as decoded for
/// inspection but always written back as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VpcC {
    pub flags: u24,
    pub profile: u8,
    pub level: u8,

    /// Bits per colour sample, 4 bits on the wire.
    pub bit_depth: u8,

    /// 3 bits on the wire, but only 0..=3 are defined; the versioned decoder
    /// rejects anything larger.
    pub chroma_subsampling: u8,
    pub video_full_range_flag: bool,

    /// ISO/IEC 23001-8 colour description. Opaque here, except that a value
    /// of 0 (RGB) for `matrix_coefficients` requires 4:4:4 chroma.
    pub colour_primaries: u8,
    pub transfer_characteristics: u8,
    pub matrix_coefficients: u8,

    /// Trailing codec specific bytes, often empty.
    pub codec_initialization_data: Vec<u8>,
}

impl Default for VpcC {
    fn default() -> Self {
        Self {
            flags: Default::default(),
            profile: 0,
            level: 0,
            bit_depth: 8,
            chroma_subsampling: 1, // 4:2:0
            video_full_range_flag: false,
            colour_primaries: 1, // BT.709
            transfer_characteristics: 1,
            matrix_coefficients: 1,
            codec_initialization_data: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum VpccVersion {
    #[default]
    V1 = 1,
}

impl TryFrom<u8> for VpccVersion {
    type Error = Error;

    fn try_from(v: u8) -> Result<Self> {
        match v {
            1 => Ok(Self::V1),
            _ => Err(Error::UnknownVersion(v)),
        }
    }
}

// Unlike most FullBox atoms, the raw flag bits are carried through to the
// record instead of being matched against named flags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct VpccExt {
    pub version: VpccVersion,
    pub flags: u24,
}

impl Ext for VpccExt {
    fn encode(&self) -> Result<u32> {
        Ok(((self.version as u32) << 24) | u32::from(self.flags))
    }

    fn decode(v: u32) -> Result<Self> {
        let b = v.to_be_bytes();
        Ok(Self {
            version: VpccVersion::try_from(b[0])?,
            flags: [b[1], b[2], b[3]].into(),
        })
    }
}

impl AtomExt for VpcC {
    const KIND_EXT: FourCC = FourCC::new(b"vpcC");

    type Ext = VpccExt;

    fn decode_body_ext<B: Buf>(buf: &mut B, ext: VpccExt) -> Result<Self> {
        let profile = u8::decode(buf)?;
        let level = u8::decode(buf)?;

        let config = u8::decode(buf)?;
        let bit_depth = (config >> 4) & 0x0f;
        let chroma_subsampling = (config >> 1) & 0x07;
        let video_full_range_flag = (config & 0x01) == 1;

        if chroma_subsampling > 3 {
            return Err(Error::InvalidChromaSubsampling(chroma_subsampling));
        }

        let colour_primaries = u8::decode(buf)?;
        let transfer_characteristics = u8::decode(buf)?;
        let matrix_coefficients = u8::decode(buf)?;

        if matrix_coefficients == 0 && chroma_subsampling != 3 {
            return Err(Error::RgbRequiresFullChroma);
        }

        let size = u16::decode(buf)? as usize;
        let codec_initialization_data = Vec::decode_exact(buf, size)?;

        Ok(Self {
            flags: ext.flags,
            profile,
            level,
            bit_depth,
            chroma_subsampling,
            video_full_range_flag,
            colour_primaries,
            transfer_characteristics,
            matrix_coefficients,
            codec_initialization_data,
        })
    }

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<VpccExt> {
        self.profile.encode(buf)?;
        self.level.encode(buf)?;

        ((self.bit_depth << 4)
            | ((self.chroma_subsampling & 0x07) << 1)
            | (self.video_full_range_flag as u8))
            .encode(buf)?;

        self.colour_primaries.encode(buf)?;
        self.transfer_characteristics.encode(buf)?;
        self.matrix_coefficients.encode(buf)?;

        let size: u16 = self
            .codec_initialization_data
            .len()
            .try_into()
            .map_err(|_| Error::TooLarge(Self::KIND_EXT))?;
        size.encode(buf)?;
        self.codec_initialization_data.encode(buf)?;

        // The flags are reserved, so whatever was decoded is not written back.
        Ok(VpccVersion::V1.into())
    }
}

impl From<VpccVersion> for VpccExt {
    fn from(version: VpccVersion) -> Self {
        Self {
            version,
            flags: Default::default(),
        }
    }
}

/// Which wire form of the record to expect when decoding.
///
/// Some early muxers wrote the record without the version/flags prefix and
/// without a length in front of the trailing data. Nothing in the payload
/// itself distinguishes the two forms, so the caller has to pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VpccLayout {
    /// The versioned form, the only one ever written by [Encode].
    Versioned,
    /// The pre-release form, read only.
    Legacy,
}

impl VpcC {
    /// The total encoded size in bytes, including the atom header.
    pub fn size(&self) -> usize {
        // header + version/flags + fixed fields + data length prefix
        8 + 4 + 6 + 2 + self.codec_initialization_data.len()
    }

    /// Decode an atom body in the given layout.
    pub fn decode_body_as<B: Buf>(buf: &mut B, layout: VpccLayout) -> Result<Self> {
        match layout {
            VpccLayout::Versioned => Self::decode_body(buf),
            VpccLayout::Legacy => Self::decode_legacy(buf),
        }
    }

    /// Decode the legacy form of the record: a single reserved byte instead
    /// of the version and flags, and all bytes after the fixed fields taken
    /// as `codec_initialization_data`.
    ///
    /// The legacy decoder skips the cross-field checks, matching the looser
    /// files found in the wild. Use [VpcC::validate] afterwards if needed.
    pub fn decode_legacy<B: Buf>(buf: &mut B) -> Result<Self> {
        u8::decode(buf)?; // reserved

        let profile = u8::decode(buf)?;
        let level = u8::decode(buf)?;

        let config = u8::decode(buf)?;
        let bit_depth = (config >> 4) & 0x0f;
        let chroma_subsampling = (config >> 1) & 0x07;
        let video_full_range_flag = (config & 0x01) == 1;

        let colour_primaries = u8::decode(buf)?;
        let transfer_characteristics = u8::decode(buf)?;
        let matrix_coefficients = u8::decode(buf)?;

        let codec_initialization_data = Vec::decode(buf)?;

        Ok(Self {
            flags: Default::default(),
            profile,
            level,
            bit_depth,
            chroma_subsampling,
            video_full_range_flag,
            colour_primaries,
            transfer_characteristics,
            matrix_coefficients,
            codec_initialization_data,
        })
    }

    /// Re-check the rules the versioned decoder enforces, for records built
    /// by hand before encoding them.
    pub fn validate(&self) -> Result<()> {
        if self.chroma_subsampling > 3 {
            return Err(Error::InvalidChromaSubsampling(self.chroma_subsampling));
        }

        if self.matrix_coefficients == 0 && self.chroma_subsampling != 3 {
            return Err(Error::RgbRequiresFullChroma);
        }

        Ok(())
    }

    /// The scalar fields as ordered label/value pairs, for display.
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("profile", self.profile.to_string()),
            ("level", self.level.to_string()),
            ("bit_depth", self.bit_depth.to_string()),
            ("chroma_subsampling", self.chroma_subsampling.to_string()),
            (
                "video_full_range_flag",
                self.video_full_range_flag.to_string(),
            ),
            ("colour_primaries", self.colour_primaries.to_string()),
            (
                "transfer_characteristics",
                self.transfer_characteristics.to_string(),
            ),
            ("matrix_coefficients", self.matrix_coefficients.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vpcc() {
        let expected = VpcC {
            profile: 0,
            level: 0x1f,
            bit_depth: 8,
            chroma_subsampling: 1,
            video_full_range_flag: false,
            colour_primaries: 1,
            transfer_characteristics: 1,
            matrix_coefficients: 1,
            ..Default::default()
        };
        expected.assert_encode_decode();
    }

    #[test]
    fn test_vpcc_bytes() {
        let expected = VpcC {
            profile: 0,
            level: 0x32,
            bit_depth: 8,
            chroma_subsampling: 0,
            video_full_range_flag: false,
            colour_primaries: 1,
            transfer_characteristics: 1,
            matrix_coefficients: 1,
            ..Default::default()
        };

        let mut buf = Vec::new();
        expected.encode(&mut buf).unwrap();

        assert_eq!(
            buf,
            vec![
                0x00, 0x00, 0x00, 0x14, b'v', b'p', b'c', b'C', // header
                0x01, 0x00, 0x00, 0x00, // version + flags
                0x00, 0x32, 0x80, 0x01, 0x01, 0x01, 0x00, 0x00,
            ]
        );

        let decoded = VpcC::decode(&mut buf.as_slice()).unwrap();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_vpcc_hdr_bytes() {
        // 10-bit 4:4:4 full range, BT.2020 primaries, PQ transfer.
        let expected = VpcC {
            profile: 2,
            level: 0x29,
            bit_depth: 10,
            chroma_subsampling: 3,
            video_full_range_flag: true,
            colour_primaries: 9,
            transfer_characteristics: 16,
            matrix_coefficients: 9,
            ..Default::default()
        };

        let mut buf = Vec::new();
        expected.encode(&mut buf).unwrap();

        // (10 << 4) | (3 << 1) | 1 == 0xa7
        assert_eq!(
            buf[8..],
            [0x01, 0x00, 0x00, 0x00, 0x02, 0x29, 0xa7, 0x09, 0x10, 0x09, 0x00, 0x00]
        );

        let decoded = VpcC::decode(&mut buf.as_slice()).unwrap();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_vpcc_init_data() {
        let expected = VpcC {
            codec_initialization_data: vec![0x0a, 0x0b, 0x0c],
            ..Default::default()
        };

        let mut buf = Vec::new();
        expected.encode(&mut buf).unwrap();

        // 2 byte length prefix in front of the data
        assert_eq!(&buf[18..], &[0x00, 0x03, 0x0a, 0x0b, 0x0c]);

        let decoded = VpcC::decode(&mut buf.as_slice()).unwrap();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_vpcc_empty_init_data() {
        let expected = VpcC {
            codec_initialization_data: Vec::new(),
            ..Default::default()
        };

        let mut buf = Vec::new();
        expected.encode(&mut buf).unwrap();

        let decoded = VpcC::decode(&mut buf.as_slice()).unwrap();
        assert_eq!(decoded.codec_initialization_data, Vec::<u8>::new());
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_vpcc_size() {
        let mut atom = VpcC::default();

        let mut buf = Vec::new();
        atom.encode(&mut buf).unwrap();
        assert_eq!(atom.size(), buf.len());

        atom.codec_initialization_data = vec![0; 17];

        let mut buf = Vec::new();
        atom.encode(&mut buf).unwrap();
        assert_eq!(atom.size(), buf.len());
    }

    #[test]
    fn test_vpcc_rejects_chroma() {
        for chroma in 4..8u8 {
            let config = (8 << 4) | (chroma << 1);
            let bytes = [
                0x00, 0x00, 0x00, 0x14, b'v', b'p', b'c', b'C', //
                0x01, 0x00, 0x00, 0x00, 0x00, 0x32, config, 0x01, 0x01, 0x01, 0x00, 0x00,
            ];

            let err = VpcC::decode(&mut bytes.as_slice()).unwrap_err();
            assert!(matches!(err, Error::InvalidChromaSubsampling(c) if c == chroma));
        }
    }

    #[test]
    fn test_vpcc_rejects_rgb_without_full_chroma() {
        // matrix_coefficients == 0 (RGB) but chroma_subsampling == 0
        let bytes = [
            0x00, 0x00, 0x00, 0x14, b'v', b'p', b'c', b'C', //
            0x01, 0x00, 0x00, 0x00, 0x00, 0x32, 0x80, 0x01, 0x01, 0x00, 0x00, 0x00,
        ];

        let err = VpcC::decode(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, Error::RgbRequiresFullChroma));

        // RGB with 4:4:4 is fine: config = (8 << 4) | (3 << 1) == 0x86
        let bytes = [
            0x00, 0x00, 0x00, 0x14, b'v', b'p', b'c', b'C', //
            0x01, 0x00, 0x00, 0x00, 0x00, 0x32, 0x86, 0x01, 0x01, 0x00, 0x00, 0x00,
        ];

        let decoded = VpcC::decode(&mut bytes.as_slice()).unwrap();
        assert_eq!(decoded.chroma_subsampling, 3);
        assert_eq!(decoded.matrix_coefficients, 0);
    }

    #[test]
    fn test_vpcc_rejects_version() {
        for version in [0u8, 2, 0xff] {
            let bytes = [
                0x00, 0x00, 0x00, 0x14, b'v', b'p', b'c', b'C', //
                version, 0x00, 0x00, 0x00, 0x00, 0x32, 0x80, 0x01, 0x01, 0x01, 0x00, 0x00,
            ];

            let err = VpcC::decode(&mut bytes.as_slice()).unwrap_err();
            assert!(matches!(err, Error::UnknownVersion(v) if v == version));
        }
    }

    #[test]
    fn test_vpcc_truncated() {
        // Claims 4 bytes of initialization data but only carries 2.
        let bytes = [
            0x00, 0x00, 0x00, 0x16, b'v', b'p', b'c', b'C', //
            0x01, 0x00, 0x00, 0x00, 0x00, 0x32, 0x80, 0x01, 0x01, 0x01, 0x00, 0x04, 0xaa, 0xbb,
        ];

        let err = VpcC::decode(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, Error::OverDecode(kind) if kind == VpcC::KIND));
    }

    #[test]
    fn test_vpcc_flags_not_round_tripped() {
        let bytes = [
            0x00, 0x00, 0x00, 0x14, b'v', b'p', b'c', b'C', //
            0x01, 0x00, 0x00, 0x01, 0x00, 0x32, 0x80, 0x01, 0x01, 0x01, 0x00, 0x00,
        ];

        let decoded = VpcC::decode(&mut bytes.as_slice()).unwrap();
        assert_eq!(u32::from(decoded.flags), 1);

        // Reserved flags are forced back to zero on encode.
        let mut buf = Vec::new();
        decoded.encode(&mut buf).unwrap();
        assert_eq!(&buf[9..12], &[0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_vpcc_legacy() {
        let body = [0x00, 0x02, 0x29, 0xa7, 0x09, 0x10, 0x09, 0xde, 0xad];

        let decoded = VpcC::decode_legacy(&mut body.as_slice()).unwrap();
        assert_eq!(decoded.profile, 2);
        assert_eq!(decoded.level, 0x29);
        assert_eq!(decoded.bit_depth, 10);
        assert_eq!(decoded.chroma_subsampling, 3);
        assert!(decoded.video_full_range_flag);
        assert_eq!(decoded.colour_primaries, 9);
        assert_eq!(decoded.transfer_characteristics, 16);
        assert_eq!(decoded.matrix_coefficients, 9);
        assert_eq!(decoded.codec_initialization_data, vec![0xde, 0xad]);

        // Without trailing bytes the data is empty.
        let decoded = VpcC::decode_legacy(&mut body[..7].as_ref()).unwrap();
        assert!(decoded.codec_initialization_data.is_empty());
    }

    #[test]
    fn test_vpcc_legacy_is_lenient() {
        // chroma_subsampling == 4 and RGB without 4:4:4, both rejected by the
        // versioned decoder, pass through the legacy one.
        let body = [0x00, 0x00, 0x32, (8 << 4) | (4 << 1), 0x01, 0x01, 0x00];

        let decoded = VpcC::decode_legacy(&mut body.as_slice()).unwrap();
        assert_eq!(decoded.chroma_subsampling, 4);
        assert_eq!(decoded.matrix_coefficients, 0);

        assert!(decoded.validate().is_err());
    }

    #[test]
    fn test_vpcc_layout() {
        let versioned = [
            0x01, 0x00, 0x00, 0x00, 0x00, 0x32, 0x80, 0x01, 0x01, 0x01, 0x00, 0x00,
        ];
        let decoded =
            VpcC::decode_body_as(&mut versioned.as_slice(), VpccLayout::Versioned).unwrap();
        assert_eq!(decoded.level, 0x32);

        let legacy = [0x00, 0x00, 0x32, 0x80, 0x01, 0x01, 0x01];
        let decoded = VpcC::decode_body_as(&mut legacy.as_slice(), VpccLayout::Legacy).unwrap();
        assert_eq!(decoded.level, 0x32);
    }

    #[test]
    fn test_vpcc_validate() {
        let mut atom = VpcC::default();
        assert!(atom.validate().is_ok());

        atom.chroma_subsampling = 5;
        assert!(matches!(
            atom.validate().unwrap_err(),
            Error::InvalidChromaSubsampling(5)
        ));

        atom.chroma_subsampling = 1;
        atom.matrix_coefficients = 0;
        assert!(matches!(
            atom.validate().unwrap_err(),
            Error::RgbRequiresFullChroma
        ));

        atom.chroma_subsampling = 3;
        assert!(atom.validate().is_ok());
    }

    #[test]
    fn test_vpcc_describe() {
        let atom = VpcC {
            profile: 2,
            level: 41,
            ..Default::default()
        };

        let fields = atom.describe();
        let labels: Vec<_> = fields.iter().map(|(label, _)| *label).collect();
        assert_eq!(
            labels,
            [
                "profile",
                "level",
                "bit_depth",
                "chroma_subsampling",
                "video_full_range_flag",
                "colour_primaries",
                "transfer_characteristics",
                "matrix_coefficients",
            ]
        );

        assert_eq!(fields[0].1, "2");
        assert_eq!(fields[1].1, "41");
    }
}
