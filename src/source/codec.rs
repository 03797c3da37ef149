//! Codec tags
//!
//! The set of RTP encodings a decoding pipeline knows how to depayload.
//! Negotiated encoding names map onto exactly one variant; anything else is
//! an explicit [`SourceError::UnsupportedCodec`] rather than a silent
//! fallback.

use std::fmt;
use std::str::FromStr;

use super::error::SourceError;

/// Video encoding carried by a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    /// H.264 / AVC
    H264,
    /// H.265 / HEVC
    H265,
    /// Motion JPEG
    Jpeg,
    /// VP8
    Vp8,
    /// VP9
    Vp9,
    /// H.263
    H263,
}

impl Codec {
    /// All supported codecs
    pub const ALL: [Codec; 6] = [
        Codec::H264,
        Codec::H265,
        Codec::Jpeg,
        Codec::Vp8,
        Codec::Vp9,
        Codec::H263,
    ];

    /// Resolve an RTP `encoding-name` (case-insensitive)
    pub fn from_encoding_name(name: &str) -> Result<Self, SourceError> {
        Self::ALL
            .into_iter()
            .find(|codec| codec.encoding_name().eq_ignore_ascii_case(name))
            .ok_or_else(|| SourceError::UnsupportedCodec(name.to_string()))
    }

    /// RTP `encoding-name` for this codec
    pub fn encoding_name(&self) -> &'static str {
        match self {
            Codec::H264 => "H264",
            Codec::H265 => "H265",
            Codec::Jpeg => "JPEG",
            Codec::Vp8 => "VP8",
            Codec::Vp9 => "VP9",
            Codec::H263 => "H263",
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.encoding_name())
    }
}

impl FromStr for Codec {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_encoding_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_encoding_name() {
        assert_eq!(Codec::from_encoding_name("H264"), Ok(Codec::H264));
        assert_eq!(Codec::from_encoding_name("h265"), Ok(Codec::H265));
        assert_eq!(Codec::from_encoding_name("jpeg"), Ok(Codec::Jpeg));
        assert_eq!("Vp9".parse::<Codec>(), Ok(Codec::Vp9));
    }

    #[test]
    fn test_unsupported_codec() {
        let result = Codec::from_encoding_name("AV1");
        assert_eq!(result, Err(SourceError::UnsupportedCodec("AV1".into())));
    }

    #[test]
    fn test_encoding_name_roundtrips_for_every_codec() {
        for codec in Codec::ALL {
            assert_eq!(Codec::from_encoding_name(codec.encoding_name()), Ok(codec));
        }
    }
}
