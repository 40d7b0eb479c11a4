use crate::Error;
use std::{fmt::Display, str::FromStr};

/// Float precision used for activations and compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    /// 16-bit IEEE 754 half precision. Needs `shader-f16` on WebGPU.
    F16,
    /// 32-bit IEEE 754 single precision.
    F32,
}

impl Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Precision::F16 => "f16",
                Precision::F32 => "f32",
            }
        )
    }
}

/// The quantization tag of an MLC build, e.g. `q4f16_1`.
///
/// Only the label is modelled: weight bits, compute precision and the
/// packing group revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quantization {
    /// Bits per quantized weight.
    pub weight_bits: u8,

    /// Precision of activations and dequantized compute.
    pub compute: Precision,

    /// Group/packing revision suffix.
    pub group: u8,
}

impl Display for Quantization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}{}_{}", self.weight_bits, self.compute, self.group)
    }
}

impl FromStr for Quantization {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidId(s.into());
        let rest = s.strip_prefix('q').ok_or_else(invalid)?;
        let (bits, rest) = rest.split_once('f').ok_or_else(invalid)?;
        let (precision, group) = rest.split_once('_').ok_or_else(invalid)?;

        let compute = match precision {
            "16" => Precision::F16,
            "32" => Precision::F32,
            _ => return Err(invalid()),
        };

        let quant = Self {
            weight_bits: bits.parse().map_err(|_| invalid())?,
            compute,
            group: group.parse().map_err(|_| invalid())?,
        };
        if quant.to_string() != s {
            return Err(invalid());
        }
        Ok(quant)
    }
}

#[test]
fn test_parse_quant() {
    let q: Quantization = "q3f16_1".parse().unwrap();
    assert_eq!(q.weight_bits, 3);
    assert_eq!(q.compute, Precision::F16);
    assert_eq!(q.group, 1);
    assert_eq!(q.to_string(), "q3f16_1");
}

#[test]
fn test_parse_quant_rejects_garbage() {
    assert!("MLC".parse::<Quantization>().is_err());
    assert!("q4f8_1".parse::<Quantization>().is_err());
    assert!("1_6b".parse::<Quantization>().is_err());
    assert!("qxf16_1".parse::<Quantization>().is_err());
}

#[test]
fn test_parse_quant_rejects_non_canonical() {
    assert!("q04f16_1".parse::<Quantization>().is_err());
    assert!("q4f16_01".parse::<Quantization>().is_err());
    assert!("q+4f16_1".parse::<Quantization>().is_err());
}
