//! Asset definitions and the decimal value codec.
//!
//! An asset binds human-facing monikers to exactly one color and a display
//! unit. The unit is a power of ten: with `unit = 10^k` a value of `1` is the
//! smallest representable amount and displays with `k` fractional digits.

use crate::{ColorDefinition, TypesError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Bytes of the color-set digest kept in the asset id.
const ASSET_ID_DIGEST_LEN: usize = 10;

/// Serializable description of an asset definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDefinitionData {
    pub monikers: Vec<String>,
    pub color_descs: Vec<String>,
    pub unit: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetDefinition {
    monikers: Vec<String>,
    colordef: ColorDefinition,
    unit: u64,
    /// `log10(unit)`: number of fractional digits.
    digits: u32,
    id: String,
}

impl AssetDefinition {
    /// Build a definition. `unit` defaults to 1.
    pub fn new(
        monikers: Vec<String>,
        color_defs: Vec<ColorDefinition>,
        unit: Option<u64>,
    ) -> Result<Self, TypesError> {
        if color_defs.len() != 1 {
            return Err(TypesError::MultiColorAsset(color_defs.len()));
        }
        let unit = unit.unwrap_or(1);
        let digits = power_of_ten_exponent(unit).ok_or(TypesError::InvalidUnit(unit))?;
        if i64::try_from(unit).is_err() {
            return Err(TypesError::InvalidUnit(unit));
        }

        let descs: Vec<&str> = color_defs.iter().map(|c| c.desc()).collect();
        let id = color_set_hash(&descs);
        let colordef = color_defs.into_iter().next().ok_or(TypesError::MultiColorAsset(0))?;

        Ok(Self {
            monikers,
            colordef,
            unit,
            digits,
            id,
        })
    }

    /// Derived identifier: equal color sets give equal ids.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn monikers(&self) -> &[String] {
        &self.monikers
    }

    pub fn color_definition(&self) -> &ColorDefinition {
        &self.colordef
    }

    pub fn unit(&self) -> u64 {
        self.unit
    }

    pub fn data(&self) -> AssetDefinitionData {
        AssetDefinitionData {
            monikers: self.monikers.clone(),
            color_descs: vec![self.colordef.desc().to_string()],
            unit: self.unit,
        }
    }

    /// Parse a decimal string into smallest units.
    ///
    /// Fractional digits beyond the unit's precision are truncated. The sign
    /// of the whole string applies to the fractional part too, so `-0.5`
    /// parses to minus half a unit.
    pub fn parse_value(&self, portion: &str) -> Result<i64, TypesError> {
        let invalid = || TypesError::InvalidFormat(portion.to_string());

        let (whole, fraction) = match portion.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (portion, None),
        };
        let negative = portion.starts_with('-');

        let whole_value: i64 = match (whole, fraction) {
            ("" | "-" | "+", Some(f)) if !f.is_empty() => 0,
            _ => whole.parse().map_err(|_| invalid())?,
        };
        let mut value = whole_value
            .checked_mul(self.unit as i64)
            .ok_or_else(invalid)?;

        if let Some(fraction) = fraction {
            if !fraction.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let digits = self.digits as usize;
            if digits > 0 {
                let mut cents: String = fraction.chars().take(digits).collect();
                while cents.len() < digits {
                    cents.push('0');
                }
                let cent_value: i64 = cents.parse().map_err(|_| invalid())?;
                value = if negative {
                    value.checked_sub(cent_value)
                } else {
                    value.checked_add(cent_value)
                }
                .ok_or_else(invalid)?;
            }
        }

        Ok(value)
    }

    /// Format smallest units as a decimal string with exactly `log10(unit)`
    /// fractional digits. A unit of 1 formats without a fractional part.
    pub fn format_value(&self, value: i64) -> String {
        let unit = self.unit as i64;
        let whole = value / unit;
        if self.digits == 0 {
            return whole.to_string();
        }

        let remainder = (value % unit).unsigned_abs();
        let sign = if whole == 0 && value < 0 { "-" } else { "" };
        format!(
            "{sign}{whole}.{remainder:0width$}",
            width = self.digits as usize
        )
    }
}

fn power_of_ten_exponent(mut unit: u64) -> Option<u32> {
    if unit == 0 {
        return None;
    }
    let mut exponent = 0;
    while unit % 10 == 0 {
        unit /= 10;
        exponent += 1;
    }
    (unit == 1).then_some(exponent)
}

/// Base58 of the leading digest bytes of the JSON-encoded descriptor list.
fn color_set_hash(descs: &[&str]) -> String {
    let json = serde_json::to_string(descs).unwrap_or_default();
    let digest = Sha256::digest(json.as_bytes());
    bs58::encode(&digest[..ASSET_ID_DIGEST_LEN]).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColorId;

    fn asset(unit: u64) -> AssetDefinition {
        AssetDefinition::new(
            vec!["gold".into()],
            vec![ColorDefinition::new(ColorId(1), "epobc:aa:0:10")],
            Some(unit),
        )
        .unwrap()
    }

    fn bitcoin() -> AssetDefinition {
        AssetDefinition::new(
            vec!["bitcoin".into()],
            vec![ColorDefinition::uncolored()],
            Some(100_000_000),
        )
        .unwrap()
    }

    #[test]
    fn rejects_non_power_of_ten_unit() {
        let result = AssetDefinition::new(
            vec!["x".into()],
            vec![ColorDefinition::uncolored()],
            Some(20),
        );
        assert_eq!(result.unwrap_err(), TypesError::InvalidUnit(20));
        assert!(AssetDefinition::new(vec![], vec![ColorDefinition::uncolored()], Some(0)).is_err());
    }

    #[test]
    fn rejects_multiple_colors() {
        let result = AssetDefinition::new(
            vec!["x".into()],
            vec![ColorDefinition::uncolored(), ColorDefinition::new(ColorId(2), "b")],
            None,
        );
        assert_eq!(result.unwrap_err(), TypesError::MultiColorAsset(2));
    }

    #[test]
    fn unit_defaults_to_one() {
        let def = AssetDefinition::new(vec!["x".into()], vec![ColorDefinition::uncolored()], None)
            .unwrap();
        assert_eq!(def.unit(), 1);
        assert_eq!(def.format_value(5), "5");
        assert_eq!(def.parse_value("5.9").unwrap(), 5);
    }

    #[test]
    fn id_is_derived_from_color_set() {
        let a = asset(100);
        let b = AssetDefinition::new(
            vec!["other-name".into()],
            vec![ColorDefinition::new(ColorId(1), "epobc:aa:0:10")],
            Some(1),
        )
        .unwrap();
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), bitcoin().id());
    }

    #[test]
    fn parse_plain_values() {
        let def = bitcoin();
        assert_eq!(def.parse_value("1").unwrap(), 100_000_000);
        assert_eq!(def.parse_value("0.001").unwrap(), 100_000);
        assert_eq!(def.parse_value("1.5").unwrap(), 150_000_000);
        assert_eq!(def.parse_value(".5").unwrap(), 50_000_000);
    }

    #[test]
    fn parse_truncates_excess_precision() {
        let def = asset(100);
        assert_eq!(def.parse_value("1.239").unwrap(), 123);
    }

    #[test]
    fn parse_negative_fraction_follows_sign() {
        let def = asset(100);
        assert_eq!(def.parse_value("-0.5").unwrap(), -50);
        assert_eq!(def.parse_value("-1.25").unwrap(), -125);
    }

    #[test]
    fn parse_rejects_garbage() {
        let def = asset(100);
        for bad in ["", "abc", "1.2.3", "1.x", ".", "1e5"] {
            assert!(
                matches!(def.parse_value(bad), Err(TypesError::InvalidFormat(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn format_values() {
        let def = bitcoin();
        assert_eq!(def.format_value(5000), "0.00005000");
        assert_eq!(def.format_value(150_000_000), "1.50000000");
        assert_eq!(def.format_value(-5), "-0.00000005");
        assert_eq!(def.format_value(-150_000_000), "-1.50000000");
    }

    #[test]
    fn format_then_parse_extremes() {
        let def = asset(100);
        for v in [i64::MIN, i64::MIN + 1, -1, 0, 1, i64::MAX] {
            assert_eq!(def.parse_value(&def.format_value(v)).unwrap(), v);
        }
    }

    #[test]
    fn data_lists_single_color_desc() {
        let data = asset(100).data();
        assert_eq!(data.color_descs, vec!["epobc:aa:0:10".to_string()]);
        assert_eq!(data.unit, 100);
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("colorDescs").is_some());
    }
}
