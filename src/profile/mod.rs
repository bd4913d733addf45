pub mod applier;

pub use applier::{apply_profile, ApplyReport, ProfileApplier, PropOutcome, PropStore};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Device identity property that a profile can override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropKey {
    Brand,
    Manufacturer,
    Device,
    Product,
    Model,
    Fingerprint,
}

impl PropKey {
    pub const ALL: [PropKey; 6] = [
        PropKey::Brand,
        PropKey::Manufacturer,
        PropKey::Device,
        PropKey::Product,
        PropKey::Model,
        PropKey::Fingerprint,
    ];

    /// Field name as exposed by the host's build information.
    pub fn field_name(&self) -> &'static str {
        match self {
            PropKey::Brand => "BRAND",
            PropKey::Manufacturer => "MANUFACTURER",
            PropKey::Device => "DEVICE",
            PropKey::Product => "PRODUCT",
            PropKey::Model => "MODEL",
            PropKey::Fingerprint => "FINGERPRINT",
        }
    }
}

impl fmt::Display for PropKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPropKey(pub String);

impl fmt::Display for UnknownPropKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown prop key: {}", self.0)
    }
}

impl std::error::Error for UnknownPropKey {}

impl FromStr for PropKey {
    type Err = UnknownPropKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropKey::ALL
            .into_iter()
            .find(|key| key.field_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPropKey(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProfileName {
    CertifiedOverride,
    StockFingerprintOverride,
    PixelXL,
    Pixel5,
    Pixel7Pro,
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProfileName::CertifiedOverride => "CertifiedOverride",
            ProfileName::StockFingerprintOverride => "StockFingerprintOverride",
            ProfileName::PixelXL => "PixelXL",
            ProfileName::Pixel5 => "Pixel5",
            ProfileName::Pixel7Pro => "Pixel7Pro",
        };
        f.write_str(name)
    }
}

const PIXEL_XL_PROPS: &[(PropKey, &str)] = &[
    (PropKey::Brand, "google"),
    (PropKey::Manufacturer, "Google"),
    (PropKey::Device, "marlin"),
    (PropKey::Product, "marlin"),
    (PropKey::Model, "Pixel XL"),
    (
        PropKey::Fingerprint,
        "google/marlin/marlin:10/QP1A.191005.007.A3/5972272:user/release-keys",
    ),
];

const PIXEL_5_PROPS: &[(PropKey, &str)] = &[
    (PropKey::Brand, "google"),
    (PropKey::Manufacturer, "Google"),
    (PropKey::Device, "redfin"),
    (PropKey::Product, "redfin"),
    (PropKey::Model, "Pixel 5"),
    (
        PropKey::Fingerprint,
        "google/redfin/redfin:13/TQ1A.221205.011/9244662:user/release-keys",
    ),
];

const PIXEL_7_PRO_PROPS: &[(PropKey, &str)] = &[
    (PropKey::Brand, "google"),
    (PropKey::Manufacturer, "Google"),
    (PropKey::Device, "cheetah"),
    (PropKey::Product, "cheetah"),
    (PropKey::Model, "Pixel 7 Pro"),
    (
        PropKey::Fingerprint,
        "google/cheetah/cheetah:13/TQ1A.221205.011/9244662:user/release-keys",
    ),
];

/// Named, ordered set of property overrides presented in place of the real device identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub name: ProfileName,
    pub props: Vec<(PropKey, String)>,
}

impl DeviceProfile {
    fn from_table(name: ProfileName, table: &[(PropKey, &str)]) -> Self {
        Self {
            name,
            props: table
                .iter()
                .map(|(key, value)| (*key, value.to_string()))
                .collect(),
        }
    }

    /// Certified fingerprint and model, written in that order.
    pub fn certified_override(fingerprint: &str, model: &str) -> Self {
        Self {
            name: ProfileName::CertifiedOverride,
            props: vec![
                (PropKey::Fingerprint, fingerprint.to_string()),
                (PropKey::Model, model.to_string()),
            ],
        }
    }

    pub fn stock_fingerprint_override(fingerprint: &str) -> Self {
        Self {
            name: ProfileName::StockFingerprintOverride,
            props: vec![(PropKey::Fingerprint, fingerprint.to_string())],
        }
    }

    pub fn pixel_xl() -> Self {
        Self::from_table(ProfileName::PixelXL, PIXEL_XL_PROPS)
    }

    pub fn pixel_5() -> Self {
        Self::from_table(ProfileName::Pixel5, PIXEL_5_PROPS)
    }

    pub fn pixel_7_pro() -> Self {
        Self::from_table(ProfileName::Pixel7Pro, PIXEL_7_PRO_PROPS)
    }

    pub fn get(&self, key: PropKey) -> Option<&str> {
        self.props
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = PropKey> + '_ {
        self.props.iter().map(|(k, _)| *k)
    }
}
