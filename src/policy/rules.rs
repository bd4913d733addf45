use crate::config::SpoofConfig;
use crate::identity::CallerIdentity;
use crate::profile::{DeviceProfile, ProfileName};

pub const PACKAGE_ARCORE: &str = "com.google.ar.core";
pub const PACKAGE_FINSKY: &str = "com.android.vending";
pub const PACKAGE_GMS: &str = "com.google.android.gms";
pub const PROCESS_GMS_UNSTABLE: &str = "com.google.android.gms.unstable";
pub const PACKAGE_GPHOTOS: &str = "com.google.android.apps.photos";

pub const PIXEL_5_PACKAGES: &[&str] = &[
    "com.google.android.as",
    "com.google.android.googlequicksearchbox",
    "com.google.android.gms",
    "com.google.android.gms.persistent",
];

pub const PIXEL_7_PRO_PACKAGES: &[&str] = &[
    "com.google.android.inputmethod.latin",
    "com.google.android.apps.wallpaper",
    "com.android.chrome",
];

/// Feature name fragments hidden from the photos app while it runs as a Pixel XL.
pub const FEATURE_BLOCKLIST: &[&str] = &[
    "PIXEL_2017_PRELOAD",
    "PIXEL_2018_PRELOAD",
    "PIXEL_2019_MIDYEAR_PRELOAD",
    "PIXEL_2019_PRELOAD",
    "PIXEL_2020_EXPERIENCE",
    "PIXEL_2020_MIDYEAR_EXPERIENCE",
    "PIXEL_2021_EXPERIENCE",
    "PIXEL_2021_MIDYEAR_EXPERIENCE",
];

pub fn is_blocklisted_feature(name: &str) -> bool {
    FEATURE_BLOCKLIST.iter().any(|entry| name.contains(entry))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Process {
        package: &'static str,
        process: &'static str,
    },
    Package(&'static str),
    AnyPackage(&'static [&'static str]),
}

impl Selector {
    pub fn matches(&self, identity: &CallerIdentity) -> bool {
        match self {
            Selector::Process { package, process } => {
                identity.package_name == *package && identity.process_name == *process
            }
            Selector::Package(package) => identity.package_name == *package,
            Selector::AnyPackage(packages) => packages.contains(&identity.package_name.as_str()),
        }
    }
}

/// Configuration precondition a rule needs before its selector is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    CertifiedFingerprint,
    StockFingerprint,
    SpoofGoogleApps,
}

impl Guard {
    pub fn is_satisfied(&self, config: &SpoofConfig) -> bool {
        match self {
            Guard::CertifiedFingerprint => config.has_certified_fingerprint(),
            Guard::StockFingerprint => config.has_stock_fingerprint(),
            Guard::SpoofGoogleApps => config.spoof_google_apps,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingRule {
    pub name: &'static str,
    pub guard: Guard,
    pub selector: Selector,
    pub profile: ProfileName,
}

impl RoutingRule {
    pub fn matches(&self, identity: &CallerIdentity, config: &SpoofConfig) -> bool {
        self.guard.is_satisfied(config) && self.selector.matches(identity)
    }

    pub fn resolve(&self, config: &SpoofConfig) -> DeviceProfile {
        match self.profile {
            ProfileName::CertifiedOverride => {
                DeviceProfile::certified_override(&config.certified_fingerprint, &config.certified_model)
            }
            ProfileName::StockFingerprintOverride => {
                DeviceProfile::stock_fingerprint_override(&config.stock_fingerprint)
            }
            ProfileName::PixelXL => DeviceProfile::pixel_xl(),
            ProfileName::Pixel5 => DeviceProfile::pixel_5(),
            ProfileName::Pixel7Pro => DeviceProfile::pixel_7_pro(),
        }
    }
}

/// Priority order matters: the first matching rule wins.
pub const ROUTING_RULES: &[RoutingRule] = &[
    RoutingRule {
        name: "gms_unstable_certified",
        guard: Guard::CertifiedFingerprint,
        selector: Selector::Process {
            package: PACKAGE_GMS,
            process: PROCESS_GMS_UNSTABLE,
        },
        profile: ProfileName::CertifiedOverride,
    },
    RoutingRule {
        name: "arcore_stock_fingerprint",
        guard: Guard::StockFingerprint,
        selector: Selector::Package(PACKAGE_ARCORE),
        profile: ProfileName::StockFingerprintOverride,
    },
    RoutingRule {
        name: "photos_pixel_xl",
        guard: Guard::SpoofGoogleApps,
        selector: Selector::Package(PACKAGE_GPHOTOS),
        profile: ProfileName::PixelXL,
    },
    RoutingRule {
        name: "pixel_5_targets",
        guard: Guard::SpoofGoogleApps,
        selector: Selector::AnyPackage(PIXEL_5_PACKAGES),
        profile: ProfileName::Pixel5,
    },
    RoutingRule {
        name: "pixel_7_pro_targets",
        guard: Guard::SpoofGoogleApps,
        selector: Selector::AnyPackage(PIXEL_7_PRO_PACKAGES),
        profile: ProfileName::Pixel7Pro,
    },
];
