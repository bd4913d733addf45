use std::sync::Mutex;

use prop_imitation::{
    apply_profile, ApplyError, DeviceProfile, PolicyEngine, ProfileApplier, ProfileName, PropKey,
    PropStore, SpoofConfig,
};

#[cfg(test)]
mod profile_tests {
    use super::*;

    /// Records every write and rejects one key.
    struct FlakyApplier {
        reject: PropKey,
        writes: Mutex<Vec<(PropKey, String)>>,
    }

    impl FlakyApplier {
        fn new(reject: PropKey) -> Self {
            Self {
                reject,
                writes: Mutex::new(Vec::new()),
            }
        }
    }

    impl ProfileApplier for FlakyApplier {
        fn set_prop(&self, key: PropKey, value: &str) -> Result<(), ApplyError> {
            if key == self.reject {
                return Err(ApplyError::Rejected {
                    key,
                    reason: "no such field".to_string(),
                });
            }
            self.writes.lock().unwrap().push((key, value.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_prop_key_field_names() {
        let names: Vec<&str> = PropKey::ALL.iter().map(|k| k.field_name()).collect();
        assert_eq!(
            names,
            vec!["BRAND", "MANUFACTURER", "DEVICE", "PRODUCT", "MODEL", "FINGERPRINT"]
        );
        assert_eq!(PropKey::Fingerprint.to_string(), "FINGERPRINT");
    }

    #[test]
    fn test_prop_key_from_str() {
        assert_eq!("MODEL".parse::<PropKey>(), Ok(PropKey::Model));
        assert_eq!("manufacturer".parse::<PropKey>(), Ok(PropKey::Manufacturer));
        assert!("SERIAL".parse::<PropKey>().is_err());
    }

    #[test]
    fn test_full_profiles_cover_every_key_in_order() {
        for profile in [
            DeviceProfile::pixel_xl(),
            DeviceProfile::pixel_5(),
            DeviceProfile::pixel_7_pro(),
        ] {
            assert_eq!(profile.keys().collect::<Vec<_>>(), PropKey::ALL.to_vec());
            assert_eq!(profile.get(PropKey::Brand), Some("google"));
            assert_eq!(profile.get(PropKey::Manufacturer), Some("Google"));
        }
    }

    #[test]
    fn test_builtin_profile_values() {
        let pixel_5 = DeviceProfile::pixel_5();
        assert_eq!(pixel_5.name, ProfileName::Pixel5);
        assert_eq!(pixel_5.get(PropKey::Device), Some("redfin"));
        assert_eq!(pixel_5.get(PropKey::Model), Some("Pixel 5"));
        assert_eq!(
            pixel_5.get(PropKey::Fingerprint),
            Some("google/redfin/redfin:13/TQ1A.221205.011/9244662:user/release-keys")
        );

        let pixel_7_pro = DeviceProfile::pixel_7_pro();
        assert_eq!(pixel_7_pro.get(PropKey::Product), Some("cheetah"));

        let pixel_xl = DeviceProfile::pixel_xl();
        assert_eq!(pixel_xl.get(PropKey::Model), Some("Pixel XL"));
        assert_eq!(
            pixel_xl.get(PropKey::Fingerprint),
            Some("google/marlin/marlin:10/QP1A.191005.007.A3/5972272:user/release-keys")
        );
    }

    #[test]
    fn test_override_profiles_are_partial() {
        let stock = DeviceProfile::stock_fingerprint_override("a/b/c:14/X/1:user/release-keys");
        assert_eq!(stock.len(), 1);
        assert_eq!(stock.get(PropKey::Model), None);

        let certified = DeviceProfile::certified_override("fp", "");
        assert_eq!(certified.len(), 2);
        assert_eq!(certified.get(PropKey::Model), Some(""));
    }

    #[test]
    fn test_apply_profile_to_store() {
        let store = PropStore::with_props([(PropKey::Brand, "generic"), (PropKey::Model, "generic")]);
        let report = apply_profile(&store, &DeviceProfile::pixel_5());

        assert!(report.is_complete());
        assert_eq!(report.applied_count(), 6);
        assert_eq!(store.get(PropKey::Brand).as_deref(), Some("google"));
        assert_eq!(store.snapshot().len(), 6);
    }

    #[test]
    fn test_apply_profile_continues_past_read_only_key() {
        let store = PropStore::with_props([(PropKey::Device, "generic")]).read_only(PropKey::Device);
        let report = apply_profile(&store, &DeviceProfile::pixel_7_pro());

        assert!(!report.is_complete());
        assert_eq!(report.applied_count(), 5);
        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].key, PropKey::Device);
        assert_eq!(
            failures[0].result,
            Err(ApplyError::ReadOnly { key: PropKey::Device })
        );

        assert_eq!(store.get(PropKey::Device).as_deref(), Some("generic"));
        assert_eq!(store.get(PropKey::Fingerprint).unwrap().split('/').nth(1), Some("cheetah"));
    }

    #[test]
    fn test_apply_profile_reports_outcomes_in_profile_order() {
        let applier = FlakyApplier::new(PropKey::Manufacturer);
        let report = apply_profile(&applier, &DeviceProfile::pixel_xl());

        let keys: Vec<PropKey> = report.outcomes.iter().map(|o| o.key).collect();
        assert_eq!(keys, PropKey::ALL.to_vec());
        assert_eq!(applier.writes.lock().unwrap().len(), 5);
        assert!(report.failures().all(|o| o.key == PropKey::Manufacturer));
    }

    #[test]
    fn test_engine_records_write_failures() {
        let config = SpoofConfig {
            spoof_google_apps: true,
            ..SpoofConfig::default()
        };
        let engine = PolicyEngine::new(config);
        let applier = FlakyApplier::new(PropKey::Fingerprint);

        let report = engine
            .on_process_identity_established(
                Some("com.google.android.as"),
                Some("com.google.android.as"),
                &applier,
            )
            .unwrap();

        assert_eq!(report.profile, ProfileName::Pixel5);
        assert_eq!(report.applied_count(), 5);
        assert_eq!(engine.metrics().get_prop_write_failures(), 1);
        assert_eq!(engine.metrics().get_profile_count(ProfileName::Pixel5), 1);
    }

    #[test]
    fn test_profile_serializes_with_field_names() {
        let yaml = serde_yaml::to_string(&DeviceProfile::stock_fingerprint_override("fp")).unwrap();
        assert!(yaml.contains("StockFingerprintOverride"));
        assert!(yaml.contains("FINGERPRINT"));
    }
}
