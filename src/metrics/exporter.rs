use crate::metrics::DecisionMetrics;
use serde_json::json;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExporterType {
    Prometheus,
    Json,
    Logging,
}

pub struct MetricsExporter {
    metrics: DecisionMetrics,
    exporter_type: ExporterType,
    enabled: bool,
}

impl MetricsExporter {
    pub fn new(metrics: DecisionMetrics, exporter_type: ExporterType) -> Self {
        Self {
            metrics,
            exporter_type,
            enabled: true,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn export_metrics(&self) -> Result<String, serde_json::Error> {
        if !self.enabled {
            return Ok("Metrics export disabled".to_string());
        }

        match self.exporter_type {
            ExporterType::Prometheus => Ok(self.export_prometheus()),
            ExporterType::Json => self.export_json(),
            ExporterType::Logging => Ok(self.export_logging()),
        }
    }

    fn export_prometheus(&self) -> String {
        let m = &self.metrics;
        let mut output = String::new();

        output.push_str(&format!(
            "prop_imitation_classifications_total {}\n",
            m.get_classifications()
        ));
        output.push_str(&format!(
            "prop_imitation_invalid_identities_total {}\n",
            m.get_invalid_identities()
        ));
        output.push_str(&format!(
            "prop_imitation_attestation_checks_total {}\n",
            m.get_attestation_checks()
        ));
        output.push_str(&format!(
            "prop_imitation_attestation_blocks_total {}\n",
            m.get_attestation_blocks()
        ));
        output.push_str(&format!(
            "prop_imitation_features_hidden_total {}\n",
            m.get_features_hidden()
        ));
        output.push_str(&format!(
            "prop_imitation_prop_write_failures_total {}\n",
            m.get_prop_write_failures()
        ));

        for (profile, count) in m.get_profiles_applied() {
            output.push_str(&format!(
                "prop_imitation_profiles_applied_total{{profile=\"{}\"}} {}\n",
                profile, count
            ));
        }

        output
    }

    fn export_json(&self) -> Result<String, serde_json::Error> {
        let m = &self.metrics;
        let profiles: serde_json::Map<String, serde_json::Value> = m
            .get_profiles_applied()
            .into_iter()
            .map(|(profile, count)| (profile.to_string(), json!(count)))
            .collect();

        let value = json!({
            "classifications": m.get_classifications(),
            "invalid_identities": m.get_invalid_identities(),
            "attestation_checks": m.get_attestation_checks(),
            "attestation_blocks": m.get_attestation_blocks(),
            "features_hidden": m.get_features_hidden(),
            "prop_write_failures": m.get_prop_write_failures(),
            "profiles_applied": profiles,
            "uptime_secs": m.get_uptime().as_secs(),
        });

        serde_json::to_string_pretty(&value)
    }

    fn export_logging(&self) -> String {
        let m = &self.metrics;
        info!(
            classifications = m.get_classifications(),
            invalid_identities = m.get_invalid_identities(),
            attestation_checks = m.get_attestation_checks(),
            attestation_blocks = m.get_attestation_blocks(),
            features_hidden = m.get_features_hidden(),
            prop_write_failures = m.get_prop_write_failures(),
            "Decision metrics"
        );
        "Metrics logged".to_string()
    }
}
