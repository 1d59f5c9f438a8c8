use shared::ImpactConfig;
use tracing::debug;

use crate::storage::ImpactConfigProvider;

/// Serves one fixed [`ImpactConfig`] to every vendor
#[derive(Clone, Debug, Default)]
pub struct StaticImpactConfigProvider {
    config: ImpactConfig,
}

impl StaticImpactConfigProvider {
    pub fn new(config: ImpactConfig) -> Self {
        Self { config }
    }
}

impl ImpactConfigProvider for StaticImpactConfigProvider {
    fn impact_config(&self, vendor_id: Option<&str>) -> ImpactConfig {
        debug!("Resolving impact config for vendor {:?}", vendor_id);
        self.config.clone()
    }
}
