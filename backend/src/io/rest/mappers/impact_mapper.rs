//! Mapper from impact results to the shared summary DTO.

use crate::domain::commands::impact::ImpactResult;
use shared::ImpactSummary;

pub struct ImpactMapper;

impl ImpactMapper {
    pub fn to_dto(result: ImpactResult) -> ImpactSummary {
        ImpactSummary {
            config: result.config,
            base_bags_per_day: result.base_bags_per_day,
            extra_bags_per_day: result.extra_bags_per_day,
            estimate: result.estimate,
            formatted: result.formatted,
        }
    }
}
