use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::{ChartSeriesConfig, SeriesSnapshot};

pub const SERIES_CONFIG_JSON_SCHEMA_V1: u32 = 1;
pub const SERIES_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: ChartSeriesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: SeriesSnapshot,
}

impl ChartSeriesConfig {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = SeriesConfigJsonContractV1 {
            schema_version: SERIES_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize series config contract v1: {e}"))
        })
    }

    /// Accepts either a bare config object or a versioned v1 payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(config) = serde_json::from_str::<ChartSeriesConfig>(input) {
            return Ok(config);
        }
        let payload: SeriesConfigJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse series config json payload: {e}"))
        })?;
        if payload.schema_version != SERIES_CONFIG_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported series config schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.config)
    }
}

impl SeriesSnapshot {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize series snapshot json: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = SeriesSnapshotJsonContractV1 {
            schema_version: SERIES_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!(
                "failed to serialize series snapshot contract v1: {e}"
            ))
        })
    }

    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<SeriesSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: SeriesSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse series snapshot json payload: {e}"))
        })?;
        if payload.schema_version != SERIES_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported series snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
