mod draw_option;
mod error_source;
mod json_contract;
mod series;
mod series_config;
mod series_frame_builder;
mod series_snapshot;

pub use draw_option::{DrawOption, ErrorBarMode};
pub use error_source::ErrorValues;
pub use json_contract::{
    SERIES_CONFIG_JSON_SCHEMA_V1, SERIES_SNAPSHOT_JSON_SCHEMA_V1, SeriesConfigJsonContractV1,
    SeriesSnapshotJsonContractV1,
};
pub use series::{
    ChartSeries, DEFAULT_OVERLAY_DRAW_OPTION, DEFAULT_PRIMARY_DRAW_OPTION, SeriesState,
};
pub use series_config::{ChartSeriesConfig, ErrorMode, ErrorOverlayConfig, ErrorOverlayStyle};
pub use series_frame_builder::SeriesFrameBuilder;
pub use series_snapshot::SeriesSnapshot;
