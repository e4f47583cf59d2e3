//! The message catalog: every supported command class as data.
//!
//! Each module declares one command class: its key, command bytes,
//! constant tables, and [`zwcmd_schema::MessageSchema`] statics. Schemas
//! are layout *data*; all encode/decode behavior lives in `zwcmd-codec`.
//! The [`registry`] maps `(command_class, command)` to a schema for
//! callers that dispatch on a received frame's leading bytes.

pub mod alarm;
pub mod basic_tariff_info;
pub mod firmware_update;
pub mod language;
pub mod mtp_window_covering;
pub mod network_management_proxy;
pub mod protection;
pub mod registry;
pub mod remote_association_activate;
pub mod scene_controller_conf;
pub mod screen_md;
pub mod security_panel_mode;
pub mod switch_multilevel;
pub mod thermostat_fan_mode;
pub mod zip;

pub use registry::{all, lookup};
