//! `(command_class, command)`-keyed lookup over the whole catalog.

use std::collections::HashMap;
use std::sync::LazyLock;

use zwcmd_schema::MessageSchema;

use crate::{
    alarm, basic_tariff_info, firmware_update, language, mtp_window_covering,
    network_management_proxy, protection, remote_association_activate, scene_controller_conf,
    screen_md, security_panel_mode, switch_multilevel, thermostat_fan_mode, zip,
};

static CATALOG: LazyLock<Vec<&'static MessageSchema>> = LazyLock::new(|| {
    vec![
        &alarm::GET,
        &alarm::REPORT,
        &alarm::SET,
        &alarm::TYPE_SUPPORTED_GET,
        &alarm::TYPE_SUPPORTED_REPORT,
        &basic_tariff_info::GET,
        &basic_tariff_info::REPORT,
        &firmware_update::MD_GET,
        &firmware_update::MD_REPORT,
        &firmware_update::REQUEST_GET,
        &firmware_update::REQUEST_REPORT,
        &firmware_update::UPDATE_MD_GET,
        &firmware_update::UPDATE_MD_REPORT,
        &firmware_update::STATUS_REPORT,
        &firmware_update::ACTIVATION_SET,
        &firmware_update::ACTIVATION_STATUS_REPORT,
        &language::SET,
        &language::GET,
        &language::REPORT,
        &mtp_window_covering::SET,
        &mtp_window_covering::GET,
        &mtp_window_covering::REPORT,
        &network_management_proxy::LIST_GET,
        &network_management_proxy::LIST_REPORT,
        &network_management_proxy::INFO_CACHED_GET,
        &network_management_proxy::INFO_CACHED_REPORT,
        &protection::SET,
        &protection::GET,
        &protection::REPORT,
        &remote_association_activate::ACTIVATE,
        &scene_controller_conf::SET,
        &scene_controller_conf::GET,
        &scene_controller_conf::REPORT,
        &screen_md::GET,
        &screen_md::REPORT,
        &security_panel_mode::SUPPORTED_GET,
        &security_panel_mode::SUPPORTED_REPORT,
        &security_panel_mode::GET,
        &security_panel_mode::REPORT,
        &security_panel_mode::SET,
        &switch_multilevel::SET,
        &switch_multilevel::GET,
        &switch_multilevel::REPORT,
        &switch_multilevel::START_LEVEL_CHANGE,
        &switch_multilevel::STOP_LEVEL_CHANGE,
        &thermostat_fan_mode::SET,
        &thermostat_fan_mode::GET,
        &thermostat_fan_mode::REPORT,
        &thermostat_fan_mode::SUPPORTED_GET,
        &thermostat_fan_mode::SUPPORTED_REPORT,
        &zip::PACKET,
    ]
});

static BY_KEY: LazyLock<HashMap<(u8, u8), &'static MessageSchema>> = LazyLock::new(|| {
    CATALOG
        .iter()
        .map(|schema| ((schema.command_class(), schema.command()), *schema))
        .collect()
});

/// The schema registered for a frame's two leading bytes, if any.
pub fn lookup(command_class: u8, command: u8) -> Option<&'static MessageSchema> {
    BY_KEY.get(&(command_class, command)).copied()
}

/// Every schema in the catalog, in class order.
pub fn all() -> impl Iterator<Item = &'static MessageSchema> {
    CATALOG.iter().copied()
}
