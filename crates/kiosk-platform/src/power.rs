use kiosk_common::PlatformError;
use starship_battery::units::energy::watt_hour;
use starship_battery::units::time::second;
use starship_battery::{Manager, State};

use crate::traits::{PowerSourceInfo, PowerSources};

/// Power-source query backed by `starship-battery`.
pub struct SystemPower;

impl PowerSources for SystemPower {
    fn list_sources(&self) -> Result<Vec<PowerSourceInfo>, PlatformError> {
        let manager = Manager::new().map_err(|e| PlatformError::PowerError(e.to_string()))?;
        let batteries = manager
            .batteries()
            .map_err(|e| PlatformError::PowerError(e.to_string()))?;

        let mut sources = Vec::new();
        for battery in batteries {
            let battery = battery.map_err(|e| PlatformError::PowerError(e.to_string()))?;
            sources.push(PowerSourceInfo {
                is_charging: battery.state() == State::Charging,
                current_capacity: battery.energy().get::<watt_hour>().round() as i32,
                max_capacity: battery.energy_full().get::<watt_hour>().round() as i32,
                time_to_empty: battery
                    .time_to_empty()
                    .map(|t| t.get::<second>() as i32)
                    .unwrap_or(0),
                time_to_full: battery
                    .time_to_full()
                    .map(|t| t.get::<second>() as i32)
                    .unwrap_or(0),
            });
        }
        Ok(sources)
    }
}
