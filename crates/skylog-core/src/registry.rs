//! Channel registry
//!
//! Static mapping from raw channel names to logical sensor groups, plus the
//! display metadata presentation layers need for each group. Purely
//! declarative; built once at construction time and read-only afterwards.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Registry entry for a single raw channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSpec {
    /// Name of the group this channel belongs to.
    pub group: String,
    /// Nominal sample interval in milliseconds. Metadata only; never used
    /// for interpolation.
    pub interval_ms: u64,
}

/// Display metadata for a sensor group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupInfo {
    /// Human-readable title.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Unit of measurement.
    pub unit: String,
    /// Lower y-axis bound for charting.
    pub y_min: f64,
    /// Upper y-axis bound for charting.
    pub y_max: f64,
}

impl GroupInfo {
    /// Create group metadata.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        unit: impl Into<String>,
        y_min: f64,
        y_max: f64,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            unit: unit.into(),
            y_min,
            y_max,
        }
    }
}

/// Lookup table from channel name to sensor group.
///
/// Channels absent from the table are inert: their values exist in parsed
/// records but never appear in any group series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelRegistry {
    channels: HashMap<String, ChannelSpec>,
    groups: BTreeMap<String, GroupInfo>,
}

impl ChannelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group with its display metadata.
    pub fn add_group(&mut self, name: impl Into<String>, info: GroupInfo) {
        self.groups.insert(name.into(), info);
    }

    /// Register a channel under a group.
    ///
    /// If the group was never registered, it is created with default
    /// metadata so every configured group is present in series output.
    pub fn add_channel(
        &mut self,
        channel: impl Into<String>,
        group: impl Into<String>,
        interval_ms: u64,
    ) {
        let group = group.into();
        self.groups.entry(group.clone()).or_default();
        self.channels
            .insert(channel.into(), ChannelSpec { group, interval_ms });
    }

    /// The group a channel belongs to, if the channel is registered.
    pub fn group_of(&self, channel: &str) -> Option<&str> {
        self.channels.get(channel).map(|spec| spec.group.as_str())
    }

    /// Full registry entry for a channel.
    pub fn channel(&self, channel: &str) -> Option<&ChannelSpec> {
        self.channels.get(channel)
    }

    /// Display metadata for a group.
    pub fn group_info(&self, group: &str) -> Option<&GroupInfo> {
        self.groups.get(group)
    }

    /// All configured group names, in sorted order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// All configured groups with their metadata, in sorted order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &GroupInfo)> {
        self.groups.iter().map(|(name, info)| (name.as_str(), info))
    }

    /// Number of registered channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// The standard rocket flight sensor layout.
    ///
    /// Accelerometer, gyroscope, barometer (altitude/temperature/pressure)
    /// and magnetometer channels as logged by the flight computer.
    pub fn flight_default() -> Self {
        let mut registry = Self::new();

        registry.add_group(
            "altitude",
            GroupInfo::new("Altitude", "Altitude data", "meters", 90.0, 395.0),
        );
        registry.add_group(
            "accelerationX",
            GroupInfo::new(
                "Acceleration X",
                "Acceleration in X-axis",
                "m/s²",
                -154.0,
                120.0,
            ),
        );
        registry.add_group(
            "accelerationY",
            GroupInfo::new(
                "Acceleration Y",
                "Acceleration in Y-axis",
                "m/s²",
                -22.0,
                44.0,
            ),
        );
        registry.add_group(
            "accelerationZ",
            GroupInfo::new(
                "Acceleration Z",
                "Acceleration in Z-axis",
                "m/s²",
                -97.0,
                48.0,
            ),
        );
        registry.add_group(
            "gyroscope",
            GroupInfo::new("Gyroscope", "Gyroscope data", "RAD/ms", -20.0, 11.0),
        );
        registry.add_group(
            "temperature",
            GroupInfo::new("Temperature", "Temperature data", "°C", 15.0, 16.0),
        );
        registry.add_group(
            "magneticFlux",
            GroupInfo::new(
                "Magnetic Flux",
                "Magnetic Flux across X, Y & Z axis",
                "μT",
                -107.0,
                104.0,
            ),
        );
        registry.add_group(
            "pressure",
            GroupInfo::new("Pressure", "Pressure data", "hPa", 963.0, 998.0),
        );

        registry.add_channel("AX", "accelerationX", 100);
        registry.add_channel("AY", "accelerationY", 100);
        registry.add_channel("AZ", "accelerationZ", 100);
        registry.add_channel("GX", "gyroscope", 100);
        registry.add_channel("GY", "gyroscope", 100);
        registry.add_channel("GZ", "gyroscope", 100);
        registry.add_channel("BA", "altitude", 200);
        registry.add_channel("BT", "temperature", 100);
        registry.add_channel("BP", "pressure", 100);
        registry.add_channel("Temp", "temperature", 100);
        registry.add_channel("mX", "magneticFlux", 200);
        registry.add_channel("mY", "magneticFlux", 200);
        registry.add_channel("mZ", "magneticFlux", 200);

        registry
    }
}
