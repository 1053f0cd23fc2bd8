//! Rock-on definition schema.
//!
//! A definition file is a JSON object with exactly one top-level entry: the
//! display name of the Rock-on mapped to its [`Detail`] record. Two input
//! tolerances are built into deserialization:
//! - Numeric fields ([`Uint`]) also accept their value quoted as a string.
//! - Every optional field normalizes its zero value (empty string, `0`,
//!   `false`, an all-empty `ui` descriptor) to absent, so a definition that
//!   spells out defaults canonicalizes identically to one that omits them.
//!
//! Maps use `BTreeMap` so canonical output orders map keys by natural string
//! order; record fields serialize in declaration order.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single-entry map from display name to detail record. eg: LSIO-Plex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RockOn(pub BTreeMap<String, Detail>);

impl RockOn {
    /// Display name of the Rock-on (the single top-level key).
    pub fn name(&self) -> &str {
        self.0.keys().next().map(String::as_str).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Everything under the display name.
pub struct Detail {
    /// Long description shown in the Rockstor UI.
    pub description: String,
    /// Arbitrary version string.
    pub version: String,
    /// Website of the underlying application.
    pub website: String,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Plain text or HTML with extra install/usage notes.
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub more_info: Option<String>,
    /// Web-UI slug descriptor. An explicitly empty descriptor is dropped so
    /// it canonicalizes the same as an absent one.
    #[serde(default, skip_serializing_if = "ui_absent")]
    pub ui: Option<UiSlug>,
    /// Whether arbitrary Shares may be mapped into the main container.
    #[serde(default, deserialize_with = "false_as_none", skip_serializing_if = "Option::is_none")]
    pub volume_add_support: Option<bool>,
    pub containers: BTreeMap<String, Container>,
    /// Inter-container network links, keyed by container name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub container_links: BTreeMap<String, Vec<ContainerLink>>,
    /// Freeform per-installer extension entries.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_config: BTreeMap<String, CustomConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Web-UI reachability: the UI lives at `ROCKSTOR_IP:PORT/<slug>`.
pub struct UiSlug {
    #[serde(default, deserialize_with = "false_as_none", skip_serializing_if = "Option::is_none")]
    pub https: Option<bool>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl UiSlug {
    pub fn is_empty(&self) -> bool {
        self.https.is_none() && self.slug.is_none()
    }
}

fn ui_absent(ui: &Option<UiSlug>) -> bool {
    ui.as_ref().map_or(true, UiSlug::is_empty)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One container of the Rock-on.
pub struct Container {
    /// Docker image. eg: linuxserver/plex
    pub image: String,
    /// Image tag; `latest` when absent.
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Start position when multiple containers must come up in order.
    pub launch_order: Uint,
    /// Container port number to host mapping.
    pub ports: BTreeMap<String, Port>,
    /// Container mount points and the Shares to mount there.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub volumes: BTreeMap<String, Volume>,
    /// `docker run` options, each an exact pair. eg: ["--net", "host"]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opts: Vec<Pair>,
    /// Arguments appended verbatim to the `docker run` command, as pairs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cmd_arguments: Vec<Pair>,
    /// Environment variable name to descriptor.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, EnvironmentVar>,
    /// Device path to descriptor, passed through to the container.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub devices: BTreeMap<String, Device>,
}

/// An exact two-element tuple, for `opts` and `cmd_arguments` entries.
pub type Pair = [String; 2];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub description: String,
    /// Short label. eg: Web-UI port
    pub label: String,
    /// Suggested port number on the host.
    pub host_default: Uint,
    /// Absent means the port maps both tcp and udp.
    #[serde(default, deserialize_with = "protocol_opt", skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Protocol>,
    /// Whether this port serves the web UI.
    #[serde(default, deserialize_with = "false_as_none", skip_serializing_if = "Option::is_none")]
    pub ui: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Udp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub description: String,
    /// Short label. eg: Data Storage
    pub label: String,
    /// Suggested minimum size of the Share, in KB.
    #[serde(default, deserialize_with = "zero_as_none", skip_serializing_if = "Option::is_none")]
    pub min_size: Option<Uint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentVar {
    pub description: String,
    /// Short label. eg: Web-UI username
    pub label: String,
    /// Prompt order of this variable, if relevant.
    #[serde(default, deserialize_with = "zero_as_none", skip_serializing_if = "Option::is_none")]
    pub index: Option<Uint>,
    /// Default value; a bare number in input becomes its decimal string.
    #[serde(default, deserialize_with = "string_or_number", skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub description: String,
    /// Short label. eg: Hardware encoding device
    pub label: String,
    /// Order of this device, if relevant.
    #[serde(default, deserialize_with = "zero_as_none", skip_serializing_if = "Option::is_none")]
    pub index: Option<Uint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomConfig {
    pub description: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerLink {
    pub name: String,
    pub source_container: String,
}

/// Unsigned integer that also accepts its value quoted as a decimal string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Uint(pub u64);

impl<'de> Deserialize<'de> for Uint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct UintVisitor;

        impl<'de> Visitor<'de> for UintVisitor {
            type Value = Uint;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an unsigned integer or a string holding one")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Uint, E> {
                Ok(Uint(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Uint, E> {
                u64::try_from(v)
                    .map(Uint)
                    .map_err(|_| E::custom(format!("value {} may not be negative", v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Uint, E> {
                v.parse::<u64>()
                    .map(Uint)
                    .map_err(|_| E::custom(format!("cannot read {:?} as an unsigned integer", v)))
            }
        }

        deserializer.deserialize_any(UintVisitor)
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<String>::deserialize(deserializer)?;
    Ok(v.filter(|s| !s.is_empty()))
}

fn false_as_none<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<bool>::deserialize(deserializer)?;
    Ok(v.filter(|b| *b))
}

fn zero_as_none<'de, D>(deserializer: D) -> Result<Option<Uint>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Uint>::deserialize(deserializer)?;
    Ok(v.filter(|u| u.0 != 0))
}

fn protocol_opt<'de, D>(deserializer: D) -> Result<Option<Protocol>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<String>::deserialize(deserializer)?;
    match v.as_deref() {
        None | Some("") => Ok(None),
        Some("tcp") => Ok(Some(Protocol::Tcp)),
        Some("udp") => Ok(Some(Protocol::Udp)),
        Some(other) => Err(de::Error::custom(format!(
            "unknown protocol {:?}, expected \"tcp\" or \"udp\"",
            other
        ))),
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct DefaultVisitor;

    impl<'de> Visitor<'de> for DefaultVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string or an integer")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(if v.is_empty() { None } else { Some(v.to_owned()) })
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(DefaultVisitor)
}
