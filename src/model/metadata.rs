//! Document metadata and producing-tool records.

use super::Component;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Document-level metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Creation timestamp, kept verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Tools that produced the document.
    ///
    /// Accepts both the legacy array form and the 1.5+ object form on input;
    /// always written as an array.
    #[serde(default, deserialize_with = "deserialize_tools")]
    pub tools: Vec<Tool>,
    /// The component this document itself describes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<Component>,
    /// Fields not interpreted by the combiner
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Metadata {
    /// Create metadata carrying only a tool list
    #[must_use]
    pub fn with_tools(tools: Vec<Tool>) -> Self {
        Self {
            tools,
            ..Self::default()
        }
    }
}

/// Software that produced an SBOM document.
///
/// Two tools are the same when vendor, name, and version are all equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Tool {
    /// Create a tool record
    #[must_use]
    pub fn new(vendor: Option<&str>, name: Option<&str>, version: Option<&str>) -> Self {
        Self {
            vendor: vendor.map(str::to_string),
            name: name.map(str::to_string),
            version: version.map(str::to_string),
        }
    }

    /// Human-readable label, e.g. `CycloneDX cyclonedx-maven-plugin 2.7.9`
    #[must_use]
    pub fn display_name(&self) -> String {
        [&self.vendor, &self.name, &self.version]
            .iter()
            .filter_map(|part| part.as_deref())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Tool component entry of the 1.5+ object form
#[derive(Debug, Deserialize)]
struct ToolComponentEntry {
    group: Option<String>,
    publisher: Option<String>,
    name: Option<String>,
    version: Option<String>,
}

/// Tool service entry of the 1.5+ object form
#[derive(Debug, Deserialize)]
struct ToolServiceEntry {
    provider: Option<ToolProvider>,
    name: Option<String>,
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ToolProvider {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ToolsObject {
    #[serde(default)]
    components: Vec<ToolComponentEntry>,
    #[serde(default)]
    services: Vec<ToolServiceEntry>,
}

/// Deserialize `metadata.tools` from either the array form (<= 1.4) or the
/// object form with `components`/`services` (1.5+).
fn deserialize_tools<'de, D>(deserializer: D) -> Result<Vec<Tool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, MapAccess, SeqAccess, Visitor};
    use std::fmt;

    struct ToolsVisitor;

    impl<'de> Visitor<'de> for ToolsVisitor {
        type Value = Vec<Tool>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an array of tools or an object with components/services")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut tools = Vec::new();
            while let Some(tool) = seq.next_element::<Tool>()? {
                tools.push(tool);
            }
            Ok(tools)
        }

        fn visit_map<M>(self, map: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let object: ToolsObject =
                Deserialize::deserialize(de::value::MapAccessDeserializer::new(map))?;

            let components = object.components.into_iter().map(|c| Tool {
                vendor: c.publisher.or(c.group),
                name: c.name,
                version: c.version,
            });
            let services = object.services.into_iter().map(|s| Tool {
                vendor: s.provider.and_then(|p| p.name),
                name: s.name,
                version: s.version,
            });

            Ok(components.chain(services).collect())
        }
    }

    deserializer.deserialize_any(ToolsVisitor)
}
