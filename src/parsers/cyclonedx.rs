//! CycloneDX SBOM parser.
//!
//! Supports CycloneDX 1.2 through 1.6 in JSON and XML formats. JSON maps
//! directly onto the document model; XML goes through wrapper structs that
//! mirror the `<components><component>` element nesting.

use crate::model::{
    Component, ComponentType, Dependency, Document, ExternalRefType, ExternalReference, Hash,
    License, LicenseChoice, Metadata, Property, Tool, DEFAULT_SPEC_VERSION,
};
use crate::parsers::traits::{
    DocumentParser, FormatConfidence, FormatDetection, FormatVariant, ParseError,
};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Parser for CycloneDX SBOM format
#[derive(Debug, Clone, Copy, Default)]
pub struct CycloneDxParser;

impl CycloneDxParser {
    /// Create a new CycloneDX parser
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse a CycloneDX BOM from JSON
    fn parse_json(content: &str) -> Result<Document, ParseError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a CycloneDX BOM from XML
    fn parse_xml(content: &str) -> Result<Document, ParseError> {
        let bom: BomXml =
            quick_xml::de::from_str(content).map_err(|e| ParseError::XmlError(e.to_string()))?;
        Ok(bom.into_document())
    }

    /// Extract version from JSON content (quick heuristic, not full parse)
    fn extract_json_version(content: &str) -> Option<String> {
        let idx = content.find("\"specVersion\"")?;
        let after = &content[idx + "\"specVersion\"".len()..];
        let value_part = &after[after.find(':')? + 1..];
        let after_quote = &value_part[value_part.find('"')? + 1..];
        let quote_end = after_quote.find('"')?;
        Some(after_quote[..quote_end].to_string())
    }

    /// Extract version from the CycloneDX namespace of the `<bom>` element
    fn extract_xml_version(content: &str) -> Option<String> {
        let ns_idx = content.find("cyclonedx.org/schema/bom/")?;
        let after = &content[ns_idx + "cyclonedx.org/schema/bom/".len()..];
        let end = after.find(|c: char| c != '.' && !c.is_ascii_digit())?;
        (end > 0).then(|| after[..end].to_string())
    }
}

impl DocumentParser for CycloneDxParser {
    fn parse_str(&self, content: &str) -> Result<Document, ParseError> {
        let detection = self.detect(content);
        for warning in &detection.warnings {
            tracing::warn!("{}", warning);
        }

        match detection.variant {
            Some(FormatVariant::Json) if detection.confidence.can_parse() => {
                Self::parse_json(content)
            }
            Some(FormatVariant::Xml) if detection.confidence.can_parse() => {
                Self::parse_xml(content)
            }
            _ => Err(ParseError::UnknownFormat(
                "Expected JSON or XML CycloneDX format".to_string(),
            )),
        }
    }

    fn format_name(&self) -> &str {
        "CycloneDX"
    }

    fn detect(&self, content: &str) -> FormatDetection {
        let trimmed = content.trim_start();

        if trimmed.starts_with('{') {
            let has_bom_format = content.contains("\"bomFormat\"");
            let has_cyclonedx = content.contains("CycloneDX") || content.contains("cyclonedx");
            let has_spec_version = content.contains("\"specVersion\"");
            let has_schema = content.contains("\"$schema\"") && content.contains("cyclonedx");
            let version = Self::extract_json_version(content);

            if has_bom_format && has_cyclonedx {
                return FormatDetection::matched(FormatConfidence::CERTAIN, FormatVariant::Json)
                    .version(version);
            } else if has_bom_format || has_schema {
                return FormatDetection::matched(FormatConfidence::HIGH, FormatVariant::Json)
                    .version(version);
            } else if has_spec_version && content.contains("\"components\"") {
                return FormatDetection::matched(FormatConfidence::MEDIUM, FormatVariant::Json)
                    .version(version)
                    .warning("Missing bomFormat field - might not be CycloneDX");
            }
        }

        if trimmed.starts_with('<') {
            let has_bom_element = content.contains("<bom");
            let has_cyclonedx_ns = content.contains("cyclonedx.org");
            let version = Self::extract_xml_version(content);

            if has_bom_element && has_cyclonedx_ns {
                return FormatDetection::matched(FormatConfidence::CERTAIN, FormatVariant::Xml)
                    .version(version);
            } else if has_bom_element {
                return FormatDetection::matched(FormatConfidence::MEDIUM, FormatVariant::Xml)
                    .warning("Missing CycloneDX namespace");
            }
        }

        FormatDetection::no_match()
    }
}

// =============================================================================
// CycloneDX XML structures for deserialization
// XML uses wrapper elements for collections (e.g., <components><component>...)
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename = "bom")]
struct BomXml {
    #[serde(rename = "@xmlns", default)]
    xmlns: Option<String>,
    #[serde(rename = "@serialNumber", default)]
    serial_number: Option<String>,
    #[serde(rename = "@version", default)]
    version: Option<u32>,
    metadata: Option<MetadataXml>,
    components: Option<ComponentsXml>,
    dependencies: Option<DependenciesXml>,
}

#[derive(Debug, Deserialize)]
struct MetadataXml {
    timestamp: Option<String>,
    tools: Option<ToolsXml>,
    component: Option<ComponentXml>,
}

/// `<tools>` holds `<tool>` entries up to 1.4 and `<components>`/`<services>` from 1.5
#[derive(Debug, Deserialize)]
struct ToolsXml {
    #[serde(rename = "tool", default)]
    tool: Vec<ToolXml>,
    components: Option<ComponentsXml>,
    services: Option<ServicesXml>,
}

#[derive(Debug, Deserialize)]
struct ToolXml {
    vendor: Option<String>,
    name: Option<String>,
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServicesXml {
    #[serde(rename = "service", default)]
    service: Vec<ServiceXml>,
}

#[derive(Debug, Deserialize)]
struct ServiceXml {
    provider: Option<ProviderXml>,
    name: Option<String>,
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderXml {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ComponentsXml {
    #[serde(rename = "component", default)]
    component: Vec<ComponentXml>,
}

#[derive(Debug, Deserialize)]
struct ComponentXml {
    #[serde(rename = "@type", default)]
    component_type: Option<String>,
    #[serde(rename = "@bom-ref", default)]
    bom_ref: Option<String>,
    author: Option<String>,
    publisher: Option<String>,
    group: Option<String>,
    #[serde(default)]
    name: String,
    version: Option<String>,
    description: Option<String>,
    hashes: Option<HashesXml>,
    licenses: Option<LicensesXml>,
    copyright: Option<String>,
    cpe: Option<String>,
    purl: Option<String>,
    #[serde(rename = "externalReferences")]
    external_references: Option<ExternalReferencesXml>,
    properties: Option<PropertiesXml>,
    scope: Option<String>,
    supplier: Option<OrganizationXml>,
    components: Option<ComponentsXml>,
}

#[derive(Debug, Deserialize)]
struct OrganizationXml {
    name: Option<String>,
    #[serde(default)]
    url: Vec<String>,
    #[serde(default)]
    contact: Vec<ContactXml>,
}

#[derive(Debug, Deserialize)]
struct ContactXml {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HashesXml {
    #[serde(rename = "hash", default)]
    hash: Vec<HashXml>,
}

#[derive(Debug, Deserialize)]
struct HashXml {
    #[serde(rename = "@alg")]
    alg: String,
    #[serde(rename = "$text", default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct LicensesXml {
    #[serde(rename = "license", default)]
    license: Vec<LicenseXml>,
    expression: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LicenseXml {
    #[serde(rename = "@bom-ref", default)]
    bom_ref: Option<String>,
    #[serde(rename = "@acknowledgement", default)]
    acknowledgement: Option<String>,
    id: Option<String>,
    name: Option<String>,
    url: Option<String>,
    text: Option<LicenseTextXml>,
}

#[derive(Debug, Deserialize)]
struct LicenseTextXml {
    #[serde(rename = "@content-type", default)]
    content_type: Option<String>,
    #[serde(rename = "@encoding", default)]
    encoding: Option<String>,
    #[serde(rename = "$text", default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ExternalReferencesXml {
    #[serde(rename = "reference", default)]
    reference: Vec<ExternalReferenceXml>,
}

#[derive(Debug, Deserialize)]
struct ExternalReferenceXml {
    #[serde(rename = "@type", default)]
    ref_type: Option<String>,
    #[serde(default)]
    url: String,
    comment: Option<String>,
    hashes: Option<HashesXml>,
}

#[derive(Debug, Deserialize)]
struct PropertiesXml {
    #[serde(rename = "property", default)]
    property: Vec<PropertyXml>,
}

#[derive(Debug, Deserialize)]
struct PropertyXml {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "$text", default)]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DependenciesXml {
    #[serde(rename = "dependency", default)]
    dependency: Vec<DependencyXml>,
}

#[derive(Debug, Deserialize)]
struct DependencyXml {
    #[serde(rename = "@ref")]
    bom_ref: String,
    #[serde(rename = "dependency", default)]
    depends_on: Vec<DependencyRefXml>,
}

#[derive(Debug, Deserialize)]
struct DependencyRefXml {
    #[serde(rename = "@ref")]
    bom_ref: String,
}

impl BomXml {
    fn into_document(self) -> Document {
        let spec_version = self
            .xmlns
            .as_deref()
            .and_then(|ns| ns.rsplit('/').next())
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_SPEC_VERSION)
            .to_string();

        Document {
            bom_format: "CycloneDX".to_string(),
            spec_version,
            serial_number: self.serial_number,
            version: self.version,
            metadata: self.metadata.map(MetadataXml::into_metadata),
            components: self
                .components
                .map(|c| c.component.into_iter().map(ComponentXml::into_component).collect())
                .unwrap_or_default(),
            dependencies: self
                .dependencies
                .map(|d| {
                    d.dependency
                        .into_iter()
                        .map(DependencyXml::into_dependency)
                        .collect()
                })
                .unwrap_or_default(),
            extra: Map::new(),
        }
    }
}

impl MetadataXml {
    fn into_metadata(self) -> Metadata {
        Metadata {
            timestamp: self.timestamp,
            tools: self.tools.map(ToolsXml::into_tools).unwrap_or_default(),
            component: self.component.map(ComponentXml::into_component),
            extra: Map::new(),
        }
    }
}

impl ToolsXml {
    fn into_tools(self) -> Vec<Tool> {
        let legacy = self.tool.into_iter().map(|t| Tool {
            vendor: t.vendor,
            name: t.name,
            version: t.version,
        });
        let components = self
            .components
            .map(|c| c.component)
            .unwrap_or_default()
            .into_iter()
            .map(|c| Tool {
                vendor: c.publisher.or(c.group),
                name: Some(c.name),
                version: c.version,
            });
        let services = self
            .services
            .map(|s| s.service)
            .unwrap_or_default()
            .into_iter()
            .map(|s| Tool {
                vendor: s.provider.and_then(|p| p.name),
                name: s.name,
                version: s.version,
            });

        legacy.chain(components).chain(services).collect()
    }
}

impl ComponentXml {
    fn into_component(self) -> Component {
        let mut licenses: Vec<LicenseChoice> = Vec::new();
        if let Some(l) = self.licenses {
            licenses.extend(l.license.into_iter().map(|lic| LicenseChoice {
                license: Some(lic.into_license()),
                expression: None,
                extra: Map::new(),
            }));
            if let Some(expression) = l.expression {
                licenses.push(LicenseChoice {
                    license: None,
                    expression: Some(expression),
                    extra: Map::new(),
                });
            }
        }

        let mut extra = Map::new();
        if let Some(scope) = self.scope {
            extra.insert("scope".to_string(), Value::String(scope));
        }
        if let Some(supplier) = self.supplier {
            extra.insert("supplier".to_string(), supplier.into_value());
        }

        Component {
            component_type: self
                .component_type
                .map_or(ComponentType::Library, ComponentType::from),
            bom_ref: self.bom_ref,
            author: self.author,
            publisher: self.publisher,
            group: self.group,
            name: self.name,
            version: self.version,
            description: self.description,
            hashes: into_hashes(self.hashes),
            licenses,
            copyright: self.copyright,
            cpe: self.cpe,
            purl: self.purl,
            external_references: self
                .external_references
                .map(|r| {
                    r.reference
                        .into_iter()
                        .map(|r| ExternalReference {
                            ref_type: r.ref_type.map(ExternalRefType::from),
                            url: r.url.trim().to_string(),
                            comment: r.comment,
                            hashes: into_hashes(r.hashes),
                            extra: Map::new(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
            properties: self
                .properties
                .map(|p| {
                    p.property
                        .into_iter()
                        .map(|p| Property {
                            name: p.name,
                            value: p.value,
                        })
                        .collect()
                })
                .unwrap_or_default(),
            components: self
                .components
                .map(|c| c.component.into_iter().map(Self::into_component).collect())
                .unwrap_or_default(),
            extra,
        }
    }
}

impl LicenseXml {
    /// Attributes and license text use their JSON names so both inputs
    /// serialize the same way
    fn into_license(self) -> License {
        let mut extra = Map::new();
        if let Some(bom_ref) = self.bom_ref {
            extra.insert("bom-ref".to_string(), Value::String(bom_ref));
        }
        if let Some(acknowledgement) = self.acknowledgement {
            extra.insert("acknowledgement".to_string(), Value::String(acknowledgement));
        }
        if let Some(text) = self.text {
            let mut body = Map::new();
            if let Some(content_type) = text.content_type {
                body.insert("contentType".to_string(), Value::String(content_type));
            }
            if let Some(encoding) = text.encoding {
                body.insert("encoding".to_string(), Value::String(encoding));
            }
            body.insert("content".to_string(), Value::String(text.content));
            extra.insert("text".to_string(), Value::Object(body));
        }

        License {
            id: self.id,
            name: self.name,
            url: self.url,
            extra,
        }
    }
}

impl OrganizationXml {
    fn into_value(self) -> Value {
        let mut org = Map::new();
        if let Some(name) = self.name {
            org.insert("name".to_string(), Value::String(name));
        }
        if !self.url.is_empty() {
            org.insert(
                "url".to_string(),
                Value::Array(self.url.into_iter().map(Value::String).collect()),
            );
        }
        if !self.contact.is_empty() {
            let contacts = self
                .contact
                .into_iter()
                .map(|c| {
                    let fields = [("name", c.name), ("email", c.email), ("phone", c.phone)];
                    Value::Object(
                        fields
                            .into_iter()
                            .filter_map(|(key, value)| Some((key.to_string(), Value::String(value?))))
                            .collect(),
                    )
                })
                .collect();
            org.insert("contact".to_string(), Value::Array(contacts));
        }
        Value::Object(org)
    }
}

fn into_hashes(hashes: Option<HashesXml>) -> Vec<Hash> {
    hashes
        .map(|h| {
            h.hash
                .into_iter()
                .map(|h| Hash {
                    alg: h.alg,
                    content: h.content.trim().to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

impl DependencyXml {
    fn into_dependency(self) -> Dependency {
        Dependency {
            bom_ref: self.bom_ref,
            depends_on: self.depends_on.into_iter().map(|d| d.bom_ref).collect(),
        }
    }
}
