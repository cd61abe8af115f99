//! # Component Library
//!
//! The mock data store: four component records, the symbol assets derived
//! from them, and the JSON Schema that component definitions are meant to
//! follow. Everything here is static and read-only.

use std::fmt;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentCategory {
    Passive,
    Semiconductor,
    IntegratedCircuit,
}

impl ComponentCategory {
    pub fn label(self) -> &'static str {
        match self {
            ComponentCategory::Passive => "Passive",
            ComponentCategory::Semiconductor => "Semiconductor",
            ComponentCategory::IntegratedCircuit => "Integrated Circuit",
        }
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElectronicComponent {
    pub id: &'static str,
    pub name: &'static str,
    pub category: ComponentCategory,
    pub description: &'static str,
    pub yaml_definition: &'static str,
    /// SVG path data in a 100x100 coordinate space.
    pub symbol_path: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolAsset {
    pub id: String,
    pub name: &'static str,
    pub category: ComponentCategory,
    pub svg_content: String,
}

pub static COMPONENTS: [ElectronicComponent; 4] = [
    ElectronicComponent {
        id: "res_001",
        name: "Generic Resistor",
        category: ComponentCategory::Passive,
        description: "A standard passive two-terminal electrical component that implements electrical resistance as a circuit element.",
        yaml_definition: "\
name: Resistor
designator: R
pins:
  - number: 1
    name: ~
  - number: 2
    name: ~
parameters:
  resistance:
    type: number
    unit: ohm
    required: true
  tolerance:
    type: number
    unit: percent
    default: 5",
        symbol_path: Some("M5,10 H15 L20,5 L30,15 L40,5 L50,15 L60,5 L70,15 L80,5 L85,10 H95"),
    },
    ElectronicComponent {
        id: "cap_001",
        name: "Ceramic Capacitor",
        category: ComponentCategory::Passive,
        description: "A passive two-terminal electrical component used to store energy electrostatically in an electric field.",
        yaml_definition: "\
name: Capacitor
designator: C
pins:
  - number: 1
    name: ~
  - number: 2
    name: ~
parameters:
  capacitance:
    type: number
    unit: farad
    required: true
  voltage_rating:
    type: number
    unit: volt",
        symbol_path: Some("M5,10 H40 M40,0 V20 M60,0 V20 M60,10 H95"),
    },
    ElectronicComponent {
        id: "opamp_001",
        name: "Op-Amp (Ideal)",
        category: ComponentCategory::IntegratedCircuit,
        description: "A DC-coupled high-gain electronic voltage amplifier with a differential input and, usually, a single-ended output.",
        yaml_definition: "\
name: Operational Amplifier
designator: U
pins:
  - number: 1
    name: IN+
  - number: 2
    name: IN-
  - number: 3
    name: V+
  - number: 4
    name: V-
  - number: 5
    name: OUT
parameters:
  gain:
    type: number
    default: 100000",
        symbol_path: Some("M20,10 V90 L80,50 Z M10,25 H20 M10,75 H20 M80,50 H90"),
    },
    ElectronicComponent {
        id: "bjt_npn",
        name: "NPN Transistor",
        category: ComponentCategory::Semiconductor,
        description: "A bipolar junction transistor (BJT) where the majority charge carriers are electrons.",
        yaml_definition: "\
name: NPN Transistor
designator: Q
pins:
  - number: 1
    name: Base
  - number: 2
    name: Collector
  - number: 3
    name: Emitter
parameters:
  beta:
    type: number
    default: 100",
        // Rough representation
        symbol_path: Some("M30,20 V80 M30,50 H10 M30,30 L60,10 M30,70 L60,90 L55,80 M58,86 L53,92"),
    },
];

/// One symbol per component, in the same order.
pub static SYMBOLS: LazyLock<Vec<SymbolAsset>> =
    LazyLock::new(|| COMPONENTS.iter().map(SymbolAsset::from_component).collect());

pub const SAMPLE_SCHEMA: &str = r##"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "Component Definition",
  "type": "object",
  "required": ["name", "designator", "pins"],
  "properties": {
    "name": { "type": "string" },
    "designator": { "type": "string", "pattern": "^[A-Z]+$" },
    "pins": {
      "type": "array",
      "items": {
        "type": "object",
        "required": ["number"],
        "properties": {
          "number": { "type": "integer" },
          "name": { "type": ["string", "null"] }
        }
      }
    },
    "parameters": { "type": "object" }
  }
}"##;

impl SymbolAsset {
    fn from_component(component: &ElectronicComponent) -> Self {
        let path = component
            .symbol_path
            .map(|d| format!(r#"<path d="{d}"/>"#))
            .unwrap_or_default();
        Self {
            id: format!("sym_{}", component.id),
            name: component.name,
            category: component.category,
            svg_content: format!(
                r#"<svg viewBox="0 0 100 100" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" xmlns="http://www.w3.org/2000/svg">{path}</svg>"#
            ),
        }
    }
}

pub fn components() -> &'static [ElectronicComponent] {
    &COMPONENTS
}

pub fn symbols() -> &'static [SymbolAsset] {
    &SYMBOLS
}

/// Components whose name or category label contains `term`, ignoring case.
/// An empty term matches everything.
pub fn search(term: &str) -> Vec<&'static ElectronicComponent> {
    let needle = term.trim().to_lowercase();
    COMPONENTS
        .iter()
        .filter(|c| {
            needle.is_empty()
                || c.name.to_lowercase().contains(&needle)
                || c.category.label().to_lowercase().contains(&needle)
        })
        .collect()
}
