//! Deterministic mapping from schema qualified names to target identifiers.
//!
//! The naming system is consulted by the classifier and the emitter; it is
//! built once per run from the scanned graph and read-only afterwards, so
//! concurrent readers are safe. Identical input and configuration always
//! produce identical names; collisions are settled with a suffix derived
//! from the originating file path, never anything random or time-based.

use kubegen_schema::graph::TypeGraph;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// NamingConfig
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NamingConfig {
    /// Schema file path → target package, overriding the declared package.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub package_overrides: BTreeMap<String, String>,

    /// Output path pattern; `{package}` expands to the target package with
    /// dots as path separators.
    #[serde(default = "NamingConfig::default_template")]
    pub output_file_template: String,
}

impl NamingConfig {
    fn default_template() -> String {
        "{package}/zz_generated_kubetype.rs".to_string()
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            package_overrides: BTreeMap::new(),
            output_file_template: Self::default_template(),
        }
    }
}

///
/// ResolvedName
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResolvedName {
    pub type_name: String,
    pub package: String,
    pub file_path: String,
}

///
/// NameSystem
///

pub trait NameSystem {
    /// Resolve a fully-qualified schema name to its target identifiers.
    fn resolve(&self, qualified: &str) -> Option<&ResolvedName>;
}

///
/// DefaultNameSystem
///
/// Built-in conflict-avoidance rules: first claimant of a
/// (type name, package) pair keeps the plain name; later claimants get the
/// camel-cased stem of their declaring file appended, then the full path,
/// then a position counter. All stages are deterministic in scan order.
///

#[derive(Clone, Debug, Default)]
pub struct DefaultNameSystem {
    resolved: BTreeMap<String, ResolvedName>,
}

impl DefaultNameSystem {
    #[must_use]
    pub fn from_graph(graph: &TypeGraph, config: &NamingConfig) -> Self {
        let mut taken: BTreeMap<(String, String), String> = BTreeMap::new();
        let mut resolved = BTreeMap::new();

        for node in graph.nodes() {
            let package = config
                .package_overrides
                .get(&node.file)
                .cloned()
                .unwrap_or_else(|| node.package.clone());

            let type_name = claim(&mut taken, &package, &node.ident, &node.file, &node.qualified);
            let file_path = render_path(&config.output_file_template, &package);

            resolved.insert(
                node.qualified.clone(),
                ResolvedName {
                    type_name,
                    package,
                    file_path,
                },
            );
        }

        Self { resolved }
    }

    /// All resolved names in qualified-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedName)> {
        self.resolved.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl NameSystem for DefaultNameSystem {
    fn resolve(&self, qualified: &str) -> Option<&ResolvedName> {
        self.resolved.get(qualified)
    }
}

/// Claim a unique type name within a package, disambiguating on collision.
fn claim(
    taken: &mut BTreeMap<(String, String), String>,
    package: &str,
    ident: &str,
    file: &str,
    qualified: &str,
) -> String {
    let mut candidates = vec![ident.to_string()];
    candidates.push(format!("{ident}{}", camel(file_stem(file))));
    candidates.push(format!("{ident}{}", camel(file)));

    for candidate in candidates {
        let key = (package.to_string(), candidate.clone());
        if !taken.contains_key(&key) {
            taken.insert(key, qualified.to_string());
            return candidate;
        }
    }

    // Last resort: position counter, still deterministic in scan order.
    let mut counter = 2usize;
    loop {
        let candidate = format!("{ident}{counter}");
        let key = (package.to_string(), candidate.clone());
        if !taken.contains_key(&key) {
            taken.insert(key, qualified.to_string());
            return candidate;
        }
        counter += 1;
    }
}

fn render_path(template: &str, package: &str) -> String {
    let rendered = template.replace("{package}", &package.replace('.', "/"));

    rendered.trim_start_matches('/').to_string()
}

fn file_stem(file: &str) -> &str {
    let name = file.rsplit('/').next().unwrap_or(file);

    name.split('.').next().unwrap_or(name)
}

/// Camel-case a path-ish string: `legacy/widget.proto` → `LegacyWidgetProto`.
fn camel(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut upper_next = true;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if upper_next {
                out.extend(ch.to_uppercase());
                upper_next = false;
            } else {
                out.push(ch);
            }
        } else {
            upper_next = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kubegen_schema::prelude::*;

    fn graph(files: Vec<SchemaFile>) -> TypeGraph {
        Builder::build(&files).unwrap()
    }

    fn two_widgets() -> TypeGraph {
        graph(vec![
            SchemaFile::new("current/widget.proto", "pkg.current")
                .message(SchemaMessage::new("Widget")),
            SchemaFile::new("legacy/widget_v1.proto", "pkg.legacy")
                .message(SchemaMessage::new("Widget")),
        ])
    }

    #[test]
    fn plain_names_without_collision() {
        let names = DefaultNameSystem::from_graph(&two_widgets(), &NamingConfig::default());

        let current = names.resolve(".pkg.current.Widget").unwrap();
        assert_eq!(current.type_name, "Widget");
        assert_eq!(current.package, "pkg.current");
        assert_eq!(current.file_path, "pkg/current/zz_generated_kubetype.rs");
    }

    #[test]
    fn collision_gets_file_stem_suffix() {
        let mut config = NamingConfig::default();
        config
            .package_overrides
            .insert("current/widget.proto".to_string(), "api".to_string());
        config
            .package_overrides
            .insert("legacy/widget_v1.proto".to_string(), "api".to_string());

        let names = DefaultNameSystem::from_graph(&two_widgets(), &config);

        assert_eq!(names.resolve(".pkg.current.Widget").unwrap().type_name, "Widget");
        assert_eq!(
            names.resolve(".pkg.legacy.Widget").unwrap().type_name,
            "WidgetWidgetV1"
        );
    }

    #[test]
    fn package_override_rewrites_output_path() {
        let mut config = NamingConfig::default();
        config
            .package_overrides
            .insert("current/widget.proto".to_string(), "apis.v1".to_string());

        let names = DefaultNameSystem::from_graph(&two_widgets(), &config);
        assert_eq!(
            names.resolve(".pkg.current.Widget").unwrap().file_path,
            "apis/v1/zz_generated_kubetype.rs"
        );
    }

    #[test]
    fn empty_package_keeps_a_relative_path() {
        assert_eq!(
            render_path("{package}/generated.rs", ""),
            "generated.rs"
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        const IDENTS: [&str; 4] = ["Widget", "Gear", "Axle", "Sprocket"];

        fn files(picks: &[(usize, usize)]) -> Vec<SchemaFile> {
            let mut one = SchemaFile::new("one.proto", "p1");
            let mut two = SchemaFile::new("two.proto", "p2");

            for (i, &(a, b)) in picks.iter().enumerate() {
                // distinct idents per file, duplicates across files allowed
                one = one.message(SchemaMessage::new(format!("{}{i}", IDENTS[a % 4])));
                two = two.message(SchemaMessage::new(format!("{}{i}", IDENTS[b % 4])));
            }

            vec![one, two]
        }

        proptest! {
            #[test]
            fn resolution_is_deterministic_and_collision_free(
                picks in proptest::collection::vec((0usize..4, 0usize..4), 1..8)
            ) {
                let mut config = NamingConfig::default();
                config.package_overrides.insert("one.proto".to_string(), "api".to_string());
                config.package_overrides.insert("two.proto".to_string(), "api".to_string());

                let g = graph(files(&picks));
                let first = DefaultNameSystem::from_graph(&g, &config);
                let second = DefaultNameSystem::from_graph(&g, &config);

                let a: Vec<_> = first.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
                let b: Vec<_> = second.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
                prop_assert_eq!(a, b);

                let mut seen = std::collections::BTreeSet::new();
                for (_, name) in first.iter() {
                    prop_assert!(seen.insert((name.package.clone(), name.type_name.clone())));
                }
            }
        }
    }
}
