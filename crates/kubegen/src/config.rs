use kubegen_build::Markers;
use kubegen_naming::NamingConfig;
use serde::{Deserialize, Serialize};

///
/// Config
///
/// The full configuration surface the core consumes. Defaults: markers
/// `kube:object` / `kube:list` / `kube:kind`, no package overrides, output
/// template `{package}/zz_generated_kubetype.rs`, and the weakest identity
/// predicate (a kube object must declare at least one field).
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub naming: NamingConfig,

    #[serde(default)]
    pub markers: Markers,
}
