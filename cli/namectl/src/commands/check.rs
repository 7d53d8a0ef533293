//! Configuration check.

use anyhow::Result;
use clap::Args;
use nameplate_config::Settings;
use nameplate_naming::{CallValues, ResourceKind};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{print_info, print_output, print_single, print_success, OutputFormat};

use super::CommandContext;

#[derive(Debug, Args)]
pub struct CheckCommand {}

#[derive(Debug, Serialize, Tabled)]
struct KindRow {
    #[tabled(rename = "Kind")]
    kind: ResourceKind,

    #[tabled(rename = "Pattern")]
    pattern: String,

    #[tabled(rename = "Delimiter")]
    delimiter: String,

    /// The resolved name, with call-scoped placeholders shown as `<name>`.
    #[tabled(rename = "Example")]
    example: String,
}

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    env: &'a str,
    name: &'a str,
    namespace: &'a str,
    domain_pattern: Option<&'a str>,
    kinds: Vec<KindRow>,
}

impl CheckCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let settings = &ctx.settings;
        let identity = settings.identity();
        let namespace = identity.namespace()?;
        let rows = kind_rows(settings)?;

        match ctx.format {
            OutputFormat::Table => {
                print_info(&format!(
                    "{} ({}), namespace '{}'",
                    identity.name(),
                    identity.env(),
                    namespace
                ));
                match settings.codec().domain_pattern() {
                    Some(domain) => print_info(&format!("model id domain pattern '{}'", domain.as_str())),
                    None => print_info("no model id domain pattern configured"),
                }
                print_output(&rows, OutputFormat::Table);
                print_success("naming configuration is valid");
            }
            OutputFormat::Json => print_single(&CheckReport {
                env: identity.env(),
                name: identity.name(),
                namespace,
                domain_pattern: settings.codec().domain_pattern().map(|d| d.as_str()),
                kinds: rows,
            }),
        }

        Ok(())
    }
}

fn kind_rows(settings: &Settings) -> Result<Vec<KindRow>> {
    settings
        .registry()
        .iter()
        .map(|(kind, naming)| {
            let mut values = CallValues::new();
            for placeholder in kind.call_scope() {
                values.insert(*placeholder, format!("<{placeholder}>"));
            }
            Ok(KindRow {
                kind,
                pattern: naming.pattern().to_string(),
                delimiter: naming.delimiter().to_string(),
                example: settings.resolve_name(kind, &values)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nameplate_config::LoadOptions;
    use nameplate_testing::{write_config, LOGISTICS_YAML};
    use tempfile::tempdir;

    #[test]
    fn rows_cover_every_registered_kind() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "nameplate.yaml", LOGISTICS_YAML).unwrap();
        let settings = Settings::load(&LoadOptions::default().with_file(path).without_env()).unwrap();

        let rows = kind_rows(&settings).unwrap();
        assert_eq!(rows.len(), ResourceKind::ALL.len());

        let queue = rows.iter().find(|row| row.kind == ResourceKind::Queue).unwrap();
        assert_eq!(queue.example, "logistics-production-<queueId>");

        let metric = rows
            .iter()
            .find(|row| row.kind == ResourceKind::MetricNamespace)
            .unwrap();
        assert_eq!(metric.example, "logistics/production");
    }
}
