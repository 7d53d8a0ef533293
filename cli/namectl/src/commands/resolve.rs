//! Resource name resolution.

use anyhow::{anyhow, Result};
use clap::Args;
use nameplate_naming::{CallPlaceholder, CallValues, ResourceKind};
use serde::Serialize;

use crate::output::{print_single, OutputFormat};

use super::{parse_key_value, CommandContext};

#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Resource kind (queue, topic, table, stream, cache, metric, tracing).
    kind: ResourceKind,

    /// Call-scoped value, e.g. `--set queueId=orders`.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    set: Vec<(String, String)>,
}

#[derive(Debug, Serialize)]
struct Resolved {
    kind: ResourceKind,
    name: String,
}

impl ResolveCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let values = call_values(&self.set)?;
        let name = ctx.settings.resolve_name(self.kind, &values)?;

        match ctx.format {
            OutputFormat::Table => println!("{name}"),
            OutputFormat::Json => print_single(&Resolved {
                kind: self.kind,
                name,
            }),
        }

        Ok(())
    }
}

fn call_values(pairs: &[(String, String)]) -> Result<CallValues> {
    let mut values = CallValues::new();
    for (key, value) in pairs {
        let placeholder: CallPlaceholder = key.parse().map_err(|()| {
            anyhow!(
                "unknown call-scoped placeholder '{key}' (expected one of: {})",
                CallPlaceholder::ALL
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })?;
        values.insert(placeholder, value.clone());
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_values_from_pairs() {
        let values = call_values(&[
            ("queueId".to_string(), "orders".to_string()),
            ("cacheName".to_string(), "sessions".to_string()),
        ])
        .unwrap();
        assert_eq!(values.get(CallPlaceholder::QueueId), Some("orders"));
        assert_eq!(values.get(CallPlaceholder::CacheName), Some("sessions"));
    }

    #[test]
    fn unknown_call_placeholder() {
        let err = call_values(&[("queue".to_string(), "orders".to_string())]).unwrap_err();
        assert!(err.to_string().contains("queueId"));
    }
}
