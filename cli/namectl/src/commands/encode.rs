//! Model id encoding.

use anyhow::Result;
use clap::Args;
use nameplate_model_id::ModelId;
use serde::Serialize;

use crate::output::{print_single, OutputFormat};

use super::{parse_key_value, CommandContext};

#[derive(Debug, Args)]
pub struct EncodeCommand {
    /// Model name.
    #[arg(long)]
    name: String,

    /// Environment; defaults to `app.env`.
    #[arg(long)]
    env: Option<String>,

    /// Application name; defaults to `app.name`.
    #[arg(long)]
    app: Option<String>,

    /// Tag value, e.g. `--tag project=billing`. Defaults to `app.tags`.
    #[arg(long = "tag", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    tags: Vec<(String, String)>,
}

#[derive(Debug, Serialize)]
struct Encoded {
    canonical: String,
    model: ModelId,
}

impl EncodeCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let model = self.model_id();
        let canonical = ctx.settings.codec().encode(&model)?;

        match ctx.format {
            OutputFormat::Table => println!("{canonical}"),
            OutputFormat::Json => print_single(&Encoded { canonical, model }),
        }

        Ok(())
    }

    fn model_id(&self) -> ModelId {
        ModelId {
            name: self.name.clone(),
            env: self.env.clone(),
            app: self.app.clone(),
            tags: self.tags.iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nameplate_model_id::{DomainPattern, ModelIdCodec};
    use nameplate_testing::{myproject_identity, MYPROJECT_DOMAIN_PATTERN};
    use std::sync::Arc;

    #[test]
    fn flags_override_identity_fields() {
        let cmd = EncodeCommand {
            name: "myModel".to_string(),
            env: Some("staging".to_string()),
            app: None,
            tags: vec![("project".to_string(), "billing".to_string())],
        };
        let codec = ModelIdCodec::new(
            Arc::new(myproject_identity()),
            Some(DomainPattern::new(MYPROJECT_DOMAIN_PATTERN)),
        )
        .unwrap();

        assert_eq!(codec.encode(&cmd.model_id()).unwrap(), "billing.staging.myModel");
    }
}
