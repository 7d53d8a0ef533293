//! Model id decoding.

use anyhow::Result;
use clap::Args;
use nameplate_model_id::ModelId;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{print_output, print_single, OutputFormat};

use super::CommandContext;

#[derive(Debug, Args)]
pub struct DecodeCommand {
    /// Canonical model id, e.g. `myproject.production.myModel`.
    canonical: String,
}

#[derive(Debug, Serialize, Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: String,

    #[tabled(rename = "Value")]
    value: String,
}

impl DecodeCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let model = ctx.settings.codec().decode(&self.canonical)?;

        match ctx.format {
            OutputFormat::Table => print_output(&field_rows(&model), OutputFormat::Table),
            OutputFormat::Json => print_single(&model),
        }

        Ok(())
    }
}

fn field_rows(model: &ModelId) -> Vec<FieldRow> {
    let mut rows = vec![FieldRow {
        field: "name".to_string(),
        value: model.name.clone(),
    }];
    if let Some(env) = &model.env {
        rows.push(FieldRow {
            field: "app.env".to_string(),
            value: env.clone(),
        });
    }
    if let Some(app) = &model.app {
        rows.push(FieldRow {
            field: "app.name".to_string(),
            value: app.clone(),
        });
    }
    rows.extend(model.tags.iter().map(|(key, value)| FieldRow {
        field: format!("app.tags.{key}"),
        value: value.clone(),
    }));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_list_only_decoded_fields() {
        let model = ModelId::new("myModel")
            .with_env("production")
            .with_tag("project", "myproject");

        let rows: Vec<_> = field_rows(&model)
            .into_iter()
            .map(|row| (row.field, row.value))
            .collect();

        assert_eq!(
            rows,
            vec![
                ("name".to_string(), "myModel".to_string()),
                ("app.env".to_string(), "production".to_string()),
                ("app.tags.project".to_string(), "myproject".to_string()),
            ]
        );
    }
}
