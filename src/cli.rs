//! `record-i18n` コマンドライン
//!
//! JSON ファイルに保存したストアに対してレコードを作成・更新・参照します。
//! `<name>` は名前付きアクセサ（`title` や `title_it`）です。

use std::path::PathBuf;

use clap::{
    Parser,
    Subcommand,
};
use thiserror::Error;

use crate::config::{
    ConfigError,
    ConfigManager,
};
use crate::model::AccessorError;
use crate::record::{
    SaveError,
    TranslatedRecord,
};
use crate::repository::{
    MemoryStore,
    RepositoryError,
};
use crate::types::RecordId;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Unknown model '{0}' (register it under \"models\" in .record-i18n.json)")]
    UnknownModel(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error(transparent)]
    Accessor(#[from] AccessorError),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// `<name>=<value>` の組
pub type Assignment = (String, String);

/// Translated attributes of records kept in a JSON store file
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "record-i18n")]
#[command(version)]
#[command(about = "Read and write translated record attributes", long_about = None)]
pub struct Invocation {
    /// Current locale (defaults to the configured default locale)
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Store file (created on first write)
    pub store: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a record from <name>=<value> pairs
    Create {
        model: String,
        #[arg(required = true, value_parser = parse_assignment)]
        assignments: Vec<Assignment>,
    },
    /// Print one attribute as JSON (null when missing)
    Get { model: String, id: RecordId, name: String },
    /// Update a record from <name>=<value> pairs
    Set {
        model: String,
        id: RecordId,
        #[arg(required = true, value_parser = parse_assignment)]
        assignments: Vec<Assignment>,
    },
    /// Print one translation row per available locale
    Translations { model: String, id: RecordId },
    /// Destroy a record and all of its translations
    Destroy { model: String, id: RecordId },
}

/// `<name>=<value>` を解析する（値は空でもよい）
fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected <name>=<value>, got '{raw}'"))
}

/// コマンドを実行し、標準出力に書く内容を返す
///
/// ストアを変更するコマンドは成功後にファイルへ書き戻します。
pub async fn run(invocation: Invocation, config: &ConfigManager) -> Result<String, CliError> {
    let model_for =
        |name: &str| config.model(name).ok_or_else(|| CliError::UnknownModel(name.to_string()));

    let ctx = config.context(invocation.locale.as_deref());
    tracing::debug!(locale = %ctx.locale, store = ?invocation.store, "Running command");

    let mut store = MemoryStore::open(&invocation.store).await?;

    let (output, modified) = match invocation.command {
        Command::Create { model, assignments } => {
            let mut record = TranslatedRecord::new(model_for(&model)?);
            for (name, value) in assignments {
                record.write(&name, value, &ctx)?;
            }
            let id = record.save(&mut store).await?;
            (format!("Created {model} {id}"), true)
        }
        Command::Get { model, id, name } => {
            let record = TranslatedRecord::load(model_for(&model)?, id, &store).await?;
            (serde_json::to_string(&record.read(&name, &ctx)?)?, false)
        }
        Command::Set { model, id, assignments } => {
            let mut record = TranslatedRecord::load(model_for(&model)?, id, &store).await?;
            for (name, value) in assignments {
                record.write(&name, value, &ctx)?;
            }
            record.save(&mut store).await?;
            (format!("Updated {model} {id}"), true)
        }
        Command::Translations { model, id } => {
            let record = TranslatedRecord::load(model_for(&model)?, id, &store).await?;
            let rows: Vec<_> =
                record.all_translations(&ctx).into_iter().map(|(_, row)| row).collect();
            (serde_json::to_string_pretty(&rows)?, false)
        }
        Command::Destroy { model, id } => {
            let record = TranslatedRecord::load(model_for(&model)?, id, &store).await?;
            let removed = record.destroy(&mut store).await?;
            (format!("Destroyed {model} {id} ({removed} translations)"), true)
        }
    };

    if modified {
        store.write_to(&invocation.store).await?;
    }

    Ok(output)
}
