//! 設定
//!
//! JSON の設定ファイルとコマンドライン引数をまとめる。

use crate::error::ConfigError;
use crate::logging::LogLevel;
use crate::mask::CaretSettle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "phonebook";

/// アプリケーション設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 連絡先ファイル（未指定時はデータディレクトリの `contacts.json`）
    pub store_path: Option<PathBuf>,
    /// ファイルに保存せずメモリだけで動かす
    pub in_memory: bool,
    /// ログファイル（未指定時はキャッシュディレクトリの `phonebook.log`）
    pub log_file: Option<PathBuf>,
    pub log_level: LogLevel,
    /// キャレット補正のタイミング
    pub caret_settle: CaretSettle,
    /// イベント待ちのタイムアウト（ミリ秒）
    pub poll_interval_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            in_memory: false,
            log_file: None,
            log_level: LogLevel::Info,
            caret_settle: CaretSettle::Deferred,
            poll_interval_ms: 100,
        }
    }
}

/// 連絡先の保存先
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    Memory,
    File(PathBuf),
}

impl AppConfig {
    /// 設定ファイルを読む（存在しなければ既定値）
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|err| invalid_file(path, err))?;
        let config: AppConfig =
            serde_json::from_str(&content).map_err(|err| invalid_file(path, err))?;
        config.validate()?;
        Ok(config)
    }

    /// 引数の指定を反映した設定を作る
    pub fn from_cli(options: &CliOptions) -> Result<Self, ConfigError> {
        let path = match &options.config_path {
            Some(path) => path.clone(),
            None => match default_config_path() {
                Some(path) => path,
                None => return Ok(Self::default().merged_with(options)),
            },
        };
        Ok(Self::load(&path)?.merged_with(options))
    }

    /// 引数による上書き
    pub fn merged_with(&self, options: &CliOptions) -> AppConfig {
        AppConfig {
            store_path: options
                .store_path
                .clone()
                .or_else(|| self.store_path.clone()),
            in_memory: options.in_memory || self.in_memory,
            log_file: options.log_file.clone().or_else(|| self.log_file.clone()),
            ..self.clone()
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "poll_interval_ms".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    pub fn store_location(&self) -> Option<StoreLocation> {
        if self.in_memory {
            return Some(StoreLocation::Memory);
        }
        match &self.store_path {
            Some(path) => Some(StoreLocation::File(path.clone())),
            None => default_store_path().map(StoreLocation::File),
        }
    }

    pub fn resolve_log_path(&self) -> Option<PathBuf> {
        match &self.log_file {
            Some(path) => Some(path.clone()),
            None => default_log_path(),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn invalid_file(path: &Path, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidFile {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
}

fn default_store_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join("contacts.json"))
}

fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(APP_DIR).join("phonebook.log"))
}

/// コマンドライン引数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub config_path: Option<PathBuf>,
    pub store_path: Option<PathBuf>,
    pub in_memory: bool,
    pub log_file: Option<PathBuf>,
    pub show_help: bool,
}

impl CliOptions {
    pub const USAGE: &'static str = "\
Usage: phonebook [OPTIONS]

Options:
  --config <path>  設定ファイル
  --store <path>   連絡先ファイル
  --memory         保存せずメモリ上で動かす
  --log <path>     ログファイル
  -h, --help       このヘルプを表示";

    /// 引数を解析する（プログラム名は含めない）
    pub fn parse<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = CliOptions::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => options.config_path = Some(required_value(&arg, args.next())?),
                "--store" => options.store_path = Some(required_value(&arg, args.next())?),
                "--log" => options.log_file = Some(required_value(&arg, args.next())?),
                "--memory" => options.in_memory = true,
                "-h" | "--help" => options.show_help = true,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "argument".to_string(),
                        value: arg,
                    })
                }
            }
        }

        Ok(options)
    }
}

fn required_value(option: &str, value: Option<String>) -> Result<PathBuf, ConfigError> {
    match value {
        Some(value) if !value.starts_with("--") => Ok(PathBuf::from(value)),
        _ => Err(ConfigError::MissingValue {
            option: option.to_string(),
        }),
    }
}
